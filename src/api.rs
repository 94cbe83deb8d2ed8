//! Entry points for serializing and deserializing single geometries.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::common::CopyMode;
use crate::error::{GeomSerdeError, GeomSerdeResult};
use crate::provider::GeometryProvider;
use crate::reader::read_geometry;
use crate::writer::write_geometry;

/// How coordinates are copied between buffers and provider coordinate sequences.
///
/// Both strategies produce identical buffers and geometries; they differ only in the number of
/// provider calls.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CoordCopy {
    /// Use bulk copy when the provider supports it.
    #[default]
    #[serde(rename = "auto")]
    Auto,

    /// Always use bulk copy. Fails when the provider does not support it.
    #[serde(rename = "bulk")]
    Bulk,

    /// Always copy one coordinate at a time.
    #[serde(rename = "per_ordinate")]
    PerOrdinate,
}

/// Options for [serialize_with_options] and [deserialize_with_options].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SerdeOptions {
    pub coord_copy: CoordCopy,
}

impl SerdeOptions {
    pub fn new(coord_copy: CoordCopy) -> Self {
        Self { coord_copy }
    }

    pub(crate) fn copy_mode<P: GeometryProvider>(&self, provider: &P) -> GeomSerdeResult<CopyMode> {
        let bulk = provider.supports_bulk_copy();
        let mode = match self.coord_copy {
            CoordCopy::Auto if bulk => CopyMode::Bulk,
            CoordCopy::Auto => CopyMode::PerOrdinate,
            CoordCopy::Bulk if bulk => CopyMode::Bulk,
            CoordCopy::Bulk => {
                return Err(GeomSerdeError::Provider(
                    "bulk coordinate copy was requested but is not supported by this provider"
                        .to_string(),
                ))
            }
            CoordCopy::PerOrdinate => CopyMode::PerOrdinate,
        };
        trace!("Resolved {:?} to {mode:?}", self.coord_copy);
        Ok(mode)
    }
}

/// Serialize a geometry with default options.
///
/// ```
/// use geomserde::provider::memory::{Geometry, MemoryProvider};
///
/// let provider = MemoryProvider::new();
/// let buf = geomserde::serialize(&provider, &Geometry::point(1., 2.)).unwrap();
/// assert_eq!(buf.len(), 24);
/// ```
pub fn serialize<P: GeometryProvider>(provider: &P, geom: &P::Geometry) -> GeomSerdeResult<Vec<u8>> {
    serialize_with_options(provider, geom, &SerdeOptions::default())
}

pub fn serialize_with_options<P: GeometryProvider>(
    provider: &P,
    geom: &P::Geometry,
    options: &SerdeOptions,
) -> GeomSerdeResult<Vec<u8>> {
    let mode = options.copy_mode(provider)?;
    write_geometry(provider, mode, geom)
}

/// Deserialize a geometry with default options.
///
/// Bytes after the end of the geometry are ignored.
///
/// ```
/// use geomserde::provider::memory::{Geometry, MemoryProvider};
///
/// let provider = MemoryProvider::new();
/// let geom = Geometry::point(1., 2.).with_srid(4326);
/// let buf = geomserde::serialize(&provider, &geom).unwrap();
/// assert_eq!(geomserde::deserialize(&provider, &buf).unwrap(), geom);
/// ```
pub fn deserialize<P: GeometryProvider>(provider: &P, buf: &[u8]) -> GeomSerdeResult<P::Geometry> {
    deserialize_with_options(provider, buf, &SerdeOptions::default())
}

pub fn deserialize_with_options<P: GeometryProvider>(
    provider: &P,
    buf: &[u8],
    options: &SerdeOptions,
) -> GeomSerdeResult<P::Geometry> {
    let (geom, _) = deserialize_prefix(provider, buf, options)?;
    Ok(geom)
}

/// Deserialize the geometry at the start of `buf` and return it with the number of bytes it
/// spans.
pub fn deserialize_prefix<P: GeometryProvider>(
    provider: &P,
    buf: &[u8],
    options: &SerdeOptions,
) -> GeomSerdeResult<(P::Geometry, usize)> {
    let mode = options.copy_mode(provider)?;
    read_geometry(provider, mode, buf).map_err(|err| {
        debug!(
            "Rejected serialized geometry with preamble {:?}: {err}",
            buf.first()
        );
        err
    })
}
