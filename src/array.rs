//! Batch serialization to and from Arrow binary arrays.
//!
//! Each array slot holds one serialized geometry; null slots map to `None`.

use arrow_array::builder::GenericBinaryBuilder;
use arrow_array::{Array, GenericBinaryArray, OffsetSizeTrait};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::api::SerdeOptions;
use crate::error::GeomSerdeResult;
use crate::provider::GeometryProvider;
use crate::reader::read_geometry;
use crate::writer::write_geometry;

/// Serialize each geometry into one slot of a binary array.
pub fn serialize_to_binary_array<P: GeometryProvider, O: OffsetSizeTrait>(
    provider: &P,
    geoms: &[Option<P::Geometry>],
    options: &SerdeOptions,
) -> GeomSerdeResult<GenericBinaryArray<O>> {
    let mode = options.copy_mode(provider)?;

    let mut builder = GenericBinaryBuilder::<O>::with_capacity(geoms.len(), 0);
    for maybe_geom in geoms {
        if let Some(geom) = maybe_geom {
            builder.append_value(write_geometry(provider, mode, geom)?);
        } else {
            builder.append_null();
        }
    }

    Ok(builder.finish())
}

/// Deserialize every slot of a binary array. Fails on the first slot that cannot be decoded.
pub fn deserialize_binary_array<P: GeometryProvider, O: OffsetSizeTrait>(
    provider: &P,
    array: &GenericBinaryArray<O>,
    options: &SerdeOptions,
) -> GeomSerdeResult<Vec<Option<P::Geometry>>> {
    let mode = options.copy_mode(provider)?;

    let mut geoms = Vec::new();
    geoms.try_reserve_exact(array.len())?;
    for maybe_buf in array.iter() {
        let geom = match maybe_buf {
            Some(buf) => Some(read_geometry(provider, mode, buf)?.0),
            None => None,
        };
        geoms.push(geom);
    }
    Ok(geoms)
}

/// Deserialize every slot of a binary array on the rayon thread pool.
///
/// The provider is shared between threads, so it must be [Sync].
#[cfg(feature = "rayon")]
pub fn deserialize_binary_array_par<P, O>(
    provider: &P,
    array: &GenericBinaryArray<O>,
    options: &SerdeOptions,
) -> GeomSerdeResult<Vec<Option<P::Geometry>>>
where
    P: GeometryProvider + Sync,
    P::Geometry: Send,
    O: OffsetSizeTrait,
{
    let mode = options.copy_mode(provider)?;

    (0..array.len())
        .into_par_iter()
        .map(|i| {
            if array.is_null(i) {
                Ok(None)
            } else {
                Ok(Some(read_geometry(provider, mode, array.value(i))?.0))
            }
        })
        .collect()
}
