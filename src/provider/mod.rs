//! The geometry engine interface the codec is built on.
//!
//! The codec never owns a geometry representation of its own. Every read of an existing geometry
//! and every construction of a new one goes through a [GeometryProvider] passed explicitly into
//! each call. [memory::MemoryProvider] is a complete implementation over an owned, in-memory
//! geometry model.

pub mod geo;
pub mod memory;

use crate::error::{GeomSerdeError, GeomSerdeResult};

/// The type tag a provider reports for one of its geometries.
///
/// Unlike [crate::datatypes::GeometryType] this includes [ProviderGeometryType::LinearRing],
/// which providers can hold but which has no serialized form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderGeometryType {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

/// The kind of collection to construct from a list of children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionType {
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

/// Accessors and constructors for an external geometry engine.
///
/// Ring and child accessors borrow from the geometry they are called on. Ordinates are exchanged
/// as `f64`; measure values are never reported, so sequences are always 2D or 3D.
///
/// The bulk copy pair ([GeometryProvider::coord_seq_to_buffer] and
/// [GeometryProvider::coord_seq_from_buffer]) is optional. Providers that implement it must also
/// return `true` from [GeometryProvider::supports_bulk_copy]; the codec checks the flag once per
/// call and otherwise falls back to the per-coordinate accessors.
pub trait GeometryProvider {
    /// An owned geometry handle
    type Geometry;

    /// An owned coordinate sequence
    type CoordSeq;

    /// Whether the bulk coordinate copy functions are available.
    fn supports_bulk_copy(&self) -> bool {
        false
    }

    fn geometry_type(&self, geom: &Self::Geometry) -> GeomSerdeResult<ProviderGeometryType>;

    /// The spatial reference id of `geom`, 0 when unspecified.
    fn srid(&self, geom: &Self::Geometry) -> GeomSerdeResult<i32>;

    fn set_srid(&self, geom: &mut Self::Geometry, srid: i32) -> GeomSerdeResult<()>;

    /// The coordinate dimension of `geom`, either 2 or 3.
    fn coordinate_dimension(&self, geom: &Self::Geometry) -> GeomSerdeResult<usize>;

    /// The total number of coordinates in `geom`, summed over all rings and children.
    fn num_coordinates(&self, geom: &Self::Geometry) -> GeomSerdeResult<usize>;

    /// The coordinate sequence of a point, line string or linear ring.
    fn coord_seq<'a>(&self, geom: &'a Self::Geometry) -> GeomSerdeResult<&'a Self::CoordSeq>;

    fn exterior_ring<'a>(&self, geom: &'a Self::Geometry) -> GeomSerdeResult<&'a Self::Geometry>;

    fn num_interior_rings(&self, geom: &Self::Geometry) -> GeomSerdeResult<usize>;

    fn interior_ring_n<'a>(
        &self,
        geom: &'a Self::Geometry,
        n: usize,
    ) -> GeomSerdeResult<&'a Self::Geometry>;

    /// The number of children of a multi geometry or collection.
    fn num_geometries(&self, geom: &Self::Geometry) -> GeomSerdeResult<usize>;

    fn geometry_n<'a>(
        &self,
        geom: &'a Self::Geometry,
        n: usize,
    ) -> GeomSerdeResult<&'a Self::Geometry>;

    fn coord_seq_size(&self, seq: &Self::CoordSeq) -> GeomSerdeResult<usize>;

    fn coord_seq_dimensions(&self, seq: &Self::CoordSeq) -> GeomSerdeResult<usize>;

    fn coord_seq_get_xy(&self, seq: &Self::CoordSeq, idx: usize) -> GeomSerdeResult<(f64, f64)>;

    /// Read a 3D coordinate. Sequences without Z report `NaN` for it.
    fn coord_seq_get_xyz(
        &self,
        seq: &Self::CoordSeq,
        idx: usize,
    ) -> GeomSerdeResult<(f64, f64, f64)>;

    /// Create a sequence of `size` coordinates with `dims` ordinates each.
    fn coord_seq_create(&self, size: usize, dims: usize) -> GeomSerdeResult<Self::CoordSeq>;

    fn coord_seq_set_xy(
        &self,
        seq: &mut Self::CoordSeq,
        idx: usize,
        x: f64,
        y: f64,
    ) -> GeomSerdeResult<()>;

    fn coord_seq_set_xyz(
        &self,
        seq: &mut Self::CoordSeq,
        idx: usize,
        x: f64,
        y: f64,
        z: f64,
    ) -> GeomSerdeResult<()>;

    /// Copy all coordinates of `seq` into `out` as interleaved ordinates.
    ///
    /// `out` holds exactly `size * (2 + has_z + has_m)` values.
    fn coord_seq_to_buffer(
        &self,
        _seq: &Self::CoordSeq,
        _out: &mut [f64],
        _has_z: bool,
        _has_m: bool,
    ) -> GeomSerdeResult<()> {
        Err(missing_capability("coord_seq_to_buffer"))
    }

    /// Create a sequence of `size` coordinates from interleaved ordinates.
    fn coord_seq_from_buffer(
        &self,
        _buf: &[f64],
        _size: usize,
        _has_z: bool,
        _has_m: bool,
    ) -> GeomSerdeResult<Self::CoordSeq> {
        Err(missing_capability("coord_seq_from_buffer"))
    }

    fn create_empty_point(&self) -> GeomSerdeResult<Self::Geometry>;

    /// Create a 2D point. A point with `NaN` ordinates has no location and is empty.
    fn create_point_from_xy(&self, x: f64, y: f64) -> GeomSerdeResult<Self::Geometry>;

    /// Create a point from a sequence of zero or one coordinates.
    fn create_point(&self, seq: Self::CoordSeq) -> GeomSerdeResult<Self::Geometry>;

    fn create_line_string(&self, seq: Self::CoordSeq) -> GeomSerdeResult<Self::Geometry>;

    fn create_linear_ring(&self, seq: Self::CoordSeq) -> GeomSerdeResult<Self::Geometry>;

    /// Create a polygon from linear rings. An empty shell without holes is the empty polygon.
    fn create_polygon(
        &self,
        shell: Self::Geometry,
        holes: Vec<Self::Geometry>,
    ) -> GeomSerdeResult<Self::Geometry>;

    fn create_collection(
        &self,
        collection_type: CollectionType,
        geoms: Vec<Self::Geometry>,
    ) -> GeomSerdeResult<Self::Geometry>;
}

fn missing_capability(name: &str) -> GeomSerdeError {
    GeomSerdeError::Provider(format!(
        "bulk coordinate copy is not supported by this provider ({name})"
    ))
}
