//! Geometry and coordinate type tags carried in a serialized buffer.

use std::fmt::Display;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::{GeomSerdeError, GeomSerdeResult};

/// The coordinate layout of a serialized geometry.
///
/// Only [CoordType::XY] and [CoordType::XYZ] are ever written, since geometry providers cannot
/// report measure values. The other two are valid wire values and are accepted on read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum CoordType {
    /// Two-dimensional.
    XY = 1,

    /// Three-dimensional.
    XYZ = 2,

    /// XYM (2D with measure).
    XYM = 3,

    /// XYZM (3D with measure).
    XYZM = 4,
}

impl CoordType {
    /// The coordinate type for the given flags. `has_m` is ignored: measures are never written.
    pub fn from_flags(has_z: bool, _has_m: bool) -> Self {
        if has_z {
            CoordType::XYZ
        } else {
            CoordType::XY
        }
    }

    /// The number of ordinates stored per coordinate.
    pub fn size(&self) -> usize {
        match self {
            CoordType::XY => 2,
            CoordType::XYZ => 3,
            CoordType::XYM => 3,
            CoordType::XYZM => 4,
        }
    }

    /// The number of bytes stored per coordinate.
    pub fn bytes_per_coord(&self) -> usize {
        self.size() * 8
    }

    pub fn has_z(&self) -> bool {
        matches!(self, CoordType::XYZ | CoordType::XYZM)
    }

    pub fn has_m(&self) -> bool {
        matches!(self, CoordType::XYM | CoordType::XYZM)
    }

    pub(crate) fn from_wire(value: u8) -> GeomSerdeResult<Self> {
        Self::try_from_primitive(value).map_err(|_| GeomSerdeError::UnknownCoordinateType(value))
    }
}

impl Display for CoordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordType::XY => write!(f, "XY"),
            CoordType::XYZ => write!(f, "XYZ"),
            CoordType::XYM => write!(f, "XYM"),
            CoordType::XYZM => write!(f, "XYZM"),
        }
    }
}

/// The geometry types that can appear in a serialized buffer header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum GeometryType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    /// Reserved; encoding and decoding are not supported yet.
    MultiLineString = 5,
    /// Reserved; encoding and decoding are not supported yet.
    MultiPolygon = 6,
    GeometryCollection = 7,
}

impl GeometryType {
    pub(crate) fn from_wire(value: u8) -> GeomSerdeResult<Self> {
        Self::try_from_primitive(value).map_err(|_| GeomSerdeError::UnknownGeometryType(value))
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        };
        write!(f, "{name}")
    }
}

/// Sizing information for the coordinates of one geometry.
///
/// Built from a provider geometry when writing, or from a buffer header when reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoordSeqInfo {
    /// Dimension of the coordinate sequences handed to or read from the provider (2 or 3)
    pub dims: usize,
    pub has_z: bool,
    /// Always false for provider sequences
    pub has_m: bool,
    /// Layout of the coordinates inside the buffer
    pub coord_type: CoordType,
    pub bytes_per_coord: usize,
    pub num_coords: usize,
    pub total_bytes: usize,
}

impl CoordSeqInfo {
    /// Info for `num_coords` coordinates with the given provider dimension.
    pub fn from_dims(dims: usize, num_coords: usize) -> GeomSerdeResult<Self> {
        let has_z = dims >= 3;
        let coord_type = CoordType::from_flags(has_z, false);
        Self::new(coord_type, num_coords)
    }

    /// Info for `num_coords` coordinates stored with the given wire layout.
    pub fn new(coord_type: CoordType, num_coords: usize) -> GeomSerdeResult<Self> {
        let bytes_per_coord = coord_type.bytes_per_coord();
        let total_bytes = bytes_per_coord.checked_mul(num_coords).ok_or_else(|| {
            GeomSerdeError::BadBuffer(format!("{num_coords} coordinates overflow buffer size"))
        })?;
        let has_z = coord_type.has_z();
        Ok(Self {
            dims: if has_z { 3 } else { 2 },
            has_z,
            has_m: false,
            coord_type,
            bytes_per_coord,
            num_coords,
            total_bytes,
        })
    }

    /// The number of ordinates each coordinate occupies in the buffer.
    pub fn wire_ordinates(&self) -> usize {
        self.coord_type.size()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coord_type_widths() {
        assert_eq!(CoordType::XY.bytes_per_coord(), 16);
        assert_eq!(CoordType::XYZ.bytes_per_coord(), 24);
        assert_eq!(CoordType::XYM.bytes_per_coord(), 24);
        assert_eq!(CoordType::XYZM.bytes_per_coord(), 32);
    }

    #[test]
    fn coord_type_from_flags_drops_m() {
        assert_eq!(CoordType::from_flags(false, false), CoordType::XY);
        assert_eq!(CoordType::from_flags(true, false), CoordType::XYZ);
        assert_eq!(CoordType::from_flags(false, true), CoordType::XY);
        assert_eq!(CoordType::from_flags(true, true), CoordType::XYZ);
    }

    #[test]
    fn wire_values() {
        assert_eq!(u8::from(CoordType::XYZM), 4);
        assert_eq!(u8::from(GeometryType::GeometryCollection), 7);
        assert_eq!(GeometryType::from_wire(3).unwrap(), GeometryType::Polygon);
        assert!(matches!(
            GeometryType::from_wire(0),
            Err(GeomSerdeError::UnknownGeometryType(0))
        ));
        assert!(matches!(
            GeometryType::from_wire(8),
            Err(GeomSerdeError::UnknownGeometryType(8))
        ));
        assert!(matches!(
            CoordType::from_wire(5),
            Err(GeomSerdeError::UnknownCoordinateType(5))
        ));
    }

    #[test]
    fn coord_seq_info() {
        let info = CoordSeqInfo::from_dims(3, 4).unwrap();
        assert_eq!(info.coord_type, CoordType::XYZ);
        assert_eq!(info.total_bytes, 96);
        assert!(info.has_z);
        assert!(!info.has_m);

        let info = CoordSeqInfo::new(CoordType::XYM, 2).unwrap();
        assert_eq!(info.dims, 2);
        assert_eq!(info.wire_ordinates(), 3);
        assert_eq!(info.total_bytes, info.bytes_per_coord * info.num_coords);
    }
}
