use byteorder::{ByteOrder, NativeEndian};

use crate::datatypes::{CoordType, GeometryType};
use crate::error::{GeomSerdeError, GeomSerdeResult};

/// The byte length of the fixed header that starts every serialized geometry.
pub const HEADER_SIZE: usize = 8;

/// SRIDs are stored in 24 bits; higher bits are dropped.
const SRID_MASK: u32 = 0x00FF_FFFF;

/// The deepest geometry collection nesting accepted by the encoder and decoder.
pub(crate) const MAX_NESTING_DEPTH: usize = 128;

/// How coordinates move between a buffer and provider sequences, fixed once per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CopyMode {
    /// One bulk copy per coordinate sequence
    Bulk,
    /// One accessor call per coordinate
    PerOrdinate,
}

/// Round `offset` up to the next multiple of 8.
pub(crate) fn align8(offset: usize) -> usize {
    (offset + 7) & !7
}

/// The decoded 8-byte header of a serialized geometry.
///
/// Layout:
///
/// - byte 0: `(geometry_type << 4) | (coord_type << 1) | has_srid`
/// - bytes 1..4: big-endian 24-bit SRID, zero when `has_srid` is not set
/// - bytes 4..8: native-endian `i32` count. The number of coordinates for simple types, the
///   number of child geometries for a geometry collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeomHeader {
    pub geometry_type: GeometryType,
    pub coord_type: CoordType,
    pub srid: i32,
    pub count: i32,
}

impl GeomHeader {
    pub fn new(geometry_type: GeometryType, coord_type: CoordType, srid: i32, count: i32) -> Self {
        Self {
            geometry_type,
            coord_type,
            srid,
            count,
        }
    }

    /// Pack this header into its wire representation.
    ///
    /// SRIDs outside the unsigned 24-bit range are truncated, matching the format.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        let has_srid = u8::from(self.srid != 0);
        out[0] = (u8::from(self.geometry_type) << 4) | (u8::from(self.coord_type) << 1) | has_srid;

        let srid = (self.srid as u32) & SRID_MASK;
        out[1] = (srid >> 16) as u8;
        out[2] = (srid >> 8) as u8;
        out[3] = srid as u8;

        NativeEndian::write_i32(&mut out[4..8], self.count);
        out
    }

    /// Parse the header at the start of `buf`.
    pub fn decode(buf: &[u8]) -> GeomSerdeResult<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(GeomSerdeError::InvalidArgument(format!(
                "buffer of {} bytes is shorter than the {HEADER_SIZE} byte header",
                buf.len()
            )));
        }

        let preamble = buf[0];
        let geometry_type = preamble >> 4;
        let coord_type = (preamble & 0x0F) >> 1;
        let srid = if preamble & 0x01 != 0 {
            ((u32::from(buf[1]) << 16) | (u32::from(buf[2]) << 8) | u32::from(buf[3])) as i32
        } else {
            0
        };
        let count = NativeEndian::read_i32(&buf[4..8]);

        Ok(Self {
            geometry_type: GeometryType::from_wire(geometry_type)?,
            coord_type: CoordType::from_wire(coord_type)?,
            srid,
            count,
        })
    }
}
