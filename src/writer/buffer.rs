use std::ops::Range;

use byteorder::{ByteOrder, NativeEndian};

use crate::common::{CopyMode, GeomHeader, HEADER_SIZE};
use crate::datatypes::{CoordSeqInfo, GeometryType};
use crate::error::{GeomSerdeError, GeomSerdeResult};
use crate::provider::GeometryProvider;

/// Convert a provider count into the `i32` stored on the wire.
pub(crate) fn wire_count(count: usize) -> GeomSerdeResult<i32> {
    i32::try_from(count).map_err(|_| {
        GeomSerdeError::InvalidArgument(format!("count {count} does not fit in a buffer header"))
    })
}

/// The header-only encoding shared by every empty geometry.
pub(crate) fn write_empty(
    geometry_type: GeometryType,
    info: &CoordSeqInfo,
    srid: i32,
) -> Vec<u8> {
    GeomHeader::new(geometry_type, info.coord_type, srid, 0)
        .encode()
        .to_vec()
}

/// Write state over one serialized geometry.
///
/// The buffer is allocated at its final size up front and then filled through two cursors: the
/// coordinate cursor over `[8, coord_end)` and the structural cursor over `[coord_end, len)`.
/// Writing past either end is an internal error, since the size was computed beforehand.
#[derive(Debug)]
pub(crate) struct GeomBufferWriter {
    buf: Vec<u8>,
    info: CoordSeqInfo,
    coord_pos: usize,
    coord_end: usize,
    int_pos: usize,
    scratch: Vec<f64>,
}

impl GeomBufferWriter {
    /// Allocate a buffer for `info.num_coords` coordinates and `num_ints` structural words, and
    /// write its header.
    pub fn try_new(
        geometry_type: GeometryType,
        srid: i32,
        info: &CoordSeqInfo,
        num_ints: usize,
    ) -> GeomSerdeResult<Self> {
        let header = GeomHeader::new(
            geometry_type,
            info.coord_type,
            srid,
            wire_count(info.num_coords)?,
        );
        let coord_end = HEADER_SIZE
            .checked_add(info.total_bytes)
            .ok_or_else(|| GeomSerdeError::InvalidArgument(format!("{info:?}")))?;
        let len = num_ints
            .checked_mul(4)
            .and_then(|int_bytes| coord_end.checked_add(int_bytes))
            .ok_or_else(|| {
                GeomSerdeError::InvalidArgument(format!("{num_ints} structural words"))
            })?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(len)?;
        buf.resize(len, 0);
        buf[..HEADER_SIZE].copy_from_slice(&header.encode());

        Ok(Self {
            buf,
            info: *info,
            coord_pos: HEADER_SIZE,
            coord_end,
            int_pos: coord_end,
            scratch: vec![],
        })
    }

    fn take_coords(&mut self, num_coords: usize) -> GeomSerdeResult<Range<usize>> {
        let needed = num_coords.saturating_mul(self.info.bytes_per_coord);
        if needed > self.coord_end - self.coord_pos {
            return Err(GeomSerdeError::Internal(format!(
                "coordinate region overflow writing {num_coords} coordinates at offset {}",
                self.coord_pos
            )));
        }
        let range = self.coord_pos..self.coord_pos + needed;
        self.coord_pos = range.end;
        Ok(range)
    }

    /// Copy every coordinate of `seq` into the coordinate region.
    pub fn write_coord_seq<P: GeometryProvider>(
        &mut self,
        provider: &P,
        mode: CopyMode,
        seq: &P::CoordSeq,
    ) -> GeomSerdeResult<()> {
        let num_coords = provider.coord_seq_size(seq)?;
        let range = self.take_coords(num_coords)?;
        let dims = self.info.dims;
        let has_z = self.info.has_z;

        self.scratch.clear();
        self.scratch.try_reserve_exact(num_coords * dims)?;
        match mode {
            CopyMode::Bulk => {
                self.scratch.resize(num_coords * dims, 0.0);
                provider.coord_seq_to_buffer(seq, &mut self.scratch, has_z, false)?;
            }
            CopyMode::PerOrdinate => {
                for idx in 0..num_coords {
                    if has_z {
                        let (x, y, z) = provider.coord_seq_get_xyz(seq, idx)?;
                        self.scratch.extend_from_slice(&[x, y, z]);
                    } else {
                        let (x, y) = provider.coord_seq_get_xy(seq, idx)?;
                        self.scratch.extend_from_slice(&[x, y]);
                    }
                }
            }
        }

        NativeEndian::write_f64_into(&self.scratch, &mut self.buf[range]);
        Ok(())
    }

    /// Fill one coordinate slot with `NaN` ordinates, marking a point without a location.
    pub fn write_empty_coord(&mut self) -> GeomSerdeResult<()> {
        let range = self.take_coords(1)?;
        for ordinate in self.buf[range].chunks_exact_mut(8) {
            NativeEndian::write_f64(ordinate, f64::NAN);
        }
        Ok(())
    }

    /// Append one word to the structural region.
    pub fn write_int(&mut self, value: i32) -> GeomSerdeResult<()> {
        if self.buf.len() - self.int_pos < 4 {
            return Err(GeomSerdeError::Internal(format!(
                "structural region overflow at offset {}",
                self.int_pos
            )));
        }
        NativeEndian::write_i32(&mut self.buf[self.int_pos..self.int_pos + 4], value);
        self.int_pos += 4;
        Ok(())
    }

    /// Return the buffer once both regions are completely filled.
    pub fn finish(self) -> GeomSerdeResult<Vec<u8>> {
        if self.coord_pos != self.coord_end || self.int_pos != self.buf.len() {
            return Err(GeomSerdeError::Internal(format!(
                "serialized {} of {} coordinate bytes and {} of {} structural bytes",
                self.coord_pos - HEADER_SIZE,
                self.coord_end - HEADER_SIZE,
                self.int_pos - self.coord_end,
                self.buf.len() - self.coord_end
            )));
        }
        Ok(self.buf)
    }
}
