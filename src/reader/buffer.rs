use std::ops::Range;

use byteorder::{ByteOrder, NativeEndian};

use crate::common::{CopyMode, GeomHeader, HEADER_SIZE};
use crate::datatypes::{CoordSeqInfo, GeometryType};
use crate::error::{GeomSerdeError, GeomSerdeResult};
use crate::provider::GeometryProvider;

/// Read state over one serialized geometry.
///
/// The coordinate cursor walks the ordinate region `[8, coord_end)` as a sequence of doubles.
/// The structural cursor walks the `i32` words in `[coord_end, buf.len())`. Every read checks
/// against the end of its own region.
///
/// For a geometry collection both regions start at offset 8; the structural position then marks
/// the end of the last child once the collection has been read.
#[derive(Debug)]
pub(crate) struct GeomBufferReader<'a> {
    buf: &'a [u8],
    info: CoordSeqInfo,
    coord_pos: usize,
    coord_end: usize,
    int_pos: usize,
    int_end: usize,
    scratch: Vec<f64>,
}

/// Parse the header at the start of `buf` and set up the cursors over the rest of it.
pub(crate) fn read_header(buf: &[u8]) -> GeomSerdeResult<(GeomHeader, GeomBufferReader<'_>)> {
    let header = GeomHeader::decode(buf)?;
    let count = usize::try_from(header.count)
        .map_err(|_| GeomSerdeError::BadBuffer(format!("negative count {}", header.count)))?;

    let reader = if header.geometry_type == GeometryType::GeometryCollection {
        GeomBufferReader {
            buf,
            info: CoordSeqInfo::new(header.coord_type, 0)?,
            coord_pos: HEADER_SIZE,
            coord_end: HEADER_SIZE,
            int_pos: HEADER_SIZE,
            int_end: buf.len(),
            scratch: vec![],
        }
    } else {
        let info = CoordSeqInfo::new(header.coord_type, count)?;
        let coord_end = HEADER_SIZE
            .checked_add(info.total_bytes)
            .ok_or_else(|| GeomSerdeError::BadBuffer(format!("count {count} is too large")))?;
        if coord_end > buf.len() {
            return Err(GeomSerdeError::IncompleteBuffer {
                needed: coord_end,
                available: buf.len(),
            });
        }

        GeomBufferReader {
            buf,
            info,
            coord_pos: HEADER_SIZE,
            coord_end,
            int_pos: coord_end,
            int_end: buf.len(),
            scratch: vec![],
        }
    };

    Ok((header, reader))
}

impl<'a> GeomBufferReader<'a> {
    /// The whole buffer this reader was created over, header included.
    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    pub fn info(&self) -> &CoordSeqInfo {
        &self.info
    }

    /// Offset of the structural cursor from the start of the buffer.
    pub fn int_position(&self) -> usize {
        self.int_pos
    }

    pub fn set_int_position(&mut self, pos: usize) {
        self.int_pos = pos.min(self.int_end);
    }

    /// The number of whole `i32` words left in the structural region.
    pub fn remaining_ints(&self) -> usize {
        (self.int_end - self.int_pos) / 4
    }

    fn take_coords(&mut self, num_coords: usize) -> GeomSerdeResult<Range<usize>> {
        let available = self.coord_end - self.coord_pos;
        let needed = num_coords
            .checked_mul(self.info.bytes_per_coord)
            .ok_or_else(|| GeomSerdeError::BadBuffer(format!("{num_coords} coordinates")))?;
        if needed > available {
            return Err(GeomSerdeError::IncompleteBuffer { needed, available });
        }
        let range = self.coord_pos..self.coord_pos + needed;
        self.coord_pos = range.end;
        Ok(range)
    }

    /// Read a single XY pair. Only valid for [crate::datatypes::CoordType::XY] buffers.
    pub fn read_xy(&mut self) -> GeomSerdeResult<(f64, f64)> {
        let range = self.take_coords(1)?;
        let bytes = &self.buf[range];
        Ok((
            NativeEndian::read_f64(&bytes[..8]),
            NativeEndian::read_f64(&bytes[8..16]),
        ))
    }

    /// Read `num_coords` coordinates into a new provider sequence.
    ///
    /// Measure ordinates present in the buffer are dropped.
    pub fn read_coord_seq<P: GeometryProvider>(
        &mut self,
        provider: &P,
        mode: CopyMode,
        num_coords: usize,
    ) -> GeomSerdeResult<P::CoordSeq> {
        let range = self.take_coords(num_coords)?;
        let bytes = &self.buf[range];
        let dims = self.info.dims;
        let wire = self.info.wire_ordinates();

        self.scratch.clear();
        self.scratch.try_reserve_exact(num_coords * dims)?;
        if wire == dims {
            self.scratch.resize(num_coords * dims, 0.0);
            NativeEndian::read_f64_into(bytes, &mut self.scratch);
        } else {
            for coord in bytes.chunks_exact(wire * 8) {
                for ordinate in coord.chunks_exact(8).take(dims) {
                    self.scratch.push(NativeEndian::read_f64(ordinate));
                }
            }
        }

        match mode {
            CopyMode::Bulk => {
                provider.coord_seq_from_buffer(&self.scratch, num_coords, self.info.has_z, false)
            }
            CopyMode::PerOrdinate => {
                let mut seq = provider.coord_seq_create(num_coords, dims)?;
                for (idx, coord) in self.scratch.chunks_exact(dims).enumerate() {
                    if self.info.has_z {
                        provider.coord_seq_set_xyz(&mut seq, idx, coord[0], coord[1], coord[2])?;
                    } else {
                        provider.coord_seq_set_xy(&mut seq, idx, coord[0], coord[1])?;
                    }
                }
                Ok(seq)
            }
        }
    }

    /// Read one word from the structural region.
    pub fn read_int(&mut self) -> GeomSerdeResult<i32> {
        let available = self.int_end - self.int_pos;
        if available < 4 {
            return Err(GeomSerdeError::IncompleteBuffer {
                needed: 4,
                available,
            });
        }
        let value = NativeEndian::read_i32(&self.buf[self.int_pos..self.int_pos + 4]);
        self.int_pos += 4;
        Ok(value)
    }
}
