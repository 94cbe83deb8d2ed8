use crate::common::CopyMode;
use crate::datatypes::{CoordSeqInfo, GeometryType};
use crate::error::GeomSerdeResult;
use crate::provider::GeometryProvider;
use crate::writer::buffer::{write_empty, GeomBufferWriter};

/// Write a LineString into a new buffer
pub(crate) fn write_line_string<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    geom: &P::Geometry,
    srid: i32,
    info: &CoordSeqInfo,
) -> GeomSerdeResult<Vec<u8>> {
    if info.num_coords == 0 {
        return Ok(write_empty(GeometryType::LineString, info, srid));
    }

    let mut writer = GeomBufferWriter::try_new(GeometryType::LineString, srid, info, 0)?;
    writer.write_coord_seq(provider, mode, provider.coord_seq(geom)?)?;
    writer.finish()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::provider::memory::{Geometry, MemoryProvider};
    use crate::test::linestring::{ls1, ls_z};

    #[test]
    fn no_structural_region() {
        let provider = MemoryProvider::new();
        let geom = Geometry::from(ls1());
        let info = CoordSeqInfo::from_dims(2, 3).unwrap();

        let buf = write_line_string(&provider, CopyMode::Bulk, &geom, 0, &info).unwrap();
        assert_eq!(buf.len(), 8 + 3 * 16);
        assert_eq!(&buf[4..8], &3i32.to_ne_bytes());
        assert_eq!(&buf[48..56], &8f64.to_ne_bytes());
    }

    #[test]
    fn three_dimensional() {
        let provider = MemoryProvider::without_bulk_copy();
        let info = CoordSeqInfo::from_dims(3, 3).unwrap();

        let buf = write_line_string(&provider, CopyMode::PerOrdinate, &ls_z(), 26918, &info)
            .unwrap();
        assert_eq!(buf.len(), 8 + 3 * 24);
        assert_eq!(buf[0], (2 << 4) | (2 << 1) | 1);
        assert_eq!(&buf[24..32], &10f64.to_ne_bytes());
    }
}
