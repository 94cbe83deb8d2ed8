use crate::common::CopyMode;
use crate::error::GeomSerdeResult;
use crate::provider::GeometryProvider;
use crate::reader::buffer::GeomBufferReader;

pub(crate) fn read_line_string<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    reader: &mut GeomBufferReader<'_>,
) -> GeomSerdeResult<P::Geometry> {
    let num_coords = reader.info().num_coords;
    let seq = reader.read_coord_seq(provider, mode, num_coords)?;
    provider.create_line_string(seq)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::GeomHeader;
    use crate::datatypes::{CoordType, GeometryType};
    use crate::error::GeomSerdeError;
    use crate::provider::memory::{CoordSeq, Geometry, MemoryProvider};
    use crate::reader::buffer::read_header;

    fn read(buf: &[u8]) -> GeomSerdeResult<Geometry> {
        let (_, mut reader) = read_header(buf)?;
        read_line_string(
            &MemoryProvider::without_bulk_copy(),
            CopyMode::PerOrdinate,
            &mut reader,
        )
    }

    #[test]
    fn empty_keeps_dimension() {
        let buf = GeomHeader::new(GeometryType::LineString, CoordType::XYZ, 0, 0).encode();
        assert_eq!(
            read(&buf).unwrap(),
            Geometry::line_string(CoordSeq::new(3))
        );
    }

    #[test]
    fn single_coordinate_is_a_provider_error() {
        let mut buf = GeomHeader::new(GeometryType::LineString, CoordType::XY, 0, 1)
            .encode()
            .to_vec();
        buf.extend_from_slice(&[0u8; 16]);
        assert!(matches!(read(&buf), Err(GeomSerdeError::Provider(_))));
    }
}
