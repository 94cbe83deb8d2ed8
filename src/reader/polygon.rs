use crate::common::CopyMode;
use crate::error::{GeomSerdeError, GeomSerdeResult};
use crate::provider::GeometryProvider;
use crate::reader::buffer::GeomBufferReader;

/// Read the ring sizes from the structural region and check them against the header count.
fn read_ring_sizes(reader: &mut GeomBufferReader<'_>) -> GeomSerdeResult<Vec<usize>> {
    let num_rings = reader.read_int()?;
    if num_rings <= 0 {
        return Err(GeomSerdeError::BadBuffer(format!(
            "polygon with {} coordinates has {num_rings} rings",
            reader.info().num_coords
        )));
    }

    let num_rings = num_rings as usize;
    let remaining = reader.remaining_ints();
    if num_rings > remaining {
        return Err(GeomSerdeError::IncompleteBuffer {
            needed: num_rings * 4,
            available: remaining * 4,
        });
    }

    let mut sizes = Vec::new();
    sizes.try_reserve_exact(num_rings)?;
    let mut total = 0usize;
    for _ in 0..num_rings {
        let size = usize::try_from(reader.read_int()?)
            .map_err(|_| GeomSerdeError::BadBuffer("negative ring size".to_string()))?;
        total = total.saturating_add(size);
        sizes.push(size);
    }

    if total != reader.info().num_coords {
        return Err(GeomSerdeError::BadBuffer(format!(
            "ring sizes add up to {total}, header declares {} coordinates",
            reader.info().num_coords
        )));
    }
    Ok(sizes)
}

/// Read a polygon.
///
/// The ring sizes are all read up front, so each ring is paired with its size explicitly instead
/// of relying on the order the two cursors advance in.
pub(crate) fn read_polygon<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    reader: &mut GeomBufferReader<'_>,
) -> GeomSerdeResult<P::Geometry> {
    let info = *reader.info();
    if info.num_coords == 0 {
        let shell = provider.create_linear_ring(provider.coord_seq_create(0, info.dims)?)?;
        return provider.create_polygon(shell, vec![]);
    }

    let sizes = read_ring_sizes(reader)?;
    let shell = provider.create_linear_ring(reader.read_coord_seq(provider, mode, sizes[0])?)?;

    let mut holes = Vec::new();
    holes.try_reserve_exact(sizes.len() - 1)?;
    for &size in &sizes[1..] {
        holes.push(provider.create_linear_ring(reader.read_coord_seq(provider, mode, size)?)?);
    }

    provider.create_polygon(shell, holes)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::GeomHeader;
    use crate::datatypes::{CoordType, GeometryType};
    use crate::provider::memory::{CoordSeq, Geometry, MemoryProvider};
    use crate::reader::buffer::read_header;

    fn square() -> [f64; 10] {
        [0., 0., 1., 0., 1., 1., 0., 1., 0., 0.]
    }

    fn buffer(count: i32, ordinates: &[f64], ints: &[i32]) -> Vec<u8> {
        let mut buf = GeomHeader::new(GeometryType::Polygon, CoordType::XY, 0, count)
            .encode()
            .to_vec();
        for v in ordinates {
            buf.extend_from_slice(&v.to_ne_bytes());
        }
        for v in ints {
            buf.extend_from_slice(&v.to_ne_bytes());
        }
        buf
    }

    fn read(buf: &[u8]) -> GeomSerdeResult<Geometry> {
        let (_, mut reader) = read_header(buf)?;
        read_polygon(&MemoryProvider::new(), CopyMode::Bulk, &mut reader)
    }

    #[test]
    fn single_ring() {
        let buf = buffer(5, &square(), &[1, 5]);
        let expected = Geometry::polygon(vec![CoordSeq::xy(&[
            [0., 0.],
            [1., 0.],
            [1., 1.],
            [0., 1.],
            [0., 0.],
        ])]);
        assert_eq!(read(&buf).unwrap(), expected);
    }

    #[test]
    fn empty_polygon() {
        let buf = buffer(0, &[], &[]);
        assert_eq!(read(&buf).unwrap(), Geometry::polygon(vec![]));
    }

    #[test]
    fn inconsistent_ring_sizes() {
        for ints in [[1, 4], [1, 6], [1, -5], [0, 5], [-1, 5]] {
            let buf = buffer(5, &square(), &ints);
            assert!(
                matches!(read(&buf), Err(GeomSerdeError::BadBuffer(_))),
                "{ints:?}"
            );
        }
    }

    #[test]
    fn missing_ring_sizes() {
        let buf = buffer(5, &square(), &[2, 5]);
        assert!(matches!(
            read(&buf),
            Err(GeomSerdeError::IncompleteBuffer { needed: 8, available: 4 })
        ));

        let buf = buffer(5, &square(), &[]);
        assert!(matches!(
            read(&buf),
            Err(GeomSerdeError::IncompleteBuffer { needed: 4, available: 0 })
        ));
    }

    #[test]
    fn huge_ring_count_is_not_allocated() {
        let buf = buffer(5, &square(), &[i32::MAX, 5]);
        assert!(matches!(
            read(&buf),
            Err(GeomSerdeError::IncompleteBuffer { .. })
        ));
    }
}
