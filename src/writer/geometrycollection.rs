use crate::common::{align8, CopyMode, GeomHeader, HEADER_SIZE, MAX_NESTING_DEPTH};
use crate::datatypes::{CoordType, GeometryType};
use crate::error::{GeomSerdeError, GeomSerdeResult};
use crate::provider::GeometryProvider;
use crate::writer::buffer::wire_count;
use crate::writer::geometry::write_nested_geometry;

/// Write a GeometryCollection into a new buffer.
///
/// Each child is serialized on its own and copied in after the header, starting at an offset
/// aligned to 8 bytes. Padding bytes are zero. The header count is the number of children and
/// its coordinate type is always [CoordType::XY]. Collections nested deeper than
/// [MAX_NESTING_DEPTH] are rejected.
pub(crate) fn write_geometry_collection<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    geom: &P::Geometry,
    srid: i32,
    depth: usize,
) -> GeomSerdeResult<Vec<u8>> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(GeomSerdeError::InvalidArgument(format!(
            "geometry collection nesting exceeds {MAX_NESTING_DEPTH}"
        )));
    }

    let num_geoms = provider.num_geometries(geom)?;
    let header = GeomHeader::new(
        GeometryType::GeometryCollection,
        CoordType::XY,
        srid,
        wire_count(num_geoms)?,
    );

    let mut children = Vec::new();
    children.try_reserve_exact(num_geoms)?;
    let mut len = HEADER_SIZE;
    for i in 0..num_geoms {
        let child =
            write_nested_geometry(provider, mode, provider.geometry_n(geom, i)?, depth + 1)?;
        len = len
            .checked_add(align8(child.len()))
            .ok_or_else(|| GeomSerdeError::Internal("collection size overflow".to_string()))?;
        children.push(child);
    }

    let mut out = Vec::new();
    out.try_reserve_exact(len)?;
    out.extend_from_slice(&header.encode());
    for child in &children {
        out.extend_from_slice(child);
        out.resize(align8(out.len()), 0);
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::provider::memory::{Geometry, MemoryProvider};
    use crate::test::geometrycollection::gc0;
    use crate::test::polygon::{p1, p3};

    #[test]
    fn children_are_padded() {
        let provider = MemoryProvider::new();
        let geom = Geometry::from(gc0());

        let buf = write_geometry_collection(&provider, CopyMode::Bulk, &geom, 0, 0).unwrap();
        assert_eq!(buf.len(), 8 + 24 + 56);
        assert_eq!(buf[0], (7 << 4) | (1 << 1));
        assert_eq!(&buf[4..8], &2i32.to_ne_bytes());
        assert_eq!(buf[8] >> 4, 1);
        assert_eq!(buf[32] >> 4, 2);
    }

    #[test]
    fn padding_is_zeroed() {
        let provider = MemoryProvider::new();
        let geom = Geometry::geometry_collection(vec![
            Geometry::from(p1()),
            Geometry::point(5., 6.),
        ]);

        let buf = write_geometry_collection(&provider, CopyMode::Bulk, &geom, 0, 0).unwrap();
        // 8 + 10 * 16 + 3 * 4 = 180 polygon bytes, padded to 184
        assert_eq!(buf.len(), 8 + 184 + 24);
        assert_eq!(&buf[188..192], &[0, 0, 0, 0]);
        assert_eq!(buf[192] >> 4, 1);
    }

    #[test]
    fn unaligned_children_are_each_padded() {
        let provider = MemoryProvider::new();
        let geom = Geometry::geometry_collection(vec![Geometry::from(p1()), Geometry::from(p3())]);

        let buf = write_geometry_collection(&provider, CopyMode::Bulk, &geom, 0, 0).unwrap();
        // 180 and 8 + 20 * 16 + 5 * 4 = 348 bytes, padded to 184 and 352
        assert_eq!(buf.len(), 8 + 184 + 352);
        assert_eq!(buf[8] >> 4, 3);
        assert_eq!(&buf[12..16], &10i32.to_ne_bytes());
        assert_eq!(&buf[188..192], &[0, 0, 0, 0]);
        assert_eq!(buf[192] >> 4, 3);
        assert_eq!(&buf[196..200], &20i32.to_ne_bytes());
        assert_eq!(&buf[540..544], &[0, 0, 0, 0]);
    }

    #[test]
    fn nesting_limit() {
        let provider = MemoryProvider::new();
        let mut geom = Geometry::point(1., 2.);
        for _ in 0..MAX_NESTING_DEPTH {
            geom = Geometry::geometry_collection(vec![geom]);
        }
        let buf = write_geometry_collection(&provider, CopyMode::Bulk, &geom, 0, 0).unwrap();
        assert_eq!(buf.len(), MAX_NESTING_DEPTH * 8 + 24);

        let geom = Geometry::geometry_collection(vec![geom]);
        let err = write_geometry_collection(&provider, CopyMode::Bulk, &geom, 0, 0).unwrap_err();
        assert!(matches!(err, GeomSerdeError::InvalidArgument(_)));
    }

    #[test]
    fn empty_collection_is_header_only() {
        let provider = MemoryProvider::new();
        let geom = Geometry::geometry_collection(vec![]).with_srid(3857);

        let buf = write_geometry_collection(&provider, CopyMode::Bulk, &geom, 3857, 0).unwrap();
        assert_eq!(buf.len(), 8);
        assert_eq!(&buf[4..8], &0i32.to_ne_bytes());
    }
}
