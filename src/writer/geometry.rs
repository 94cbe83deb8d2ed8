use log::debug;

use crate::common::CopyMode;
use crate::datatypes::CoordSeqInfo;
use crate::error::{GeomSerdeError, GeomSerdeResult};
use crate::provider::{GeometryProvider, ProviderGeometryType};
use crate::writer::geometrycollection::write_geometry_collection;
use crate::writer::linestring::write_line_string;
use crate::writer::multipoint::write_multi_point;
use crate::writer::point::write_point;
use crate::writer::polygon::write_polygon;

/// Write any supported geometry into a new buffer, dispatching on its provider type.
pub(crate) fn write_geometry<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    geom: &P::Geometry,
) -> GeomSerdeResult<Vec<u8>> {
    write_nested_geometry(provider, mode, geom, 0)
}

/// Write a geometry found `depth` collections deep.
pub(crate) fn write_nested_geometry<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    geom: &P::Geometry,
    depth: usize,
) -> GeomSerdeResult<Vec<u8>> {
    let geometry_type = provider.geometry_type(geom)?;
    let srid = provider.srid(geom)?;

    use ProviderGeometryType::*;
    match geometry_type {
        GeometryCollection => write_geometry_collection(provider, mode, geom, srid, depth),
        Point | LineString | Polygon | MultiPoint => {
            let info = CoordSeqInfo::from_dims(
                provider.coordinate_dimension(geom)?,
                provider.num_coordinates(geom)?,
            )?;
            match geometry_type {
                Point => write_point(provider, mode, geom, srid, &info),
                LineString => write_line_string(provider, mode, geom, srid, &info),
                Polygon => write_polygon(provider, mode, geom, srid, &info),
                _ => write_multi_point(provider, mode, geom, srid, &info),
            }
        }
        LinearRing | MultiLineString | MultiPolygon => {
            debug!("Cannot serialize geometry of type {geometry_type:?}");
            Err(GeomSerdeError::UnsupportedGeometryType(format!(
                "{geometry_type:?}"
            )))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::provider::memory::{CoordSeq, Geometry, MemoryProvider};
    use crate::test::linestring::ls0;

    #[test]
    fn srid_goes_into_header() {
        let provider = MemoryProvider::new();
        let geom = Geometry::point(1., 2.).with_srid(4326);

        let buf = write_geometry(&provider, CopyMode::Bulk, &geom).unwrap();
        assert_eq!(buf[0], 0x13);
        assert_eq!(&buf[1..4], &[0x00, 0x10, 0xE6]);
    }

    #[test]
    fn unsupported_types() {
        let provider = MemoryProvider::new();
        let ring = Geometry::linear_ring(CoordSeq::xy(&[[0., 0.], [1., 0.], [1., 1.], [0., 0.]]));
        let lines = Geometry::multi_line_string(vec![Geometry::from(ls0())]);
        let polygons = Geometry::multi_polygon(vec![]);

        for geom in [ring, lines, polygons] {
            let err = write_geometry(&provider, CopyMode::Bulk, &geom).unwrap_err();
            assert!(matches!(err, GeomSerdeError::UnsupportedGeometryType(_)));
        }
    }

    #[test]
    fn unsupported_child_fails_collection() {
        let provider = MemoryProvider::new();
        let geom = Geometry::geometry_collection(vec![
            Geometry::point(1., 2.),
            Geometry::multi_polygon(vec![]),
        ]);

        let err = write_geometry(&provider, CopyMode::PerOrdinate, &geom).unwrap_err();
        assert!(matches!(err, GeomSerdeError::UnsupportedGeometryType(_)));
    }
}
