//! Conversions between [`geo`] geometries and the in-memory [Geometry] model.
//!
//! Only two dimensions exist in [`geo`]; Z values are dropped when converting to it.

use crate::error::{GeomSerdeError, GeomSerdeResult};
use crate::provider::memory::{CoordSeq, Geometry, GeometryKind};

fn coords_to_seq(coords: impl IntoIterator<Item = geo::Coord>) -> CoordSeq {
    let coords: Vec<[f64; 2]> = coords.into_iter().map(|c| [c.x, c.y]).collect();
    CoordSeq::xy(&coords)
}

fn seq_to_coords(seq: &CoordSeq) -> Vec<geo::Coord> {
    (0..seq.len())
        .filter_map(|i| seq.coord(i))
        .map(|coord| geo::coord! { x: coord[0], y: coord[1] })
        .collect()
}

impl From<geo::Point> for Geometry {
    fn from(value: geo::Point) -> Self {
        Geometry::point(value.x(), value.y())
    }
}

impl From<geo::LineString> for Geometry {
    fn from(value: geo::LineString) -> Self {
        Geometry::line_string(coords_to_seq(value.0))
    }
}

impl From<geo::Polygon> for Geometry {
    fn from(value: geo::Polygon) -> Self {
        let (exterior, interiors) = value.into_inner();
        let rings = std::iter::once(exterior)
            .chain(interiors)
            .map(|ring| coords_to_seq(ring.0))
            .collect();
        Geometry::polygon(rings)
    }
}

impl From<geo::MultiPoint> for Geometry {
    fn from(value: geo::MultiPoint) -> Self {
        Geometry::multi_point(value.0.into_iter().map(Geometry::from).collect())
    }
}

impl From<geo::MultiLineString> for Geometry {
    fn from(value: geo::MultiLineString) -> Self {
        Geometry::multi_line_string(value.0.into_iter().map(Geometry::from).collect())
    }
}

impl From<geo::MultiPolygon> for Geometry {
    fn from(value: geo::MultiPolygon) -> Self {
        Geometry::multi_polygon(value.0.into_iter().map(Geometry::from).collect())
    }
}

impl From<geo::GeometryCollection> for Geometry {
    fn from(value: geo::GeometryCollection) -> Self {
        Geometry::geometry_collection(value.0.into_iter().map(Geometry::from).collect())
    }
}

impl From<geo::Geometry> for Geometry {
    fn from(value: geo::Geometry) -> Self {
        match value {
            geo::Geometry::Point(g) => g.into(),
            geo::Geometry::Line(g) => geo::LineString::from(vec![g.start, g.end]).into(),
            geo::Geometry::LineString(g) => g.into(),
            geo::Geometry::Polygon(g) => g.into(),
            geo::Geometry::MultiPoint(g) => g.into(),
            geo::Geometry::MultiLineString(g) => g.into(),
            geo::Geometry::MultiPolygon(g) => g.into(),
            geo::Geometry::GeometryCollection(g) => g.into(),
            geo::Geometry::Rect(g) => g.to_polygon().into(),
            geo::Geometry::Triangle(g) => g.to_polygon().into(),
        }
    }
}

fn point_to_geo(seq: &CoordSeq) -> GeomSerdeResult<geo::Point> {
    seq.coord(0)
        .map(|coord| geo::Point::new(coord[0], coord[1]))
        .ok_or_else(|| {
            GeomSerdeError::InvalidArgument("empty point cannot be converted to geo".to_string())
        })
}

fn polygon_to_geo(rings: &[Geometry]) -> GeomSerdeResult<geo::Polygon> {
    let mut line_strings = rings
        .iter()
        .map(|ring| match ring.kind() {
            GeometryKind::LinearRing(seq) => Ok(geo::LineString::new(seq_to_coords(seq))),
            _ => Err(GeomSerdeError::InvalidArgument(
                "polygon ring is not a linear ring".to_string(),
            )),
        })
        .collect::<GeomSerdeResult<Vec<_>>>()?;

    if line_strings.is_empty() {
        return Ok(geo::Polygon::new(geo::LineString::new(vec![]), vec![]));
    }
    let exterior = line_strings.remove(0);
    Ok(geo::Polygon::new(exterior, line_strings))
}

fn children_to_geo(children: &[Geometry]) -> GeomSerdeResult<Vec<geo::Geometry>> {
    children.iter().map(geo::Geometry::try_from).collect()
}

impl TryFrom<&Geometry> for geo::Geometry {
    type Error = GeomSerdeError;

    fn try_from(value: &Geometry) -> GeomSerdeResult<Self> {
        let geom = match value.kind() {
            GeometryKind::Point(seq) => geo::Geometry::Point(point_to_geo(seq)?),
            GeometryKind::LineString(seq) | GeometryKind::LinearRing(seq) => {
                geo::Geometry::LineString(geo::LineString::new(seq_to_coords(seq)))
            }
            GeometryKind::Polygon(rings) => geo::Geometry::Polygon(polygon_to_geo(rings)?),
            GeometryKind::MultiPoint(children) => {
                let points = children_to_geo(children)?
                    .into_iter()
                    .map(geo::Point::try_from)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|err| GeomSerdeError::InvalidArgument(err.to_string()))?;
                geo::Geometry::MultiPoint(geo::MultiPoint::new(points))
            }
            GeometryKind::MultiLineString(children) => {
                let line_strings = children_to_geo(children)?
                    .into_iter()
                    .map(geo::LineString::try_from)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|err| GeomSerdeError::InvalidArgument(err.to_string()))?;
                geo::Geometry::MultiLineString(geo::MultiLineString::new(line_strings))
            }
            GeometryKind::MultiPolygon(children) => {
                let polygons = children_to_geo(children)?
                    .into_iter()
                    .map(geo::Polygon::try_from)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|err| GeomSerdeError::InvalidArgument(err.to_string()))?;
                geo::Geometry::MultiPolygon(geo::MultiPolygon::new(polygons))
            }
            GeometryKind::GeometryCollection(children) => {
                geo::Geometry::GeometryCollection(geo::GeometryCollection(children_to_geo(
                    children,
                )?))
            }
        };
        Ok(geom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::polygon::p1;

    #[test]
    fn polygon_round_trip() {
        let geom = Geometry::from(p1());
        assert_eq!(geom.num_coords(), 10);

        let back = geo::Geometry::try_from(&geom).unwrap();
        assert_eq!(back, geo::Geometry::Polygon(p1()));
    }

    #[test]
    fn empty_point_has_no_geo_equivalent() {
        let err = geo::Geometry::try_from(&Geometry::empty_point()).unwrap_err();
        assert!(matches!(err, GeomSerdeError::InvalidArgument(_)));
    }

    #[test]
    fn empty_exterior_is_empty_polygon() {
        let polygon = geo::Polygon::new(geo::LineString::new(vec![]), vec![]);
        let geom = Geometry::from(polygon);
        assert!(matches!(geom.kind(), GeometryKind::Polygon(rings) if rings.is_empty()));
    }
}
