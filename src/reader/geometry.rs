use crate::common::CopyMode;
use crate::datatypes::GeometryType;
use crate::error::{GeomSerdeError, GeomSerdeResult};
use crate::provider::GeometryProvider;
use crate::reader::buffer::read_header;
use crate::reader::geometrycollection::read_geometry_collection;
use crate::reader::linestring::read_line_string;
use crate::reader::multipoint::read_multi_point;
use crate::reader::point::read_point;
use crate::reader::polygon::read_polygon;

/// Read one geometry from the start of `buf`.
///
/// Returns the geometry together with the number of bytes it spans. A non-zero SRID from the
/// header is applied to the result.
pub(crate) fn read_geometry<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    buf: &[u8],
) -> GeomSerdeResult<(P::Geometry, usize)> {
    read_nested_geometry(provider, mode, buf, 0)
}

/// Read one geometry found `depth` collections deep.
pub(crate) fn read_nested_geometry<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    buf: &[u8],
    depth: usize,
) -> GeomSerdeResult<(P::Geometry, usize)> {
    let (header, mut reader) = read_header(buf)?;

    let mut geom = match header.geometry_type {
        GeometryType::Point => read_point(provider, mode, &header, &mut reader)?,
        GeometryType::LineString => read_line_string(provider, mode, &mut reader)?,
        GeometryType::Polygon => read_polygon(provider, mode, &mut reader)?,
        GeometryType::MultiPoint => read_multi_point(provider, mode, &mut reader)?,
        GeometryType::GeometryCollection => {
            let num_geoms = usize::try_from(header.count).map_err(|_| {
                GeomSerdeError::BadBuffer(format!("negative child count {}", header.count))
            })?;
            read_geometry_collection(provider, mode, num_geoms, depth, &mut reader)?
        }
        GeometryType::MultiLineString | GeometryType::MultiPolygon => {
            return Err(GeomSerdeError::UnsupportedGeometryType(
                header.geometry_type.to_string(),
            ))
        }
    };

    if header.srid != 0 {
        provider.set_srid(&mut geom, header.srid)?;
    }
    Ok((geom, reader.int_position()))
}
