use crate::common::CopyMode;
use crate::datatypes::{CoordSeqInfo, GeometryType};
use crate::error::GeomSerdeResult;
use crate::provider::GeometryProvider;
use crate::writer::buffer::{write_empty, GeomBufferWriter};

/// Write a MultiPoint into a new buffer.
///
/// Every child takes exactly one coordinate slot, so the header count is the number of children.
/// Empty children are written as a coordinate of `NaN` ordinates.
pub(crate) fn write_multi_point<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    geom: &P::Geometry,
    srid: i32,
    info: &CoordSeqInfo,
) -> GeomSerdeResult<Vec<u8>> {
    let num_points = provider.num_geometries(geom)?;
    let info = CoordSeqInfo::from_dims(info.dims, num_points)?;
    if num_points == 0 {
        return Ok(write_empty(GeometryType::MultiPoint, &info, srid));
    }

    let mut writer = GeomBufferWriter::try_new(GeometryType::MultiPoint, srid, &info, 0)?;
    for i in 0..num_points {
        let point = provider.geometry_n(geom, i)?;
        if provider.num_coordinates(point)? == 0 {
            writer.write_empty_coord()?;
        } else {
            writer.write_coord_seq(provider, mode, provider.coord_seq(point)?)?;
        }
    }
    writer.finish()
}
