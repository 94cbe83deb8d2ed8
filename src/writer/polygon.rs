use crate::common::CopyMode;
use crate::datatypes::{CoordSeqInfo, GeometryType};
use crate::error::GeomSerdeResult;
use crate::provider::GeometryProvider;
use crate::writer::buffer::{wire_count, write_empty, GeomBufferWriter};

/// Write a Polygon into a new buffer.
///
/// The structural region holds `[ring_count, exterior_size, interior_size_0, ...]`. Ring
/// coordinates follow each other in the same order in the coordinate region.
pub(crate) fn write_polygon<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    geom: &P::Geometry,
    srid: i32,
    info: &CoordSeqInfo,
) -> GeomSerdeResult<Vec<u8>> {
    if info.num_coords == 0 {
        return Ok(write_empty(GeometryType::Polygon, info, srid));
    }

    let num_interiors = provider.num_interior_rings(geom)?;
    let num_rings = num_interiors + 1;
    let mut writer = GeomBufferWriter::try_new(GeometryType::Polygon, srid, info, num_rings + 1)?;
    writer.write_int(wire_count(num_rings)?)?;

    let exterior = provider.coord_seq(provider.exterior_ring(geom)?)?;
    writer.write_int(wire_count(provider.coord_seq_size(exterior)?)?)?;
    writer.write_coord_seq(provider, mode, exterior)?;

    for i in 0..num_interiors {
        let interior = provider.coord_seq(provider.interior_ring_n(geom, i)?)?;
        writer.write_coord_seq(provider, mode, interior)?;
        writer.write_int(wire_count(provider.coord_seq_size(interior)?)?)?;
    }

    writer.finish()
}
