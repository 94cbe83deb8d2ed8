use crate::common::CopyMode;
use crate::datatypes::{CoordSeqInfo, GeometryType};
use crate::error::GeomSerdeResult;
use crate::provider::GeometryProvider;
use crate::writer::buffer::{write_empty, GeomBufferWriter};

/// Write a Point into a new buffer. An empty point is encoded as its header alone.
pub(crate) fn write_point<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    geom: &P::Geometry,
    srid: i32,
    info: &CoordSeqInfo,
) -> GeomSerdeResult<Vec<u8>> {
    if info.num_coords == 0 {
        return Ok(write_empty(GeometryType::Point, info, srid));
    }

    let mut writer = GeomBufferWriter::try_new(GeometryType::Point, srid, info, 0)?;
    writer.write_coord_seq(provider, mode, provider.coord_seq(geom)?)?;
    writer.finish()
}
