use crate::common::{CopyMode, GeomHeader};
use crate::datatypes::CoordType;
use crate::error::{GeomSerdeError, GeomSerdeResult};
use crate::provider::GeometryProvider;
use crate::reader::buffer::GeomBufferReader;

pub(crate) fn read_point<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    header: &GeomHeader,
    reader: &mut GeomBufferReader<'_>,
) -> GeomSerdeResult<P::Geometry> {
    let info = *reader.info();
    match header.count {
        0 if info.has_z => provider.create_point(provider.coord_seq_create(0, info.dims)?),
        0 => provider.create_empty_point(),
        1 if header.coord_type == CoordType::XY => {
            let (x, y) = reader.read_xy()?;
            provider.create_point_from_xy(x, y)
        }
        1 => provider.create_point(reader.read_coord_seq(provider, mode, 1)?),
        count => Err(GeomSerdeError::BadBuffer(format!(
            "point with {count} coordinates"
        ))),
    }
}
