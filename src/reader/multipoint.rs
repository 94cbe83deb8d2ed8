use crate::common::CopyMode;
use crate::datatypes::CoordType;
use crate::error::GeomSerdeResult;
use crate::provider::{CollectionType, GeometryProvider};
use crate::reader::buffer::GeomBufferReader;

/// Read a multipoint, one coordinate slot per child point.
///
/// A slot of `NaN` ordinates is handed to the provider as is, which turns it into an empty point.
pub(crate) fn read_multi_point<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    reader: &mut GeomBufferReader<'_>,
) -> GeomSerdeResult<P::Geometry> {
    let info = *reader.info();

    let mut points = Vec::new();
    points.try_reserve_exact(info.num_coords)?;
    for _ in 0..info.num_coords {
        let point = if info.coord_type == CoordType::XY {
            let (x, y) = reader.read_xy()?;
            provider.create_point_from_xy(x, y)?
        } else {
            provider.create_point(reader.read_coord_seq(provider, mode, 1)?)?
        };
        points.push(point);
    }

    provider.create_collection(CollectionType::MultiPoint, points)
}
