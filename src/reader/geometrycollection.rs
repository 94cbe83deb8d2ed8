use crate::common::{align8, CopyMode, HEADER_SIZE, MAX_NESTING_DEPTH};
use crate::error::{GeomSerdeError, GeomSerdeResult};
use crate::provider::{CollectionType, GeometryProvider};
use crate::reader::buffer::GeomBufferReader;
use crate::reader::geometry::read_nested_geometry;

/// Read a geometry collection.
///
/// Children are decoded one after another from the bytes following the header, each starting at
/// an 8-byte aligned offset. Padding after the last child may be missing. On return the reader's
/// structural position is the end of the last child. `depth` is the number of collections this
/// one is nested in; beyond [MAX_NESTING_DEPTH] the buffer is rejected.
pub(crate) fn read_geometry_collection<P: GeometryProvider>(
    provider: &P,
    mode: CopyMode,
    num_geoms: usize,
    depth: usize,
    reader: &mut GeomBufferReader<'_>,
) -> GeomSerdeResult<P::Geometry> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(GeomSerdeError::BadBuffer(format!(
            "geometry collection nesting exceeds {MAX_NESTING_DEPTH}"
        )));
    }

    let buf = reader.buf();
    let available = buf.len() - HEADER_SIZE;
    let needed = num_geoms.saturating_mul(HEADER_SIZE);
    if needed > available {
        return Err(GeomSerdeError::IncompleteBuffer { needed, available });
    }

    let mut geoms = Vec::new();
    geoms.try_reserve_exact(num_geoms)?;
    let mut offset = HEADER_SIZE;
    for _ in 0..num_geoms {
        let child = &buf[offset..];
        if child.len() < HEADER_SIZE {
            return Err(GeomSerdeError::IncompleteBuffer {
                needed: HEADER_SIZE,
                available: child.len(),
            });
        }

        let (geom, consumed) = read_nested_geometry(provider, mode, child, depth + 1)?;
        geoms.push(geom);
        offset = offset
            .saturating_add(align8(consumed))
            .min(buf.len());
    }
    reader.set_int_position(offset);

    provider.create_collection(CollectionType::GeometryCollection, geoms)
}
