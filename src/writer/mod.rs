//! Encode provider geometries into serialized buffers.

mod buffer;
mod geometry;
mod geometrycollection;
mod linestring;
mod multipoint;
mod point;
mod polygon;

pub(crate) use geometry::write_geometry;
