//! Decode serialized buffers into provider geometries.

mod buffer;
mod geometry;
mod geometrycollection;
mod linestring;
mod multipoint;
mod point;
mod polygon;

pub(crate) use geometry::read_geometry;
