//! A compact binary serialization for vector geometries.
//!
//! Every serialized geometry starts with an 8-byte header holding its type, coordinate type,
//! optional SRID and a count, followed by the coordinates as native-endian doubles and, for
//! polygons, a trailing region of `i32` ring sizes. Geometry collections nest serialized children
//! at 8-byte aligned offsets.
//!
//! The codec does not have its own geometry model. Geometries are read and built through a
//! [GeometryProvider](provider::GeometryProvider) passed into every call;
//! [MemoryProvider](provider::memory::MemoryProvider) is an in-memory implementation.
//!
//! ```
//! use geomserde::provider::memory::{CoordSeq, Geometry, MemoryProvider};
//!
//! let provider = MemoryProvider::new();
//! let polygon = Geometry::polygon(vec![CoordSeq::xy(&[
//!     [0., 0.],
//!     [1., 0.],
//!     [1., 1.],
//!     [0., 0.],
//! ])]);
//!
//! let buf = geomserde::serialize(&provider, &polygon).unwrap();
//! let header = geomserde::GeomHeader::decode(&buf).unwrap();
//! assert_eq!(header.geometry_type, geomserde::datatypes::GeometryType::Polygon);
//! assert_eq!(header.count, 4);
//! assert_eq!(geomserde::deserialize(&provider, &buf).unwrap(), polygon);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use api::{
    deserialize, deserialize_prefix, deserialize_with_options, serialize, serialize_with_options,
    CoordCopy, SerdeOptions,
};
pub use common::{GeomHeader, HEADER_SIZE};

mod api;
pub mod array;
mod common;
pub mod datatypes;
pub mod error;
pub mod provider;
mod reader;
mod writer;
