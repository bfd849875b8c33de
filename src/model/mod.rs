//! # Co-occurrence Model
//!
//! Plain data types shared by every phase: items, collections, clusters,
//! edges and the attribute values the exporters write. No I/O or logging
//! lives here.

pub mod item;
pub mod collection;
pub mod cluster;
pub mod edge;
pub mod value;
pub mod property_map;

pub use item::{ItemId, ItemRecord, VertexId};
pub use collection::Collection;
pub use cluster::{ClusterId, ClusterSet};
pub use edge::{Edge, EdgeClass, EdgeId};
pub use value::Value;
pub use property_map::PropertyMap;
