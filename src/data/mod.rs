//! Data module: growable arenas and per-vertex attribute storage
#![warn(missing_docs)]

pub mod attributes;
pub mod storage;

pub use attributes::VertexStore;
pub use storage::Arena;
