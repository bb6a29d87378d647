//! Top-level module for mesh topology.
//!
//! This module provides the quad-edge representation:
//! - Edge, vertex and face id newtypes with the quarter-turn algebra
//! - The [`Manifold`] store with its traversals and mutators
//! - Structural validation of the rotation system
//!
//! Most users build through [`crate::mesh_generation::Modeler`] and only read
//! the manifold through its traversals.

pub mod edge;
pub mod manifold;
pub mod validation;

pub use edge::{EdgeId, FaceId, VertexId};
pub use manifold::{Manifold, ManifoldOptions};

#[cfg(test)]
mod tests;
