#![cfg_attr(docsrs, feature(doc_cfg))]
//! # quad-manifold
//!
//! quad-manifold is a small procedural solid-modeling kernel. It stores
//! orientable 2-manifold polygon meshes in quad-edge form, builds them from
//! topological primitives (circles, cones, cylinders) and fan-triangulates the
//! result into flat vertex and index buffers ready for a renderer.
//!
//! ## Features
//! - Quad-edge topology with `splice`, `connect` and `disconnect` as the only
//!   mutators, so every edit keeps vertex and face rings closed
//! - Growable arenas with explicit doubling and fallible allocation
//! - Procedural [`mesh_generation::Modeler`] driven by a transform stack
//! - Fan triangulation with Newell face normals and per-vertex averaging
//! - Range-checked public API: bad edge or vertex ids return
//!   [`ManifoldError`](manifold_error::ManifoldError) instead of reading stale
//!   memory
//!
//! ## Invariant checking
//! Debug builds (or release builds with the `check-invariants` feature) verify
//! the rotation system after every primitive and triangulation pass via
//! [`DebugInvariants`].
//!
//! ## Usage
//!
//! ```rust
//! use quad_manifold::prelude::*;
//!
//! let mut modeler = Modeler::new()?;
//! let hexagon = modeler.circle(6, FaceId(0))?;
//! let report = modeler.manifold_mut().triangulate_faces(&[hexagon])?;
//! assert_eq!(report.triangles, 4);
//! let buffers = modeler.manifold().render_buffers();
//! assert_eq!(buffers.vertex_count(), 6);
//! # Ok::<(), ManifoldError>(())
//! ```

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod manifold_error;
pub mod mesh_generation;
pub mod render;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::triangulate::{Diagnostic, TriangulationReport, newell_normal};
    pub use crate::data::attributes::VertexStore;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::manifold_error::{FaceFailure, ManifoldError};
    pub use crate::mesh_generation::{Modeler, ModelerOptions, TransformStack};
    pub use crate::render::{RenderAdapter, RenderBuffers};
    pub use crate::topology::edge::{EdgeId, FaceId, VertexId};
    pub use crate::topology::manifold::{DEFAULT_COLOR, Manifold, ManifoldOptions};
    pub use crate::topology::validation::{
        ValidationOptions, validate_manifold, validate_manifold_with,
    };
}
