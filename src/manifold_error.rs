//! ManifoldError: Unified error type for quad-manifold public APIs
//!
//! Every fallible operation in the crate returns this type. Mutators validate
//! their inputs before touching any storage, so an `Err` always leaves the
//! manifold in its last consistent state.

use thiserror::Error;

use crate::topology::edge::{EdgeId, VertexId};

/// A face whose fan triangulation did not reduce to a single terminal triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceFailure {
    /// Edge the face loop was entered from.
    pub edge: EdgeId,
    /// Number of edges left in the loop when exactly 3 were expected.
    pub remaining: usize,
}

/// Unified error type for quad-manifold operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ManifoldError {
    /// An edge id at or beyond the current edge count was passed in.
    #[error("edge {edge} is out of range (edge count {count})")]
    EdgeOutOfRange { edge: EdgeId, count: usize },
    /// A vertex id at or beyond the current vertex count was passed in.
    #[error("vertex {vertex} is out of range (vertex count {count})")]
    VertexOutOfRange { vertex: VertexId, count: usize },
    /// A face-dual record was passed where a primal edge is required.
    #[error("edge {0} is a dual record; expected a primal edge")]
    DualRecord(EdgeId),
    /// `splice` was handed one primal and one dual record.
    #[error("cannot splice edge {a} with edge {b}: one is primal and one is dual")]
    MixedSplice { a: EdgeId, b: EdgeId },
    /// Growing an arena failed; this is not retried.
    #[error("allocation failed while growing {what} to {requested} slots")]
    AllocationFailed { what: &'static str, requested: usize },
    /// A circle needs at least three divisions to bound a face.
    #[error("a circle needs at least 3 divisions, got {0}")]
    InvalidDivisions(usize),
    /// A loop handed to a primitive has too few edges to bound a face.
    #[error("loop at edge {edge} has {edges} edge(s); at least 3 are needed")]
    DegenerateLoop { edge: EdgeId, edges: usize },
    /// `cylinder_to` was handed loops of different lengths.
    #[error("cannot stitch loops of {first} and {second} edges")]
    LoopSizeMismatch { first: usize, second: usize },
    /// A ring walk did not come back to its start edge.
    #[error("ring starting at edge {start} did not close within {limit} steps")]
    OpenLoop { start: EdgeId, limit: usize },
    /// One or more faces could not be reduced to triangles.
    ///
    /// The triangle buffer still holds the `emitted` triangles of every other
    /// face.
    #[error("triangulation failed on {} face(s); {emitted} triangles emitted", .failed.len())]
    TriangulationFailed {
        failed: Vec<FaceFailure>,
        emitted: usize,
    },
    /// A structural invariant check failed.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
