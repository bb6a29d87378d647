//! Re-export public algorithms.

pub mod triangulate;

pub use triangulate::{Diagnostic, TriangulationReport, newell_normal, triangulate, triangulate_faces};
