//! Structural validation of the quad-edge rotation system.
//!
//! A valid manifold satisfies, for every record `e`:
//! - `next(e)` is an allocated record of the same kind (primal or dual);
//! - `next` is a permutation, so every ring closes;
//! - `next(right(next(right(e)))) == e`, which ties each vertex ring to the
//!   matching dual face ring.
//!
//! Optional checks cover the labels stored in `data`.

use crate::manifold_error::ManifoldError;
use crate::topology::edge::{EdgeId, VertexId};
use crate::topology::manifold::Manifold;

/// Optional toggles on top of the structural checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    /// Every primal record in one vertex ring carries the same vertex id.
    pub check_vertex_labels: bool,
    /// Every primal record names an allocated vertex.
    pub check_vertex_ids: bool,
}

impl ValidationOptions {
    /// Enable every check.
    pub fn all() -> Self {
        Self {
            check_vertex_labels: true,
            check_vertex_ids: true,
        }
    }
}

fn violation(message: impl Into<String>) -> ManifoldError {
    ManifoldError::InvariantViolation(message.into())
}

/// Structural checks plus vertex-label consistency.
///
/// Vertex ids are not resolved here because [`Manifold::add_edge`] accepts
/// labels before the matching vertices exist.
pub fn validate_manifold(m: &Manifold) -> Result<(), ManifoldError> {
    validate_manifold_with(
        m,
        ValidationOptions {
            check_vertex_labels: true,
            check_vertex_ids: false,
        },
    )
}

pub fn validate_manifold_with(
    m: &Manifold,
    options: ValidationOptions,
) -> Result<(), ManifoldError> {
    let count = m.edge_count();
    if count % 4 != 0 {
        return Err(violation(format!(
            "edge record count {count} is not a multiple of 4"
        )));
    }

    let mut targeted = vec![false; count];
    for i in 0..count {
        let e = EdgeId::new(i as u32);
        let next = m.next_raw(e);
        if next.index() >= count {
            return Err(violation(format!("next({e}) = {next} is out of range")));
        }
        if next.is_primal() != e.is_primal() {
            return Err(violation(format!(
                "next({e}) = {next} mixes primal and dual records"
            )));
        }
        if std::mem::replace(&mut targeted[next.index()], true) {
            return Err(violation(format!("record {next} is the next of two records")));
        }
    }

    for i in 0..count {
        let e = EdgeId::new(i as u32);
        let back = m.next_raw(m.next_raw(e.right()).right());
        if back != e {
            return Err(violation(format!(
                "dual ring of {e} is out of step (came back to {back})"
            )));
        }
    }

    if options.check_vertex_labels {
        check_vertex_labels(m)?;
    }
    if options.check_vertex_ids {
        check_vertex_ids(m)?;
    }
    Ok(())
}

/// Every record in a vertex ring names the same vertex.
pub fn check_vertex_labels(m: &Manifold) -> Result<(), ManifoldError> {
    let count = m.edge_count();
    let mut seen = vec![false; count];
    for i in (0..count).step_by(2) {
        if seen[i] {
            continue;
        }
        let start = EdgeId::new(i as u32);
        let label = m.data_raw(start);
        for e in m.vertex_ring(start)? {
            seen[e.index()] = true;
            let other = m.data_raw(e);
            if other != label {
                return Err(violation(format!(
                    "vertex ring of {start} mixes vertices {label} and {other}"
                )));
            }
        }
    }
    Ok(())
}

/// Every primal record names an allocated vertex.
pub fn check_vertex_ids(m: &Manifold) -> Result<(), ManifoldError> {
    let vertex_count = m.vertex_count();
    for i in (0..m.edge_count()).step_by(2) {
        let v = VertexId(m.data_raw(EdgeId::new(i as u32)));
        if v.index() >= vertex_count {
            return Err(ManifoldError::VertexOutOfRange {
                vertex: v,
                count: vertex_count,
            });
        }
    }
    Ok(())
}
