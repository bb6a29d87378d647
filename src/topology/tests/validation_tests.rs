use crate::manifold_error::ManifoldError;
use crate::topology::edge::{EdgeId, FaceId, VertexId};
use crate::topology::manifold::Manifold;
use crate::topology::validation::{
    ValidationOptions, check_vertex_ids, validate_manifold, validate_manifold_with,
};

fn is_violation(r: Result<(), ManifoldError>) -> bool {
    matches!(r, Err(ManifoldError::InvariantViolation(_)))
}

fn pair() -> Manifold {
    let mut m = Manifold::new().unwrap();
    let a = m.add_edge(VertexId(0), VertexId(1), FaceId(0)).unwrap();
    let b = m.add_edge(VertexId(1), VertexId(2), FaceId(0)).unwrap();
    m.splice(a.flip(), b).unwrap();
    m
}

#[test]
fn empty_and_spliced_manifolds_are_valid() {
    assert!(validate_manifold(&Manifold::new().unwrap()).is_ok());
    assert!(validate_manifold(&pair()).is_ok());
}

#[test]
fn out_of_range_next_is_reported() {
    let mut m = pair();
    m.edges[5].next = EdgeId::new(40);
    assert!(is_violation(validate_manifold(&m)));
}

#[test]
fn broken_dual_ring_is_reported() {
    let mut m = pair();
    // swap two dual targets: still a parity-preserving permutation
    m.edges[1].next = EdgeId::new(7);
    m.edges[3].next = EdgeId::new(3);
    let err = validate_manifold(&m).unwrap_err();
    assert!(err.to_string().contains("dual ring"));
}

#[test]
fn vertex_labels_are_checked_only_when_asked() {
    let mut m = pair();
    m.edges[4].data = 8;
    assert!(validate_manifold_with(&m, ValidationOptions::default()).is_ok());
    assert!(is_violation(validate_manifold(&m)));
}

#[test]
fn vertex_ids_must_resolve() {
    let mut m = pair();
    assert_eq!(
        check_vertex_ids(&m).unwrap_err(),
        ManifoldError::VertexOutOfRange {
            vertex: VertexId(0),
            count: 0
        }
    );
    for _ in 0..3 {
        m.alloc_vertex().unwrap();
    }
    assert!(validate_manifold_with(&m, ValidationOptions::all()).is_ok());
}
