use glam::Vec3;

use quad_manifold::prelude::*;

#[test]
fn planar_hexagon_yields_four_triangles_and_shared_normals() {
    let mut modeler = Modeler::new().unwrap();
    let hexagon = modeler.circle(6, FaceId(0)).unwrap();
    let m = modeler.manifold_mut();

    let report = m.triangulate_faces(&[hexagon]).unwrap();
    assert_eq!(report.triangles, 4);
    assert_eq!(report.faces, 1);
    assert_eq!(report.edges_added, 3);
    assert_eq!(
        m.triangles(),
        &[[3, 1, 2], [4, 1, 3], [5, 1, 4], [0, 1, 5]]
    );
    for v in 0..6 {
        let n = Vec3::from_array(m.normal(VertexId(v)).unwrap());
        assert!((n - Vec3::Z).length() < 1e-5, "vertex {v} normal {n}");
    }
    // the back face is still a hexagon
    assert_eq!(m.face_loop(hexagon.flip()).unwrap().len(), 6);
}

#[test]
fn both_faces_of_a_circle_triangulate_to_n_minus_two_each() {
    for n in 3..10 {
        let mut modeler = Modeler::new().unwrap();
        modeler.circle(n, FaceId(0)).unwrap();
        let report = modeler.manifold_mut().triangulate().unwrap();
        assert_eq!(report.triangles, 2 * (n - 2), "{n}-gon");
        assert_eq!(report.faces, 2);
    }
}

#[test]
fn degenerate_faces_never_produce_nan() {
    let mut modeler = Modeler::new().unwrap();
    modeler.scale(Vec3::ZERO);
    modeler.circle(4, FaceId(0)).unwrap();
    let m = modeler.manifold_mut();

    let report = m.triangulate().unwrap();
    assert_eq!(report.triangles, 4);
    assert_eq!(report.diagnostics.len(), 2);
    assert!(
        report
            .diagnostics
            .iter()
            .all(|d| matches!(d, Diagnostic::DegenerateFace { .. }))
    );
    let buffers = m.render_buffers();
    assert!(buffers.positions.iter().all(|x| x.is_finite()));
    assert!(buffers.normals.iter().all(|&x| x == 0.0));
}

#[test]
fn wireframe_has_one_pair_per_undirected_edge() {
    let mut modeler = Modeler::new().unwrap();
    let e = modeler.circle(5, FaceId(0)).unwrap();
    let m = modeler.manifold_mut();
    m.triangulate_faces(&[e]).unwrap();
    assert_eq!(m.edge_indices().len(), m.bundle_count());
    assert_eq!(m.bundle_count(), 5 + 2);
    assert_eq!(&m.edge_indices()[..5], &[[0, 1], [1, 2], [2, 3], [3, 4], [4, 0]]);
    assert_eq!(m.render_buffers().edge_count(), 7);
}

#[test]
fn colors_follow_the_configured_default() {
    let options = ManifoldOptions {
        default_color: [1, 2, 3, 4],
        ..Default::default()
    };
    let mut m = Manifold::with_options(options).unwrap();
    let a = m.alloc_vertex().unwrap();
    let b = m.alloc_vertex().unwrap();
    m.add_edge(a, b, FaceId(0)).unwrap();
    m.triangulate().unwrap();
    assert_eq!(m.color(a).unwrap(), [1, 2, 3, 4]);
    assert_eq!(m.render_buffers().colors, &[1, 2, 3, 4, 1, 2, 3, 4]);
}

#[test]
fn arenas_grow_by_doubling() {
    let options = ModelerOptions {
        manifold: ManifoldOptions {
            edge_capacity: 4,
            vertex_capacity: 2,
            triangle_capacity: 1,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut modeler = Modeler::with_options(options).unwrap();
    assert_eq!(modeler.manifold().edge_capacity(), 4);

    modeler.circle(5, FaceId(0)).unwrap();
    let m = modeler.manifold();
    assert_eq!(m.edge_count(), 20);
    assert_eq!(m.edge_capacity(), 32);
    assert_eq!(m.vertex_count(), 5);
    assert_eq!(m.vertex_capacity(), 8);

    let m = modeler.manifold_mut();
    m.triangulate().unwrap();
    assert_eq!(m.triangle_count(), 6);
    assert_eq!(m.triangle_capacity(), 8);
    for p in m.vertices().positions() {
        assert_eq!(p[3], 1.0);
    }
}
