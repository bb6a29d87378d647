//! Fan triangulation with Newell face normals.
//!
//! A pass walks every unvisited face loop once:
//! 1. the face normal is computed with Newell's method and added to the
//!    normal accumulator of every vertex on the loop;
//! 2. the loop is cut into a fan by repeated [`Manifold::connect`] calls, and
//!    each triangle cut off is written to the triangle buffer;
//! 3. the three edges left over form the final triangle.
//!
//! After the faces, vertex normals are normalized once, every vertex gets the
//! configured default color and the wireframe edge index buffer is rebuilt.
//!
//! A pass adds edges to the manifold. Running it again on the result adds
//! none and yields the same triangles.

use glam::Vec3;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::manifold_error::{FaceFailure, ManifoldError};
use crate::topology::edge::EdgeId;
use crate::topology::manifold::Manifold;
use crate::topology::validation::check_vertex_ids;

/// Non-fatal findings of a triangulation pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// Newell normal length at or below the degenerate threshold; the face
    /// normal was clamped to zero.
    DegenerateFace { edge: EdgeId, area: f32 },
    /// Face loop with fewer than three edges; no triangles were emitted.
    CollapsedFace { edge: EdgeId, edges: usize },
}

/// Summary of a successful pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangulationReport {
    /// Triangles written to the triangle buffer.
    pub triangles: usize,
    /// Face loops visited.
    pub faces: usize,
    /// Edges inserted to split faces.
    pub edges_added: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl TriangulationReport {
    pub fn has_warnings(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

#[derive(Default)]
struct Pass {
    report: TriangulationReport,
    failed: Vec<FaceFailure>,
}

/// Newell normal of a closed polygon, not normalized.
///
/// Its length is twice the polygon's area.
pub fn newell_normal(points: &[Vec3]) -> Vec3 {
    points
        .iter()
        .circular_tuple_windows()
        .fold(Vec3::ZERO, |acc, (p0, p1)| {
            acc + Vec3::new(
                (p0.y - p1.y) * (p0.z + p1.z),
                (p0.z - p1.z) * (p0.x + p1.x),
                (p0.x - p1.x) * (p0.y + p1.y),
            )
        })
}

/// Triangulate every face of `m`.
///
/// Returns [`ManifoldError::TriangulationFailed`] if any face loop did not
/// reduce to a single terminal triangle; all other faces are still emitted.
pub fn triangulate(m: &mut Manifold) -> Result<TriangulationReport, ManifoldError> {
    begin_pass(m)?;
    let mut pass = Pass::default();
    let mut i = 0;
    // edges appended by the pass are flagged as they are created
    while i < m.edge_count() {
        let e = EdgeId::new(i as u32);
        if !m.flag(e) {
            process_face(m, e, &mut pass)?;
        }
        i += 2;
    }
    finish_pass(m, pass)
}

/// Triangulate only the faces to the left of `seeds`.
///
/// Other faces are left untouched and contribute nothing to the vertex
/// normals. Seeds must be primal records.
pub fn triangulate_faces(
    m: &mut Manifold,
    seeds: &[EdgeId],
) -> Result<TriangulationReport, ManifoldError> {
    for &seed in seeds {
        m.check_primal(seed)?;
    }
    begin_pass(m)?;
    let mut pass = Pass::default();
    for &seed in seeds {
        if !m.flag(seed) {
            process_face(m, seed, &mut pass)?;
        }
    }
    finish_pass(m, pass)
}

fn begin_pass(m: &mut Manifold) -> Result<(), ManifoldError> {
    // resolve every vertex before the first write
    check_vertex_ids(m)?;
    m.triangles.clear();
    m.vertices.normals_mut().fill([0.0; 3]);
    m.clear_flags();
    Ok(())
}

fn process_face(m: &mut Manifold, start: EdgeId, pass: &mut Pass) -> Result<(), ManifoldError> {
    let ring = m.collect_ring(start, Manifold::next_left_raw)?;
    for &e in &ring {
        m.set_flag(e);
    }
    pass.report.faces += 1;

    if ring.len() < 3 {
        log::warn!("triangulate: face at edge {start} has only {} edge(s)", ring.len());
        pass.report.diagnostics.push(Diagnostic::CollapsedFace {
            edge: start,
            edges: ring.len(),
        });
        return Ok(());
    }

    let normal = face_normal(m, start, &ring, pass);
    let normals = m.vertices.normals_mut();
    for &e in &ring {
        let v = m.edges[e.index()].data as usize;
        let n = &mut normals[v];
        n[0] += normal.x;
        n[1] += normal.y;
        n[2] += normal.z;
    }

    let mut count = 0usize;
    let mut edge = start;
    loop {
        if count >= 3 {
            let cut = m.connect(start, edge)?;
            m.set_flag(cut);
            m.set_flag(cut.flip());
            pass.report.edges_added += 1;
            emit_triangle(m, cut.flip(), pass)?;
            edge = cut;
            count = 1;
        }
        edge = m.next_left_raw(edge);
        count += 1;
        if edge == start {
            break;
        }
    }
    emit_triangle(m, start, pass)
}

/// Unit Newell normal of the loop, or zero for a degenerate face.
fn face_normal(m: &Manifold, start: EdgeId, ring: &[EdgeId], pass: &mut Pass) -> Vec3 {
    let positions = m.vertices.positions();
    let points: Vec<Vec3> = ring
        .iter()
        .map(|&e| {
            let p = positions[m.data_raw(e) as usize];
            Vec3::new(p[0], p[1], p[2])
        })
        .collect();
    let normal = newell_normal(&points);
    let area = normal.length();
    if area.is_finite() && area > m.options().degenerate_area {
        return normal / area;
    }
    log::warn!("triangulate: face at edge {start} is degenerate (newell length {area})");
    pass.report
        .diagnostics
        .push(Diagnostic::DegenerateFace { edge: start, area });
    Vec3::ZERO
}

/// Write the face to the left of `e` as one triangle, or record a failure if
/// it does not have exactly three edges.
fn emit_triangle(m: &mut Manifold, e: EdgeId, pass: &mut Pass) -> Result<(), ManifoldError> {
    let b = m.next_left_raw(e);
    let c = m.next_left_raw(b);
    if m.next_left_raw(c) == e {
        let tri = [m.data_raw(e), m.data_raw(b), m.data_raw(c)];
        m.triangles.push(tri)?;
        pass.report.triangles += 1;
        return Ok(());
    }
    let remaining = m.collect_ring(e, Manifold::next_left_raw)?.len();
    log::warn!("triangulate: face at edge {e} ended with {remaining} edges instead of 3");
    pass.failed.push(FaceFailure { edge: e, remaining });
    Ok(())
}

fn finish_pass(m: &mut Manifold, pass: Pass) -> Result<TriangulationReport, ManifoldError> {
    for n in m.vertices.normals_mut() {
        let len = Vec3::from_array(*n).length();
        *n = if len.is_finite() && len > 0.0 {
            [n[0] / len, n[1] / len, n[2] / len]
        } else {
            [0.0; 3]
        };
    }

    let color = m.options().default_color;
    m.vertices.fill_colors(color);

    m.edge_indices.clear();
    for base in (0..m.edge_count()).step_by(4) {
        let e = EdgeId::new(base as u32);
        let pair = [m.data_raw(e), m.data_raw(e.flip())];
        m.edge_indices.push(pair)?;
    }

    // a failed face means the rotation system was already broken on entry
    if pass.failed.is_empty() {
        m.debug_assert_invariants();
    }
    log::debug!(
        "triangulate: {} triangles from {} faces ({} edges added)",
        pass.report.triangles,
        pass.report.faces,
        pass.report.edges_added
    );

    if pass.failed.is_empty() {
        Ok(pass.report)
    } else {
        Err(ManifoldError::TriangulationFailed {
            failed: pass.failed,
            emitted: pass.report.triangles,
        })
    }
}

impl Manifold {
    /// See [`triangulate`].
    pub fn triangulate(&mut self) -> Result<TriangulationReport, ManifoldError> {
        triangulate(self)
    }

    /// See [`triangulate_faces`].
    pub fn triangulate_faces(
        &mut self,
        seeds: &[EdgeId],
    ) -> Result<TriangulationReport, ManifoldError> {
        triangulate_faces(self, seeds)
    }
}
