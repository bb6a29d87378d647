//! Procedural modeler: primitive builders over a [`Manifold`].
//!
//! A [`Modeler`] owns a manifold and a [`TransformStack`]. Every vertex it
//! creates is placed by mapping a local point through the top frame, so
//! shapes are positioned by editing the stack between primitive calls:
//!
//! ```rust
//! use glam::Vec3;
//! use quad_manifold::mesh_generation::Modeler;
//! use quad_manifold::topology::edge::FaceId;
//!
//! let mut modeler = Modeler::new()?;
//! let bottom = modeler.circle(8, FaceId(0))?;
//! modeler.push();
//! modeler.translate(Vec3::new(0.0, 0.0, 2.0));
//! let top = modeler.circle(8, FaceId(1))?;
//! modeler.pop();
//! modeler.cylinder_to(bottom, top, FaceId(2))?;
//! modeler.cone_to(bottom.flip(), FaceId(3))?;
//! modeler.cone_to(top, FaceId(4))?;
//! let report = modeler.manifold_mut().triangulate()?;
//! assert_eq!(report.triangles, 32);
//! # Ok::<(), quad_manifold::manifold_error::ManifoldError>(())
//! ```

pub mod transform_stack;

use std::f32::consts::TAU;

use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::manifold_error::ManifoldError;
use crate::topology::edge::{EdgeId, FaceId, VertexId};
use crate::topology::manifold::{Manifold, ManifoldOptions};

pub use transform_stack::TransformStack;

/// Optional configuration for a [`Modeler`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelerOptions {
    pub manifold: ManifoldOptions,
    /// Divisions used by [`Modeler::default_circle`].
    pub circle_divisions: usize,
}

impl Default for ModelerOptions {
    fn default() -> Self {
        Self {
            manifold: ManifoldOptions::default(),
            circle_divisions: 16,
        }
    }
}

/// Manifold plus transform stack.
#[derive(Clone, Debug)]
pub struct Modeler {
    manifold: Manifold,
    stack: TransformStack,
    options: ModelerOptions,
}

impl Modeler {
    pub fn new() -> Result<Self, ManifoldError> {
        Self::with_options(ModelerOptions::default())
    }

    pub fn with_options(options: ModelerOptions) -> Result<Self, ManifoldError> {
        Ok(Self {
            manifold: Manifold::with_options(options.manifold)?,
            stack: TransformStack::new(),
            options,
        })
    }

    pub fn options(&self) -> &ModelerOptions {
        &self.options
    }

    pub fn manifold(&self) -> &Manifold {
        &self.manifold
    }

    pub fn manifold_mut(&mut self) -> &mut Manifold {
        &mut self.manifold
    }

    pub fn into_manifold(self) -> Manifold {
        self.manifold
    }

    pub fn stack(&self) -> &TransformStack {
        &self.stack
    }

    // ---------------------------------------------------------------------
    // Transform stack
    // ---------------------------------------------------------------------

    /// Duplicate the current frame; the returned matrix is the new top.
    pub fn push(&mut self) -> &mut Mat4 {
        self.stack.push()
    }

    /// Discard the current frame unless it is the root.
    pub fn pop(&mut self) -> &mut Self {
        self.stack.pop();
        self
    }

    pub fn matrix(&self) -> &Mat4 {
        self.stack.matrix()
    }

    pub fn matrix_mut(&mut self) -> &mut Mat4 {
        self.stack.matrix_mut()
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.stack.rotate_z(angle);
        self
    }

    pub fn rotate(&mut self, axis: Vec3, angle: f32) -> &mut Self {
        self.stack.rotate(axis, angle);
        self
    }

    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        self.stack.translate(offset);
        self
    }

    pub fn scale(&mut self, factors: Vec3) -> &mut Self {
        self.stack.scale(factors);
        self
    }

    /// Run `f` inside a pushed frame, popping it again whatever `f` returns.
    fn with_frame<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.stack.push();
        let out = f(self);
        self.stack.pop();
        out
    }

    // ---------------------------------------------------------------------
    // Primitives
    // ---------------------------------------------------------------------

    /// Allocate a vertex at the image of `local` under the current frame.
    pub fn add_vertex(&mut self, local: impl Into<Vec4>) -> Result<VertexId, ManifoldError> {
        let world = self.stack.transform(local.into());
        let v = self.manifold.alloc_vertex()?;
        *self.manifold.position_mut(v)? = world.to_array();
        Ok(v)
    }

    /// Closed loop of `num_divs` vertices on the unit circle of the current
    /// frame's xy-plane, counterclockwise about +z.
    ///
    /// Returns the edge from the first vertex to the second; the loop is the
    /// face on its left.
    pub fn circle(&mut self, num_divs: usize, face: FaceId) -> Result<EdgeId, ManifoldError> {
        if num_divs < 3 {
            return Err(ManifoldError::InvalidDivisions(num_divs));
        }
        let unit = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let mut verts = Vec::with_capacity(num_divs);
        verts.push(self.add_vertex(unit)?);
        for i in 1..num_divs {
            let angle = TAU * i as f32 / num_divs as f32;
            let v = self.with_frame(|m| {
                m.stack.rotate_z(angle);
                m.add_vertex(unit)
            })?;
            verts.push(v);
        }

        let mut edges = Vec::with_capacity(num_divs);
        for i in 0..num_divs {
            let next = verts[(i + 1) % num_divs];
            edges.push(self.manifold.add_edge(verts[i], next, face)?);
        }
        // chain each edge onto the destination ring of its predecessor
        for i in 1..num_divs {
            let target = self.manifold.prev_raw(edges[i - 1].flip());
            self.manifold.splice_raw(edges[i], target);
        }
        let target = self.manifold.prev_raw(edges[num_divs - 1].flip());
        self.manifold.splice_raw(edges[0], target);

        self.manifold.debug_assert_invariants();
        log::trace!("circle: {num_divs} divisions from edge {}", edges[0]);
        Ok(edges[0])
    }

    /// [`Modeler::circle`] with the configured number of divisions.
    pub fn default_circle(&mut self, face: FaceId) -> Result<EdgeId, ManifoldError> {
        self.circle(self.options.circle_divisions, face)
    }

    /// Fill the face to the right of `loop_edge` with a fan of triangles
    /// meeting at a new apex vertex placed at the current frame's origin.
    ///
    /// An `n`-edge loop becomes `n` triangles. Returns the last spoke,
    /// directed from the loop towards the apex.
    pub fn cone_to(&mut self, loop_edge: EdgeId, face: FaceId) -> Result<EdgeId, ManifoldError> {
        let loop_edge = self.manifold.check_primal(loop_edge)?;
        let ring = self
            .manifold
            .collect_ring(loop_edge, Manifold::prev_right_raw)?;
        if ring.len() < 3 {
            return Err(ManifoldError::DegenerateLoop {
                edge: loop_edge,
                edges: ring.len(),
            });
        }

        let tip = self.add_vertex(Vec4::new(0.0, 0.0, 0.0, 1.0))?;
        let first = loop_edge.flip();
        let first_vertex = VertexId(self.manifold.data_raw(first));
        let spoke = self.manifold.add_edge(first_vertex, tip, face)?;
        self.manifold.splice_raw(spoke, first);

        let mut etip = spoke;
        for &edge in &ring[1..] {
            etip = self.manifold.connect_in_face(etip, edge.flip(), face)?.flip();
        }

        self.manifold.debug_assert_invariants();
        log::trace!("cone_to: {} spokes to apex {tip}", ring.len());
        Ok(etip)
    }

    /// Stitch two loops of equal length into a tube of quadrilaterals.
    ///
    /// `loop0` is walked clockwise around its right face and `loop1`
    /// counterclockwise around its left face; matching positions are joined.
    /// Both loops are measured before anything is modified.
    pub fn cylinder_to(
        &mut self,
        loop0: EdgeId,
        loop1: EdgeId,
        face: FaceId,
    ) -> Result<EdgeId, ManifoldError> {
        let loop0 = self.manifold.check_primal(loop0)?;
        let loop1 = self.manifold.check_primal(loop1)?;
        let ring0 = self.manifold.collect_ring(loop0, Manifold::prev_right_raw)?;
        let ring1 = self.manifold.collect_ring(loop1, Manifold::next_left_raw)?;
        if ring0.len() != ring1.len() {
            return Err(ManifoldError::LoopSizeMismatch {
                first: ring0.len(),
                second: ring1.len(),
            });
        }

        for (&e0, &e1) in ring0.iter().zip(&ring1) {
            self.manifold.connect_in_face(e1, e0.flip(), face)?;
        }

        self.manifold.debug_assert_invariants();
        log::trace!("cylinder_to: {} side faces", ring0.len());
        Ok(loop1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_places_vertices_on_unit_circle() {
        let mut m = Modeler::new().unwrap();
        m.circle(4, FaceId(0)).unwrap();
        let expected = [[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]];
        for (i, xy) in expected.iter().enumerate() {
            let p = m.manifold().position(VertexId(i as u32)).unwrap();
            assert!((p[0] - xy[0]).abs() < 1e-6 && (p[1] - xy[1]).abs() < 1e-6);
            assert_eq!(p[2], 0.0);
            assert_eq!(p[3], 1.0);
        }
        assert_eq!(m.stack().depth(), 1);
    }

    #[test]
    fn circle_follows_the_current_frame() {
        let mut m = Modeler::new().unwrap();
        m.translate(Vec3::new(0.0, 0.0, 3.0))
            .scale(Vec3::new(2.0, 2.0, 1.0));
        m.circle(3, FaceId(0)).unwrap();
        let p = m.manifold().position(VertexId(0)).unwrap();
        assert!((p[0] - 2.0).abs() < 1e-6);
        assert!((p[2] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn too_few_divisions_is_rejected_before_any_allocation() {
        let mut m = Modeler::new().unwrap();
        assert_eq!(
            m.circle(2, FaceId(0)).unwrap_err(),
            ManifoldError::InvalidDivisions(2)
        );
        assert_eq!(m.manifold().vertex_count(), 0);
        assert_eq!(m.manifold().edge_count(), 0);
    }

    #[test]
    fn default_circle_uses_configured_divisions() {
        let options = ModelerOptions {
            circle_divisions: 5,
            ..Default::default()
        };
        let mut m = Modeler::with_options(options).unwrap();
        let e = m.default_circle(FaceId(0)).unwrap();
        assert_eq!(m.manifold().face_loop(e).unwrap().len(), 5);
        assert_eq!(m.manifold().vertex_count(), 5);
    }

    #[test]
    fn cone_on_isolated_edge_is_rejected() {
        let mut m = Modeler::new().unwrap();
        let a = m.add_vertex(Vec4::new(0.0, 0.0, 0.0, 1.0)).unwrap();
        let b = m.add_vertex(Vec4::new(1.0, 0.0, 0.0, 1.0)).unwrap();
        let e = m.manifold_mut().add_edge(a, b, FaceId(0)).unwrap();
        assert_eq!(
            m.cone_to(e, FaceId(1)).unwrap_err(),
            ManifoldError::DegenerateLoop { edge: e, edges: 2 }
        );
        assert_eq!(m.manifold().vertex_count(), 2);
    }

    #[test]
    fn dual_loop_seeds_are_rejected_before_any_allocation() {
        let mut m = Modeler::new().unwrap();
        let bottom = m.circle(4, FaceId(0)).unwrap();
        let top = m.circle(4, FaceId(1)).unwrap();
        let (verts, edges) = (m.manifold().vertex_count(), m.manifold().edge_count());
        assert_eq!(
            m.cone_to(bottom.right(), FaceId(2)).unwrap_err(),
            ManifoldError::DualRecord(bottom.right())
        );
        assert_eq!(
            m.cylinder_to(bottom, top.left(), FaceId(2)).unwrap_err(),
            ManifoldError::DualRecord(top.left())
        );
        assert_eq!(m.manifold().vertex_count(), verts);
        assert_eq!(m.manifold().edge_count(), edges);
    }

    #[test]
    fn pop_at_root_keeps_identity() {
        let mut m = Modeler::new().unwrap();
        m.pop().pop();
        assert_eq!(*m.matrix(), Mat4::IDENTITY);
        *m.push() = Mat4::from_translation(Vec3::X);
        assert_eq!(m.depth(), 2);
        m.matrix_mut().w_axis.y = 4.0;
        let v = m.add_vertex(Vec4::new(0.0, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(m.manifold().position(v).unwrap(), [1.0, 4.0, 0.0, 1.0]);
    }
}
