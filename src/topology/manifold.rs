//! Quad-edge manifold storage and its topological operators.
//!
//! A [`Manifold`] owns four growable arrays: the directed edge records, the
//! vertex attributes, the triangle indices and the wireframe edge indices.
//! Topology lives entirely in the `next` link of each edge record (the
//! rotation system); every mutator is expressed through [`Manifold::splice`].
//!
//! Public traversals and mutators range-check their edge ids and return
//! [`ManifoldError::EdgeOutOfRange`] instead of reading stale memory. Mutators
//! also reject dual records where a primal edge is required, before the first
//! write. The `*_raw` variants skip the check and are only used by crate
//! algorithms after their seeds have been validated.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::data::attributes::VertexStore;
use crate::data::storage::Arena;
use crate::debug_invariants::DebugInvariants;
use crate::manifold_error::ManifoldError;
use crate::topology::edge::{EdgeId, FaceId, VertexId};

/// Uniform color given to every vertex after triangulation.
pub const DEFAULT_COLOR: [u8; 4] = [42, 150, 89, 255];

/// Construction-time settings for a [`Manifold`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifoldOptions {
    /// Initial capacity of the edge-record arena (records, not bundles).
    pub edge_capacity: usize,
    /// Initial capacity of the vertex attribute arenas.
    pub vertex_capacity: usize,
    /// Initial capacity of the triangle arena.
    pub triangle_capacity: usize,
    /// Color written to every vertex by a triangulation pass.
    pub default_color: [u8; 4],
    /// Newell normal length at or below which a face counts as degenerate.
    pub degenerate_area: f32,
}

impl Default for ManifoldOptions {
    fn default() -> Self {
        Self {
            edge_capacity: 256,
            vertex_capacity: 256,
            triangle_capacity: 256,
            default_color: DEFAULT_COLOR,
            degenerate_area: 1e-12,
        }
    }
}

/// One directed edge record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EdgeRecord {
    /// Next record counterclockwise around this record's origin.
    pub next: EdgeId,
    /// Vertex id for primal records, face id for dual records.
    pub data: u32,
    /// Scratch marker owned by the triangulation pass.
    pub flag: bool,
}

impl Default for EdgeRecord {
    fn default() -> Self {
        Self {
            next: EdgeId::new(0),
            data: 0,
            flag: false,
        }
    }
}

/// Orientable 2-manifold mesh in quad-edge form.
#[derive(Clone, Debug)]
pub struct Manifold {
    pub(crate) edges: Arena<EdgeRecord>,
    pub(crate) vertices: VertexStore,
    pub(crate) triangles: Arena<[u32; 3]>,
    pub(crate) edge_indices: Arena<[u32; 2]>,
    options: ManifoldOptions,
}

impl Manifold {
    /// Empty manifold with default capacities.
    pub fn new() -> Result<Self, ManifoldError> {
        Self::with_options(ManifoldOptions::default())
    }

    pub fn with_options(options: ManifoldOptions) -> Result<Self, ManifoldError> {
        Ok(Self {
            edges: Arena::with_capacity("edge records", options.edge_capacity)?,
            vertices: VertexStore::with_capacity(options.vertex_capacity)?,
            triangles: Arena::with_capacity("triangles", options.triangle_capacity)?,
            edge_indices: Arena::with_capacity("edge indices", options.edge_capacity / 2)?,
            options,
        })
    }

    #[inline]
    pub fn options(&self) -> &ManifoldOptions {
        &self.options
    }

    /// Number of directed edge records (four per undirected edge).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of undirected edges.
    #[inline]
    pub fn bundle_count(&self) -> usize {
        self.edges.len() / 4
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Triangles produced by the last triangulation pass.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn edge_capacity(&self) -> usize {
        self.edges.capacity()
    }

    #[inline]
    pub fn vertex_capacity(&self) -> usize {
        self.vertices.capacity()
    }

    #[inline]
    pub fn triangle_capacity(&self) -> usize {
        self.triangles.capacity()
    }

    /// Return `e` if it names an allocated record.
    #[inline]
    pub fn check_edge(&self, e: EdgeId) -> Result<EdgeId, ManifoldError> {
        if e.index() < self.edges.len() {
            Ok(e)
        } else {
            Err(ManifoldError::EdgeOutOfRange {
                edge: e,
                count: self.edges.len(),
            })
        }
    }

    /// Return `e` if it names an allocated primal record.
    #[inline]
    pub fn check_primal(&self, e: EdgeId) -> Result<EdgeId, ManifoldError> {
        let e = self.check_edge(e)?;
        if e.is_primal() {
            Ok(e)
        } else {
            Err(ManifoldError::DualRecord(e))
        }
    }

    // ---------------------------------------------------------------------
    // Unchecked traversals
    // ---------------------------------------------------------------------

    #[inline]
    pub(crate) fn next_raw(&self, e: EdgeId) -> EdgeId {
        self.edges[e.index()].next
    }

    #[inline]
    pub(crate) fn data_raw(&self, e: EdgeId) -> u32 {
        self.edges[e.index()].data
    }

    #[inline]
    pub(crate) fn prev_raw(&self, e: EdgeId) -> EdgeId {
        self.next_raw(e.right()).right()
    }

    #[inline]
    pub(crate) fn next_left_raw(&self, e: EdgeId) -> EdgeId {
        self.next_raw(e.left()).right()
    }

    #[inline]
    pub(crate) fn prev_right_raw(&self, e: EdgeId) -> EdgeId {
        self.next_raw(e.flip())
    }

    #[inline]
    pub(crate) fn flag(&self, e: EdgeId) -> bool {
        self.edges[e.index()].flag
    }

    #[inline]
    pub(crate) fn set_flag(&mut self, e: EdgeId) {
        self.edges[e.index()].flag = true;
    }

    pub(crate) fn clear_flags(&mut self) {
        for rec in self.edges.as_mut_slice() {
            rec.flag = false;
        }
    }

    // ---------------------------------------------------------------------
    // Checked traversals
    // ---------------------------------------------------------------------

    /// Next edge counterclockwise around the origin of `e`.
    pub fn next(&self, e: EdgeId) -> Result<EdgeId, ManifoldError> {
        Ok(self.next_raw(self.check_edge(e)?))
    }

    /// Vertex id (primal records) or face id (dual records) stored on `e`.
    pub fn data(&self, e: EdgeId) -> Result<u32, ManifoldError> {
        Ok(self.data_raw(self.check_edge(e)?))
    }

    /// Clockwise around the origin vertex.
    pub fn prev(&self, e: EdgeId) -> Result<EdgeId, ManifoldError> {
        Ok(self.prev_raw(self.check_edge(e)?))
    }

    /// Counterclockwise around the left face.
    pub fn next_left(&self, e: EdgeId) -> Result<EdgeId, ManifoldError> {
        Ok(self.next_left_raw(self.check_edge(e)?))
    }

    /// Clockwise around the left face.
    pub fn prev_left(&self, e: EdgeId) -> Result<EdgeId, ManifoldError> {
        Ok(self.next_raw(self.check_edge(e)?).flip())
    }

    /// Counterclockwise around the right face.
    pub fn next_right(&self, e: EdgeId) -> Result<EdgeId, ManifoldError> {
        Ok(self.next_raw(self.check_edge(e)?.right()).left())
    }

    /// Clockwise around the right face.
    pub fn prev_right(&self, e: EdgeId) -> Result<EdgeId, ManifoldError> {
        Ok(self.prev_right_raw(self.check_edge(e)?))
    }

    /// Source vertex of `e`; for a dual record `right(p)`, the source of `p`.
    pub fn origin(&self, e: EdgeId) -> Result<VertexId, ManifoldError> {
        let e = self.check_edge(e)?;
        let primal = if e.is_primal() { e } else { e.left() };
        Ok(VertexId(self.data_raw(primal)))
    }

    /// Destination vertex of `e` (for a dual record, of its primal partner).
    pub fn destination(&self, e: EdgeId) -> Result<VertexId, ManifoldError> {
        self.origin(self.check_edge(e)?.flip())
    }

    /// Face to the left of `e`.
    pub fn left_face(&self, e: EdgeId) -> Result<FaceId, ManifoldError> {
        let e = self.check_edge(e)?;
        Ok(FaceId(self.data_raw(e.right())))
    }

    /// Face to the right of `e`.
    pub fn right_face(&self, e: EdgeId) -> Result<FaceId, ManifoldError> {
        let e = self.check_edge(e)?;
        Ok(FaceId(self.data_raw(e.left())))
    }

    // ---------------------------------------------------------------------
    // Ring walks
    // ---------------------------------------------------------------------

    /// Walk `step` from `start` until it returns, collecting every record.
    ///
    /// Fails with [`ManifoldError::OpenLoop`] if the walk takes more steps than
    /// there are records, which means the closure invariant is broken.
    pub(crate) fn collect_ring(
        &self,
        start: EdgeId,
        step: impl Fn(&Self, EdgeId) -> EdgeId,
    ) -> Result<Vec<EdgeId>, ManifoldError> {
        let limit = self.edges.len();
        let mut ring = Vec::new();
        let mut e = start;
        loop {
            ring.push(e);
            e = step(self, e);
            if e == start {
                return Ok(ring);
            }
            if ring.len() > limit {
                return Err(ManifoldError::OpenLoop { start, limit });
            }
        }
    }

    /// Edges of the face to the left of `e`, in `next_left` order.
    pub fn face_loop(&self, e: EdgeId) -> Result<Vec<EdgeId>, ManifoldError> {
        self.collect_ring(self.check_edge(e)?, Self::next_left_raw)
    }

    /// Edges around the origin of `e`, in counterclockwise order.
    pub fn vertex_ring(&self, e: EdgeId) -> Result<Vec<EdgeId>, ManifoldError> {
        self.collect_ring(self.check_edge(e)?, Self::next_raw)
    }

    /// Number of distinct face loops over all primal records.
    pub fn face_count(&self) -> Result<usize, ManifoldError> {
        let mut seen = vec![false; self.edges.len()];
        let mut faces = 0;
        for i in (0..self.edges.len()).step_by(2) {
            if seen[i] {
                continue;
            }
            for e in self.face_loop(EdgeId::new(i as u32))? {
                seen[e.index()] = true;
            }
            faces += 1;
        }
        Ok(faces)
    }

    // ---------------------------------------------------------------------
    // Vertex attributes
    // ---------------------------------------------------------------------

    /// Append a zeroed vertex.
    pub fn alloc_vertex(&mut self) -> Result<VertexId, ManifoldError> {
        self.vertices.alloc()
    }

    pub fn set_vertex(
        &mut self,
        v: VertexId,
        pos: [f32; 4],
        normal: [f32; 3],
    ) -> Result<VertexId, ManifoldError> {
        self.vertices.set(v, pos, normal)?;
        Ok(v)
    }

    pub fn position(&self, v: VertexId) -> Result<[f32; 4], ManifoldError> {
        self.vertices.position(v)
    }

    pub fn normal(&self, v: VertexId) -> Result<[f32; 3], ManifoldError> {
        self.vertices.normal(v)
    }

    pub fn color(&self, v: VertexId) -> Result<[u8; 4], ManifoldError> {
        self.vertices.color(v)
    }

    pub fn position_mut(&mut self, v: VertexId) -> Result<&mut [f32; 4], ManifoldError> {
        self.vertices.position_mut(v)
    }

    pub fn normal_mut(&mut self, v: VertexId) -> Result<&mut [f32; 3], ManifoldError> {
        self.vertices.normal_mut(v)
    }

    pub fn color_mut(&mut self, v: VertexId) -> Result<&mut [u8; 4], ManifoldError> {
        self.vertices.color_mut(v)
    }

    pub fn vertices(&self) -> &VertexStore {
        &self.vertices
    }

    /// Triangles of the last pass, three vertex ids each.
    pub fn triangles(&self) -> &[[u32; 3]] {
        self.triangles.as_slice()
    }

    /// Endpoint pairs of every undirected edge, rebuilt by each pass.
    pub fn edge_indices(&self) -> &[[u32; 2]] {
        self.edge_indices.as_slice()
    }

    // ---------------------------------------------------------------------
    // Construction operators
    // ---------------------------------------------------------------------

    /// Allocate an isolated edge from `src` to `dst` with `face` on both sides.
    ///
    /// Vertex ids are stored as given; they are only resolved against the
    /// vertex store when geometry is read. The returned id is the primal
    /// record of the new bundle.
    pub fn add_edge(
        &mut self,
        src: VertexId,
        dst: VertexId,
        face: FaceId,
    ) -> Result<EdgeId, ManifoldError> {
        let base = self.edges.len();
        let raw = u32::try_from(base)
            .ok()
            .filter(|b| b.checked_add(3).is_some())
            .ok_or(ManifoldError::AllocationFailed {
                what: "edge ids",
                requested: base + 4,
            })?;
        let e = EdgeId::new(raw);
        let record = |next: EdgeId, data: u32| EdgeRecord {
            next,
            data,
            flag: false,
        };
        self.edges.extend_from_slice(&[
            record(e, src.0),
            record(e.left(), face.0),
            record(e.flip(), dst.0),
            record(e.right(), face.0),
        ])?;
        Ok(e)
    }

    /// Exchange the origin rings of `a` and `b` together with their dual rings.
    ///
    /// Merges two distinct rings or splits one; applying it twice with the same
    /// arguments restores the previous linkage. `a` and `b` must both be
    /// primal or both be dual.
    pub fn splice(&mut self, a: EdgeId, b: EdgeId) -> Result<(), ManifoldError> {
        let a = self.check_edge(a)?;
        let b = self.check_edge(b)?;
        if a.is_primal() != b.is_primal() {
            return Err(ManifoldError::MixedSplice { a, b });
        }
        self.splice_raw(a, b);
        Ok(())
    }

    pub(crate) fn splice_raw(&mut self, a: EdgeId, b: EdgeId) {
        let a_next = self.next_raw(a);
        let b_next = self.next_raw(b);
        let alpha = a_next.right();
        let beta = b_next.right();
        let alpha_next = self.next_raw(alpha);
        let beta_next = self.next_raw(beta);

        self.edges[a.index()].next = b_next;
        self.edges[b.index()].next = a_next;
        self.edges[alpha.index()].next = beta_next;
        self.edges[beta.index()].next = alpha_next;
    }

    /// Insert a new edge from the destination of `a` to the origin of `b`,
    /// inside the face to the left of `a`. Both seeds must be primal records.
    pub fn connect(&mut self, a: EdgeId, b: EdgeId) -> Result<EdgeId, ManifoldError> {
        let a = self.check_primal(a)?;
        self.check_primal(b)?;
        let face = FaceId(self.data_raw(a.left()));
        self.connect_in_face(a, b, face)
    }

    /// [`Manifold::connect`] with an explicit label for the new edge's faces.
    pub fn connect_in_face(
        &mut self,
        a: EdgeId,
        b: EdgeId,
        face: FaceId,
    ) -> Result<EdgeId, ManifoldError> {
        let a = self.check_primal(a)?;
        let b = self.check_primal(b)?;
        let src = VertexId(self.data_raw(a.flip()));
        let dst = VertexId(self.data_raw(b));
        let e = self.add_edge(src, dst, face)?;
        let a_left_next = self.next_left_raw(a);
        self.splice_raw(e, a_left_next);
        self.splice_raw(e.flip(), b);
        Ok(e)
    }

    /// Undo a [`Manifold::connect`]: detach `e` from both endpoint rings.
    ///
    /// When `e` is the most recently allocated bundle it is released as well,
    /// so connect followed by disconnect leaves the edge arrays as they were.
    /// `e` must be a primal record.
    pub fn disconnect(&mut self, e: EdgeId) -> Result<(), ManifoldError> {
        let e = self.check_primal(e)?;
        let prev = self.prev_raw(e);
        self.splice_raw(e, prev);
        let prev_flip = self.prev_raw(e.flip());
        self.splice_raw(e.flip(), prev_flip);

        let base = e.base();
        if base.index() + 4 == self.edges.len() && self.is_isolated(base) {
            self.edges.truncate(base.index());
        }
        Ok(())
    }

    /// `true` when the bundle at `base` links only to itself.
    fn is_isolated(&self, base: EdgeId) -> bool {
        self.next_raw(base) == base
            && self.next_raw(base.flip()) == base.flip()
            && self.next_raw(base.right()) == base.left()
            && self.next_raw(base.left()) == base.right()
    }

    // ---------------------------------------------------------------------
    // Dumps
    // ---------------------------------------------------------------------

    /// One line per bundle: `id:next` for each of its four records.
    pub fn dump_edges(&self) -> String {
        let mut out = String::new();
        for base in (0..self.edges.len()).step_by(4) {
            let line: Vec<String> = (base..base + 4)
                .map(|i| format!("{}:{}", i, self.edges[i].next))
                .collect();
            let _ = writeln!(out, "{}", line.join(" "));
        }
        log::debug!("edges:\n{out}");
        out
    }

    /// One line per vertex with its homogeneous position.
    pub fn dump_vertices(&self) -> String {
        let mut out = String::new();
        for (i, p) in self.vertices.positions().iter().enumerate() {
            let _ = writeln!(
                out,
                "{}: {:.5}, {:.5}, {:.5}, {:.5}",
                i, p[0], p[1], p[2], p[3]
            );
        }
        log::debug!("vertices:\n{out}");
        out
    }
}

impl DebugInvariants for Manifold {
    fn validate_invariants(&self) -> Result<(), ManifoldError> {
        crate::topology::validation::validate_manifold(self)
    }
}
