//! Per-vertex attribute arrays: homogeneous position, normal and color.
//!
//! The three arrays are separate [`Arena`]s so each can be handed to a render
//! backend as one flat buffer, but they always share one length: a vertex is
//! allocated in all three at once and starts zeroed.

use crate::data::storage::Arena;
use crate::manifold_error::ManifoldError;
use crate::topology::edge::VertexId;

/// Position, normal and color storage keyed by [`VertexId`].
#[derive(Clone, Debug)]
pub struct VertexStore {
    positions: Arena<[f32; 4]>,
    normals: Arena<[f32; 3]>,
    colors: Arena<[u8; 4]>,
}

impl VertexStore {
    /// Empty store with room for `capacity` vertices in each array.
    pub fn with_capacity(capacity: usize) -> Result<Self, ManifoldError> {
        Ok(Self {
            positions: Arena::with_capacity("vertex positions", capacity)?,
            normals: Arena::with_capacity("vertex normals", capacity)?,
            colors: Arena::with_capacity("vertex colors", capacity)?,
        })
    }

    /// Number of allocated vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// `true` before the first vertex is allocated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Capacity shared by the three arrays.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.positions.capacity()
    }

    /// Append a zeroed vertex and return its id.
    pub fn alloc(&mut self) -> Result<VertexId, ManifoldError> {
        let count = self.len();
        let id = u32::try_from(count).map_err(|_| ManifoldError::AllocationFailed {
            what: "vertex ids",
            requested: count + 1,
        })?;
        // reserve everything first so a failure leaves the three arrays in step
        self.positions.reserve(1)?;
        self.normals.reserve(1)?;
        self.colors.reserve(1)?;
        self.positions.push([0.0; 4])?;
        self.normals.push([0.0; 3])?;
        self.colors.push([0; 4])?;
        Ok(VertexId(id))
    }

    /// Index of `v`, or [`ManifoldError::VertexOutOfRange`].
    #[inline]
    pub fn check(&self, v: VertexId) -> Result<usize, ManifoldError> {
        let count = self.len();
        if v.index() < count {
            Ok(v.index())
        } else {
            Err(ManifoldError::VertexOutOfRange { vertex: v, count })
        }
    }

    /// Overwrite the position and normal of `v`; the color is untouched.
    pub fn set(&mut self, v: VertexId, pos: [f32; 4], normal: [f32; 3]) -> Result<(), ManifoldError> {
        let i = self.check(v)?;
        self.positions[i] = pos;
        self.normals[i] = normal;
        Ok(())
    }

    /// Homogeneous position of `v`.
    pub fn position(&self, v: VertexId) -> Result<[f32; 4], ManifoldError> {
        Ok(self.positions[self.check(v)?])
    }

    /// Normal of `v`; zero until a triangulation pass writes it.
    pub fn normal(&self, v: VertexId) -> Result<[f32; 3], ManifoldError> {
        Ok(self.normals[self.check(v)?])
    }

    /// RGBA color of `v`.
    pub fn color(&self, v: VertexId) -> Result<[u8; 4], ManifoldError> {
        Ok(self.colors[self.check(v)?])
    }

    /// Mutable position of `v`.
    pub fn position_mut(&mut self, v: VertexId) -> Result<&mut [f32; 4], ManifoldError> {
        let i = self.check(v)?;
        Ok(&mut self.positions[i])
    }

    /// Mutable normal of `v`.
    pub fn normal_mut(&mut self, v: VertexId) -> Result<&mut [f32; 3], ManifoldError> {
        let i = self.check(v)?;
        Ok(&mut self.normals[i])
    }

    /// Mutable color of `v`.
    pub fn color_mut(&mut self, v: VertexId) -> Result<&mut [u8; 4], ManifoldError> {
        let i = self.check(v)?;
        Ok(&mut self.colors[i])
    }

    /// All positions, indexed by vertex id.
    pub fn positions(&self) -> &[[f32; 4]] {
        self.positions.as_slice()
    }

    /// All normals, indexed by vertex id.
    pub fn normals(&self) -> &[[f32; 3]] {
        self.normals.as_slice()
    }

    /// All colors, indexed by vertex id.
    pub fn colors(&self) -> &[[u8; 4]] {
        self.colors.as_slice()
    }

    pub(crate) fn normals_mut(&mut self) -> &mut [[f32; 3]] {
        self.normals.as_mut_slice()
    }

    pub(crate) fn fill_colors(&mut self, color: [u8; 4]) {
        self.colors.fill(color);
    }
}
