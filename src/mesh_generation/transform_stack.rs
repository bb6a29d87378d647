//! Stack of homogeneous model transforms used to place generated vertices.

use glam::{Mat4, Vec3, Vec4};

/// Transform stack whose bottom frame is the identity and is never popped.
///
/// Edits to the top frame post-multiply, so they act in the frame's local
/// coordinates: `translate` followed by `rotate_z` spins around the
/// translated origin.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformStack {
    frames: Vec<Mat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self {
            frames: vec![Mat4::IDENTITY],
        }
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames, counting the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Duplicate the top frame and return the new top for editing.
    pub fn push(&mut self) -> &mut Mat4 {
        let top = *self.matrix();
        self.frames.push(top);
        self.matrix_mut()
    }

    /// Discard the top frame. Returns `false` (and does nothing) at the root.
    pub fn pop(&mut self) -> bool {
        if self.frames.len() > 1 {
            self.frames.pop();
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        // the root frame is never removed
        &self.frames[self.frames.len() - 1]
    }

    #[inline]
    pub fn matrix_mut(&mut self) -> &mut Mat4 {
        let top = self.frames.len() - 1;
        &mut self.frames[top]
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        *self.matrix_mut() *= Mat4::from_rotation_z(angle);
        self
    }

    /// Rotate about `axis`; a zero axis leaves the frame unchanged.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) -> &mut Self {
        match axis.try_normalize() {
            Some(axis) => *self.matrix_mut() *= Mat4::from_axis_angle(axis, angle),
            None => log::warn!("rotate: ignoring zero-length axis"),
        }
        self
    }

    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        *self.matrix_mut() *= Mat4::from_translation(offset);
        self
    }

    pub fn scale(&mut self, factors: Vec3) -> &mut Self {
        *self.matrix_mut() *= Mat4::from_scale(factors);
        self
    }

    /// Image of the homogeneous point `p` under the top frame.
    #[inline]
    pub fn transform(&self, p: Vec4) -> Vec4 {
        *self.matrix() * p
    }
}
