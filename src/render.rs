//! Flat buffer views handed to a rendering backend.
//!
//! The crate does not talk to a GPU. [`Manifold::render_buffers`] borrows the
//! attribute and index arenas as flat scalar slices, and a backend implements
//! [`RenderAdapter`] to push them wherever they need to go.

use crate::topology::manifold::Manifold;

/// Borrowed, upload-ready views of a triangulated manifold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderBuffers<'a> {
    /// Four floats per vertex.
    pub positions: &'a [f32],
    /// Three floats per vertex.
    pub normals: &'a [f32],
    /// Four bytes per vertex.
    pub colors: &'a [u8],
    /// Three vertex ids per triangle.
    pub triangles: &'a [u32],
    /// Two vertex ids per undirected edge.
    pub edges: &'a [u32],
}

impl<'a> RenderBuffers<'a> {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 4
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    pub fn position_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.positions)
    }

    pub fn normal_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.normals)
    }

    pub fn triangle_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.triangles)
    }

    pub fn edge_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.edges)
    }

    /// Upload every buffer to `adapter`, replacing what it held before.
    pub fn upload_to<A: RenderAdapter + ?Sized>(&self, adapter: &mut A) -> Result<(), A::Error> {
        adapter.release();
        adapter.upload(self)
    }
}

/// Backend that owns GPU-side copies of the buffers.
///
/// `bind_*` calls refer to whatever the last successful `upload` sent.
pub trait RenderAdapter {
    type Error: std::error::Error;

    /// Copy all buffers to the backend.
    fn upload(&mut self, buffers: &RenderBuffers<'_>) -> Result<(), Self::Error>;

    /// Drop any uploaded buffers. Releasing twice is a no-op.
    fn release(&mut self);

    /// Bind positions, normals and colors as vertex attributes.
    fn bind_vertices(&mut self) -> Result<(), Self::Error>;

    /// Bind the triangle index buffer; returns the number of indices to draw.
    fn bind_triangles(&mut self) -> Result<usize, Self::Error>;

    /// Bind the wireframe index buffer; returns the number of indices to draw.
    fn bind_edges(&mut self) -> Result<usize, Self::Error>;
}

impl Manifold {
    /// Flat views over the vertex attributes and the index buffers of the
    /// last triangulation pass.
    pub fn render_buffers(&self) -> RenderBuffers<'_> {
        RenderBuffers {
            positions: bytemuck::cast_slice(self.vertices.positions()),
            normals: bytemuck::cast_slice(self.vertices.normals()),
            colors: bytemuck::cast_slice(self.vertices.colors()),
            triangles: bytemuck::cast_slice(self.triangles.as_slice()),
            edges: bytemuck::cast_slice(self.edge_indices.as_slice()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_generation::Modeler;
    use crate::topology::edge::FaceId;

    #[derive(Debug, thiserror::Error)]
    #[error("nothing uploaded")]
    struct Empty;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        triangles: Vec<u32>,
        edges: Vec<u32>,
        vertices: usize,
    }

    impl RenderAdapter for Recorder {
        type Error = Empty;

        fn upload(&mut self, buffers: &RenderBuffers<'_>) -> Result<(), Empty> {
            self.calls.push("upload");
            self.triangles = buffers.triangles.to_vec();
            self.edges = buffers.edges.to_vec();
            self.vertices = buffers.vertex_count();
            Ok(())
        }

        fn release(&mut self) {
            self.calls.push("release");
            self.triangles.clear();
            self.edges.clear();
            self.vertices = 0;
        }

        fn bind_vertices(&mut self) -> Result<(), Empty> {
            self.calls.push("bind_vertices");
            if self.vertices == 0 { Err(Empty) } else { Ok(()) }
        }

        fn bind_triangles(&mut self) -> Result<usize, Empty> {
            self.calls.push("bind_triangles");
            Ok(self.triangles.len())
        }

        fn bind_edges(&mut self) -> Result<usize, Empty> {
            self.calls.push("bind_edges");
            Ok(self.edges.len())
        }
    }

    #[test]
    fn buffers_are_flat_and_sized_per_element() {
        let mut modeler = Modeler::new().unwrap();
        let e = modeler.circle(4, FaceId(0)).unwrap();
        let m = modeler.manifold_mut();
        m.triangulate_faces(&[e]).unwrap();
        let buffers = m.render_buffers();
        assert_eq!(buffers.vertex_count(), 4);
        assert_eq!(buffers.normals.len(), 12);
        assert_eq!(buffers.colors.len(), 16);
        assert_eq!(buffers.triangle_count(), 2);
        assert_eq!(buffers.edge_count(), 5);
        assert_eq!(buffers.position_bytes().len(), 64);
        assert_eq!(buffers.triangle_bytes().len(), 24);
        assert_eq!(&buffers.edges[..2], &[0, 1]);
    }

    #[test]
    fn adapter_sees_reupload_after_release() {
        let mut modeler = Modeler::new().unwrap();
        let e = modeler.circle(3, FaceId(0)).unwrap();
        modeler.manifold_mut().triangulate_faces(&[e]).unwrap();

        let mut recorder = Recorder::default();
        assert!(recorder.bind_vertices().is_err());
        modeler
            .manifold()
            .render_buffers()
            .upload_to(&mut recorder)
            .unwrap();
        recorder.bind_vertices().unwrap();
        assert_eq!(recorder.bind_triangles().unwrap(), 3);
        assert_eq!(recorder.bind_edges().unwrap(), 6);
        assert_eq!(
            recorder.calls,
            [
                "bind_vertices",
                "release",
                "upload",
                "bind_vertices",
                "bind_triangles",
                "bind_edges"
            ]
        );
    }
}
