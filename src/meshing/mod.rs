mod grid;

pub use grid::{build_grid_mesh, MAX_RESOLUTION};

use bevy::{
    prelude::*,
    render::{mesh::Indices, render_resource::PrimitiveTopology},
};

/// Flat quad mesh: parallel vertex/UV buffers and an index buffer where every
/// four consecutive entries describe one quad face.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadMesh {
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl QuadMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn quad_count(&self) -> usize {
        self.indices.len() / 4
    }

    pub fn quads(&self) -> impl Iterator<Item = [u32; 4]> + '_ {
        debug_assert!(
            self.indices.len() % 4 == 0,
            "quad index buffer length {} is not a multiple of 4",
            self.indices.len()
        );

        self.indices
            .chunks_exact(4)
            .map(|q| [q[0], q[1], q[2], q[3]])
    }

    /// Splits every quad `[a, b, c, d]` into triangles `[a, b, c]` and `[a, c, d]`,
    /// keeping the quad's winding.
    pub fn triangulate(&self) -> Vec<u32> {
        let mut triangles = Vec::with_capacity(self.quad_count() * 6);

        for [a, b, c, d] in self.quads() {
            triangles.extend([a, b, c]);
            triangles.extend([a, c, d]);
        }

        triangles
    }

    pub fn into_render_mesh(self) -> Mesh {
        let triangles = self.triangulate();
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);

        // The pbr pipeline requires normals; the grid is flat so they all point up
        let normals = vec![Vec3::Y; self.vertices.len()];

        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.vertices);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_UV_0,
            self.uvs.iter().map(|uv| uv.to_array()).collect::<Vec<_>>(),
        );

        mesh.set_indices(Some(Indices::U32(triangles)));

        mesh
    }
}
