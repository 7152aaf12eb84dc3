//! Mesh data structures produced by chunk meshing.
//!
//! A [`ChunkMesh`] is a single triangle-list surface stored as parallel arrays, the way
//! most engines accept them. A [`CollisionShape`] is the matching trimesh derived from the
//! exact same triangles.

use cgmath::{Point3, Vector3};

use crate::voxels::block::Color;

use super::{
    face::{Face, FACE_UVS},
    vertex::Vertex,
};

/// A renderable triangle-list surface in chunk-local space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex positions
    pub positions: Vec<Point3<f32>>,
    /// Per-vertex face normals
    pub normals: Vec<Vector3<f32>>,
    /// Per-vertex shaded colours
    pub colors: Vec<Color>,
    /// Per-vertex UV coordinates
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices into the vertex arrays, three per triangle
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one quad: four vertices sharing `color` and the face normal, and two
    /// triangles `(0, 1, 2)` and `(0, 2, 3)` offset by the running vertex count.
    pub fn add_face(&mut self, face: &Face, color: Color) {
        let base = self.positions.len() as u32;
        let normal = face.normal();

        for (corner, uv) in face.corners.iter().zip(FACE_UVS) {
            self.positions.push(*corner);
            self.normals.push(normal);
            self.colors.push(color);
            self.uvs.push(uv);
        }

        self.indices.extend_from_slice(&Self::generate_face_indices(base));
    }

    /// Index data for a quad whose first vertex is `base`.
    pub fn generate_face_indices(base: u32) -> [u32; 6] {
        [base, base + 1, base + 2, base, base + 2, base + 3]
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of quads (faces) emitted.
    pub fn quad_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// `true` when no face was emitted.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Interleaves the parallel arrays into GPU-ready vertices.
    ///
    /// The result can be uploaded directly with `bytemuck::cast_slice`.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.colors)
            .zip(&self.uvs)
            .map(|(((position, normal), color), uv)| Vertex::new(*position, *normal, *color, *uv))
            .collect()
    }

    /// Iterates over the indexed triangles as corner triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f32>; 3]> + '_ {
        self.indices.chunks_exact(3).map(|triangle| {
            [
                self.positions[triangle[0] as usize],
                self.positions[triangle[1] as usize],
                self.positions[triangle[2] as usize],
            ]
        })
    }
}

/// A static concave collision shape: an unindexed triangle soup in chunk-local space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionShape {
    /// Triangles, three corners each
    pub triangles: Vec<[Point3<f32>; 3]>,
}

impl CollisionShape {
    /// Builds the trimesh shape from exactly the triangles of `mesh`.
    pub fn from_mesh(mesh: &ChunkMesh) -> Self {
        CollisionShape {
            triangles: mesh.triangles().collect(),
        }
    }

    /// Flattens the triangles into a vertex list, three per triangle.
    pub fn faces(&self) -> Vec<Point3<f32>> {
        self.triangles.iter().flatten().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::block_side::BlockSide;

    #[test]
    fn quads_are_indexed_relative_to_running_vertex_count() {
        let mut mesh = ChunkMesh::new();
        mesh.add_face(&Face::new(0, 0, 0, BlockSide::TOP), Color::WHITE);
        mesh.add_face(&Face::new(1, 0, 0, BlockSide::TOP), Color::WHITE);

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert_eq!(&mesh.uvs[..4], &FACE_UVS);
        assert!(mesh.normals.iter().all(|n| *n == Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn collision_shape_mirrors_mesh_triangles() {
        let mut mesh = ChunkMesh::new();
        mesh.add_face(&Face::new(2, 3, 4, BlockSide::FRONT), Color::WHITE);

        let shape = CollisionShape::from_mesh(&mesh);
        assert_eq!(shape.triangles.len(), 2);
        assert_eq!(shape.triangles[0], [mesh.positions[0], mesh.positions[1], mesh.positions[2]]);
        assert_eq!(shape.triangles[1], [mesh.positions[0], mesh.positions[2], mesh.positions[3]]);
        assert_eq!(shape.faces().len(), 6);
    }

    #[test]
    fn interleaved_vertices_match_arrays() {
        let mut mesh = ChunkMesh::new();
        mesh.add_face(&Face::new(0, 0, 0, BlockSide::BOTTOM), Color::rgb(0.2, 0.4, 0.6));
        let vertices = mesh.vertices();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[2].tex_coords, [1.0, 1.0]);
        assert_eq!(vertices[0].normal, [0.0, -1.0, 0.0]);
    }
}
