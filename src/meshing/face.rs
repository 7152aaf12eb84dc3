use cgmath::{Point3, Vector3};

use crate::voxels::block::block_side::BlockSide;

/// Corner offsets of the unit-cube quad for each side, indexed by `BlockSide`.
///
/// Corners are listed so that triangles `(0, 1, 2)` and `(0, 2, 3)` cover the quad.
const FACE_CORNERS: [[[f32; 3]; 4]; 6] = [
    // Front
    [[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
    // Back
    [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
    // Left
    [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]],
    // Right
    [[1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
    // Top
    [[0.0, 1.0, 1.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0]],
    // Bottom
    [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 0.0, 0.0]],
];

/// Flat directional shading applied to the block colour, indexed by `BlockSide`.
pub const FACE_BRIGHTNESS: [f32; 6] = [1.0, 0.6, 0.85, 0.75, 0.9, 0.8];

/// UV coordinates shared by every quad, in corner order.
pub const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is the unit square on one side of the cell at `(i, j, k)`, in chunk-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// The four corners, in triangle-fan order
    pub corners: [Point3<f32>; 4],
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face on `block_side` of the voxel at `(i, j, k)`.
    pub fn new(i: i32, j: i32, k: i32, block_side: BlockSide) -> Self {
        let origin = Vector3::new(i as f32, j as f32, k as f32);
        let template = &FACE_CORNERS[block_side as usize];
        Face {
            corners: template.map(|corner| Point3::from(corner) + origin),
            block_side,
        }
    }

    /// The outward normal as a float vector.
    pub fn normal(&self) -> Vector3<f32> {
        self.block_side.normal().map(|c| c as f32)
    }

    /// The shading multiplier for this face's side.
    pub fn brightness(&self) -> f32 {
        FACE_BRIGHTNESS[self.block_side as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn corners_lie_on_the_face_plane() {
        for side in BlockSide::all() {
            let face = Face::new(3, 4, 5, side);
            let normal = face.normal();
            let center = Vector3::new(3.5, 4.5, 5.5);
            for corner in face.corners {
                let offset = Vector3::new(corner.x, corner.y, corner.z) - center;
                assert_eq!(offset.dot(normal), 0.5, "{side:?} corner {corner:?}");
            }
        }
    }

    #[test]
    fn winding_faces_outward() {
        for side in BlockSide::all() {
            let face = Face::new(0, 0, 0, side);
            let [a, b, c, _] = face.corners;
            // Clockwise when seen from outside, so the right-handed cross product points in.
            let winding = (b - a).cross(c - a).normalize();
            assert_eq!(winding, -face.normal(), "{side:?}");
        }
    }
}
