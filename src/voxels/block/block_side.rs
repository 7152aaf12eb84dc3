//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and the unit step each face looks
//! towards. Face culling walks these in a fixed order.

use cgmath::Vector3;
use num_derive::FromPrimitive;

/// Represents the six possible faces of a voxel block.
///
/// The discriminants are the order in which faces are emitted while meshing:
/// [FRONT, BACK, LEFT, RIGHT, TOP, BOTTOM]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, FromPrimitive)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The left face (facing negative X)
    LEFT = 2,

    /// The right face (facing positive X)
    RIGHT = 3,

    /// The top face (facing positive Y)
    TOP = 4,

    /// The bottom face (facing negative Y)
    BOTTOM = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in emission order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::LEFT,
            BlockSide::RIGHT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
        ]
    }

    /// The outward unit normal of this face, which is also the offset to the cell it touches.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
        }
    }

    /// The face whose normal points the other way.
    pub const fn opposite(self) -> BlockSide {
        match self {
            BlockSide::FRONT => BlockSide::BACK,
            BlockSide::BACK => BlockSide::FRONT,
            BlockSide::LEFT => BlockSide::RIGHT,
            BlockSide::RIGHT => BlockSide::LEFT,
            BlockSide::TOP => BlockSide::BOTTOM,
            BlockSide::BOTTOM => BlockSide::TOP,
        }
    }

    /// Looks up the face whose normal equals `normal`.
    ///
    /// Raycast hit normals map back to a face this way; the all-zero normal has no face.
    pub fn from_normal(normal: Vector3<i32>) -> Option<BlockSide> {
        BlockSide::all()
            .into_iter()
            .find(|side| side.normal() == normal)
    }
}
