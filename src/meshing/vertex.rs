//! Interleaved vertex layout for handing chunk meshes to a renderer.

use cgmath::{Point3, Vector3};

use crate::voxels::block::Color;

/// A vertex of a chunk surface.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Colour: [f32; 4] (16 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 48 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local space
    pub position: [f32; 3],
    /// Face normal
    pub normal: [f32; 3],
    /// Shaded block colour
    pub color: [f32; 4],
    /// UV texture coordinates (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex with the given parameters.
    pub fn new(pos: Point3<f32>, normal: Vector3<f32>, color: Color, tex_coords: [f32; 2]) -> Self {
        Vertex {
            position: pos.into(),
            normal: normal.into(),
            color: color.to_array(),
            tex_coords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 48);
        let vertex = Vertex::new(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 1.0, 0.0),
            Color::WHITE,
            [0.0, 1.0],
        );
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&vertex));
        assert_eq!(floats.len(), 12);
        assert_eq!(&floats[..6], &[1.0, 2.0, 3.0, 0.0, 1.0, 0.0]);
    }
}
