//! # Block Module
//!
//! This module provides the block-level vocabulary of the voxel world: the integer block
//! identifier stored in chunks, the colour record attached to each catalog entry, and the
//! catalog itself.
//!
//! ## Reserved identifiers
//!
//! * `0` is air. It is never rendered and never blocks a face.
//! * Negative values mean "no block here" (outside a chunk or outside the world).
//! * Positive values are catalog ids, assigned 1-based in catalog order.

use serde::{Deserialize, Serialize};

pub mod block_side;
pub mod registry;

/// Identifier of the block stored in a single chunk cell.
///
/// The chunk stores these without interpreting them; only the sign matters to the core:
/// positive ids are solid, `0` is air and negative ids are sentinels.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[derive(bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
pub struct BlockId(pub i32);

impl BlockId {
    /// The empty block. Chunks start out filled with it.
    pub const AIR: BlockId = BlockId(0);

    /// Returned by raw reads of coordinates that no chunk covers.
    pub const OUT_OF_BOUNDS: BlockId = BlockId(-1);

    /// Wraps a raw id.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns `true` for ids that occupy space and render faces.
    pub const fn is_solid(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` for air and for the out-of-bounds sentinel.
    pub const fn is_empty(self) -> bool {
        self.0 <= 0
    }

    /// Converts a raw sentinel-carrying read into an option, mapping negative ids to `None`.
    pub const fn checked(self) -> Option<BlockId> {
        if self.0 < 0 {
            None
        } else {
            Some(self)
        }
    }
}

impl From<i32> for BlockId {
    fn from(id: i32) -> Self {
        BlockId(id)
    }
}

/// A linear RGBA colour with components in `0.0..=1.0`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component
    #[serde(default = "Color::opaque_alpha")]
    pub a: f32,
}

impl Color {
    /// Colour used for ids that have no catalog entry, or when no catalog is available.
    pub const FALLBACK: Color = Color::rgb(1.0, 0.0, 0.0);

    /// Opaque white.
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Creates a colour from all four components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Creates an opaque colour.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    /// Builds a colour from an `[r, g, b, a]` array.
    pub const fn from_array(rgba: [f32; 4]) -> Self {
        Color::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Multiplies the colour channels by `brightness`. The result is always opaque.
    pub fn shaded(self, brightness: f32) -> Self {
        Color::rgb(self.r * brightness, self.g * brightness, self.b * brightness)
    }

    /// Returns the components as an `[r, g, b, a]` array.
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    fn opaque_alpha() -> f32 {
        1.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// An immutable catalog record: the id the registry assigned, the display name and the
/// base colour used when meshing.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockData {
    /// 1-based id assigned by the registry
    pub id: BlockId,
    /// Display name, as written in the block set
    pub name: String,
    /// Base colour before face shading
    pub color: Color,
}
