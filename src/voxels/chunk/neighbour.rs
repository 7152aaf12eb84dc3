//! The four lateral neighbour slots of a chunk.
//!
//! Chunks only ever border each other along X and Z; the world is one chunk tall.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Index of the `+X` neighbour slot.
pub const NEIGHBOUR_PX: i32 = NeighbourSlot::PosX as i32;
/// Index of the `-X` neighbour slot.
pub const NEIGHBOUR_NX: i32 = NeighbourSlot::NegX as i32;
/// Index of the `+Z` neighbour slot.
pub const NEIGHBOUR_PZ: i32 = NeighbourSlot::PosZ as i32;
/// Index of the `-Z` neighbour slot.
pub const NEIGHBOUR_NZ: i32 = NeighbourSlot::NegZ as i32;

/// Which side of a chunk a neighbour link points to.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, FromPrimitive)]
pub enum NeighbourSlot {
    /// The chunk one step along positive X
    PosX = 0,
    /// The chunk one step along negative X
    NegX = 1,
    /// The chunk one step along positive Z
    PosZ = 2,
    /// The chunk one step along negative Z
    NegZ = 3,
}

impl NeighbourSlot {
    /// All slots in index order.
    pub const ALL: [NeighbourSlot; 4] = [
        NeighbourSlot::PosX,
        NeighbourSlot::NegX,
        NeighbourSlot::PosZ,
        NeighbourSlot::NegZ,
    ];

    /// Converts a raw slot index; anything outside `0..4` is `None`.
    pub fn from_index(index: i32) -> Option<NeighbourSlot> {
        NeighbourSlot::from_i32(index)
    }

    /// The slot on the neighbour that points back at us.
    pub const fn opposite(self) -> NeighbourSlot {
        match self {
            NeighbourSlot::PosX => NeighbourSlot::NegX,
            NeighbourSlot::NegX => NeighbourSlot::PosX,
            NeighbourSlot::PosZ => NeighbourSlot::NegZ,
            NeighbourSlot::NegZ => NeighbourSlot::PosZ,
        }
    }

    /// Chunk-coordinate step `(dx, dz)` towards this neighbour.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            NeighbourSlot::PosX => (1, 0),
            NeighbourSlot::NegX => (-1, 0),
            NeighbourSlot::PosZ => (0, 1),
            NeighbourSlot::NegZ => (0, -1),
        }
    }
}
