//! Conversions between world space, chunk coordinates and chunk-local cells.

use cgmath::{Point3, Vector3};

use crate::voxels::chunk::{NeighbourSlot, SIZE};

/// Position of a chunk on the horizontal chunk grid.
///
/// The chunk at `(x, z)` covers world X in `[x * SIZE, x * SIZE + SIZE)` and world Z in
/// `[z * SIZE, z * SIZE + SIZE)`, over the full chunk height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChunkCoord {
    /// Chunk index along X
    pub x: i32,
    /// Chunk index along Z
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a chunk coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The coordinate of the neighbour in `slot`, or `None` past the edge of the `i32` grid.
    pub const fn neighbour(self, slot: NeighbourSlot) -> Option<ChunkCoord> {
        let (dx, dz) = slot.offset();
        match (self.x.checked_add(dx), self.z.checked_add(dz)) {
            (Some(x), Some(z)) => Some(ChunkCoord::new(x, z)),
            _ => None,
        }
    }

    /// World-space translation of this chunk's local origin.
    ///
    /// Computed in floating point, so chunks whose origin does not fit an `i32` block
    /// coordinate still get an (approximate) position.
    pub fn world_origin(self) -> Vector3<f32> {
        Vector3::new(self.x as f32 * SIZE as f32, 0.0, self.z as f32 * SIZE as f32)
    }

    /// Chunk containing the integer world cell `cell`.
    pub const fn containing_cell(cell: Point3<i32>) -> ChunkCoord {
        ChunkCoord::new(cell.x.div_euclid(SIZE), cell.z.div_euclid(SIZE))
    }
}

/// Floors a world position to the integer cell it lies in.
pub fn world_cell(world_pos: Point3<f32>) -> Point3<i32> {
    Point3::new(
        world_pos.x.floor() as i32,
        world_pos.y.floor() as i32,
        world_pos.z.floor() as i32,
    )
}

/// Chunk coordinate containing `world_pos`, using floor division so negative positions map
/// to negative chunks.
pub fn world_pos_to_chunk_coord(world_pos: Point3<f32>) -> ChunkCoord {
    ChunkCoord::new(
        (world_pos.x / SIZE as f32).floor() as i32,
        (world_pos.z / SIZE as f32).floor() as i32,
    )
}

/// Cell of `world_pos` relative to its chunk.
///
/// X and Z wrap into `[0, SIZE)`. Y is floored but not wrapped, since chunks span the full
/// height; callers bounds-check it through the chunk.
pub fn world_to_local(world_pos: Point3<f32>) -> Point3<i32> {
    cell_to_local(world_cell(world_pos))
}

/// Integer-cell variant of [`world_to_local`].
pub fn cell_to_local(cell: Point3<i32>) -> Point3<i32> {
    Point3::new(cell.x.rem_euclid(SIZE), cell.y, cell.z.rem_euclid(SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::chunk::HEIGHT;

    #[test]
    fn negative_positions_wrap_to_previous_chunk() {
        let pos = Point3::new(-1.0, 5.0, -0.5);
        assert_eq!(world_pos_to_chunk_coord(pos), ChunkCoord::new(-1, -1));
        assert_eq!(world_to_local(pos), Point3::new(15, 5, 15));

        let pos = Point3::new(-16.0, 0.0, -17.0);
        assert_eq!(world_pos_to_chunk_coord(pos), ChunkCoord::new(-1, -2));
        assert_eq!(world_to_local(pos), Point3::new(0, 0, 15));
    }

    #[test]
    fn positive_positions_stay_in_chunk() {
        let pos = Point3::new(31.9, 12.3, 16.0);
        assert_eq!(world_pos_to_chunk_coord(pos), ChunkCoord::new(1, 1));
        assert_eq!(world_to_local(pos), Point3::new(15, 12, 0));
    }

    #[test]
    fn local_coordinates_are_always_in_range() {
        let mut value = -70.25f32;
        while value < 70.0 {
            let local = world_to_local(Point3::new(value, value.abs() % HEIGHT as f32, -value));
            assert!((0..SIZE).contains(&local.x), "{value}");
            assert!((0..HEIGHT).contains(&local.y), "{value}");
            assert!((0..SIZE).contains(&local.z), "{value}");

            let cell = world_cell(Point3::new(value, 0.0, -value));
            let chunk = world_pos_to_chunk_coord(Point3::new(value, 0.0, -value));
            assert_eq!(ChunkCoord::containing_cell(cell), chunk, "{value}");
            assert_eq!(chunk.x * SIZE + local.x, cell.x, "{value}");
            value += 0.75;
        }
    }

    #[test]
    fn neighbour_coordinates_follow_slots() {
        let coord = ChunkCoord::new(2, -3);
        assert_eq!(coord.neighbour(NeighbourSlot::PosX), Some(ChunkCoord::new(3, -3)));
        assert_eq!(coord.neighbour(NeighbourSlot::NegZ), Some(ChunkCoord::new(2, -4)));
        assert_eq!(coord.world_origin(), Vector3::new(32.0, 0.0, -48.0));
    }

    #[test]
    fn grid_edges_have_no_neighbour_past_them() {
        let corner = ChunkCoord::new(i32::MAX, i32::MIN);
        assert_eq!(corner.neighbour(NeighbourSlot::PosX), None);
        assert_eq!(corner.neighbour(NeighbourSlot::NegZ), None);
        assert_eq!(
            corner.neighbour(NeighbourSlot::NegX),
            Some(ChunkCoord::new(i32::MAX - 1, i32::MIN))
        );
        assert_eq!(
            corner.world_origin(),
            Vector3::new(i32::MAX as f32 * 16.0, 0.0, i32::MIN as f32 * 16.0)
        );
    }
}
