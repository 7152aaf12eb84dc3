//! Block picking by marching a ray through the block grid.
//!
//! The traversal is the classic amortised voxel walk: every iteration steps into the next
//! cell along whichever axis reaches its next grid plane first, so each cell the ray passes
//! through is sampled exactly once and the cost is linear in the distance travelled.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::voxels::block::{block_side::BlockSide, BlockId};

use super::{coords::world_cell, World};

/// Stand-in for an infinite crossing distance along an axis the ray does not move on.
const NEVER: f32 = 1e30;

/// Components smaller than this count as zero when rejecting degenerate directions.
const ZERO_DIRECTION_EPSILON: f32 = 1e-5;

/// What a successful raycast hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitPayload {
    /// World cell of the solid block that was hit
    pub block_pos: Point3<i32>,
    /// Outward normal of the face the ray entered through
    pub normal: Vector3<i32>,
    /// Id of the block that was hit
    pub block_id: BlockId,
}

impl HitPayload {
    /// The face the ray entered through, if a face was crossed.
    pub fn face(&self) -> Option<BlockSide> {
        BlockSide::from_normal(self.normal)
    }

    /// The cell in front of the hit face, where a placed block would go.
    pub fn adjacent_pos(&self) -> Point3<i32> {
        self.block_pos + self.normal
    }
}

impl World {
    /// Casts a ray from `from` along `dir` and returns the first solid block within
    /// `max_dist`.
    ///
    /// `dir` does not need to be normalised. A zero direction or a non-positive `max_dist`
    /// returns `None`. The block containing `from` is never reported, so a ray starting
    /// inside a block finds the next one. Cells without a chunk are skipped like air.
    ///
    /// The loop is bounded only by `max_dist`; an infinite distance through empty space
    /// does not terminate. A ray that would step past the `i32` cell grid stops with `None`.
    pub fn raycast(&self, from: Point3<f32>, dir: Vector3<f32>, max_dist: f32) -> Option<HitPayload> {
        // Also rejects NaN.
        if !(max_dist > 0.0) {
            return None;
        }
        if dir.x.abs() < ZERO_DIRECTION_EPSILON
            && dir.y.abs() < ZERO_DIRECTION_EPSILON
            && dir.z.abs() < ZERO_DIRECTION_EPSILON
        {
            return None;
        }
        let dir: [f32; 3] = dir.normalize().into();
        let origin: [f32; 3] = from.into();

        let mut cell: [i32; 3] = world_cell(from).into();
        let step = dir.map(|d| if d >= 0.0 { 1 } else { -1 });
        let delta = dir.map(|d| if d == 0.0 { NEVER } else { (1.0 / d).abs() });

        let mut t_max = [0.0f32; 3];
        for axis in 0..3 {
            let fraction = origin[axis] - cell[axis] as f32;
            t_max[axis] = if step[axis] > 0 {
                delta[axis] * (1.0 - fraction)
            } else {
                delta[axis] * fraction
            };
        }

        let mut stepped_axis: Option<usize> = None;
        let mut t = 0.0f32;
        while t <= max_dist {
            let block_pos = Point3::from(cell);
            let block_id = self.block_at_cell(block_pos);
            if block_id.is_solid() {
                if let Some(axis) = stepped_axis {
                    let mut normal = Vector3::new(0, 0, 0);
                    normal[axis] = -step[axis];
                    return Some(HitPayload {
                        block_pos,
                        normal,
                        block_id,
                    });
                }
            }

            // X wins only when strictly closest; Y/Z and X/Z ties go to Z.
            let axis = if t_max[0] < t_max[1] {
                if t_max[0] < t_max[2] {
                    0
                } else {
                    2
                }
            } else if t_max[1] < t_max[2] {
                1
            } else {
                2
            };

            cell[axis] = cell[axis].checked_add(step[axis])?;
            t = t_max[axis];
            t_max[axis] += delta[axis];
            stepped_axis = Some(axis);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::{
        chunk::Chunk,
        world::coords::ChunkCoord,
    };

    const STONE: BlockId = BlockId(1);

    fn floor_world() -> World {
        let mut world = World::new();
        let mut chunk = Chunk::new();
        chunk.fill_range(Point3::new(0, 0, 0), Point3::new(16, 2, 16), STONE);
        world.register_chunk(chunk, ChunkCoord::new(0, 0));
        world
    }

    #[test]
    fn straight_down_hits_top_face() {
        let world = floor_world();
        let hit = world
            .raycast(Point3::new(8.0, 10.0, 8.0), Vector3::new(0.0, -1.0, 0.0), 20.0)
            .expect("floor is in range");
        assert_eq!(hit.block_pos, Point3::new(8, 1, 8));
        assert_eq!(hit.normal, Vector3::new(0, 1, 0));
        assert_eq!(hit.block_id, STONE);
        assert_eq!(hit.face(), Some(BlockSide::TOP));
        assert_eq!(hit.adjacent_pos(), Point3::new(8, 2, 8));
    }

    #[test]
    fn unnormalised_direction_gives_same_hit() {
        let world = floor_world();
        let a = world.raycast(Point3::new(8.5, 10.5, 8.5), Vector3::new(0.0, -1.0, 0.0), 20.0);
        let b = world.raycast(Point3::new(8.5, 10.5, 8.5), Vector3::new(0.0, -25.0, 0.0), 20.0);
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn short_ray_misses() {
        let world = floor_world();
        let hit = world.raycast(Point3::new(8.0, 10.0, 8.0), Vector3::new(0.0, -1.0, 0.0), 5.0);
        assert!(hit.is_none());
    }

    #[test]
    fn ray_through_air_misses() {
        let world = floor_world();
        let hit = world.raycast(Point3::new(8.0, 10.0, 8.0), Vector3::new(1.0, 0.2, 0.3), 64.0);
        assert!(hit.is_none());
    }

    #[test]
    fn degenerate_inputs_return_nothing() {
        let world = floor_world();
        let origin = Point3::new(8.0, 10.0, 8.0);
        let down = Vector3::new(0.0, -1.0, 0.0);
        assert!(world.raycast(origin, Vector3::new(0.0, 0.0, 0.0), 20.0).is_none());
        assert!(world.raycast(origin, down, 0.0).is_none());
        assert!(world.raycast(origin, down, -3.0).is_none());
        assert!(world.raycast(origin, down, f32::NAN).is_none());
    }

    #[test]
    fn origin_cell_is_not_reported() {
        let world = floor_world();
        // Starts inside the top stone layer and looks down: the next stone below is hit.
        let hit = world
            .raycast(Point3::new(3.5, 1.5, 3.5), Vector3::new(0.0, -1.0, 0.0), 10.0)
            .expect("lower layer is solid");
        assert_eq!(hit.block_pos, Point3::new(3, 0, 3));
        assert_eq!(hit.normal, Vector3::new(0, 1, 0));
    }

    #[test]
    fn sideways_ray_reports_entry_face() {
        let mut world = floor_world();
        world.set_block_at(Point3::new(10.0, 2.0, 4.0), STONE);
        let hit = world
            .raycast(Point3::new(2.5, 2.5, 4.5), Vector3::new(1.0, 0.0, 0.0), 20.0)
            .expect("wall is in range");
        assert_eq!(hit.block_pos, Point3::new(10, 2, 4));
        assert_eq!(hit.normal, Vector3::new(-1, 0, 0));
        assert_eq!(hit.face(), Some(BlockSide::LEFT));
    }

    /// Registers chunk (0, 0) with `STONE` at each of `cells`.
    fn world_with(cells: &[[i32; 3]]) -> World {
        let mut chunk = Chunk::new();
        for [x, y, z] in cells {
            chunk.set_block(*x, *y, *z, STONE);
        }
        let mut world = World::new();
        world.register_chunk(chunk, ChunkCoord::new(0, 0));
        world
    }

    fn first_hit(world: &World, dir: Vector3<f32>) -> HitPayload {
        world
            .raycast(Point3::new(0.5, 0.5, 0.5), dir, 8.0)
            .expect("a block on the ray")
    }

    #[test]
    fn x_steps_when_strictly_closest() {
        let world = world_with(&[[1, 0, 0], [0, 1, 0]]);
        let hit = first_hit(&world, Vector3::new(1.0, 0.5, 0.0));
        assert_eq!(hit.block_pos, Point3::new(1, 0, 0));
        assert_eq!(hit.normal, Vector3::new(-1, 0, 0));
    }

    #[test]
    fn x_y_tie_steps_y() {
        let world = world_with(&[[1, 0, 0], [0, 1, 0]]);
        let hit = first_hit(&world, Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(hit.block_pos, Point3::new(0, 1, 0));
        assert_eq!(hit.normal, Vector3::new(0, -1, 0));
    }

    #[test]
    fn y_z_tie_steps_z() {
        let world = world_with(&[[0, 1, 0], [0, 0, 1]]);
        let hit = first_hit(&world, Vector3::new(0.0, 1.0, 1.0));
        assert_eq!(hit.block_pos, Point3::new(0, 0, 1));
        assert_eq!(hit.normal, Vector3::new(0, 0, -1));
    }

    #[test]
    fn x_z_tie_steps_z() {
        let world = world_with(&[[1, 0, 0], [0, 0, 1]]);
        let hit = first_hit(&world, Vector3::new(1.0, 0.0, 1.0));
        assert_eq!(hit.block_pos, Point3::new(0, 0, 1));
        assert_eq!(hit.normal, Vector3::new(0, 0, -1));
    }

    #[test]
    fn three_way_tie_steps_z() {
        let world = world_with(&[[1, 0, 0], [0, 1, 0], [0, 0, 1]]);
        let hit = first_hit(&world, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(hit.block_pos, Point3::new(0, 0, 1));
        assert_eq!(hit.normal, Vector3::new(0, 0, -1));
    }

    #[test]
    fn ray_at_the_grid_edge_stops_instead_of_overflowing() {
        let world = World::new();
        let hit = world.raycast(Point3::new(3.0e9, 10.0, 0.0), Vector3::new(1.0, 0.0, 0.0), 5.0);
        assert!(hit.is_none());
        let hit = world.raycast(Point3::new(0.5, 10.0, -3.0e9), Vector3::new(0.0, 0.0, -1.0), 5.0);
        assert!(hit.is_none());
    }

    #[test]
    fn negative_direction_crosses_into_negative_chunk() {
        let mut world = World::new();
        let mut chunk = Chunk::new();
        chunk.set_block(15, 3, 0, STONE);
        world.register_chunk(chunk, ChunkCoord::new(-1, 0));
        world.register_chunk(Chunk::new(), ChunkCoord::new(0, 0));

        let hit = world
            .raycast(Point3::new(6.5, 3.5, 0.5), Vector3::new(-1.0, 0.0, 0.0), 32.0)
            .expect("block at x = -1");
        assert_eq!(hit.block_pos, Point3::new(-1, 3, 0));
        assert_eq!(hit.normal, Vector3::new(1, 0, 0));
    }
}
