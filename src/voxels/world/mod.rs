//! # World Module
//!
//! This module provides the `World` struct which owns every chunk of the voxel world and
//! translates world-space positions into chunk-local cells.
//!
//! ## Architecture
//!
//! The world uses sparse storage: only chunks that were registered exist, keyed by their
//! horizontal chunk coordinate. The world holds the only strong handle to each chunk and
//! wires the weak neighbour links between adjacent chunks, in both directions, the moment a
//! chunk is registered.
//!
//! ## Mesh invalidation
//!
//! Editing a block through [`World::set_block_at`] rebuilds the owning chunk and every
//! registered neighbour whose shared border plane touches the edited cell. This is the
//! only place a rebuild propagates across chunks.
//!
//! ## Performance Considerations
//!
//! - Chunk lookup is O(1) using a hash map
//! - Every edit costs a full rebuild of up to five chunks

use std::{collections::HashMap, rc::Rc};

use cgmath::Point3;
use log::{debug, warn};

use crate::core::StResource;
use crate::meshing::{ChunkMesher, CulledMesher};

use super::block::{registry::BlockCatalog, BlockId};
use super::chunk::{Chunk, NeighbourSlot, SIZE};

pub mod coords;
pub mod raycast;

pub use coords::{world_pos_to_chunk_coord, world_to_local, ChunkCoord};
pub use raycast::HitPayload;

/// Represents a voxel world composed of multiple chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::voxels::{block::BlockId, chunk::Chunk, world::{ChunkCoord, World}};
///
/// let mut world = World::new();
/// world.register_chunk(Chunk::new(), ChunkCoord::new(0, 0));
///
/// world.set_block_at(Point3::new(3.0, 4.0, 5.0), BlockId(1));
/// assert_eq!(world.get_block_at(Point3::new(3.5, 4.2, 5.9)), BlockId(1));
/// assert_eq!(world.get_block_at(Point3::new(-1.0, 4.0, 5.0)), BlockId::OUT_OF_BOUNDS);
/// ```
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<ChunkCoord, StResource<Chunk>>,

    /// Colour source handed to every rebuild. Without one, blocks mesh in the fallback colour.
    catalog: Option<Rc<dyn BlockCatalog>>,

    /// Algorithm used for every rebuild the world triggers.
    mesher: Box<dyn ChunkMesher>,
}

impl World {
    /// Creates a new, empty world with no catalog and the face-culling mesher.
    pub fn new() -> Self {
        World {
            chunks: HashMap::new(),
            catalog: None,
            mesher: Box::new(CulledMesher),
        }
    }

    /// Uses `catalog` for block colours in every rebuild.
    pub fn with_catalog(mut self, catalog: Rc<dyn BlockCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Replaces the meshing algorithm used for rebuilds.
    pub fn with_mesher(mut self, mesher: Box<dyn ChunkMesher>) -> Self {
        self.mesher = mesher;
        self
    }

    /// Swaps the catalog at runtime. Existing meshes keep their colours until rebuilt.
    pub fn set_catalog(&mut self, catalog: Option<Rc<dyn BlockCatalog>>) {
        self.catalog = catalog;
    }

    /// The catalog used for rebuilds, if any.
    pub fn catalog(&self) -> Option<&dyn BlockCatalog> {
        self.catalog.as_deref()
    }

    /// Takes ownership of `chunk` and places it at `coord`.
    ///
    /// Coordinates are write-once: if `coord` is already occupied, `chunk` is dropped and
    /// `None` is returned. On success the chunk is moved to its world-space origin and linked
    /// with every registered chunk beside it, on both sides of each link. Meshes are not
    /// rebuilt here.
    ///
    /// # Returns
    ///
    /// A handle to the registered chunk.
    pub fn register_chunk(&mut self, mut chunk: Chunk, coord: ChunkCoord) -> Option<StResource<Chunk>> {
        if self.chunks.contains_key(&coord) {
            warn!("Chunk coordinate {:?} is already occupied; registration ignored", coord);
            return None;
        }

        chunk.set_position(coord.world_origin());
        let handle = StResource::new(chunk);

        for slot in NeighbourSlot::ALL {
            let neighbour = coord.neighbour(slot).and_then(|at| self.chunks.get(&at));
            handle.get_mut().set_neighbour(slot, neighbour);
            if let Some(neighbour) = neighbour {
                neighbour.get_mut().set_neighbour(slot.opposite(), Some(&handle));
            }
        }

        self.chunks.insert(coord, handle.clone());
        debug!("Registered chunk at {:?}", coord);
        Some(handle)
    }

    /// Unregisters the chunk at `coord` and returns it.
    ///
    /// Every link between the removed chunk and its neighbours is cleared on both sides, so
    /// no chunk keeps pointing at a chunk the world no longer owns. Neighbour meshes are not
    /// rebuilt; faces that used to be hidden by the removed chunk stay hidden until the
    /// caller rebuilds them.
    pub fn remove_chunk(&mut self, coord: ChunkCoord) -> Option<StResource<Chunk>> {
        let handle = self.chunks.remove(&coord)?;

        for slot in NeighbourSlot::ALL {
            if let Some(neighbour) = coord.neighbour(slot).and_then(|at| self.chunks.get(&at)) {
                let mut neighbour = neighbour.get_mut();
                if neighbour.is_linked_to(slot.opposite(), &handle) {
                    neighbour.set_neighbour(slot.opposite(), None);
                }
            }
        }
        handle.get_mut().clear_neighbours();

        debug!("Removed chunk at {:?}", coord);
        Some(handle)
    }

    /// Chunk coordinate containing `world_pos`. See [`coords::world_pos_to_chunk_coord`].
    pub fn world_pos_to_chunk_coord(world_pos: Point3<f32>) -> ChunkCoord {
        world_pos_to_chunk_coord(world_pos)
    }

    /// Chunk-local cell of `world_pos`. See [`coords::world_to_local`].
    pub fn world_to_local(world_pos: Point3<f32>) -> Point3<i32> {
        world_to_local(world_pos)
    }

    /// Retrieves the chunk at `coord`, if one is registered.
    pub fn get_chunk(&self, coord: ChunkCoord) -> Option<StResource<Chunk>> {
        self.chunks.get(&coord).cloned()
    }

    /// Retrieves the chunk covering `world_pos`, if one is registered.
    pub fn get_chunk_at(&self, world_pos: Point3<f32>) -> Option<StResource<Chunk>> {
        self.get_chunk(world_pos_to_chunk_coord(world_pos))
    }

    /// `true` if a chunk is registered at `coord`.
    pub fn contains_chunk(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Number of registered chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Coordinates of all registered chunks, in no particular order.
    pub fn chunk_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Reads the block at `world_pos`.
    ///
    /// Returns [`BlockId::OUT_OF_BOUNDS`] when no chunk covers the position or when it is
    /// above or below the chunk column.
    pub fn get_block_at(&self, world_pos: Point3<f32>) -> BlockId {
        let local = world_to_local(world_pos);
        self.chunks
            .get(&world_pos_to_chunk_coord(world_pos))
            .map_or(BlockId::OUT_OF_BOUNDS, |chunk| {
                chunk.get().get_block(local.x, local.y, local.z)
            })
    }

    /// Checked variant of [`World::get_block_at`].
    pub fn block_at(&self, world_pos: Point3<f32>) -> Option<BlockId> {
        self.get_block_at(world_pos).checked()
    }

    /// Reads the block in the integer world cell `cell`.
    pub fn block_at_cell(&self, cell: Point3<i32>) -> BlockId {
        let local = coords::cell_to_local(cell);
        self.chunks
            .get(&ChunkCoord::containing_cell(cell))
            .map_or(BlockId::OUT_OF_BOUNDS, |chunk| {
                chunk.get().get_block(local.x, local.y, local.z)
            })
    }

    /// Writes `id` at `world_pos` and rebuilds the affected meshes.
    ///
    /// Does nothing when no chunk covers the position. Otherwise the owning chunk is
    /// rebuilt, followed by each registered neighbour whose border the edited cell lies on
    /// (a corner cell touches two).
    pub fn set_block_at(&mut self, world_pos: Point3<f32>, id: BlockId) {
        let coord = world_pos_to_chunk_coord(world_pos);
        let Some(chunk) = self.get_chunk(coord) else {
            return;
        };

        let local = world_to_local(world_pos);
        chunk.get_mut().set_block(local.x, local.y, local.z, id);
        self.rebuild(&chunk);

        let touched = [
            (local.x == 0, NeighbourSlot::NegX),
            (local.x == SIZE - 1, NeighbourSlot::PosX),
            (local.z == 0, NeighbourSlot::NegZ),
            (local.z == SIZE - 1, NeighbourSlot::PosZ),
        ];
        for (on_border, slot) in touched {
            if !on_border {
                continue;
            }
            if let Some(neighbour) = coord.neighbour(slot).and_then(|at| self.get_chunk(at)) {
                self.rebuild(&neighbour);
            }
        }
    }

    /// Rebuilds the mesh of the chunk at `coord`. Returns `false` if there is none.
    pub fn regenerate_chunk(&self, coord: ChunkCoord) -> bool {
        match self.chunks.get(&coord) {
            Some(chunk) => {
                self.rebuild(chunk);
                true
            }
            None => false,
        }
    }

    /// Rebuilds every registered chunk once.
    pub fn generate_all_meshes(&self) {
        for chunk in self.chunks.values() {
            self.rebuild(chunk);
        }
    }

    fn rebuild(&self, chunk: &StResource<Chunk>) {
        chunk
            .get_mut()
            .generate_mesh_with(self.mesher.as_ref(), self.catalog());
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STONE: BlockId = BlockId(1);

    fn revisions(world: &World, coords: &[ChunkCoord]) -> Vec<u64> {
        coords
            .iter()
            .map(|coord| world.get_chunk(*coord).map_or(0, |c| c.get().mesh_revision()))
            .collect()
    }

    #[test]
    fn duplicate_registration_is_ignored() {
        let mut world = World::new();
        let mut first = Chunk::new();
        first.set_block(0, 0, 0, STONE);
        assert!(world.register_chunk(first, ChunkCoord::new(0, 0)).is_some());
        assert!(world.register_chunk(Chunk::new(), ChunkCoord::new(0, 0)).is_none());

        assert_eq!(world.chunk_count(), 1);
        assert_eq!(world.get_block_at(Point3::new(0.0, 0.0, 0.0)), STONE);
    }

    #[test]
    fn registration_positions_chunk() {
        let mut world = World::new();
        let handle = world
            .register_chunk(Chunk::new(), ChunkCoord::new(-2, 3))
            .expect("free coordinate");
        assert_eq!(handle.get().position(), cgmath::Vector3::new(-32.0, 0.0, 48.0));
        assert!(world.get_chunk_at(Point3::new(-17.0, 100.0, 63.9)).is_some_and(|c| c.ptr_eq(&handle)));
    }

    #[test]
    fn links_are_symmetric_in_every_direction() {
        let mut world = World::new();
        let center = ChunkCoord::new(0, 0);
        world.register_chunk(Chunk::new(), center);
        for slot in NeighbourSlot::ALL {
            let coord = center.neighbour(slot).expect("inside the grid");
            world.register_chunk(Chunk::new(), coord);
        }

        let center_chunk = world.get_chunk(center).expect("registered");
        for slot in NeighbourSlot::ALL {
            let coord = center.neighbour(slot).expect("inside the grid");
            let neighbour = world.get_chunk(coord).expect("registered");
            assert!(center_chunk.get().is_linked_to(slot, &neighbour), "{slot:?}");
            assert!(neighbour.get().is_linked_to(slot.opposite(), &center_chunk), "{slot:?}");
        }
    }

    #[test]
    fn out_of_world_reads_are_sentinels() {
        let mut world = World::new();
        world.register_chunk(Chunk::new(), ChunkCoord::new(0, 0));

        assert_eq!(world.get_block_at(Point3::new(20.0, 0.0, 0.0)), BlockId::OUT_OF_BOUNDS);
        assert_eq!(world.get_block_at(Point3::new(1.0, -0.5, 1.0)), BlockId::OUT_OF_BOUNDS);
        assert_eq!(world.get_block_at(Point3::new(1.0, 128.0, 1.0)), BlockId::OUT_OF_BOUNDS);
        assert_eq!(world.block_at(Point3::new(1.0, 1.0, 1.0)), Some(BlockId::AIR));
        assert_eq!(world.block_at(Point3::new(20.0, 1.0, 1.0)), None);
    }

    #[test]
    fn writes_without_chunk_do_nothing() {
        let mut world = World::new();
        world.set_block_at(Point3::new(5.0, 5.0, 5.0), STONE);
        assert_eq!(world.chunk_count(), 0);
        assert_eq!(world.get_block_at(Point3::new(5.0, 5.0, 5.0)), BlockId::OUT_OF_BOUNDS);
    }

    #[test]
    fn interior_edit_rebuilds_only_owner() {
        let mut world = World::new();
        let coords = [
            ChunkCoord::new(0, 0),
            ChunkCoord::new(-1, 0),
            ChunkCoord::new(1, 0),
            ChunkCoord::new(0, -1),
            ChunkCoord::new(0, 1),
        ];
        for coord in coords {
            world.register_chunk(Chunk::new(), coord);
        }

        world.set_block_at(Point3::new(5.0, 5.0, 5.0), STONE);
        assert_eq!(revisions(&world, &coords), vec![1, 0, 0, 0, 0]);
    }

    #[test]
    fn corner_edit_rebuilds_both_bordering_neighbours() {
        let mut world = World::new();
        let coords = [
            ChunkCoord::new(0, 0),
            ChunkCoord::new(-1, 0),
            ChunkCoord::new(1, 0),
            ChunkCoord::new(0, -1),
            ChunkCoord::new(0, 1),
        ];
        for coord in coords {
            world.register_chunk(Chunk::new(), coord);
        }

        world.set_block_at(Point3::new(15.0, 5.0, 0.0), STONE);
        assert_eq!(revisions(&world, &coords), vec![1, 0, 1, 1, 0]);
    }

    #[test]
    fn removal_unlinks_both_sides() {
        let mut world = World::new();
        let west = world.register_chunk(Chunk::new(), ChunkCoord::new(0, 0)).expect("free");
        world.register_chunk(Chunk::new(), ChunkCoord::new(1, 0));

        let removed = world.remove_chunk(ChunkCoord::new(1, 0)).expect("registered");
        assert!(west.get().get_neighbour(NeighbourSlot::PosX).is_none());
        assert!(NeighbourSlot::ALL
            .into_iter()
            .all(|slot| removed.get().get_neighbour(slot).is_none()));
        assert!(!world.contains_chunk(ChunkCoord::new(1, 0)));
        assert!(world.remove_chunk(ChunkCoord::new(1, 0)).is_none());

        // The coordinate is free again.
        let again = world.register_chunk(Chunk::new(), ChunkCoord::new(1, 0)).expect("free");
        assert!(west.get().is_linked_to(NeighbourSlot::PosX, &again));
    }

    #[test]
    fn chunks_on_the_grid_edge_register_and_edit() {
        let mut world = World::new();
        let west = ChunkCoord::new(i32::MAX - 1, 0);
        let edge = ChunkCoord::new(i32::MAX, 0);
        world.register_chunk(Chunk::new(), west);
        let handle = world.register_chunk(Chunk::new(), edge).expect("free coordinate");

        assert_eq!(handle.get().position().x, i32::MAX as f32 * SIZE as f32);
        assert!(handle.get().get_neighbour(NeighbourSlot::PosX).is_none());
        assert!(handle.get().get_neighbour(NeighbourSlot::NegX).is_some());

        // Local x = 15 would rebuild a +X neighbour, which cannot exist here.
        handle.get_mut().set_block(15, 3, 0, STONE);
        handle.get_mut().set_block(0, 3, 0, STONE);
        world.regenerate_chunk(edge);
        assert_eq!(handle.get().mesh().map(|mesh| mesh.quad_count()), Some(12));

        assert!(world.remove_chunk(edge).is_some());
        let west = world.get_chunk(west).expect("registered");
        assert!(west.get().get_neighbour(NeighbourSlot::PosX).is_none());
    }

    #[test]
    fn regenerate_reports_missing_chunks() {
        let mut world = World::new();
        world.register_chunk(Chunk::new(), ChunkCoord::new(0, 0));
        assert!(world.regenerate_chunk(ChunkCoord::new(0, 0)));
        assert!(!world.regenerate_chunk(ChunkCoord::new(4, 4)));
    }
}
