//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a fixed 16×128×16 column of block ids, its
//! links to the four chunks beside it, and the surface geometry last built from it.
//!
//! ## Storage
//!
//! Blocks live in one dense array indexed `y * SIZE * SIZE + z * SIZE + x`, so a
//! horizontal layer is contiguous and meshing (y outer, then z, then x) walks memory in
//! order. Nothing is compressed; a chunk always costs `BLOCK_COUNT` ids.
//!
//! ## Neighbours
//!
//! A chunk never owns its neighbours. Links are weak handles installed by the world when
//! chunks are registered, and are only used to look one cell across a border during face
//! culling.
//!
//! ## Bounds
//!
//! Nothing here fails. Out-of-range reads return [`BlockId::OUT_OF_BOUNDS`], out-of-range
//! writes and empty ranges are ignored.

use cgmath::{Point3, Vector3};
use log::debug;
use web_time::Instant;

use crate::core::{StResource, WeakStResource};
use crate::meshing::{ChunkMesh, ChunkMesher, CollisionShape, CulledMesher};

use super::block::{registry::BlockCatalog, BlockId};

mod neighbour;

pub use neighbour::{NeighbourSlot, NEIGHBOUR_NX, NEIGHBOUR_NZ, NEIGHBOUR_PX, NEIGHBOUR_PZ};

/// Width and depth of a chunk in blocks.
pub const SIZE: i32 = 16;
/// Height of a chunk in blocks. Chunks do not stack vertically.
pub const HEIGHT: i32 = 128;
/// Total number of cells in a chunk.
pub const BLOCK_COUNT: usize = (SIZE * SIZE * HEIGHT) as usize;

/// A column of blocks plus the geometry generated from it.
pub struct Chunk {
    /// Block ids, see the module docs for the index layout.
    blocks: Box<[BlockId]>,

    /// Non-owning links indexed by `NeighbourSlot`.
    neighbours: [Option<WeakStResource<Chunk>>; 4],

    /// World-space translation of the chunk's local origin.
    position: Vector3<f32>,

    /// Surface from the last rebuild, `None` until the first rebuild or when it was empty.
    mesh: Option<ChunkMesh>,

    /// Collision trimesh from the last rebuild, `None` when the surface was empty.
    collision: Option<CollisionShape>,

    /// Incremented on every rebuild.
    mesh_revision: u64,
}

impl Chunk {
    /// Creates a chunk filled with air and no neighbours.
    pub fn new() -> Self {
        Chunk {
            blocks: vec![BlockId::AIR; BLOCK_COUNT].into_boxed_slice(),
            neighbours: Default::default(),
            position: Vector3::new(0.0, 0.0, 0.0),
            mesh: None,
            collision: None,
            mesh_revision: 0,
        }
    }

    #[inline]
    fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..SIZE).contains(&x) && (0..HEIGHT).contains(&y) && (0..SIZE).contains(&z)
    }

    #[inline]
    const fn index(x: i32, y: i32, z: i32) -> usize {
        (y * SIZE * SIZE + z * SIZE + x) as usize
    }

    /// Reads the block at local `(x, y, z)`.
    ///
    /// Returns [`BlockId::OUT_OF_BOUNDS`] outside this chunk; neighbours are never consulted.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockId {
        if Self::in_bounds(x, y, z) {
            self.blocks[Self::index(x, y, z)]
        } else {
            BlockId::OUT_OF_BOUNDS
        }
    }

    /// Checked variant of [`Chunk::get_block`].
    pub fn block(&self, x: i32, y: i32, z: i32) -> Option<BlockId> {
        Self::in_bounds(x, y, z).then(|| self.blocks[Self::index(x, y, z)])
    }

    /// Writes `id` at local `(x, y, z)`. Out-of-range writes are ignored.
    ///
    /// The id is not checked against any catalog; unknown ids mesh with the fallback colour.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, id: BlockId) {
        if Self::in_bounds(x, y, z) {
            self.blocks[Self::index(x, y, z)] = id;
        }
    }

    /// Sets every cell to `id`.
    pub fn fill(&mut self, id: BlockId) {
        self.blocks.fill(id);
    }

    /// Sets every cell in the half-open box `[from, to)` to `id`.
    ///
    /// The box is clamped to the chunk first. If it is empty or inverted on any axis after
    /// clamping, nothing is written.
    pub fn fill_range(&mut self, from: Point3<i32>, to: Point3<i32>, id: BlockId) {
        let min = Point3::new(from.x.max(0), from.y.max(0), from.z.max(0));
        let max = Point3::new(to.x.min(SIZE), to.y.min(HEIGHT), to.z.min(SIZE));
        if min.x >= max.x || min.y >= max.y || min.z >= max.z {
            return;
        }

        for y in min.y..max.y {
            for z in min.z..max.z {
                let row = Self::index(0, y, z);
                self.blocks[row + min.x as usize..row + max.x as usize].fill(id);
            }
        }
    }

    /// Reads a block one step outside this chunk when needed.
    ///
    /// - Inside the chunk this is [`Chunk::get_block`].
    /// - Above or below the chunk it is always air.
    /// - Past an X or Z edge the coordinate is shifted by one chunk width into the matching
    ///   neighbour; a missing neighbour reads as air.
    ///
    /// Only a single chunk-width of overflow is translated. X is resolved before Z, and a
    /// coordinate further out than one chunk reads whatever the neighbour's bounds check
    /// says (the out-of-bounds sentinel, which callers treat as empty). Face culling never
    /// looks further than one cell past an edge.
    pub fn get_block_including_neighbours(&self, x: i32, y: i32, z: i32) -> BlockId {
        if Self::in_bounds(x, y, z) {
            return self.get_block(x, y, z);
        }

        if !(0..HEIGHT).contains(&y) {
            return BlockId::AIR;
        }

        let (slot, nx, nz) = if x < 0 {
            (NeighbourSlot::NegX, x + SIZE, z)
        } else if x >= SIZE {
            (NeighbourSlot::PosX, x - SIZE, z)
        } else if z < 0 {
            (NeighbourSlot::NegZ, x, z + SIZE)
        } else {
            (NeighbourSlot::PosZ, x, z - SIZE)
        };

        match self.get_neighbour(slot) {
            Some(neighbour) => neighbour.get().get_block(nx, y, nz),
            None => BlockId::AIR,
        }
    }

    /// Returns the chunk linked in `slot`, if it is set and still alive.
    pub fn get_neighbour(&self, slot: NeighbourSlot) -> Option<StResource<Chunk>> {
        self.neighbours[slot as usize]
            .as_ref()
            .and_then(WeakStResource::upgrade)
    }

    /// Links (or with `None`, unlinks) the chunk in `slot`. Only this side of the link changes.
    pub fn set_neighbour(&mut self, slot: NeighbourSlot, neighbour: Option<&StResource<Chunk>>) {
        self.neighbours[slot as usize] = neighbour.map(StResource::downgrade);
    }

    /// Raw-index variant of [`Chunk::get_neighbour`]; indices outside `0..4` yield `None`.
    pub fn get_neighbour_by_index(&self, index: i32) -> Option<StResource<Chunk>> {
        NeighbourSlot::from_index(index).and_then(|slot| self.get_neighbour(slot))
    }

    /// Raw-index variant of [`Chunk::set_neighbour`]; indices outside `0..4` are ignored.
    pub fn set_neighbour_by_index(&mut self, index: i32, neighbour: Option<&StResource<Chunk>>) {
        if let Some(slot) = NeighbourSlot::from_index(index) {
            self.set_neighbour(slot, neighbour);
        }
    }

    /// Returns `true` if the link in `slot` refers to `chunk`.
    pub fn is_linked_to(&self, slot: NeighbourSlot, chunk: &StResource<Chunk>) -> bool {
        self.neighbours[slot as usize]
            .as_ref()
            .is_some_and(|link| link.points_to(chunk))
    }

    /// Clears all four neighbour links on this chunk.
    pub fn clear_neighbours(&mut self) {
        self.neighbours = Default::default();
    }

    /// Rebuilds the surface and collision shape with the default face-culling mesher.
    pub fn generate_mesh(&mut self, catalog: Option<&dyn BlockCatalog>) {
        self.generate_mesh_with(&CulledMesher, catalog);
    }

    /// Rebuilds the surface and collision shape with `mesher`.
    ///
    /// This is a full rebuild. The previous collision shape is dropped before the new one is
    /// attached; an empty surface leaves both the mesh and the collision shape unset.
    pub fn generate_mesh_with(&mut self, mesher: &dyn ChunkMesher, catalog: Option<&dyn BlockCatalog>) {
        let start = Instant::now();
        let mesh = mesher.build(self, catalog);

        self.collision = None;
        self.mesh_revision += 1;

        if mesh.is_empty() {
            self.mesh = None;
        } else {
            self.collision = Some(CollisionShape::from_mesh(&mesh));
            self.mesh = Some(mesh);
        }

        debug!(
            "Chunk at {:?} rebuilt (revision {}, {} quads) in {:?}",
            self.position,
            self.mesh_revision,
            self.mesh.as_ref().map_or(0, ChunkMesh::quad_count),
            start.elapsed()
        );
    }

    /// Surface from the last rebuild.
    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }

    /// Collision trimesh from the last rebuild.
    pub fn collision(&self) -> Option<&CollisionShape> {
        self.collision.as_ref()
    }

    /// Number of rebuilds so far.
    pub fn mesh_revision(&self) -> u64 {
        self.mesh_revision
    }

    /// World-space translation of this chunk.
    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    /// Moves the chunk. The world does this on registration.
    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("position", &self.position)
            .field("mesh_revision", &self.mesh_revision)
            .field(
                "neighbours",
                &self.neighbours.iter().map(Option::is_some).collect::<Vec<_>>(),
            )
            .finish()
    }
}
