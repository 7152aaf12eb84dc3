//! Mesh generation for voxel chunks.
//!
//! This module converts a chunk's block ids into a renderable surface plus a matching
//! collision trimesh. Only faces between a solid cell and air (or the edge of the loaded
//! world) are emitted; faces shared by two solid cells are culled, including across chunk
//! borders through the chunk's neighbour links.
//!
//! # Architecture
//! - [`ChunkMesher`]: The seam a chunk rebuilds its surface through
//! - [`CulledMesher`]: Per-face culling, one quad per visible face
//! - [`ChunkMesh`] / [`CollisionShape`]: The produced geometry
//! - [`Face`]: One unit quad on one side of a cell
//!
//! # Usage
//! ```
//! use voxel_world::meshing::{ChunkMesher, CulledMesher};
//! use voxel_world::voxels::{block::BlockId, chunk::Chunk};
//!
//! let mut chunk = Chunk::new();
//! chunk.set_block(1, 1, 1, BlockId(1));
//! let mesh = CulledMesher.build(&chunk, None);
//! assert_eq!(mesh.quad_count(), 6);
//! ```
//!
//! # Performance Considerations
//! - Every rebuild walks the full chunk volume; cost does not depend on the edit size

mod culled;
mod face;
mod mesh;
mod vertex;

pub use culled::CulledMesher;
pub use face::{Face, FACE_BRIGHTNESS, FACE_UVS};
pub use mesh::{ChunkMesh, CollisionShape};
pub use vertex::Vertex;

use crate::voxels::{block::registry::BlockCatalog, chunk::Chunk};

/// Turns a chunk's block data into surface geometry.
///
/// Implementations must only read the chunk (and, through it, its neighbours); attaching the
/// result is the chunk's job.
pub trait ChunkMesher {
    /// Builds the full surface of `chunk`. `catalog` supplies block colours; when it is
    /// `None` every block uses [`crate::voxels::block::Color::FALLBACK`].
    fn build(&self, chunk: &Chunk, catalog: Option<&dyn BlockCatalog>) -> ChunkMesh;
}
