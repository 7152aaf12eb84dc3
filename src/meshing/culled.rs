use crate::voxels::{
    block::{block_side::BlockSide, registry::BlockCatalog, Color},
    chunk::{Chunk, HEIGHT, SIZE},
};

use super::{face::Face, mesh::ChunkMesh, ChunkMesher};

/// Emits one quad for every face of a solid cell that touches air.
///
/// Cells are visited y-major, then z, then x, and faces in `BlockSide` order, so the output
/// is deterministic for a given chunk.
#[derive(Debug, Clone, Copy, Default)]
pub struct CulledMesher;

impl ChunkMesher for CulledMesher {
    fn build(&self, chunk: &Chunk, catalog: Option<&dyn BlockCatalog>) -> ChunkMesh {
        let mut mesh = ChunkMesh::new();

        for y in 0..HEIGHT {
            for z in 0..SIZE {
                for x in 0..SIZE {
                    let id = chunk.get_block(x, y, z);
                    if id.is_empty() {
                        continue;
                    }

                    let base_color = catalog
                        .map(|catalog| catalog.color_of(id))
                        .unwrap_or(Color::FALLBACK);

                    for side in BlockSide::all() {
                        let step = side.normal();
                        let facing =
                            chunk.get_block_including_neighbours(x + step.x, y + step.y, z + step.z);
                        if facing.is_solid() {
                            continue;
                        }

                        let face = Face::new(x, y, z, side);
                        mesh.add_face(&face, base_color.shaded(face.brightness()));
                    }
                }
            }
        }

        mesh
    }
}
