//! # Generator Module
//!
//! Fills a rectangle of chunks with terrain, registers them with a world and meshes them.
//!
//! Two recipes are available:
//! - `flat`: two layers of stone, two of dirt and one of grass, plus a single stone marker
//!   block floating above the middle of every chunk
//! - `perlin`: rolling hills from 2D Perlin noise, stone under dirt under a grass cap
//!
//! Both need the world's catalog to contain blocks named `stone`, `dirt` and `grass`.

use cgmath::Point3;
use log::{error, info};
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    block::{registry::BlockCatalog, BlockId},
    chunk::{Chunk, HEIGHT, SIZE},
    world::{ChunkCoord, World},
};

/// Height of the grass surface that Perlin terrain oscillates around.
pub const PERLIN_BASE_HEIGHT: f64 = 24.0;
/// Maximum deviation of Perlin terrain from the base height.
pub const PERLIN_AMPLITUDE: f64 = 12.0;
/// Scaling factor applied to world coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.02;

/// Errors that stop generation before any chunk is created.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    /// The world has no catalog to resolve block names with.
    #[error("world has no block catalog")]
    MissingCatalog,
    /// A block the recipe needs is not in the catalog.
    #[error("required block '{0}' is missing from the block catalog")]
    MissingBlock(String),
}

/// Which terrain recipe to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainKind {
    /// Five flat layers and a marker block
    #[default]
    Flat,
    /// Noise-driven heightmap
    Perlin,
}

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of chunks along X, starting at chunk coordinate 0
    pub chunks_x: i32,
    /// Number of chunks along Z, starting at chunk coordinate 0
    pub chunks_z: i32,
    /// Terrain recipe
    pub terrain: TerrainKind,
    /// Noise seed; a random one is picked when absent
    pub seed: Option<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            chunks_x: 4,
            chunks_z: 4,
            terrain: TerrainKind::Flat,
            seed: None,
        }
    }
}

/// Ids of the blocks the recipes are built from.
#[derive(Debug, Clone, Copy)]
struct Palette {
    stone: BlockId,
    dirt: BlockId,
    grass: BlockId,
}

impl Palette {
    fn resolve(catalog: &dyn BlockCatalog) -> Result<Self, GeneratorError> {
        let lookup = |name: &str| {
            catalog
                .block_by_name(name)
                .map(|block| block.id)
                .ok_or_else(|| GeneratorError::MissingBlock(name.to_string()))
        };
        Ok(Palette {
            stone: lookup("stone")?,
            dirt: lookup("dirt")?,
            grass: lookup("grass")?,
        })
    }
}

/// Builds terrain into a [`World`].
#[derive(Debug, Clone, Default)]
pub struct WorldGenerator {
    config: GeneratorConfig,
}

impl WorldGenerator {
    /// Creates a generator with `config`.
    pub fn new(config: GeneratorConfig) -> Self {
        WorldGenerator { config }
    }

    /// The active settings.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates every chunk in the configured rectangle, registers it with `world`, then
    /// meshes all of them once.
    ///
    /// Coordinates that are already occupied keep their existing chunk. Precondition
    /// failures are logged and returned without touching the world.
    ///
    /// # Returns
    ///
    /// The coordinates of the chunks this call registered.
    pub fn generate(&self, world: &mut World) -> Result<Vec<ChunkCoord>, GeneratorError> {
        let palette = match world.catalog().ok_or(GeneratorError::MissingCatalog) {
            Ok(catalog) => Palette::resolve(catalog),
            Err(err) => Err(err),
        };
        let palette = palette.map_err(|err| {
            error!("WorldGenerator: {err}");
            err
        })?;

        let perlin = match self.config.terrain {
            TerrainKind::Flat => None,
            TerrainKind::Perlin => {
                let seed = self.config.seed.unwrap_or_else(|| fastrand::u32(..));
                info!("WorldGenerator: using perlin terrain with seed {seed}");
                Some(Perlin::new(seed))
            }
        };

        let mut registered = Vec::new();
        for z in 0..self.config.chunks_z {
            for x in 0..self.config.chunks_x {
                let coord = ChunkCoord::new(x, z);
                let chunk = match &perlin {
                    None => Self::flat_chunk(&palette),
                    Some(perlin) => Self::perlin_chunk(&palette, perlin, coord),
                };
                if world.register_chunk(chunk, coord).is_some() {
                    registered.push(coord);
                }
            }
        }

        for coord in &registered {
            world.regenerate_chunk(*coord);
        }

        info!("WorldGenerator: generated {} chunks", registered.len());
        Ok(registered)
    }

    fn flat_chunk(palette: &Palette) -> Chunk {
        let mut chunk = Chunk::new();
        chunk.fill_range(Point3::new(0, 0, 0), Point3::new(SIZE, 2, SIZE), palette.stone);
        chunk.fill_range(Point3::new(0, 2, 0), Point3::new(SIZE, 4, SIZE), palette.dirt);
        chunk.fill_range(Point3::new(0, 4, 0), Point3::new(SIZE, 5, SIZE), palette.grass);
        chunk.set_block(8, 6, 8, palette.stone);
        chunk
    }

    fn perlin_chunk(palette: &Palette, perlin: &Perlin, coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new();
        for z in 0..SIZE {
            for x in 0..SIZE {
                let height = Self::column_height(
                    perlin,
                    coord.x as f64 * SIZE as f64 + x as f64,
                    coord.z as f64 * SIZE as f64 + z as f64,
                );
                let column = |y0: i32, y1: i32| {
                    (Point3::new(x, y0.max(0), z), Point3::new(x + 1, y1, z + 1))
                };

                let (from, to) = column(0, height - 3);
                chunk.fill_range(from, to, palette.stone);
                let (from, to) = column(height - 3, height - 1);
                chunk.fill_range(from, to, palette.dirt);
                let (from, to) = column(height - 1, height);
                chunk.fill_range(from, to, palette.grass);
            }
        }
        chunk
    }

    /// Surface height (exclusive top) of the world column at `(world_x, world_z)`.
    fn column_height(perlin: &Perlin, world_x: f64, world_z: f64) -> i32 {
        let sample = perlin.get([world_x * PERLIN_SCALE_FACTOR, world_z * PERLIN_SCALE_FACTOR]);
        let height = (PERLIN_BASE_HEIGHT + sample * PERLIN_AMPLITUDE).round() as i32;
        height.clamp(1, HEIGHT - 1)
    }
}
