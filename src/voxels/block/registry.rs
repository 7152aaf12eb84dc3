//! # Block Registry Module
//!
//! The block catalog maps stable numeric ids and case-insensitive names to display
//! colours. A [`BlockSet`] is the ordered, serialisable description of the blocks; a
//! [`BlockRegistry`] is built from it and assigns ids by position (the first block gets
//! id `1`).
//!
//! Meshing only depends on the [`BlockCatalog`] trait, so tests and hosts can supply their
//! own lookup.

use std::{collections::HashMap, fs, path::Path};

use phf::phf_ordered_map;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BlockData, BlockId, Color};

/// Blocks available when no block set file is supplied, in id order.
static DEFAULT_PALETTE: phf::OrderedMap<&'static str, [f32; 4]> = phf_ordered_map! {
    "stone" => [0.5, 0.5, 0.5, 1.0],
    "dirt" => [0.45, 0.3, 0.15, 1.0],
    "grass" => [0.3, 0.7, 0.2, 1.0],
    "sand" => [0.9, 0.85, 0.55, 1.0],
    "wood" => [0.55, 0.35, 0.2, 1.0],
};

/// Errors raised while loading a block set.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The block set file could not be read.
    #[error("Failed to read block set: {0}")]
    Io(#[from] std::io::Error),
    /// The block set is not valid JSON or has the wrong shape.
    #[error("Invalid block set format: {0}")]
    Format(#[from] serde_json::Error),
}

/// Lookup interface the mesher and the generator need from a block catalog.
pub trait BlockCatalog {
    /// Returns the record for `id`, or `None` for air, sentinels and unknown ids.
    fn block_by_id(&self, id: BlockId) -> Option<&BlockData>;

    /// Returns the record whose name matches `name`, ignoring case.
    fn block_by_name(&self, name: &str) -> Option<&BlockData>;

    /// Number of registered blocks. Valid ids are `1..=block_count()`.
    fn block_count(&self) -> usize;

    /// Base colour for `id`, falling back to [`Color::FALLBACK`] for unknown ids.
    fn color_of(&self, id: BlockId) -> Color {
        self.block_by_id(id)
            .map(|block| block.color)
            .unwrap_or(Color::FALLBACK)
    }
}

/// One entry of a block set, before an id has been assigned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    /// Display name; lookups by name ignore case
    pub name: String,
    /// Base colour
    #[serde(default)]
    pub color: Color,
}

/// An ordered collection of block definitions.
///
/// ```json
/// { "blocks": [ { "name": "Stone", "color": { "r": 0.5, "g": 0.5, "b": 0.5 } } ] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockSet {
    /// Definitions in id order
    #[serde(default)]
    pub blocks: Vec<BlockDefinition>,
}

impl BlockSet {
    /// Parses a block set from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a block set from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// The built-in palette: stone, dirt, grass, sand and wood.
    pub fn default_palette() -> Self {
        BlockSet {
            blocks: DEFAULT_PALETTE
                .entries()
                .map(|(name, rgba)| BlockDefinition {
                    name: (*name).to_string(),
                    color: Color::from_array(*rgba),
                })
                .collect(),
        }
    }
}

/// The default [`BlockCatalog`]: ids by position, names by lowercase key.
#[derive(Clone, Debug, Default)]
pub struct BlockRegistry {
    /// Index 0 holds the block with id 1.
    blocks_by_id: Vec<BlockData>,
    /// Lowercase name to index into `blocks_by_id`.
    blocks_by_name: HashMap<String, usize>,
}

impl BlockRegistry {
    /// Builds a registry from `block_set`, assigning ids `1..` in set order.
    ///
    /// When two definitions share a name (ignoring case), both keep their ids but name
    /// lookups resolve to the later one.
    pub fn new(block_set: BlockSet) -> Self {
        let mut registry = BlockRegistry::default();
        for definition in block_set.blocks {
            let index = registry.blocks_by_id.len();
            registry
                .blocks_by_name
                .insert(definition.name.to_lowercase(), index);
            registry.blocks_by_id.push(BlockData {
                id: BlockId(index as i32 + 1),
                name: definition.name,
                color: definition.color,
            });
        }
        registry
    }

    /// Iterates over all records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockData> {
        self.blocks_by_id.iter()
    }
}

impl BlockCatalog for BlockRegistry {
    fn block_by_id(&self, id: BlockId) -> Option<&BlockData> {
        if id.0 <= 0 {
            return None;
        }
        self.blocks_by_id.get(id.0 as usize - 1)
    }

    fn block_by_name(&self, name: &str) -> Option<&BlockData> {
        self.blocks_by_name
            .get(&name.to_lowercase())
            .and_then(|index| self.blocks_by_id.get(*index))
    }

    fn block_count(&self) -> usize {
        self.blocks_by_id.len()
    }
}
