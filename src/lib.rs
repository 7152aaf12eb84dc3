#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! Chunked voxel storage with face-culled meshing and block picking.
//!
//! The world is split into 16 x 128 x 16 chunks on a horizontal grid. Each chunk can turn
//! its blocks into a triangle mesh that only contains faces exposed to air, looking across
//! chunk borders through its neighbours, and a matching collision trimesh. Rays can be cast
//! through the world to find the first solid block and the face they entered through.
//!
//! ## Key Modules
//!
//! * `core` - Shared resource handles used throughout the crate
//! * `meshing` - The meshing seam, the face-culling mesher and the mesh types
//! * `voxels` - Blocks, chunks, the world and terrain generation
//!
//! ## Usage
//!
//! ```rust
//! use std::rc::Rc;
//! use cgmath::{Point3, Vector3};
//! use voxel_world::voxels::{
//!     block::registry::{BlockRegistry, BlockSet},
//!     generator::WorldGenerator,
//!     world::World,
//! };
//!
//! let catalog = Rc::new(BlockRegistry::new(BlockSet::default_palette()));
//! let mut world = World::new().with_catalog(catalog);
//! WorldGenerator::default().generate(&mut world).expect("default palette has terrain blocks");
//!
//! let hit = world.raycast(Point3::new(3.5, 20.0, 3.5), Vector3::new(0.0, -1.0, 0.0), 32.0);
//! assert_eq!(hit.map(|hit| hit.block_pos), Some(Point3::new(3, 4, 3)));
//! ```

use log::info;

pub mod core;
pub mod meshing;
pub mod voxels;

/// Installs the stdout logger, filtered by `RUST_LOG`.
///
/// Call once at startup; later calls are ignored.
pub fn init_logging() {
    let mut log_builder = env_logger::Builder::new();
    if log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init()
        .is_ok()
    {
        info!("Logger initialized");
    }
}
