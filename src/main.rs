//! # Voxel World Demo
//!
//! Generates a small world, picks a block with a downward ray, edits the world at the hit
//! and reports what was rebuilt.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- [BLOCK_SET_JSON] [flat|perlin]
//! ```
//!
//! Without a block set file (or with `-`) the built-in palette is used. Set `RUST_LOG=debug` to see every
//! chunk rebuild.

use std::{env, process::ExitCode, rc::Rc};

use cgmath::{Point3, Vector3};
use log::{error, info};

use voxel_world::voxels::{
    block::registry::{BlockCatalog, BlockRegistry, BlockSet},
    generator::{GeneratorConfig, TerrainKind, WorldGenerator},
    world::World,
};

const PICK_DISTANCE: f32 = 64.0;

fn main() -> ExitCode {
    voxel_world::init_logging();

    let mut args = env::args().skip(1);
    let block_set = match args.next().filter(|arg| arg != "-") {
        Some(path) => match BlockSet::from_json_file(&path) {
            Ok(block_set) => block_set,
            Err(err) => {
                error!("Failed to load block set from {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => BlockSet::default_palette(),
    };
    let terrain = match args.next().as_deref() {
        Some("perlin") => TerrainKind::Perlin,
        _ => TerrainKind::Flat,
    };

    let catalog = Rc::new(BlockRegistry::new(block_set));
    info!("Loaded {} block types", catalog.block_count());

    let mut world = World::new().with_catalog(catalog.clone());
    let generator = WorldGenerator::new(GeneratorConfig {
        terrain,
        ..GeneratorConfig::default()
    });
    if let Err(err) = generator.generate(&mut world) {
        error!("World generation failed: {err}");
        return ExitCode::FAILURE;
    }

    let (vertices, triangles) = world
        .chunk_coords()
        .filter_map(|coord| world.get_chunk(coord))
        .fold((0, 0), |(vertices, triangles), chunk| {
            let chunk = chunk.get();
            chunk.mesh().map_or((vertices, triangles), |mesh| {
                (vertices + mesh.vertex_count(), triangles + mesh.triangle_count())
            })
        });
    info!(
        "Meshed {} chunks: {vertices} vertices, {triangles} triangles",
        world.chunk_count()
    );

    let eye = Point3::new(8.5, 100.0, 8.5);
    let Some(hit) = world.raycast(eye, Vector3::new(0.0, -1.0, 0.0), PICK_DISTANCE * 2.0) else {
        info!("Nothing below {:?}", eye);
        return ExitCode::SUCCESS;
    };
    let name = catalog
        .block_by_id(hit.block_id)
        .map_or("unknown", |block| block.name.as_str());
    info!(
        "Ray from {:?} hit {name} at {:?} through face {:?}",
        eye,
        hit.block_pos,
        hit.face()
    );

    let place = hit.adjacent_pos().cast::<f32>().unwrap_or(eye);
    world.set_block_at(place, hit.block_id);
    info!("Placed {name} at {:?}", hit.adjacent_pos());

    match world.raycast(eye, Vector3::new(0.0, -1.0, 0.0), PICK_DISTANCE * 2.0) {
        Some(hit) => info!("Ray now stops at {:?}", hit.block_pos),
        None => info!("Ray now hits nothing"),
    }

    ExitCode::SUCCESS
}
