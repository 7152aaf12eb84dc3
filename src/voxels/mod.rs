//! # Voxel World Core
//!
//! This module contains the data side of the voxel world: block ids and their catalog,
//! fixed-size chunks, and the world that owns and stitches them together.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Block ids, faces and the catalog that names and colours them
//! * **Chunk**: A fixed 16 x 128 x 16 column of blocks with weak links to its neighbours
//! * **World**: Sparse chunk storage, world-space block access, edits and raycasting
//! * **Generator**: Fills a rectangle of chunks with terrain
//!
//! ## Data Flow
//!
//! 1. World receives a block read or edit in world space
//! 2. World delegates to the chunk covering that position
//! 3. Edits rebuild the owning chunk and any neighbour sharing the edited border
//! 4. The rebuilt mesh and collision shape are stored on each chunk
//!
//! ## Thread Safety
//!
//! Chunks are shared through single-threaded handles. A world and its chunks stay on the
//! thread that created them.

pub mod block;
pub mod chunk;
pub mod generator;
pub mod world;
