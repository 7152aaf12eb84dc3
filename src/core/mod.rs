//! # Core Module
//!
//! Resource handles shared throughout the crate.
//!
//! ## Key Components
//! - `StResource`: Single-threaded reference-counted resource with interior mutability
//! - `WeakStResource`: Non-owning counterpart used for chunk neighbour links
//!
//! ## Usage
//! ```rust
//! use voxel_world::core::StResource;
//!
//! let counter = StResource::new(0);
//! *counter.get_mut() += 1;
//! assert_eq!(*counter.get(), 1);
//! ```

pub mod st_resource;

pub use st_resource::{StResource, WeakStResource};
