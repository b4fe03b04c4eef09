//! Voxel scene data
//!
//! The image is a stack of sparse voxel layers plus a selection mask. It is
//! what the gesture dispatcher snaps against and what the selection actions
//! (fill/add/sub/cut) operate on.

mod image;

pub use image::{Rgba, VoxelImage};
