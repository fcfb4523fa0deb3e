mod block;
mod host;
mod voxel_world;

pub use block::*;
pub use host::*;
pub use voxel_world::*;
