//! Surface extraction: face visibility, naive and greedy meshers, and
//! per-material batched mesh output.

pub mod batches;
pub mod greedy;
pub mod material;
pub mod naive;
pub mod visibility;

pub use batches::{MaterialBatch, MeshBatches, MeshBuffer, MeshVertex};
pub use greedy::greedy_mesh;
pub use material::{ATLAS_TILES, MaterialSet, is_translucent, material_set, tile, tile_uv, tint};
pub use naive::naive_mesh;
pub use visibility::{FaceSet, compute_visible_faces};
