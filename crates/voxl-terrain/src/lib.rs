//! Procedural terrain: noise fields, the chunk generator, border-mask
//! construction, and the async generation pipeline.

mod border;
mod fields;
mod generator;
mod params;
mod pipeline;

pub use border::{build_border_mask, build_category_mask, build_region};
pub use fields::NoiseFields;
pub use generator::TerrainGenerator;
pub use params::TerrainParams;
pub use pipeline::{GeneratedChunk, GenerationTask, GeneratorPool};
