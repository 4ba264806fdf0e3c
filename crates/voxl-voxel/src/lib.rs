//! Voxel fundamentals: the type catalog, per-kind palettes, bit-packed cell
//! storage, 30³ chunks, and border visibility masks.

pub mod border;
pub mod catalog;
pub mod chunk;
pub mod face;
pub mod packed;
pub mod palette;

pub use border::{BORDER_CELLS, BORDER_MASK_BYTES, BorderMask, CategoryMask};
pub use catalog::{Category, CatalogError, VoxelCatalog, VoxelTypeDef, VoxelTypeId, face_visible};
pub use chunk::{CHUNK_AREA, CHUNK_EDGE, CHUNK_VOLUME, Chunk, ChunkCoord, ChunkError, ChunkMeta};
pub use face::Face;
pub use packed::PackedCells;
pub use palette::{ChunkKind, Palette};
