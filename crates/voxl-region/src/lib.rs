//! Region container and the VOXL binary format.

pub mod error;
pub mod format;
pub mod region;

pub use error::RegionError;
pub use format::{
    CHUNK_PAYLOAD_LEN, FORMAT_VERSION, HEADER_LEN, INDEX_ENTRY_LEN, IndexEntry, RegionIndex,
    deserialize, read_chunk, read_index, serialize,
};
pub use region::{REGION_EDGE, REGION_SLOTS, Region, RegionCoord, build_region_path};
