//! A region: a 4³ grid of optional chunks, the unit the container format
//! serializes.

use std::path::{Path, PathBuf};

use tracing::debug;
use voxl_voxel::{CHUNK_EDGE, Chunk, ChunkCoord};

/// Chunks along one edge of a region.
pub const REGION_EDGE: usize = 4;
/// Chunk slots in a region.
pub const REGION_SLOTS: usize = REGION_EDGE * REGION_EDGE * REGION_EDGE;

/// Region position in region-grid units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl RegionCoord {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chunk-grid coordinate of the slot at `(sx, sy, sz)` inside this
    /// region.
    pub fn chunk_coord(self, sx: usize, sy: usize, sz: usize) -> ChunkCoord {
        ChunkCoord::new(
            self.x * REGION_EDGE as i32 + sx as i32,
            self.y * REGION_EDGE as i32 + sy as i32,
            self.z * REGION_EDGE as i32 + sz as i32,
        )
    }

    /// World-space cell coordinate of this region's origin corner.
    pub fn world_origin(self) -> (i32, i32, i32) {
        let span = (REGION_EDGE * CHUNK_EDGE) as i32;
        (self.x * span, self.y * span, self.z * span)
    }
}

/// On-disk file name for a region: `r.<x>.<y>.<z>.voxl` under `dir`.
pub fn build_region_path(dir: &Path, rc: RegionCoord) -> PathBuf {
    dir.join(format!("r.{}.{}.{}.voxl", rc.x, rc.y, rc.z))
}

/// A 4³ grid of chunk slots. Slots start empty; absent chunks serialize
/// as zero-length index entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    slots: Vec<Option<Chunk>>,
}

impl Default for Region {
    fn default() -> Self {
        Self::new()
    }
}

impl Region {
    /// Creates a region with every slot empty.
    pub fn new() -> Self {
        Self {
            slots: (0..REGION_SLOTS).map(|_| None).collect(),
        }
    }

    /// Flat slot index for a slot position: x-major, then y, then z.
    pub fn slot_index(sx: usize, sy: usize, sz: usize) -> usize {
        (sx * REGION_EDGE + sy) * REGION_EDGE + sz
    }

    /// Inverse of [`Self::slot_index`].
    pub fn slot_coords(slot: usize) -> (usize, usize, usize) {
        let sz = slot % REGION_EDGE;
        let sy = (slot / REGION_EDGE) % REGION_EDGE;
        let sx = slot / (REGION_EDGE * REGION_EDGE);
        (sx, sy, sz)
    }

    fn checked_index(sx: usize, sy: usize, sz: usize) -> Option<usize> {
        if sx < REGION_EDGE && sy < REGION_EDGE && sz < REGION_EDGE {
            Some(Self::slot_index(sx, sy, sz))
        } else {
            None
        }
    }

    /// Returns the chunk at a slot, or `None` if absent or out of range.
    pub fn get_chunk(&self, sx: usize, sy: usize, sz: usize) -> Option<&Chunk> {
        Self::checked_index(sx, sy, sz).and_then(|i| self.slots[i].as_ref())
    }

    /// Mutable access to the chunk at a slot.
    pub fn get_chunk_mut(&mut self, sx: usize, sy: usize, sz: usize) -> Option<&mut Chunk> {
        Self::checked_index(sx, sy, sz).and_then(|i| self.slots[i].as_mut())
    }

    /// Places a chunk at a slot, returning whatever was there.
    ///
    /// Out-of-range inserts are dropped.
    pub fn insert_chunk(&mut self, sx: usize, sy: usize, sz: usize, chunk: Chunk) -> Option<Chunk> {
        match Self::checked_index(sx, sy, sz) {
            Some(i) => self.slots[i].replace(chunk),
            None => {
                debug!(sx, sy, sz, "dropping out-of-range chunk insert");
                None
            }
        }
    }

    /// Removes and returns the chunk at a slot.
    pub fn take_chunk(&mut self, sx: usize, sy: usize, sz: usize) -> Option<Chunk> {
        Self::checked_index(sx, sy, sz).and_then(|i| self.slots[i].take())
    }

    /// Returns `true` if the slot holds a chunk.
    pub fn is_present(&self, sx: usize, sy: usize, sz: usize) -> bool {
        self.get_chunk(sx, sy, sz).is_some()
    }

    /// Number of occupied slots.
    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Chunk at a flat slot index, absent slots as `None`.
    pub fn slot(&self, index: usize) -> Option<&Chunk> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    /// Iterates occupied slots as `(slot index, chunk)`.
    pub fn iter_present(&self) -> impl Iterator<Item = (usize, &Chunk)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|c| (i, c)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
