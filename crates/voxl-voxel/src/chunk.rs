//! Chunk storage: a 30³ block of palette-indexed cells plus the metadata
//! and border mask that travel with it on the wire.

use thiserror::Error;
use tracing::debug;

use crate::border::BorderMask;
use crate::catalog::VoxelTypeId;
use crate::palette::{ChunkKind, Palette};

/// Cells along one edge of a chunk.
pub const CHUNK_EDGE: usize = 30;
/// Cells in one face plane of a chunk.
pub const CHUNK_AREA: usize = CHUNK_EDGE * CHUNK_EDGE;
/// Cells in a whole chunk.
pub const CHUNK_VOLUME: usize = CHUNK_EDGE * CHUNK_EDGE * CHUNK_EDGE;

/// Chunk position in chunk-grid units (world position / edge length).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// World-space Y of this chunk's lowest cell layer.
    pub fn base_y(self) -> i32 {
        self.y * CHUNK_EDGE as i32
    }

    /// The coordinate one chunk over in the given face direction.
    pub fn neighbor(self, face: crate::face::Face) -> Self {
        let (x, y, z) = face.offset(self.x, self.y, self.z);
        Self { x, y, z }
    }
}

/// Per-chunk metadata carried in the 12-byte chunk header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkMeta {
    /// Ambient medium filling empty space (a [`VoxelTypeId`] byte;
    /// 0 = air, water for flooded chunks).
    pub medium: u8,
    /// Reserved flag bits.
    pub flags: u8,
    /// Local sea surface height in world-Y cells, post modulation.
    pub water_level: i16,
    /// Climate sample, biased degrees.
    pub temperature: i8,
    /// Climate sample, 0..=100.
    pub humidity: i8,
}

/// Errors constructing a chunk from raw parts.
#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("cell buffer holds {actual} bytes, chunk needs {expected}")]
    WrongCellCount { expected: usize, actual: usize },
}

/// A 30³ block of voxels.
///
/// Cells store palette indices (bytes); the palette is selected by the
/// chunk's [`ChunkKind`]. Out-of-range reads return Air and out-of-range
/// writes are dropped, so callers can probe past the edge without
/// pre-checking bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    kind: ChunkKind,
    cells: Vec<u8>,
    meta: ChunkMeta,
    border: BorderMask,
}

impl Chunk {
    /// Creates an all-air chunk of the given kind.
    pub fn new(kind: ChunkKind) -> Self {
        Self {
            kind,
            cells: vec![0u8; CHUNK_VOLUME],
            meta: ChunkMeta::default(),
            border: BorderMask::new(),
        }
    }

    /// Reassembles a chunk from deserialized parts.
    pub fn from_parts(
        kind: ChunkKind,
        meta: ChunkMeta,
        cells: Vec<u8>,
        border: BorderMask,
    ) -> Result<Self, ChunkError> {
        if cells.len() != CHUNK_VOLUME {
            return Err(ChunkError::WrongCellCount {
                expected: CHUNK_VOLUME,
                actual: cells.len(),
            });
        }
        Ok(Self {
            kind,
            cells,
            meta,
            border,
        })
    }

    /// Flat cell index for a position: x-fastest, then y, then z.
    pub fn linear_index(x: usize, y: usize, z: usize) -> usize {
        x + y * CHUNK_EDGE + z * CHUNK_AREA
    }

    /// Inverse of [`Self::linear_index`].
    pub fn de_index(index: usize) -> (usize, usize, usize) {
        let x = index % CHUNK_EDGE;
        let y = (index / CHUNK_EDGE) % CHUNK_EDGE;
        let z = index / CHUNK_AREA;
        (x, y, z)
    }

    pub fn kind(&self) -> ChunkKind {
        self.kind
    }

    pub fn meta(&self) -> &ChunkMeta {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut ChunkMeta {
        &mut self.meta
    }

    pub fn border(&self) -> &BorderMask {
        &self.border
    }

    pub fn border_mut(&mut self) -> &mut BorderMask {
        &mut self.border
    }

    /// The palette this chunk's cell bytes decode through.
    pub fn palette(&self) -> Palette {
        Palette::for_kind(self.kind)
    }

    /// Raw cell bytes in linear-index order.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Returns the cell byte at a position; Air (0) when out of range.
    pub fn get(&self, x: i32, y: i32, z: i32) -> u8 {
        if !Self::in_bounds(x, y, z) {
            return 0;
        }
        self.cells[Self::linear_index(x as usize, y as usize, z as usize)]
    }

    /// Returns the decoded voxel type at a position; Air when out of range.
    pub fn voxel(&self, palette: &Palette, x: i32, y: i32, z: i32) -> VoxelTypeId {
        palette.decode(self.get(x, y, z))
    }

    /// Sets the cell byte at a position. Out-of-range writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, z: i32, value: u8) {
        if !Self::in_bounds(x, y, z) {
            debug!(x, y, z, "dropping out-of-range cell write");
            return;
        }
        self.cells[Self::linear_index(x as usize, y as usize, z as usize)] = value;
    }

    /// Sets every cell to the same byte.
    pub fn fill(&mut self, value: u8) {
        self.cells.fill(value);
    }

    /// Returns `true` if every cell decodes to Air.
    pub fn is_all_air(&self) -> bool {
        let palette = self.palette();
        self.cells
            .iter()
            .all(|&b| palette.decode(b) == VoxelTypeId::AIR)
    }

    fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        let edge = CHUNK_EDGE as i32;
        (0..edge).contains(&x) && (0..edge).contains(&y) && (0..edge).contains(&z)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chunk_is_air() {
        let chunk = Chunk::new(ChunkKind::Prairie);
        assert!(chunk.is_all_air());
        assert_eq!(chunk.get(0, 0, 0), 0);
        assert_eq!(chunk.get(29, 29, 29), 0);
    }

    #[test]
    fn test_linear_index_is_x_fastest() {
        assert_eq!(Chunk::linear_index(0, 0, 0), 0);
        assert_eq!(Chunk::linear_index(1, 0, 0), 1);
        assert_eq!(Chunk::linear_index(0, 1, 0), CHUNK_EDGE);
        assert_eq!(Chunk::linear_index(0, 0, 1), CHUNK_AREA);
        assert_eq!(Chunk::linear_index(29, 29, 29), CHUNK_VOLUME - 1);
    }

    #[test]
    fn test_de_index_inverts_linear_index() {
        for &(x, y, z) in &[(0, 0, 0), (29, 0, 0), (0, 29, 0), (3, 7, 11), (29, 29, 29)] {
            assert_eq!(Chunk::de_index(Chunk::linear_index(x, y, z)), (x, y, z));
        }
    }

    #[test]
    fn test_set_then_get() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        chunk.set(5, 10, 15, 2);
        assert_eq!(chunk.get(5, 10, 15), 2);
        assert_eq!(chunk.get(5, 10, 16), 0);
        let palette = chunk.palette();
        assert_eq!(chunk.voxel(&palette, 5, 10, 15), VoxelTypeId::GRASS);
    }

    #[test]
    fn test_out_of_range_reads_are_air() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        chunk.fill(3);
        assert_eq!(chunk.get(-1, 0, 0), 0);
        assert_eq!(chunk.get(0, 30, 0), 0);
        assert_eq!(chunk.get(0, 0, 100), 0);
    }

    #[test]
    fn test_out_of_range_writes_are_dropped() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        chunk.set(-1, 0, 0, 3);
        chunk.set(0, 30, 0, 3);
        assert!(chunk.is_all_air());
    }

    #[test]
    fn test_from_parts_validates_cell_count() {
        let result = Chunk::from_parts(
            ChunkKind::Sky,
            ChunkMeta::default(),
            vec![0u8; 100],
            BorderMask::new(),
        );
        assert!(matches!(
            result,
            Err(ChunkError::WrongCellCount { expected, actual: 100 })
                if expected == CHUNK_VOLUME
        ));
    }

    #[test]
    fn test_unassigned_palette_bytes_read_as_air() {
        let mut chunk = Chunk::new(ChunkKind::Sky);
        chunk.set(1, 1, 1, 9);
        let palette = chunk.palette();
        assert_eq!(chunk.voxel(&palette, 1, 1, 1), VoxelTypeId::AIR);
    }

    #[test]
    fn test_chunk_coord_neighbor() {
        use crate::face::Face;
        let c = ChunkCoord::new(1, 2, 3);
        assert_eq!(c.neighbor(Face::PosX), ChunkCoord::new(2, 2, 3));
        assert_eq!(c.neighbor(Face::NegY), ChunkCoord::new(1, 1, 3));
        assert_eq!(c.base_y(), 60);
    }
}
