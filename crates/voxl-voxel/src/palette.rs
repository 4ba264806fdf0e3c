//! Per-kind palettes: the byte each cell stores is an index into a
//! 256-entry table of [`VoxelTypeId`]s. Entry 0 decodes to Air in every
//! palette, so a zeroed cell buffer is always empty space.

use serde::{Deserialize, Serialize};

use crate::catalog::VoxelTypeId;

/// Broad classification of a chunk, chosen by the generator from the
/// chunk's altitude band. Selects the palette and the default medium.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ChunkKind {
    Prairie = 0,
    Underwater = 1,
    Sky = 2,
}

impl ChunkKind {
    /// Stable byte identifying this kind's palette on the wire.
    pub fn palette_id(self) -> u8 {
        self as u8
    }

    /// Decodes a kind from its wire byte, if valid.
    pub fn from_palette_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Prairie),
            1 => Some(Self::Underwater),
            2 => Some(Self::Sky),
            _ => None,
        }
    }
}

/// 256-entry cell-byte → voxel-type table.
///
/// Unassigned entries decode to Air; `encode` inverts the assigned
/// entries (first match wins, so Air encodes to 0).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    table: [VoxelTypeId; 256],
}

impl Palette {
    /// Builds a palette from explicit `(cell byte, type)` assignments.
    fn from_entries(entries: &[(u8, VoxelTypeId)]) -> Self {
        let mut table = [VoxelTypeId::AIR; 256];
        for &(byte, id) in entries {
            table[byte as usize] = id;
        }
        // Entry 0 is Air no matter what the entries said.
        table[0] = VoxelTypeId::AIR;
        Self { table }
    }

    /// Returns the palette for a chunk kind.
    pub fn for_kind(kind: ChunkKind) -> Self {
        match kind {
            ChunkKind::Prairie => Self::from_entries(&[
                (1, VoxelTypeId::DIRT),
                (2, VoxelTypeId::GRASS),
                (3, VoxelTypeId::ROCK),
                (4, VoxelTypeId::CLOUD),
                (5, VoxelTypeId::WATER),
                (6, VoxelTypeId::SAND),
            ]),
            ChunkKind::Underwater => Self::from_entries(&[
                (1, VoxelTypeId::WATER),
                (2, VoxelTypeId::SAND),
                (3, VoxelTypeId::CORAL),
                (4, VoxelTypeId::ROCK),
            ]),
            ChunkKind::Sky => Self::from_entries(&[(4, VoxelTypeId::CLOUD)]),
        }
    }

    /// Decodes a cell byte to its voxel type.
    pub fn decode(&self, byte: u8) -> VoxelTypeId {
        self.table[byte as usize]
    }

    /// Returns the cell byte for a voxel type, or `None` if this palette
    /// cannot represent it.
    pub fn encode(&self, id: VoxelTypeId) -> Option<u8> {
        self.table.iter().position(|&t| t == id).map(|i| i as u8)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
