//! Material lookup: atlas tiles, per-face tile sets, and tints.
//!
//! Textures live in a 4×4 atlas; every voxel type maps to a
//! [`MaterialSet`] of tile indices (grass shows different top, side, and
//! bottom tiles) and an RGBA tint. Translucency is a property of the
//! tint's alpha and drives batch separation, not visibility.

use voxl_voxel::{Face, VoxelTypeId};

/// Tiles per atlas row/column.
pub const ATLAS_TILES: u32 = 4;

/// Tile indices into the atlas.
pub mod tile {
    pub const GRASS_TOP: u8 = 0;
    pub const GRASS_SIDE: u8 = 1;
    pub const DIRT: u8 = 2;
    pub const ROCK: u8 = 3;
    pub const WOOD: u8 = 4;
    pub const WATER: u8 = 5;
    pub const ACID: u8 = 6;
    pub const LAVA: u8 = 7;
    pub const CLOUD: u8 = 8;
    pub const SAND: u8 = 9;
    pub const CORAL: u8 = 10;
}

/// Per-face tile assignment for one voxel type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaterialSet {
    pub top: u8,
    pub bottom: u8,
    pub side: u8,
}

impl MaterialSet {
    /// Same tile on every face.
    pub const fn uniform(tile: u8) -> Self {
        Self {
            top: tile,
            bottom: tile,
            side: tile,
        }
    }

    /// Tile shown on a given face.
    pub fn tile_for(self, face: Face) -> u8 {
        match face {
            Face::PosY => self.top,
            Face::NegY => self.bottom,
            _ => self.side,
        }
    }
}

/// Material set for a voxel type. Air has no material; callers never ask
/// for it because air cells emit no faces.
pub fn material_set(id: VoxelTypeId) -> MaterialSet {
    match id {
        VoxelTypeId::GRASS => MaterialSet {
            top: tile::GRASS_TOP,
            side: tile::GRASS_SIDE,
            bottom: tile::DIRT,
        },
        VoxelTypeId::DIRT => MaterialSet::uniform(tile::DIRT),
        VoxelTypeId::ROCK => MaterialSet::uniform(tile::ROCK),
        VoxelTypeId::WOOD => MaterialSet::uniform(tile::WOOD),
        VoxelTypeId::WATER => MaterialSet::uniform(tile::WATER),
        VoxelTypeId::ACID => MaterialSet::uniform(tile::ACID),
        VoxelTypeId::LAVA => MaterialSet::uniform(tile::LAVA),
        VoxelTypeId::CLOUD => MaterialSet::uniform(tile::CLOUD),
        VoxelTypeId::SAND => MaterialSet::uniform(tile::SAND),
        VoxelTypeId::CORAL => MaterialSet::uniform(tile::CORAL),
        _ => MaterialSet::uniform(tile::ROCK),
    }
}

/// RGBA tint multiplied into a type's faces. Alpha below 1 routes the
/// material into the translucent batch group.
pub fn tint(id: VoxelTypeId) -> [f32; 4] {
    match id {
        VoxelTypeId::WATER => [1.0, 1.0, 1.0, 0.5],
        VoxelTypeId::CLOUD => [1.0, 1.0, 1.0, 0.4],
        VoxelTypeId::ACID => [0.7, 1.0, 0.3, 0.55],
        VoxelTypeId::LAVA => [1.0, 0.45, 0.1, 1.0],
        _ => [1.0, 1.0, 1.0, 1.0],
    }
}

/// `true` if the type renders in the translucent pass.
pub fn is_translucent(id: VoxelTypeId) -> bool {
    tint(id)[3] < 1.0
}

/// UV rectangle `(u0, v0, u1, v1)` of a tile in the atlas.
pub fn tile_uv(tile: u8) -> [f32; 4] {
    let step = 1.0 / ATLAS_TILES as f32;
    let col = (tile as u32 % ATLAS_TILES) as f32;
    let row = (tile as u32 / ATLAS_TILES) as f32;
    [col * step, row * step, (col + 1.0) * step, (row + 1.0) * step]
}
