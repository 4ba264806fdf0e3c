//! The chunk generator: altitude banding, column fill rules, and a
//! memoizing cache so neighbor lookups never regenerate a chunk.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;

use voxl_voxel::{
    CHUNK_EDGE, Chunk, ChunkCoord, ChunkKind, Palette, VoxelCatalog, VoxelTypeId,
};

use crate::fields::NoiseFields;
use crate::params::TerrainParams;

/// Deterministic procedural chunk source.
///
/// `generate` is memoized per chunk coordinate; border-mask building and
/// worker threads can ask for the same chunk repeatedly and share one
/// `Arc`.
pub struct TerrainGenerator {
    fields: NoiseFields,
    catalog: VoxelCatalog,
    cache: DashMap<ChunkCoord, Arc<Chunk>>,
}

impl TerrainGenerator {
    pub fn new(params: TerrainParams) -> Self {
        Self {
            fields: NoiseFields::new(params),
            catalog: VoxelCatalog::standard(),
            cache: DashMap::new(),
        }
    }

    pub fn params(&self) -> &TerrainParams {
        self.fields.params()
    }

    pub fn catalog(&self) -> &VoxelCatalog {
        &self.catalog
    }

    /// Altitude band for a chunk position: sky above `sky_level`,
    /// underwater below `sea_level`, prairie between.
    pub fn chunk_kind(&self, coord: ChunkCoord) -> ChunkKind {
        let base_y = coord.base_y();
        let p = self.fields.params();
        if base_y >= p.sky_level {
            ChunkKind::Sky
        } else if base_y < p.sea_level {
            ChunkKind::Underwater
        } else {
            ChunkKind::Prairie
        }
    }

    /// Returns the chunk at `coord`, generating and caching it on first
    /// request.
    pub fn generate(&self, coord: ChunkCoord) -> Arc<Chunk> {
        // The entry API holds the shard lock across the check and the
        // insert, so concurrent requests for one coordinate generate at
        // most once and share the same chunk.
        Arc::clone(
            &self
                .cache
                .entry(coord)
                .or_insert_with(|| Arc::new(self.generate_uncached(coord))),
        )
    }

    /// Number of chunks held in the memo cache.
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    fn generate_uncached(&self, coord: ChunkCoord) -> Chunk {
        let kind = self.chunk_kind(coord);
        trace!(?coord, ?kind, "generating chunk");

        let mut chunk = Chunk::new(kind);
        let palette = chunk.palette();
        match kind {
            ChunkKind::Sky => self.fill_sky(coord, &mut chunk, &palette),
            ChunkKind::Prairie | ChunkKind::Underwater => {
                self.fill_ground(coord, kind, &mut chunk, &palette)
            }
        }
        self.write_meta(coord, kind, &mut chunk);
        chunk
    }

    fn fill_sky(&self, coord: ChunkCoord, chunk: &mut Chunk, palette: &Palette) {
        let edge = CHUNK_EDGE as i32;
        let (bx, by, bz) = (coord.x * edge, coord.y * edge, coord.z * edge);
        let cloud = palette.encode(VoxelTypeId::CLOUD).unwrap_or(0);
        for z in 0..edge {
            for y in 0..edge {
                for x in 0..edge {
                    if self.fields.is_cloud(bx + x, by + y, bz + z) {
                        chunk.set(x, y, z, cloud);
                    }
                }
            }
        }
    }

    fn fill_ground(&self, coord: ChunkCoord, kind: ChunkKind, chunk: &mut Chunk, palette: &Palette) {
        let edge = CHUNK_EDGE as i32;
        let (bx, by, bz) = (coord.x * edge, coord.y * edge, coord.z * edge);
        let p = self.fields.params();
        // Underwater palettes cannot express dirt or grass; the floor is
        // sand there instead.
        let underwater = kind == ChunkKind::Underwater;

        for z in 0..edge {
            for x in 0..edge {
                let (wx, wz) = (bx + x, bz + z);
                let surface_h = self.fields.surface_height(wx, wz);
                let local_water = self.fields.local_water_level(wx, wz);

                for y in 0..edge {
                    let wy = by + y;
                    let mut val = VoxelTypeId::AIR;

                    if wy < surface_h {
                        val = if wy == surface_h - 1 {
                            self.floor_type(underwater, wx, wy, wz, local_water)
                        } else if underwater {
                            VoxelTypeId::SAND
                        } else {
                            VoxelTypeId::DIRT
                        };
                    }
                    // Below the ground band, the cave field decides
                    // everything the surface pass wrote.
                    if wy < p.ground_level {
                        val = if self.fields.is_cave_rock(wx, wy, wz) {
                            VoxelTypeId::ROCK
                        } else {
                            VoxelTypeId::AIR
                        };
                    }
                    if wy <= local_water && val == VoxelTypeId::AIR {
                        val = VoxelTypeId::WATER;
                    }

                    if val != VoxelTypeId::AIR {
                        chunk.set(x, y, z, palette.encode(val).unwrap_or(0));
                    }
                }
            }
        }
    }

    fn floor_type(
        &self,
        underwater: bool,
        wx: i32,
        wy: i32,
        wz: i32,
        local_water: i32,
    ) -> VoxelTypeId {
        if underwater {
            if self.fields.is_reef(wx, wy, wz) {
                VoxelTypeId::CORAL
            } else {
                VoxelTypeId::SAND
            }
        } else if wy <= local_water {
            VoxelTypeId::SAND
        } else {
            VoxelTypeId::GRASS
        }
    }

    fn write_meta(&self, coord: ChunkCoord, kind: ChunkKind, chunk: &mut Chunk) {
        let edge = CHUNK_EDGE as i32;
        let center_x = coord.x * edge + edge / 2;
        let center_z = coord.z * edge + edge / 2;
        let (temperature, humidity) = self.fields.climate(center_x, center_z);
        let meta = chunk.meta_mut();
        meta.water_level = self.fields.local_water_level(center_x, center_z) as i16;
        meta.temperature = temperature;
        meta.humidity = humidity;
        meta.medium = if kind == ChunkKind::Underwater {
            VoxelTypeId::WATER.0
        } else {
            VoxelTypeId::AIR.0
        };
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
