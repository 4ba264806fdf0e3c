//! Noise fields backing the generator: independent Perlin samplers for
//! surface relief, caves, clouds, sea-level modulation, reefs, and
//! climate, each decorrelated by a derived seed.

use noise::{NoiseFn, Perlin};

use crate::params::TerrainParams;

/// Seed offsets keep the fields uncorrelated while staying a pure
/// function of the world seed.
const CAVE_SEED_OFFSET: u64 = 0xCAFE_BABE;
const CLOUD_SEED_OFFSET: u64 = 0xC1_0D5;
const WATER_SEED_OFFSET: u64 = 0x57A7_1C;
const REEF_SEED_OFFSET: u64 = 0xC0_4A1;
const CLIMATE_SEED_OFFSET: u64 = 0xB10_3E;

/// The generator's sampled fields.
pub struct NoiseFields {
    surface: Perlin,
    cave: Perlin,
    cloud: Perlin,
    water: Perlin,
    reef: Perlin,
    climate: Perlin,
    params: TerrainParams,
}

impl NoiseFields {
    pub fn new(params: TerrainParams) -> Self {
        Self {
            surface: Perlin::new(params.seed as u32),
            cave: Perlin::new(params.seed.wrapping_add(CAVE_SEED_OFFSET) as u32),
            cloud: Perlin::new(params.seed.wrapping_add(CLOUD_SEED_OFFSET) as u32),
            water: Perlin::new(params.seed.wrapping_add(WATER_SEED_OFFSET) as u32),
            reef: Perlin::new(params.seed.wrapping_add(REEF_SEED_OFFSET) as u32),
            climate: Perlin::new(params.seed.wrapping_add(CLIMATE_SEED_OFFSET) as u32),
            params,
        }
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Surface height of the column at `(wx, wz)` in world-Y cells.
    ///
    /// The 2D field is a Y=0 slice through the 3D sampler; relief is the
    /// absolute noise value scaled by `surface_amplitude` above
    /// `ground_level`.
    pub fn surface_height(&self, wx: i32, wz: i32) -> i32 {
        let s = self.params.surface_scale;
        let n = self
            .surface
            .get([wx as f64 * s, 0.0, wz as f64 * s]);
        self.params.ground_level + (n.abs() * self.params.surface_amplitude).floor() as i32
    }

    /// `true` if the cave field leaves rock at this subsurface cell.
    pub fn is_cave_rock(&self, wx: i32, wy: i32, wz: i32) -> bool {
        let s = self.params.cave_scale;
        let n = self
            .cave
            .get([wx as f64 * s, wy as f64 * s, wz as f64 * s]);
        n > self.params.cave_threshold
    }

    /// `true` if the cloud field condenses at this sky cell.
    pub fn is_cloud(&self, wx: i32, wy: i32, wz: i32) -> bool {
        let s = self.params.cloud_scale;
        let n = self
            .cloud
            .get([wx as f64 * s, wy as f64 * s, wz as f64 * s]);
        n > self.params.cloud_threshold
    }

    /// Locally modulated sea surface height for the column at `(wx, wz)`.
    pub fn local_water_level(&self, wx: i32, wz: i32) -> i32 {
        let s = self.params.water_mod_scale;
        let n = self.water.get([wx as f64 * s, 0.0, wz as f64 * s]);
        self.params.sea_level + (n * self.params.water_mod_amp).floor() as i32
    }

    /// `true` if the reef field grows coral on this floor cell.
    pub fn is_reef(&self, wx: i32, wy: i32, wz: i32) -> bool {
        let s = self.params.cave_scale;
        let n = self
            .reef
            .get([wx as f64 * s, wy as f64 * s, wz as f64 * s]);
        n > self.params.coral_threshold
    }

    /// Climate sample for a column: `(temperature, humidity)`.
    pub fn climate(&self, wx: i32, wz: i32) -> (i8, i8) {
        let n = self
            .climate
            .get([wx as f64 * 0.01, 0.0, wz as f64 * 0.01]);
        let temperature = (n * 30.0) as i8;
        let humidity = ((n * 0.5 + 0.5) * 100.0).clamp(0.0, 100.0) as i8;
        (temperature, humidity)
    }
}
