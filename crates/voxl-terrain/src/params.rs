//! Tunable terrain generation parameters.

use serde::{Deserialize, Serialize};

/// Configuration for the procedural world generator.
///
/// Altitude levels are world-Y cell heights; noise scales are cycles per
/// cell. Everything is deterministic given `seed`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainParams {
    /// World seed for deterministic generation.
    pub seed: u64,
    /// Chunks whose base Y is at or above this become sky chunks.
    /// Default: 50.
    pub sky_level: i32,
    /// Base of the surface band. Columns reach up from here by the
    /// surface noise; caves are carved below it. Default: 10.
    pub ground_level: i32,
    /// Nominal sea surface height. Chunks whose base Y is below this are
    /// underwater chunks. Default: 6.
    pub sea_level: i32,
    /// Spatial scale of the surface height field. Default: 0.05.
    pub surface_scale: f64,
    /// Maximum cells of relief the surface noise adds above
    /// `ground_level`. Default: 20.0.
    pub surface_amplitude: f64,
    /// Spatial scale of the 3D cave field. Default: 0.10.
    pub cave_scale: f64,
    /// Cave field values above this stay rock; the rest is hollowed out.
    /// Default: 0.30.
    pub cave_threshold: f64,
    /// Spatial scale of the 3D cloud field. Default: 0.02.
    pub cloud_scale: f64,
    /// Cloud field values above this condense into cloud cells.
    /// Default: 0.40.
    pub cloud_threshold: f64,
    /// Reef field values above this turn an underwater floor cell into
    /// coral. Default: 0.60.
    pub coral_threshold: f64,
    /// Spatial scale of the sea-level modulation field. Default: 0.02.
    pub water_mod_scale: f64,
    /// Cells of local sea-level swing around `sea_level`. Default: 2.0.
    pub water_mod_amp: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 1337,
            sky_level: 50,
            ground_level: 10,
            sea_level: 6,
            surface_scale: 0.05,
            surface_amplitude: 20.0,
            cave_scale: 0.10,
            cave_threshold: 0.30,
            cloud_scale: 0.02,
            cloud_threshold: 0.40,
            coral_threshold: 0.60,
            water_mod_scale: 0.02,
            water_mod_amp: 2.0,
        }
    }
}
