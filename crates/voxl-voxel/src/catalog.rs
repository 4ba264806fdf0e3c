//! Voxel type catalog: maps compact [`VoxelTypeId`] values to [`VoxelTypeDef`]
//! metadata, and owns the face-visibility rule every consumer shares.
//!
//! The catalog is built once at startup. Air is always ID 0 so that
//! zero-initialized chunk memory represents empty space.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Compact identifier stored (via a palette) inside every voxel cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelTypeId(pub u8);

impl VoxelTypeId {
    pub const AIR: Self = Self(0);
    pub const DIRT: Self = Self(1);
    pub const GRASS: Self = Self(2);
    pub const ROCK: Self = Self(3);
    pub const WOOD: Self = Self(4);
    pub const WATER: Self = Self(5);
    pub const ACID: Self = Self(6);
    pub const LAVA: Self = Self(7);
    pub const CLOUD: Self = Self(8);
    pub const SAND: Self = Self(9);
    pub const CORAL: Self = Self(10);
}

/// Opacity category of a voxel type.
///
/// Every visibility decision is a function of two categories; individual
/// types never appear in the rule. Air is empty space, Opaque blocks sight,
/// and the remaining four are distinct see-through media.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    Air = 0,
    Opaque = 1,
    Water = 2,
    Acid = 3,
    Lava = 4,
    Cloud = 5,
}

impl Category {
    /// Decodes a category from its wire byte, if valid.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Air),
            1 => Some(Self::Opaque),
            2 => Some(Self::Water),
            3 => Some(Self::Acid),
            4 => Some(Self::Lava),
            5 => Some(Self::Cloud),
            _ => None,
        }
    }

    /// Returns `true` for the see-through media (everything except Air
    /// and Opaque).
    pub fn is_transparent_medium(self) -> bool {
        !matches!(self, Self::Air | Self::Opaque)
    }
}

/// Full descriptor for a voxel type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoxelTypeDef {
    /// Human-readable name (e.g. "grass", "water").
    pub name: String,
    /// Opacity category used for visibility decisions.
    pub category: Category,
}

/// Errors that can occur during voxel type registration.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A type with the same name has already been registered.
    #[error("duplicate voxel type name: {0}")]
    DuplicateName(String),
    /// All 256 ID slots have been consumed.
    #[error("voxel catalog is full (max 256 types)")]
    CatalogFull,
}

// ---------------------------------------------------------------------------
// Visibility rule
// ---------------------------------------------------------------------------

/// Decides whether the face of a cell toward `neighbor` is visible.
///
/// Pure over the two categories:
/// - an Air cell has no faces;
/// - anything against Air is visible;
/// - anything against Opaque is hidden;
/// - two transparent media show the face only where they differ, so a
///   water/water boundary stays closed while water/acid renders.
pub fn face_visible(cell: Category, neighbor: Category) -> bool {
    if cell == Category::Air {
        return false;
    }
    match neighbor {
        Category::Air => true,
        Category::Opaque => false,
        _ => cell != neighbor,
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Maps [`VoxelTypeId`] → [`VoxelTypeDef`] with O(1) lookup by index and
/// O(1) reverse lookup by name.
pub struct VoxelCatalog {
    /// Dense array where `index == VoxelTypeId.0`.
    types: Vec<VoxelTypeDef>,
    /// Reverse lookup: name → ID.
    name_to_id: FxHashMap<String, VoxelTypeId>,
}

impl VoxelCatalog {
    /// Creates a new catalog with Air pre-registered as ID 0.
    pub fn new() -> Self {
        let air = VoxelTypeDef {
            name: "air".to_string(),
            category: Category::Air,
        };

        let mut name_to_id = FxHashMap::default();
        name_to_id.insert("air".to_string(), VoxelTypeId::AIR);

        Self {
            types: vec![air],
            name_to_id,
        }
    }

    /// Builds the standard catalog: the fixed set of types the world
    /// formats and generators agree on, at their canonical IDs.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        let defs = [
            ("dirt", Category::Opaque),
            ("grass", Category::Opaque),
            ("rock", Category::Opaque),
            ("wood", Category::Opaque),
            ("water", Category::Water),
            ("acid", Category::Acid),
            ("lava", Category::Lava),
            ("cloud", Category::Cloud),
            ("sand", Category::Opaque),
            ("coral", Category::Opaque),
        ];
        for (name, category) in defs {
            // The fixed set fits well inside 256 slots and has no
            // duplicate names, so registration cannot fail here.
            let _ = catalog.register(VoxelTypeDef {
                name: name.to_string(),
                category,
            });
        }
        catalog
    }

    /// Registers a new voxel type and returns its assigned ID.
    ///
    /// IDs are assigned sequentially starting from 1 (0 is Air).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateName`] if a type with the same name
    /// already exists, or [`CatalogError::CatalogFull`] if all 256 slots
    /// are consumed.
    pub fn register(&mut self, def: VoxelTypeDef) -> Result<VoxelTypeId, CatalogError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(CatalogError::DuplicateName(def.name));
        }
        if self.types.len() > u8::MAX as usize {
            return Err(CatalogError::CatalogFull);
        }

        let id = VoxelTypeId(self.types.len() as u8);
        self.name_to_id.insert(def.name.clone(), id);
        self.types.push(def);
        Ok(id)
    }

    /// Returns the definition for a given ID, or `None` for unknown IDs.
    pub fn get(&self, id: VoxelTypeId) -> Option<&VoxelTypeDef> {
        self.types.get(id.0 as usize)
    }

    /// Returns the ID for a named voxel type, or `None` if not found.
    pub fn lookup_by_name(&self, name: &str) -> Option<VoxelTypeId> {
        self.name_to_id.get(name).copied()
    }

    /// Returns the opacity category for an ID.
    ///
    /// Unknown IDs decay to Air so that a stale or corrupt cell never
    /// produces phantom geometry.
    pub fn category_of(&self, id: VoxelTypeId) -> Category {
        match self.types.get(id.0 as usize) {
            Some(def) => def.category,
            None => Category::Air,
        }
    }

    /// Returns `true` if the given voxel type is air (ID 0).
    pub fn is_air(&self, id: VoxelTypeId) -> bool {
        id.0 == 0
    }

    /// Returns `true` if the given voxel type fully blocks sight.
    pub fn is_opaque(&self, id: VoxelTypeId) -> bool {
        self.category_of(id) == Category::Opaque
    }

    /// Returns the total number of registered types (including Air).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if only Air is registered.
    pub fn is_empty(&self) -> bool {
        self.types.len() <= 1
    }

    /// Applies the visibility rule to two cell IDs.
    pub fn face_visible(&self, cell: VoxelTypeId, neighbor: VoxelTypeId) -> bool {
        face_visible(self.category_of(cell), self.category_of(neighbor))
    }
}

impl Default for VoxelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_is_id_zero() {
        let catalog = VoxelCatalog::standard();
        let air = catalog.get(VoxelTypeId::AIR).unwrap();
        assert_eq!(air.name, "air");
        assert_eq!(air.category, Category::Air);
    }

    #[test]
    fn test_standard_catalog_ids() {
        let catalog = VoxelCatalog::standard();
        assert_eq!(catalog.lookup_by_name("dirt"), Some(VoxelTypeId::DIRT));
        assert_eq!(catalog.lookup_by_name("water"), Some(VoxelTypeId::WATER));
        assert_eq!(catalog.lookup_by_name("coral"), Some(VoxelTypeId::CORAL));
        assert_eq!(catalog.len(), 11);
    }

    #[test]
    fn test_register_returns_sequential_ids() {
        let mut catalog = VoxelCatalog::new();
        let id1 = catalog
            .register(VoxelTypeDef {
                name: "basalt".to_string(),
                category: Category::Opaque,
            })
            .unwrap();
        let id2 = catalog
            .register(VoxelTypeDef {
                name: "mist".to_string(),
                category: Category::Cloud,
            })
            .unwrap();
        assert_eq!(id1, VoxelTypeId(1));
        assert_eq!(id2, VoxelTypeId(2));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut catalog = VoxelCatalog::standard();
        let result = catalog.register(VoxelTypeDef {
            name: "dirt".to_string(),
            category: Category::Opaque,
        });
        assert!(matches!(result, Err(CatalogError::DuplicateName(_))));
    }

    #[test]
    fn test_unknown_id_decays_to_air() {
        let catalog = VoxelCatalog::standard();
        assert_eq!(catalog.category_of(VoxelTypeId(200)), Category::Air);
    }

    #[test]
    fn test_face_visible_truth_table() {
        use Category::*;
        // Air cell never shows a face.
        assert!(!face_visible(Air, Air));
        assert!(!face_visible(Air, Opaque));
        assert!(!face_visible(Air, Water));
        // Anything against Air is visible.
        assert!(face_visible(Opaque, Air));
        assert!(face_visible(Water, Air));
        assert!(face_visible(Cloud, Air));
        // Anything against Opaque is hidden.
        assert!(!face_visible(Opaque, Opaque));
        assert!(!face_visible(Water, Opaque));
        // Transparent media: visible only across a category change.
        assert!(!face_visible(Water, Water));
        assert!(face_visible(Water, Acid));
        assert!(face_visible(Lava, Water));
        assert!(!face_visible(Cloud, Cloud));
        // Opaque against a transparent medium is visible.
        assert!(face_visible(Opaque, Water));
        assert!(face_visible(Opaque, Cloud));
    }

    #[test]
    fn test_catalog_face_visible_uses_categories() {
        let catalog = VoxelCatalog::standard();
        assert!(catalog.face_visible(VoxelTypeId::ROCK, VoxelTypeId::AIR));
        assert!(!catalog.face_visible(VoxelTypeId::ROCK, VoxelTypeId::DIRT));
        assert!(!catalog.face_visible(VoxelTypeId::WATER, VoxelTypeId::WATER));
        assert!(catalog.face_visible(VoxelTypeId::WATER, VoxelTypeId::LAVA));
    }
}
