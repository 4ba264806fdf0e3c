//! Per-cell face visibility, resolved once and shared by both meshers.
//!
//! Interior faces apply the category truth table to the adjacent cell;
//! faces on the chunk boundary read the chunk's border mask, which was
//! built against the real neighbors at generation time.

use voxl_voxel::{CHUNK_EDGE, CHUNK_VOLUME, Chunk, Face, VoxelCatalog, face_visible};

/// Bitmask of a cell's six face visibilities.
///
/// Bit layout follows `Face::index()`: bit 0 = +X .. bit 5 = −Z.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceSet(pub u8);

impl FaceSet {
    /// No faces visible.
    pub const NONE: Self = Self(0);
    /// All six faces visible.
    pub const ALL: Self = Self(0b0011_1111);

    /// Returns `true` if the face in the given direction is visible.
    pub fn is_visible(self, face: Face) -> bool {
        self.0 & (1 << face.index()) != 0
    }

    /// Marks the face in the given direction as visible.
    pub fn set_visible(&mut self, face: Face) {
        self.0 |= 1 << face.index();
    }

    /// Returns the number of visible faces (0–6).
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

/// Resolves visibility for every cell in the chunk.
///
/// The result is indexed by the chunk's linear cell index.
pub fn compute_visible_faces(chunk: &Chunk, catalog: &VoxelCatalog) -> Vec<FaceSet> {
    let mut sets = vec![FaceSet::NONE; CHUNK_VOLUME];
    let palette = chunk.palette();
    let edge = CHUNK_EDGE as i32;

    for z in 0..edge {
        for y in 0..edge {
            for x in 0..edge {
                let own = catalog.category_of(chunk.voxel(&palette, x, y, z));
                let mut faces = FaceSet::NONE;
                for face in Face::ALL {
                    let (nx, ny, nz) = face.offset(x, y, z);
                    let on_boundary =
                        !(0..edge).contains(&nx) || !(0..edge).contains(&ny) || !(0..edge).contains(&nz);
                    let visible = if on_boundary {
                        chunk
                            .border()
                            .get_cell(face, x as usize, y as usize, z as usize)
                    } else {
                        let neighbor = catalog.category_of(chunk.voxel(&palette, nx, ny, nz));
                        face_visible(own, neighbor)
                    };
                    if visible {
                        faces.set_visible(face);
                    }
                }
                sets[Chunk::linear_index(x as usize, y as usize, z as usize)] = faces;
            }
        }
    }
    sets
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use voxl_voxel::{ChunkKind, Palette, VoxelTypeId};

    fn rock_byte() -> u8 {
        Palette::for_kind(ChunkKind::Prairie)
            .encode(VoxelTypeId::ROCK)
            .unwrap()
    }

    fn water_byte() -> u8 {
        Palette::for_kind(ChunkKind::Prairie)
            .encode(VoxelTypeId::WATER)
            .unwrap()
    }

    #[test]
    fn test_lone_interior_voxel_shows_six_faces() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        chunk.set(15, 15, 15, rock_byte());
        let catalog = VoxelCatalog::standard();
        let sets = compute_visible_faces(&chunk, &catalog);
        assert_eq!(sets[Chunk::linear_index(15, 15, 15)], FaceSet::ALL);
        // Air cells show nothing.
        assert_eq!(sets[Chunk::linear_index(0, 0, 0)], FaceSet::NONE);
    }

    #[test]
    fn test_adjacent_voxels_hide_shared_faces() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        chunk.set(10, 10, 10, rock_byte());
        chunk.set(11, 10, 10, rock_byte());
        let catalog = VoxelCatalog::standard();
        let sets = compute_visible_faces(&chunk, &catalog);

        let left = sets[Chunk::linear_index(10, 10, 10)];
        let right = sets[Chunk::linear_index(11, 10, 10)];
        assert!(!left.is_visible(Face::PosX));
        assert!(!right.is_visible(Face::NegX));
        assert_eq!(left.count(), 5);
        assert_eq!(right.count(), 5);
    }

    #[test]
    fn test_same_medium_hides_internal_faces() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        chunk.set(5, 5, 5, water_byte());
        chunk.set(5, 6, 5, water_byte());
        let catalog = VoxelCatalog::standard();
        let sets = compute_visible_faces(&chunk, &catalog);
        assert!(!sets[Chunk::linear_index(5, 5, 5)].is_visible(Face::PosY));
        assert!(!sets[Chunk::linear_index(5, 6, 5)].is_visible(Face::NegY));
        // Faces against surrounding air stay visible.
        assert!(sets[Chunk::linear_index(5, 5, 5)].is_visible(Face::PosX));
    }

    #[test]
    fn test_opaque_behind_water_shows_through() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        chunk.set(8, 8, 8, rock_byte());
        chunk.set(8, 9, 8, water_byte());
        let catalog = VoxelCatalog::standard();
        let sets = compute_visible_faces(&chunk, &catalog);
        // Rock's top face renders beneath the water...
        assert!(sets[Chunk::linear_index(8, 8, 8)].is_visible(Face::PosY));
        // ...but the water's bottom face against opaque rock does not.
        assert!(!sets[Chunk::linear_index(8, 9, 8)].is_visible(Face::NegY));
    }

    #[test]
    fn test_boundary_faces_follow_border_mask() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        chunk.set(0, 4, 9, rock_byte());
        chunk.set(0, 4, 10, rock_byte());
        // Neighbor hides (0,4,9) but exposes (0,4,10).
        chunk.border_mut().set_cell(Face::NegX, 0, 4, 10, true);

        let catalog = VoxelCatalog::standard();
        let sets = compute_visible_faces(&chunk, &catalog);
        assert!(!sets[Chunk::linear_index(0, 4, 9)].is_visible(Face::NegX));
        assert!(sets[Chunk::linear_index(0, 4, 10)].is_visible(Face::NegX));
    }
}
