//! Border visibility masks: one bit (or one category) per cell on each of
//! a chunk's six faces, describing what the neighboring chunk hides.
//!
//! Meshers consult the mask instead of sampling neighbor chunks, so a
//! chunk can be meshed in isolation once its mask is built.

use crate::catalog::Category;
use crate::chunk::CHUNK_AREA;
use crate::face::Face;
use crate::packed::PackedCells;

/// Border cells across all six faces.
pub const BORDER_CELLS: usize = 6 * CHUNK_AREA;
/// Bytes in the 1-bit wire form (5,400 bits).
pub const BORDER_MASK_BYTES: usize = BORDER_CELLS / 8;

/// Flat bit index for a border cell: face-major, then planar slot.
fn bit_index(face: Face, plane: usize) -> usize {
    debug_assert!(plane < CHUNK_AREA, "plane slot out of range");
    face.index() * CHUNK_AREA + plane
}

/// 1-bit-per-border-cell visibility mask. This is the wire form.
///
/// Bits are packed LSB-first: bit `i` lives in byte `i >> 3` at position
/// `i & 7`. A set bit means the border cell's face toward the neighbor
/// chunk is visible.
#[derive(Clone, PartialEq, Eq)]
pub struct BorderMask {
    bytes: [u8; BORDER_MASK_BYTES],
}

impl BorderMask {
    /// All faces hidden.
    pub fn new() -> Self {
        Self {
            bytes: [0u8; BORDER_MASK_BYTES],
        }
    }

    /// Returns the bit for a border cell on `face` at planar slot `plane`.
    pub fn get(&self, face: Face, plane: usize) -> bool {
        let bit = bit_index(face, plane);
        self.bytes[bit >> 3] & (1 << (bit & 7)) != 0
    }

    /// Sets the bit for a border cell.
    pub fn set(&mut self, face: Face, plane: usize, visible: bool) {
        let bit = bit_index(face, plane);
        if visible {
            self.bytes[bit >> 3] |= 1 << (bit & 7);
        } else {
            self.bytes[bit >> 3] &= !(1 << (bit & 7));
        }
    }

    /// Bit lookup by cell position (the normal-axis coordinate is ignored).
    pub fn get_cell(&self, face: Face, x: usize, y: usize, z: usize) -> bool {
        self.get(face, face.plane_index(x, y, z))
    }

    /// Bit store by cell position.
    pub fn set_cell(&mut self, face: Face, x: usize, y: usize, z: usize, visible: bool) {
        self.set(face, face.plane_index(x, y, z), visible);
    }

    /// Number of visible border cells across all faces.
    pub fn count_visible(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Wire bytes, face-major.
    pub fn as_bytes(&self) -> &[u8; BORDER_MASK_BYTES] {
        &self.bytes
    }

    /// Rebuilds a mask from its wire bytes.
    pub fn from_bytes(bytes: [u8; BORDER_MASK_BYTES]) -> Self {
        Self { bytes }
    }
}

impl Default for BorderMask {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BorderMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BorderMask")
            .field("visible", &self.count_visible())
            .finish()
    }
}

/// 3-bit-per-border-cell variant storing the neighbor's [`Category`]
/// instead of a visibility flag. In-memory only; shading passes that
/// tint faces by the medium behind them read this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryMask {
    cells: PackedCells,
}

impl CategoryMask {
    /// All neighbors Air.
    pub fn new() -> Self {
        Self {
            cells: PackedCells::new(3, BORDER_CELLS),
        }
    }

    /// Returns the neighbor category recorded for a border cell.
    pub fn get(&self, face: Face, plane: usize) -> Category {
        let raw = self.cells.get(bit_index(face, plane));
        // 3 bits admit 0..=7; only 0..=5 are categories, the rest decay
        // to Air like any other invalid cell.
        Category::from_u8(raw).unwrap_or(Category::Air)
    }

    /// Records the neighbor category for a border cell.
    pub fn set(&mut self, face: Face, plane: usize, category: Category) {
        self.cells.set(bit_index(face, plane), category as u8);
    }

    /// Derives the 1-bit wire mask for a chunk whose border cells have
    /// the given categories.
    pub fn to_visibility(&self, cell_category_at: impl Fn(Face, usize) -> Category) -> BorderMask {
        let mut mask = BorderMask::new();
        for face in Face::ALL {
            for plane in 0..CHUNK_AREA {
                let visible =
                    crate::catalog::face_visible(cell_category_at(face, plane), self.get(face, plane));
                mask.set(face, plane, visible);
            }
        }
        mask
    }
}

impl Default for CategoryMask {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mask_is_hidden() {
        let mask = BorderMask::new();
        assert_eq!(mask.count_visible(), 0);
        assert!(!mask.get(Face::PosX, 0));
        assert!(!mask.get(Face::NegZ, CHUNK_AREA - 1));
    }

    #[test]
    fn test_set_and_get_bit() {
        let mut mask = BorderMask::new();
        mask.set(Face::PosY, 17, true);
        assert!(mask.get(Face::PosY, 17));
        assert!(!mask.get(Face::PosY, 16));
        assert!(!mask.get(Face::NegY, 17));
        assert_eq!(mask.count_visible(), 1);
        mask.set(Face::PosY, 17, false);
        assert_eq!(mask.count_visible(), 0);
    }

    #[test]
    fn test_faces_do_not_alias() {
        let mut mask = BorderMask::new();
        for face in Face::ALL {
            mask.set(face, 42, true);
        }
        assert_eq!(mask.count_visible(), 6);
    }

    #[test]
    fn test_bit_layout_is_lsb_first() {
        let mut mask = BorderMask::new();
        mask.set(Face::PosX, 0, true);
        mask.set(Face::PosX, 3, true);
        assert_eq!(mask.as_bytes()[0], 0b0000_1001);
    }

    #[test]
    fn test_cell_addressing_matches_plane_index() {
        let mut mask = BorderMask::new();
        mask.set_cell(Face::NegX, 0, 4, 9, true);
        assert!(mask.get(Face::NegX, Face::NegX.plane_index(0, 4, 9)));
        assert!(mask.get_cell(Face::NegX, 29, 4, 9), "normal axis ignored");
    }

    #[test]
    fn test_wire_round_trip() {
        let mut mask = BorderMask::new();
        mask.set(Face::PosZ, 100, true);
        mask.set(Face::NegY, 899, true);
        let restored = BorderMask::from_bytes(*mask.as_bytes());
        assert_eq!(restored, mask);
    }

    #[test]
    fn test_category_mask_round_trip() {
        let mut mask = CategoryMask::new();
        mask.set(Face::PosX, 5, Category::Water);
        mask.set(Face::NegZ, 800, Category::Opaque);
        assert_eq!(mask.get(Face::PosX, 5), Category::Water);
        assert_eq!(mask.get(Face::NegZ, 800), Category::Opaque);
        assert_eq!(mask.get(Face::PosX, 6), Category::Air);
    }

    #[test]
    fn test_category_mask_derives_visibility() {
        let mut categories = CategoryMask::new();
        categories.set(Face::PosX, 0, Category::Opaque);
        categories.set(Face::PosX, 1, Category::Water);
        // Every cell on the chunk side is opaque rock.
        let mask = categories.to_visibility(|_, _| Category::Opaque);
        assert!(!mask.get(Face::PosX, 0), "opaque neighbor hides the face");
        assert!(mask.get(Face::PosX, 1), "water neighbor shows it");
        assert!(mask.get(Face::PosX, 2), "air neighbor shows it");
    }
}
