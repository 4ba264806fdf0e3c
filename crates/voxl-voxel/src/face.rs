//! The six cardinal face directions and their border-plane addressing.

use crate::chunk::CHUNK_EDGE;

/// One of the six cardinal directions a voxel face can point.
///
/// The `repr(u8)` discriminant doubles as the face index inside
/// [`super::BorderMask`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    /// +X direction.
    PosX = 0,
    /// −X direction.
    NegX = 1,
    /// +Y direction.
    PosY = 2,
    /// −Y direction.
    NegY = 3,
    /// +Z direction.
    PosZ = 4,
    /// −Z direction.
    NegZ = 5,
}

impl Face {
    /// All six directions in order.
    pub const ALL: [Face; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// Returns the sweep axes for greedy meshing: `(layer_axis, u_axis, v_axis)`.
    ///
    /// `layer_axis` is the axis perpendicular to the face (the normal
    /// direction). `u_axis` and `v_axis` span the face plane. Each value
    /// is 0=X, 1=Y, 2=Z.
    pub fn sweep_axes(self) -> (usize, usize, usize) {
        match self {
            Self::PosX | Self::NegX => (0, 2, 1), // layer=X, u=Z, v=Y
            Self::PosY | Self::NegY => (1, 0, 2), // layer=Y, u=X, v=Z
            Self::PosZ | Self::NegZ => (2, 0, 1), // layer=Z, u=X, v=Y
        }
    }

    /// Returns the unit normal as `[f32; 3]` for this face direction.
    pub fn normal(self) -> [f32; 3] {
        match self {
            Self::PosX => [1.0, 0.0, 0.0],
            Self::NegX => [-1.0, 0.0, 0.0],
            Self::PosY => [0.0, 1.0, 0.0],
            Self::NegY => [0.0, -1.0, 0.0],
            Self::PosZ => [0.0, 0.0, 1.0],
            Self::NegZ => [0.0, 0.0, -1.0],
        }
    }

    /// Returns the neighbor coordinate offset for this direction.
    pub fn offset(self, x: i32, y: i32, z: i32) -> (i32, i32, i32) {
        match self {
            Self::PosX => (x + 1, y, z),
            Self::NegX => (x - 1, y, z),
            Self::PosY => (x, y + 1, z),
            Self::NegY => (x, y - 1, z),
            Self::PosZ => (x, y, z + 1),
            Self::NegZ => (x, y, z - 1),
        }
    }

    /// Returns the opposite face direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::PosX => Self::NegX,
            Self::NegX => Self::PosX,
            Self::PosY => Self::NegY,
            Self::NegY => Self::PosY,
            Self::PosZ => Self::NegZ,
            Self::NegZ => Self::PosZ,
        }
    }

    /// Returns the face index (0–5).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Maps a cell on this face's border plane to its planar slot.
    ///
    /// The two in-plane coordinates of the cell select the slot; the
    /// coordinate along the normal axis is ignored, so callers can pass
    /// the cell's full position:
    /// - ±X faces: `y * L + z`
    /// - ±Y faces: `x * L + z`
    /// - ±Z faces: `x * L + y`
    pub fn plane_index(self, x: usize, y: usize, z: usize) -> usize {
        match self {
            Self::PosX | Self::NegX => y * CHUNK_EDGE + z,
            Self::PosY | Self::NegY => x * CHUNK_EDGE + z,
            Self::PosZ | Self::NegZ => x * CHUNK_EDGE + y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_round_trip() {
        for face in Face::ALL {
            let (x, y, z) = face.offset(5, 10, 15);
            assert_eq!(face.opposite().offset(x, y, z), (5, 10, 15));
        }
    }

    #[test]
    fn test_offset_negative_result() {
        assert_eq!(Face::NegX.offset(0, 0, 0), (-1, 0, 0));
    }

    #[test]
    fn test_plane_index_ignores_normal_axis() {
        assert_eq!(
            Face::PosX.plane_index(0, 3, 7),
            Face::NegX.plane_index(29, 3, 7)
        );
        assert_eq!(Face::PosY.plane_index(2, 29, 4), 2 * CHUNK_EDGE + 4);
        assert_eq!(Face::NegZ.plane_index(1, 2, 0), CHUNK_EDGE + 2);
    }

    #[test]
    fn test_plane_index_covers_full_plane() {
        let mut seen = vec![false; CHUNK_EDGE * CHUNK_EDGE];
        for y in 0..CHUNK_EDGE {
            for z in 0..CHUNK_EDGE {
                seen[Face::PosX.plane_index(0, y, z)] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}
