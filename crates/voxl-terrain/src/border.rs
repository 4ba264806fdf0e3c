//! Border-mask construction: records, for every cell on a chunk's six
//! faces, whether the face toward the neighboring chunk must be drawn.
//!
//! Neighbors inside the region come from the generator (memoized, so the
//! cost is one generation per chunk). Neighbors outside the region are
//! treated as air, which keeps region files self-contained at the price
//! of always-visible outer faces.

use voxl_region::{REGION_EDGE, Region, RegionCoord};
use voxl_voxel::{BorderMask, CHUNK_EDGE, Category, CategoryMask, Chunk, Face};

use crate::generator::TerrainGenerator;

/// In-plane cell position for a face: `(a, b)` are the two free axes in
/// the order `Face::plane_index` consumes them.
fn face_cell(face: Face, a: usize, b: usize, layer: usize) -> (usize, usize, usize) {
    match face {
        Face::PosX | Face::NegX => (layer, a, b),
        Face::PosY | Face::NegY => (a, layer, b),
        Face::PosZ | Face::NegZ => (a, b, layer),
    }
}

/// Boundary layer a face reads on its own side.
fn self_layer(face: Face) -> usize {
    match face {
        Face::PosX | Face::PosY | Face::PosZ => CHUNK_EDGE - 1,
        Face::NegX | Face::NegY | Face::NegZ => 0,
    }
}

/// Records the neighbor's category for every border cell of the chunk at
/// `(sx, sy, sz)` in the region at `rc`. Out-of-region neighbors read as
/// air.
pub fn build_category_mask(
    generator: &TerrainGenerator,
    rc: RegionCoord,
    sx: usize,
    sy: usize,
    sz: usize,
) -> CategoryMask {
    let catalog = generator.catalog();
    let mut mask = CategoryMask::new();
    let coord = rc.chunk_coord(sx, sy, sz);

    for face in Face::ALL {
        let neighbor_slot = neighbor_in_region(face, sx, sy, sz);
        let neighbor = neighbor_slot.map(|_| generator.generate(coord.neighbor(face)));
        let neighbor_palette = neighbor.as_ref().map(|c| c.palette());
        // The neighbor's facing layer mirrors ours.
        let neighbor_layer = self_layer(face.opposite());

        for a in 0..CHUNK_EDGE {
            for b in 0..CHUNK_EDGE {
                let category = match (&neighbor, &neighbor_palette) {
                    (Some(chunk), Some(palette)) => {
                        let (x, y, z) = face_cell(face, a, b, neighbor_layer);
                        let id = chunk.voxel(palette, x as i32, y as i32, z as i32);
                        catalog.category_of(id)
                    }
                    _ => Category::Air,
                };
                let (x, y, z) = face_cell(face, a, b, 0);
                mask.set(face, face.plane_index(x, y, z), category);
            }
        }
    }
    mask
}

/// Builds the 1-bit visibility mask for a chunk from its cells and the
/// neighbor categories.
pub fn build_border_mask(
    generator: &TerrainGenerator,
    rc: RegionCoord,
    sx: usize,
    sy: usize,
    sz: usize,
    chunk: &Chunk,
) -> BorderMask {
    let catalog = generator.catalog();
    let palette = chunk.palette();
    let categories = build_category_mask(generator, rc, sx, sy, sz);
    categories.to_visibility(|face, plane| {
        let (a, b) = (plane / CHUNK_EDGE, plane % CHUNK_EDGE);
        let (x, y, z) = face_cell(face, a, b, self_layer(face));
        catalog.category_of(chunk.voxel(&palette, x as i32, y as i32, z as i32))
    })
}

/// Generates every chunk of a region and attaches its border mask.
pub fn build_region(generator: &TerrainGenerator, rc: RegionCoord) -> Region {
    let mut region = Region::new();
    for sx in 0..REGION_EDGE {
        for sy in 0..REGION_EDGE {
            for sz in 0..REGION_EDGE {
                let generated = generator.generate(rc.chunk_coord(sx, sy, sz));
                let mut chunk = (*generated).clone();
                let mask = build_border_mask(generator, rc, sx, sy, sz, &chunk);
                *chunk.border_mut() = mask;
                region.insert_chunk(sx, sy, sz, chunk);
            }
        }
    }
    region
}

/// Slot of the face-adjacent neighbor, or `None` when it falls outside
/// the region.
fn neighbor_in_region(
    face: Face,
    sx: usize,
    sy: usize,
    sz: usize,
) -> Option<(usize, usize, usize)> {
    let (nx, ny, nz) = face.offset(sx as i32, sy as i32, sz as i32);
    let edge = REGION_EDGE as i32;
    if (0..edge).contains(&nx) && (0..edge).contains(&ny) && (0..edge).contains(&nz) {
        Some((nx as usize, ny as usize, nz as usize))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TerrainParams;
    use voxl_voxel::face_visible;

    fn generator() -> TerrainGenerator {
        TerrainGenerator::new(TerrainParams {
            seed: 7,
            ..Default::default()
        })
    }

    #[test]
    fn test_out_of_region_faces_read_air() {
        let generator = generator();
        let rc = RegionCoord::new(0, 0, 0);
        // Slot (3,0,0): +X neighbor is outside the region.
        let chunk = generator.generate(rc.chunk_coord(3, 0, 0));
        let mask = build_border_mask(&generator, rc, 3, 0, 0, &chunk);
        let palette = chunk.palette();
        let catalog = generator.catalog();
        let x = (CHUNK_EDGE - 1) as i32;
        for y in 0..CHUNK_EDGE {
            for z in 0..CHUNK_EDGE {
                let category = catalog.category_of(chunk.voxel(&palette, x, y as i32, z as i32));
                let expected = category != Category::Air;
                assert_eq!(
                    mask.get_cell(Face::PosX, CHUNK_EDGE - 1, y, z),
                    expected,
                    "cell ({y},{z}) against a missing neighbor"
                );
            }
        }
    }

    #[test]
    fn test_interior_faces_match_truth_table() {
        let generator = generator();
        let rc = RegionCoord::new(0, 0, 0);
        let chunk = generator.generate(rc.chunk_coord(0, 0, 0));
        let neighbor = generator.generate(rc.chunk_coord(0, 1, 0));
        let mask = build_border_mask(&generator, rc, 0, 0, 0, &chunk);

        let catalog = generator.catalog();
        let palette = chunk.palette();
        let neighbor_palette = neighbor.palette();
        let top = (CHUNK_EDGE - 1) as i32;
        for x in 0..CHUNK_EDGE {
            for z in 0..CHUNK_EDGE {
                let own = catalog.category_of(chunk.voxel(&palette, x as i32, top, z as i32));
                let theirs = catalog.category_of(neighbor.voxel(
                    &neighbor_palette,
                    x as i32,
                    0,
                    z as i32,
                ));
                assert_eq!(
                    mask.get_cell(Face::PosY, x, CHUNK_EDGE - 1, z),
                    face_visible(own, theirs),
                    "+Y face at ({x},{z})"
                );
            }
        }
    }

    #[test]
    fn test_build_region_fills_all_slots() {
        let generator = generator();
        let region = build_region(&generator, RegionCoord::new(0, 0, 0));
        assert_eq!(region.present_count(), voxl_region::REGION_SLOTS);
        // Every chunk in the region was generated once; neighbor lookups
        // reused the cache (plus the out-of-region ring is absent).
        assert_eq!(generator.cached_count(), voxl_region::REGION_SLOTS);
    }

    #[test]
    fn test_category_mask_matches_visibility_mask() {
        let generator = generator();
        let rc = RegionCoord::new(0, 0, 0);
        let chunk = generator.generate(rc.chunk_coord(1, 1, 1));
        let categories = build_category_mask(&generator, rc, 1, 1, 1);
        let mask = build_border_mask(&generator, rc, 1, 1, 1, &chunk);

        let catalog = generator.catalog();
        let palette = chunk.palette();
        for face in Face::ALL {
            for plane in 0..voxl_voxel::CHUNK_AREA {
                let (a, b) = (plane / CHUNK_EDGE, plane % CHUNK_EDGE);
                let (x, y, z) = super::face_cell(face, a, b, super::self_layer(face));
                let own =
                    catalog.category_of(chunk.voxel(&palette, x as i32, y as i32, z as i32));
                assert_eq!(
                    mask.get(face, plane),
                    face_visible(own, categories.get(face, plane)),
                );
            }
        }
    }
}
