//! Naive face mesher: one unit quad per visible face.
//!
//! Baseline output for the greedy mesher; the two cover the same set of
//! cells, this one with the maximum quad count.

use voxl_voxel::{CHUNK_EDGE, Chunk, Face, VoxelTypeId};

use crate::batches::MeshBatches;
use crate::material::{is_translucent, material_set, tint};
use crate::visibility::FaceSet;

/// Emits a unit quad for every visible face in the chunk.
///
/// Two passes: the first counts faces per material tile so every buffer
/// is sized exactly before a single vertex is written, the second fills
/// them. Quads land in per-material batches, split by translucency so
/// the caller can draw opaque geometry before translucent geometry.
pub fn naive_mesh(chunk: &Chunk, visible_faces: &[FaceSet]) -> MeshBatches {
    let mut batches = MeshBatches::new();
    let palette = chunk.palette();

    // Count pass: quads per (tile, translucency).
    let mut counts: Vec<(u8, bool, usize)> = Vec::new();
    for_each_visible_face(chunk, &palette, visible_faces, |_, face, id| {
        let tile = material_set(id).tile_for(face);
        let translucent = is_translucent(id);
        match counts
            .iter_mut()
            .find(|(t, tr, _)| *t == tile && *tr == translucent)
        {
            Some((_, _, n)) => *n += 1,
            None => counts.push((tile, translucent, 1)),
        }
    });
    // Fill pass: each batch reserves its exact count on first touch.
    for_each_visible_face(chunk, &palette, visible_faces, |(x, y, z), face, id| {
        let tile = material_set(id).tile_for(face);
        let color = tint(id);
        let translucent = is_translucent(id);
        let batch = batches.batch_mut(tile, color, translucent);
        if batch.buffer.vertices.capacity() == 0 {
            if let Some(&(_, _, n)) = counts
                .iter()
                .find(|(t, tr, _)| *t == tile && *tr == translucent)
            {
                batch.buffer.reserve_quads(n);
            }
        }
        let (layer_axis, u_axis, v_axis) = face.sweep_axes();
        let coords = [x, y, z];
        batch.buffer.push_quad(
            face,
            coords[layer_axis],
            coords[u_axis],
            coords[v_axis],
            1,
            1,
            tile,
            color,
        );
    });

    batches
}

/// Runs `emit` for every visible face of every non-air cell.
fn for_each_visible_face(
    chunk: &Chunk,
    palette: &voxl_voxel::Palette,
    visible_faces: &[FaceSet],
    mut emit: impl FnMut((usize, usize, usize), Face, VoxelTypeId),
) {
    for z in 0..CHUNK_EDGE {
        for y in 0..CHUNK_EDGE {
            for x in 0..CHUNK_EDGE {
                let faces = visible_faces[Chunk::linear_index(x, y, z)];
                if faces == FaceSet::NONE {
                    continue;
                }
                let id = chunk.voxel(palette, x as i32, y as i32, z as i32);
                if id == VoxelTypeId::AIR {
                    continue;
                }
                for face in Face::ALL {
                    if faces.is_visible(face) {
                        emit((x, y, z), face, id);
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::tile;
    use crate::visibility::compute_visible_faces;
    use voxl_voxel::{ChunkKind, Palette, VoxelCatalog};

    fn encode(id: VoxelTypeId) -> u8 {
        Palette::for_kind(ChunkKind::Prairie).encode(id).unwrap()
    }

    #[test]
    fn test_empty_chunk_produces_no_geometry() {
        let chunk = Chunk::new(ChunkKind::Prairie);
        let catalog = VoxelCatalog::standard();
        let visible = compute_visible_faces(&chunk, &catalog);
        let batches = naive_mesh(&chunk, &visible);
        assert!(batches.is_empty());
    }

    #[test]
    fn test_lone_voxel_emits_six_unit_quads() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        chunk.set(12, 12, 12, encode(VoxelTypeId::ROCK));
        let catalog = VoxelCatalog::standard();
        let visible = compute_visible_faces(&chunk, &catalog);
        let batches = naive_mesh(&chunk, &visible);

        assert_eq!(batches.quad_count(), 6);
        assert_eq!(batches.covered_cells(), 6);
        assert_eq!(batches.vertex_count(), 24);
        assert_eq!(batches.index_count(), 36);
        assert!(batches.translucent.is_empty());
    }

    #[test]
    fn test_grass_splits_top_bottom_side_tiles() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        chunk.set(12, 12, 12, encode(VoxelTypeId::GRASS));
        let catalog = VoxelCatalog::standard();
        let visible = compute_visible_faces(&chunk, &catalog);
        let batches = naive_mesh(&chunk, &visible);

        let top = batches.find(tile::GRASS_TOP, false).map(|b| b.buffer.quad_count);
        let dirt = batches.find(tile::DIRT, false).map(|b| b.buffer.quad_count);
        let side = batches.find(tile::GRASS_SIDE, false).map(|b| b.buffer.quad_count);
        assert_eq!(top, Some(1));
        assert_eq!(dirt, Some(1));
        assert_eq!(side, Some(4));
    }

    #[test]
    fn test_water_lands_in_translucent_group() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        chunk.set(3, 3, 3, encode(VoxelTypeId::WATER));
        chunk.set(3, 2, 3, encode(VoxelTypeId::ROCK));
        let catalog = VoxelCatalog::standard();
        let visible = compute_visible_faces(&chunk, &catalog);
        let batches = naive_mesh(&chunk, &visible);

        let water = batches.find(tile::WATER, true);
        assert!(water.is_some());
        // Water shows five faces against air; the face against rock is hidden.
        assert_eq!(water.map(|b| b.buffer.quad_count), Some(5));
        // The rock keeps its top face visible beneath the water.
        let rock = batches.find(tile::ROCK, false);
        assert_eq!(rock.map(|b| b.buffer.quad_count), Some(6));
    }

    #[test]
    fn test_flat_slab_top_is_one_quad_per_cell() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        for z in 0..CHUNK_EDGE as i32 {
            for x in 0..CHUNK_EDGE as i32 {
                chunk.set(x, 0, z, encode(VoxelTypeId::GRASS));
            }
        }
        let catalog = VoxelCatalog::standard();
        let visible = compute_visible_faces(&chunk, &catalog);
        let batches = naive_mesh(&chunk, &visible);

        // Bottom and sides sit on an all-hidden border; only the top
        // surface meshes, one unit quad per cell.
        let top = batches.find(tile::GRASS_TOP, false).unwrap();
        assert_eq!(top.buffer.quad_count, CHUNK_EDGE * CHUNK_EDGE);
        assert_eq!(top.buffer.covered_cells, CHUNK_EDGE * CHUNK_EDGE);
        assert_eq!(top.buffer.vertices.len(), CHUNK_EDGE * CHUNK_EDGE * 4);
    }

    #[test]
    fn test_buried_voxel_emits_nothing() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    chunk.set(15 + dx, 15 + dy, 15 + dz, encode(VoxelTypeId::DIRT));
                }
            }
        }
        let catalog = VoxelCatalog::standard();
        let visible = compute_visible_faces(&chunk, &catalog);
        assert_eq!(visible[Chunk::linear_index(15, 15, 15)], FaceSet::NONE);
        let batches = naive_mesh(&chunk, &visible);
        // Only the shell of the 3x3x3 block meshes: 26 cells, 54 outer faces.
        assert_eq!(batches.quad_count(), 54);
    }
}
