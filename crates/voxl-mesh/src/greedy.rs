//! Greedy face mesher: merges coplanar same-type visible faces into
//! larger rectangular quads to cut the quad count.

use voxl_voxel::{CHUNK_EDGE, Chunk, Face, VoxelTypeId};

use crate::batches::MeshBatches;
use crate::material::{is_translucent, material_set, tint};
use crate::visibility::FaceSet;

/// Converts abstract sweep coordinates back to concrete `(x, y, z)`.
///
/// `layer_axis`, `u_axis`, `v_axis` are 0=X, 1=Y, 2=Z.
fn axes_to_xyz(
    layer_axis: usize,
    u_axis: usize,
    v_axis: usize,
    layer: usize,
    u: usize,
    v: usize,
) -> (usize, usize, usize) {
    let mut coords = [0usize; 3];
    coords[layer_axis] = layer;
    coords[u_axis] = u;
    coords[v_axis] = v;
    (coords[0], coords[1], coords[2])
}

/// Merges adjacent same-type visible faces into rectangles, one sweep per
/// face direction.
///
/// Two faces merge only when their cells decode to the same voxel type, so
/// every quad carries a single atlas tile. Covered area always matches the
/// naive mesher's; only the quad count shrinks.
pub fn greedy_mesh(chunk: &Chunk, visible_faces: &[FaceSet]) -> MeshBatches {
    let mut batches = MeshBatches::new();
    let palette = chunk.palette();
    let edge = CHUNK_EDGE;
    let mut visited = vec![false; edge * edge];

    for face in Face::ALL {
        let (layer_axis, u_axis, v_axis) = face.sweep_axes();

        for layer in 0..edge {
            visited.fill(false);

            for v in 0..edge {
                for u in 0..edge {
                    if visited[v * edge + u] {
                        continue;
                    }

                    let (x, y, z) = axes_to_xyz(layer_axis, u_axis, v_axis, layer, u, v);
                    let idx = Chunk::linear_index(x, y, z);
                    if !visible_faces[idx].is_visible(face) {
                        continue;
                    }
                    let id = chunk.voxel(&palette, x as i32, y as i32, z as i32);
                    if id == VoxelTypeId::AIR {
                        continue;
                    }

                    // Extend width along the u-axis.
                    let mut w = 1;
                    while u + w < edge {
                        let (nx, ny, nz) =
                            axes_to_xyz(layer_axis, u_axis, v_axis, layer, u + w, v);
                        let ni = Chunk::linear_index(nx, ny, nz);
                        if visited[v * edge + u + w]
                            || !visible_faces[ni].is_visible(face)
                            || chunk.voxel(&palette, nx as i32, ny as i32, nz as i32) != id
                        {
                            break;
                        }
                        w += 1;
                    }

                    // Extend height along the v-axis, full rows only.
                    let mut h = 1;
                    'rows: while v + h < edge {
                        for du in 0..w {
                            let (nx, ny, nz) =
                                axes_to_xyz(layer_axis, u_axis, v_axis, layer, u + du, v + h);
                            let ni = Chunk::linear_index(nx, ny, nz);
                            if visited[(v + h) * edge + u + du]
                                || !visible_faces[ni].is_visible(face)
                                || chunk.voxel(&palette, nx as i32, ny as i32, nz as i32) != id
                            {
                                break 'rows;
                            }
                        }
                        h += 1;
                    }

                    for dv in 0..h {
                        for du in 0..w {
                            visited[(v + dv) * edge + u + du] = true;
                        }
                    }

                    let tile = material_set(id).tile_for(face);
                    let color = tint(id);
                    batches
                        .batch_mut(tile, color, is_translucent(id))
                        .buffer
                        .push_quad(face, layer, u, v, w, h, tile, color);
                }
            }
        }
    }

    batches
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::tile;
    use crate::naive::naive_mesh;
    use crate::visibility::compute_visible_faces;
    use voxl_voxel::{ChunkKind, Palette, VoxelCatalog};

    fn encode(id: VoxelTypeId) -> u8 {
        Palette::for_kind(ChunkKind::Prairie).encode(id).unwrap()
    }

    #[test]
    fn test_flat_slab_top_merges_to_one_quad() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        for z in 0..CHUNK_EDGE as i32 {
            for x in 0..CHUNK_EDGE as i32 {
                chunk.set(x, 0, z, encode(VoxelTypeId::GRASS));
            }
        }
        let catalog = VoxelCatalog::standard();
        let visible = compute_visible_faces(&chunk, &catalog);
        let batches = greedy_mesh(&chunk, &visible);

        // Bottom and side faces sit on a border with no mask bits set, so
        // only the top surface meshes, as a single merged rectangle.
        let top = batches.find(tile::GRASS_TOP, false);
        assert_eq!(top.map(|b| b.buffer.quad_count), Some(1));
        assert_eq!(batches.quad_count(), 1);
        assert_eq!(batches.covered_cells(), CHUNK_EDGE * CHUNK_EDGE);
    }

    #[test]
    fn test_checkerboard_cannot_merge() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        for z in 0..CHUNK_EDGE as i32 {
            for x in 0..CHUNK_EDGE as i32 {
                let id = if (x + z) % 2 == 0 {
                    VoxelTypeId::ROCK
                } else {
                    VoxelTypeId::DIRT
                };
                chunk.set(x, 0, z, encode(id));
            }
        }
        let catalog = VoxelCatalog::standard();
        let visible = compute_visible_faces(&chunk, &catalog);
        let batches = greedy_mesh(&chunk, &visible);

        // Alternating types: every top face stays its own quad.
        let top_quads = batches
            .find(tile::ROCK, false)
            .map(|b| b.buffer.quad_count)
            .unwrap_or(0)
            + batches
                .find(tile::DIRT, false)
                .map(|b| b.buffer.quad_count)
                .unwrap_or(0);
        assert_eq!(top_quads, CHUNK_EDGE * CHUNK_EDGE);
    }

    #[test]
    fn test_two_by_three_patch_is_one_quad() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        for z in 10..13 {
            for x in 20..22 {
                chunk.set(x, 5, z, encode(VoxelTypeId::ROCK));
            }
        }
        let catalog = VoxelCatalog::standard();
        let visible = compute_visible_faces(&chunk, &catalog);
        let batches = greedy_mesh(&chunk, &visible);
        let rock = batches.find(tile::ROCK, false).map(|b| {
            (b.buffer.quad_count, b.buffer.covered_cells)
        });
        // Top, bottom, two 2-wide sides, two 3-wide sides: six merged quads.
        assert_eq!(rock, Some((6, 6 + 6 + 3 + 3 + 2 + 2)));
    }

    #[test]
    fn test_matches_naive_coverage_on_random_chunk() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        // Simple LCG for a reproducible scattered fill.
        let mut state = 0x2545_F491_4F6C_DD1D_u64;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as u32
        };
        for _ in 0..4000 {
            let x = (next() % 30) as i32;
            let y = (next() % 30) as i32;
            let z = (next() % 30) as i32;
            let id = match next() % 4 {
                0 => VoxelTypeId::DIRT,
                1 => VoxelTypeId::ROCK,
                2 => VoxelTypeId::GRASS,
                _ => VoxelTypeId::WATER,
            };
            chunk.set(x, y, z, encode(id));
        }

        let catalog = VoxelCatalog::standard();
        let visible = compute_visible_faces(&chunk, &catalog);
        let naive = naive_mesh(&chunk, &visible);
        let greedy = greedy_mesh(&chunk, &visible);

        assert_eq!(greedy.covered_cells(), naive.covered_cells());
        assert!(greedy.quad_count() <= naive.quad_count());
        assert!(!greedy.is_empty());
    }

    #[test]
    fn test_quads_never_mix_translucency() {
        let mut chunk = Chunk::new(ChunkKind::Prairie);
        for x in 0..4 {
            chunk.set(x, 10, 10, encode(VoxelTypeId::WATER));
            chunk.set(x, 9, 10, encode(VoxelTypeId::SAND));
        }
        let catalog = VoxelCatalog::standard();
        let visible = compute_visible_faces(&chunk, &catalog);
        let batches = greedy_mesh(&chunk, &visible);

        for batch in &batches.opaque {
            assert!(batch.tint[3] >= 1.0);
        }
        for batch in &batches.translucent {
            assert!(batch.tint[3] < 1.0);
        }
        assert!(batches.find(tile::WATER, true).is_some());
        assert!(batches.find(tile::SAND, false).is_some());
    }
}
