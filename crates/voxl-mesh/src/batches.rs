//! Mesh output: per-material vertex/index buffers split into opaque and
//! translucent groups, with quads wound for front-face rendering.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use voxl_voxel::Face;

use crate::material::tile_uv;

/// A single vertex, laid out for direct GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position in chunk-local coordinates.
    pub position: [f32; 3],
    /// Face normal.
    pub normal: [f32; 3],
    /// Atlas texture coordinates.
    pub uv: [f32; 2],
    /// RGBA material tint.
    pub color: [f32; 4],
}

/// Vertex/index buffers for one material.
#[derive(Clone, Debug, Default)]
pub struct MeshBuffer {
    /// Vertex buffer.
    pub vertices: Vec<MeshVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
    /// Number of quads emitted.
    pub quad_count: usize,
    /// Total voxel-face cells the quads cover (merged quads cover many).
    pub covered_cells: usize,
}

impl MeshBuffer {
    /// Pre-sizes the buffers for an exact quad count.
    pub fn with_quad_capacity(quads: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(quads * 4),
            indices: Vec::with_capacity(quads * 6),
            quad_count: 0,
            covered_cells: 0,
        }
    }

    /// Grows capacity for `quads` additional quads.
    pub fn reserve_quads(&mut self, quads: usize) {
        self.vertices.reserve(quads * 4);
        self.indices.reserve(quads * 6);
    }

    /// Pushes one rectangular face quad.
    ///
    /// `layer`, `u`, `v` are chunk-local voxel coordinates in the face's
    /// sweep axes; `w` and `h` are the quad dimensions along u and v.
    pub fn push_quad(
        &mut self,
        face: Face,
        layer: usize,
        u: usize,
        v: usize,
        w: usize,
        h: usize,
        tile: u8,
        color: [f32; 4],
    ) {
        let (layer_axis, u_axis, v_axis) = face.sweep_axes();
        let normal = face.normal();

        // Positive faces sit on the far side of the voxel.
        let layer_pos = match face {
            Face::PosX | Face::PosY | Face::PosZ => layer as f32 + 1.0,
            Face::NegX | Face::NegY | Face::NegZ => layer as f32,
        };

        // Corners (u, v), (u+w, v), (u+w, v+h), (u, v+h); the atlas tile
        // rect stretches across merged quads.
        let corners = [
            (u as f32, v as f32),
            ((u + w) as f32, v as f32),
            ((u + w) as f32, (v + h) as f32),
            (u as f32, (v + h) as f32),
        ];
        let [u0, v0, u1, v1] = tile_uv(tile);
        let uvs = [[u0, v1], [u1, v1], [u1, v0], [u0, v0]];

        let base = self.vertices.len() as u32;
        for (i, &(cu, cv)) in corners.iter().enumerate() {
            let mut pos = Vec3::ZERO;
            pos[layer_axis] = layer_pos;
            pos[u_axis] = cu;
            pos[v_axis] = cv;
            self.vertices.push(MeshVertex {
                position: pos.to_array(),
                normal,
                uv: uvs[i],
                color,
            });
        }

        // Positive faces wind counter-clockwise seen from outside;
        // negative faces reverse.
        match face {
            Face::PosX | Face::PosY | Face::PosZ => {
                self.indices
                    .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
            }
            Face::NegX | Face::NegY | Face::NegZ => {
                self.indices
                    .extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
            }
        }

        self.quad_count += 1;
        self.covered_cells += w * h;
    }
}

/// One material's batch: its atlas tile, tint, and geometry.
#[derive(Clone, Debug)]
pub struct MaterialBatch {
    pub tile: u8,
    pub tint: [f32; 4],
    pub buffer: MeshBuffer,
}

/// The mesh output of a chunk meshing pass, grouped by render pass.
#[derive(Clone, Debug, Default)]
pub struct MeshBatches {
    /// Batches drawn in the opaque pass.
    pub opaque: Vec<MaterialBatch>,
    /// Batches drawn back-to-front with blending.
    pub translucent: Vec<MaterialBatch>,
}

impl MeshBatches {
    pub fn new() -> Self {
        Self::default()
    }

    /// The batch for a tile, created on first use. The material count is
    /// small, so a linear scan beats hashing here.
    pub fn batch_mut(&mut self, tile: u8, tint: [f32; 4], translucent: bool) -> &mut MaterialBatch {
        let group = if translucent {
            &mut self.translucent
        } else {
            &mut self.opaque
        };
        let at = match group.iter().position(|b| b.tile == tile) {
            Some(at) => at,
            None => {
                group.push(MaterialBatch {
                    tile,
                    tint,
                    buffer: MeshBuffer::default(),
                });
                group.len() - 1
            }
        };
        &mut group[at]
    }

    /// Looks up a batch without creating it.
    pub fn find(&self, tile: u8, translucent: bool) -> Option<&MaterialBatch> {
        let group = if translucent {
            &self.translucent
        } else {
            &self.opaque
        };
        group.iter().find(|b| b.tile == tile)
    }

    pub fn quad_count(&self) -> usize {
        self.opaque
            .iter()
            .chain(&self.translucent)
            .map(|b| b.buffer.quad_count)
            .sum()
    }

    pub fn covered_cells(&self) -> usize {
        self.opaque
            .iter()
            .chain(&self.translucent)
            .map(|b| b.buffer.covered_cells)
            .sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.opaque
            .iter()
            .chain(&self.translucent)
            .map(|b| b.buffer.vertices.len())
            .sum()
    }

    pub fn index_count(&self) -> usize {
        self.opaque
            .iter()
            .chain(&self.translucent)
            .map(|b| b.buffer.indices.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.opaque.is_empty() && self.translucent.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
