use bevy::prelude::*;

use crate::config::DebugPalette;
use crate::math::{self, HEX_INDEX_COUNT, HEX_VERTEX_COUNT};
use crate::mesh::RenderableMesh;

/// One fixed-size block of hexes rendered as a single mesh.
///
/// Vertices are row-major: hex row `z`, column `x` starts at
/// `z * vertices_per_row + x * 7`. The two start indices are within-row
/// offsets and apply to every row of the chunk, since all rows scroll in
/// lock-step.
#[derive(Clone, Debug)]
pub struct HexChunk<M> {
    /// Chunk geometry.
    pub mesh: M,
    /// Within-row offset of the column currently at this chunk's left edge.
    pub left_start_vertex_index: usize,
    /// Within-row offset of the column currently at this chunk's right edge.
    pub right_start_vertex_index: usize,
}

/// Dimensions and colors shared by every chunk of a map.
#[derive(Clone, Debug)]
pub struct ChunkMeshBuilder<'a> {
    /// Hex columns per chunk.
    pub width: usize,
    /// Hex rows per chunk.
    pub depth: usize,
    /// Hex radius.
    pub radius: f32,
    /// Column colors.
    pub palette: &'a DebugPalette,
}

impl ChunkMeshBuilder<'_> {
    /// Vertex stride of one hex row within a chunk.
    pub fn vertices_per_row(&self) -> usize {
        self.width * HEX_VERTEX_COUNT
    }

    /// World-space center of hex `(x, z)` in a chunk whose first hex sits at `origin`.
    ///
    /// Odd columns are pushed half a hex down the depth axis.
    pub fn hex_center(&self, origin: Vec2, x: usize, z: usize) -> Vec3 {
        let height = math::hex_height(self.radius);
        let stagger = if x % 2 == 1 { height / 2.0 } else { 0.0 };
        Vec3::new(
            origin.x + x as f32 * math::column_step(self.radius),
            0.0,
            origin.y + z as f32 * height + stagger,
        )
    }

    /// Tessellates a whole chunk whose first hex is centered at `origin` (x, z).
    pub fn build<M: RenderableMesh + Default>(&self, origin: Vec2) -> HexChunk<M> {
        let hex_count = self.width * self.depth;
        let mut vertices = vec![Vec3::ZERO; hex_count * HEX_VERTEX_COUNT];
        let mut colors = vec![Srgba::NONE; hex_count * HEX_VERTEX_COUNT];
        let mut triangles = vec![0u32; hex_count * HEX_INDEX_COUNT];

        let mut left_start_vertex_index = 0;
        let mut right_start_vertex_index = 0;

        let hex_slots = vertices
            .chunks_exact_mut(HEX_VERTEX_COUNT)
            .zip(colors.chunks_exact_mut(HEX_VERTEX_COUNT))
            .zip(triangles.chunks_exact_mut(HEX_INDEX_COUNT));
        for (hex, ((vertex_slot, color_slot), index_slot)) in hex_slots.enumerate() {
            let (z, x) = (hex / self.width, hex % self.width);
            let vertex_index = hex * HEX_VERTEX_COUNT;

            math::write_hex_vertices(vertex_slot, self.hex_center(origin, x, z), self.radius);
            color_slot.fill(self.palette.column_color(x, self.width));
            index_slot.copy_from_slice(&math::hex_triangle_fan(vertex_index as u32));

            if z == 0 {
                if x == 0 {
                    left_start_vertex_index = vertex_index;
                }
                if x + 1 == self.width {
                    right_start_vertex_index = vertex_index;
                }
            }
        }

        let mut mesh = M::default();
        mesh.set_vertices(vertices);
        mesh.set_colors(colors);
        mesh.set_triangles(triangles);
        mesh.recalculate_bounds();
        mesh.recalculate_normals();

        HexChunk {
            mesh,
            left_start_vertex_index,
            right_start_vertex_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{SQRT3, compute_normal};
    use crate::mesh::MeshBuffers;

    fn builder(
        palette: &DebugPalette,
        width: usize,
        depth: usize,
        radius: f32,
    ) -> ChunkMeshBuilder<'_> {
        ChunkMeshBuilder {
            width,
            depth,
            radius,
            palette,
        }
    }

    #[test]
    fn buffer_sizes_match_layout() {
        let palette = DebugPalette::default();
        let chunk: HexChunk<MeshBuffers> = builder(&palette, 16, 16, 1.0).build(Vec2::ZERO);
        assert_eq!(chunk.mesh.vertices().len(), 16 * 16 * 7);
        assert_eq!(chunk.mesh.colors().len(), 16 * 16 * 7);
        assert_eq!(chunk.mesh.triangles().len(), 16 * 16 * 18);
    }

    #[test]
    fn triangle_indices_stay_in_their_hex() {
        let palette = DebugPalette::default();
        let chunk: HexChunk<MeshBuffers> = builder(&palette, 5, 3, 2.0).build(Vec2::new(-4.0, 7.0));
        let vertex_count = chunk.mesh.vertex_count() as u32;
        for (hex, tri) in chunk.mesh.triangles().chunks_exact(HEX_INDEX_COUNT).enumerate() {
            let base = (hex * HEX_VERTEX_COUNT) as u32;
            for &i in tri {
                assert!(i < vertex_count);
                assert!((base..base + HEX_VERTEX_COUNT as u32).contains(&i));
            }
        }
    }

    #[test]
    fn all_triangles_wind_upwards() {
        let palette = DebugPalette::default();
        let chunk: HexChunk<MeshBuffers> = builder(&palette, 4, 4, 1.5).build(Vec2::new(3.0, -2.0));
        let vertices = chunk.mesh.vertices();
        for tri in chunk.mesh.triangles().chunks_exact(3) {
            let n = compute_normal(
                vertices[tri[0] as usize],
                vertices[tri[1] as usize],
                vertices[tri[2] as usize],
            );
            assert!(n.y > 0.99, "triangle {tri:?} faces {n:?}");
        }
        assert!(chunk.mesh.normals().iter().all(|n| (*n - Vec3::Y).length() < 1e-5));
    }

    #[test]
    fn odd_columns_are_staggered() {
        let palette = DebugPalette::default();
        let chunk: HexChunk<MeshBuffers> = builder(&palette, 2, 1, 1.0).build(Vec2::ZERO);
        let hex0 = chunk.mesh.vertex(0).unwrap();
        let hex1 = chunk.mesh.vertex(HEX_VERTEX_COUNT).unwrap();
        assert!((hex0 - Vec3::ZERO).length() < 1e-6);
        assert!((hex1 - Vec3::new(1.5, 0.0, SQRT3 / 2.0)).length() < 1e-6);
    }

    #[test]
    fn rows_advance_by_hex_height() {
        let palette = DebugPalette::default();
        let b = builder(&palette, 3, 3, 2.0);
        let chunk: HexChunk<MeshBuffers> = b.build(Vec2::new(10.0, 20.0));
        let row2_col0 = chunk.mesh.vertex(2 * b.vertices_per_row()).unwrap();
        assert!((row2_col0 - Vec3::new(10.0, 0.0, 20.0 + 2.0 * 2.0 * SQRT3)).length() < 1e-4);
    }

    #[test]
    fn edge_indices_point_at_first_and_last_column() {
        let palette = DebugPalette::default();
        let chunk: HexChunk<MeshBuffers> = builder(&palette, 16, 16, 1.0).build(Vec2::ZERO);
        assert_eq!(chunk.left_start_vertex_index, 0);
        assert_eq!(chunk.right_start_vertex_index, 15 * 7);
    }

    #[test]
    fn edge_columns_use_palette_colors() {
        let palette = DebugPalette::default();
        let b = builder(&palette, 4, 2, 1.0);
        let chunk: HexChunk<MeshBuffers> = b.build(Vec2::ZERO);
        let colors = chunk.mesh.colors();
        let row1 = b.vertices_per_row();
        assert_eq!(colors[row1], palette.column_color(0, 4));
        assert_eq!(colors[row1 + 3 * 7 + 6], palette.column_color(3, 4));
        assert_eq!(colors[row1 + 7], palette.column_color(1, 4));
    }

    #[test]
    fn chunk_bounds_are_computed() {
        let palette = DebugPalette::default();
        let chunk: HexChunk<MeshBuffers> = builder(&palette, 2, 1, 1.0).build(Vec2::ZERO);
        let bounds = chunk.mesh.bounds().unwrap();
        assert!((bounds.min.x + 1.0).abs() < 1e-6);
        assert!((bounds.max.x - 2.5).abs() < 1e-6);
        assert!((bounds.max.z - SQRT3).abs() < 1e-5);
    }
}
