use bevy::prelude::*;

use super::chunk::{ChunkMeshBuilder, HexChunk};
use crate::config::HexMapConfig;
use crate::error::GridError;
use crate::math::{self, HEX_VERTEX_COUNT};
use crate::mesh::{MeshBuffers, RenderableMesh};

/// World-space placement of every chunk, derived once from the config.
///
/// The grid is centered on the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct MapLayout {
    /// Chunk columns.
    pub chunks_wide: usize,
    /// Chunk rows.
    pub chunks_deep: usize,
    /// World width of one chunk.
    pub world_chunk_width: f32,
    /// World depth of one chunk.
    pub world_chunk_depth: f32,
    /// X of the first column of hex centers.
    pub map_left_edge: f32,
    /// Z of the first row of hex centers.
    pub map_top_edge: f32,
    /// Pan distance of one hex column step.
    pub hex_trigger: f32,
    /// Total world width spanned by all chunks; the recycle offset.
    pub map_width: f32,
}

impl MapLayout {
    /// Validates `cfg` and derives the layout.
    pub fn from_config(cfg: &HexMapConfig) -> Result<Self, GridError> {
        cfg.validate()?;
        let chunks_wide = cfg.chunks_wide();
        let chunks_deep = cfg.chunks_deep();
        let chunk_width = cfg.chunk_width as f32;
        let radius = cfg.hex_radius;

        let world_chunk_width = chunk_width / 2.0 * radius * 2.0 + chunk_width / 2.0 * radius;
        let world_chunk_depth = cfg.chunk_depth as f32 * math::hex_height(radius);
        let map_left_edge = -world_chunk_width * (chunks_wide as f32 / 2.0);
        let map_top_edge = -world_chunk_depth * (chunks_deep as f32 / 2.0);
        let hex_trigger = ((map_left_edge * 2.0) / (chunk_width * chunks_wide as f32)).abs();
        let map_width = chunks_wide as f32 * chunk_width * math::column_step(radius);

        Ok(Self {
            chunks_wide,
            chunks_deep,
            world_chunk_width,
            world_chunk_depth,
            map_left_edge,
            map_top_edge,
            hex_trigger,
            map_width,
        })
    }

    /// World position (x, z) of the first hex center of chunk `[x, z]`.
    pub fn chunk_origin(&self, x: usize, z: usize) -> Vec2 {
        Vec2::new(
            self.map_left_edge + x as f32 * self.world_chunk_width,
            self.map_top_edge + z as f32 * self.world_chunk_depth,
        )
    }
}

/// Which way a recycle pass moved an edge column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    /// The left edge column was moved past the right edge.
    LeftEdgeToRight,
    /// The right edge column was moved past the left edge.
    RightEdgeToLeft,
}

/// Outcome of a recycle pass: every chunk in column `chunk_x` was rewritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recycle {
    /// Direction the column moved.
    pub direction: ScrollDirection,
    /// Chunk column whose vertex buffers changed.
    pub chunk_x: usize,
}

/// Fixed pool of hex chunks that fakes unbounded horizontal scrolling.
///
/// Each time the accumulated pan crosses one hex step, the hex column at one
/// edge of the map is moved by the full map width to the other edge. Only
/// vertex positions change; colors and topology are untouched.
#[derive(Debug)]
pub struct ScrollingGrid<M = MeshBuffers> {
    chunks: Vec<HexChunk<M>>,
    layout: MapLayout,
    chunk_depth: usize,
    radius: f32,
    vertices_per_row: usize,
    total_pan_distance: f32,
    left_chunk_idx: usize,
    right_chunk_idx: usize,
}

impl<M: RenderableMesh + Default> ScrollingGrid<M> {
    /// Lays out and tessellates every chunk of the map.
    pub fn new(cfg: &HexMapConfig) -> Result<Self, GridError> {
        let layout = MapLayout::from_config(cfg)?;
        let builder = ChunkMeshBuilder {
            width: cfg.chunk_width as usize,
            depth: cfg.chunk_depth as usize,
            radius: cfg.hex_radius,
            palette: &cfg.palette,
        };
        let vertices_per_row = builder.vertices_per_row();
        let expected = vertices_per_row * builder.depth;

        let mut chunks = Vec::with_capacity(layout.chunks_wide * layout.chunks_deep);
        for z in 0..layout.chunks_deep {
            for x in 0..layout.chunks_wide {
                let chunk: HexChunk<M> = builder.build(layout.chunk_origin(x, z));
                let actual = chunk.mesh.vertex_count();
                if actual != expected {
                    return Err(GridError::BufferSize {
                        x,
                        z,
                        expected,
                        actual,
                    });
                }
                chunks.push(chunk);
            }
        }

        let right_chunk_idx = layout.chunks_wide - 1;
        Ok(Self {
            chunks,
            layout,
            chunk_depth: builder.depth,
            radius: builder.radius,
            vertices_per_row,
            total_pan_distance: 0.0,
            left_chunk_idx: 0,
            right_chunk_idx,
        })
    }
}

impl<M: RenderableMesh> ScrollingGrid<M> {
    /// Feeds one frame's horizontal pan. Runs at most one recycle pass.
    ///
    /// The accumulator keeps its sub-hex remainder across passes.
    pub fn update_pan_distance(&mut self, delta_x: f32) -> Option<Recycle> {
        self.total_pan_distance += delta_x;
        if self.total_pan_distance > self.layout.hex_trigger {
            let chunk_x = self.recycle_left_edge_to_right();
            self.total_pan_distance -= self.layout.hex_trigger;
            Some(Recycle {
                direction: ScrollDirection::LeftEdgeToRight,
                chunk_x,
            })
        } else if self.total_pan_distance < -self.layout.hex_trigger {
            let chunk_x = self.recycle_right_edge_to_left();
            self.total_pan_distance += self.layout.hex_trigger;
            Some(Recycle {
                direction: ScrollDirection::RightEdgeToLeft,
                chunk_x,
            })
        } else {
            None
        }
    }

    /// Moves the left edge column of every chunk row by `+map_width`.
    ///
    /// Returns the chunk column that was rewritten.
    pub fn recycle_left_edge_to_right(&mut self) -> usize {
        let column = self.left_chunk_idx;
        let last_row = self.layout.chunks_deep - 1;
        for z in 0..self.layout.chunks_deep {
            let chunk = &mut self.chunks[z * self.layout.chunks_wide + column];
            shift_hex_column(
                &mut chunk.mesh,
                chunk.left_start_vertex_index,
                self.vertices_per_row,
                self.chunk_depth,
                self.layout.map_width,
                self.radius,
            );

            chunk.right_start_vertex_index = chunk.left_start_vertex_index;
            self.right_chunk_idx = column;
            chunk.left_start_vertex_index += HEX_VERTEX_COUNT;
            if chunk.left_start_vertex_index >= self.vertices_per_row {
                chunk.left_start_vertex_index = 0;
                if z == last_row {
                    self.left_chunk_idx = (self.left_chunk_idx + 1) % self.layout.chunks_wide;
                }
            }
        }
        debug!(
            "recycled chunk column {column} left→right (left edge now chunk {})",
            self.left_chunk_idx
        );
        column
    }

    /// Moves the right edge column of every chunk row by `-map_width`.
    ///
    /// Returns the chunk column that was rewritten.
    pub fn recycle_right_edge_to_left(&mut self) -> usize {
        let column = self.right_chunk_idx;
        let last_row = self.layout.chunks_deep - 1;
        for z in 0..self.layout.chunks_deep {
            let chunk = &mut self.chunks[z * self.layout.chunks_wide + column];
            shift_hex_column(
                &mut chunk.mesh,
                chunk.right_start_vertex_index,
                self.vertices_per_row,
                self.chunk_depth,
                -self.layout.map_width,
                self.radius,
            );

            chunk.left_start_vertex_index = chunk.right_start_vertex_index;
            self.left_chunk_idx = column;
            if chunk.right_start_vertex_index == 0 {
                chunk.right_start_vertex_index = self.vertices_per_row - HEX_VERTEX_COUNT;
                if z == last_row {
                    self.right_chunk_idx = (self.right_chunk_idx + self.layout.chunks_wide - 1)
                        % self.layout.chunks_wide;
                }
            } else {
                chunk.right_start_vertex_index -= HEX_VERTEX_COUNT;
            }
        }
        debug!(
            "recycled chunk column {column} right→left (right edge now chunk {})",
            self.right_chunk_idx
        );
        column
    }

    /// Chunk `[x, z]`, if it exists.
    pub fn chunk(&self, x: usize, z: usize) -> Option<&HexChunk<M>> {
        if x >= self.layout.chunks_wide {
            return None;
        }
        self.chunks.get(z * self.layout.chunks_wide + x)
    }

    /// Every chunk with its `[x, z]` index, row by row.
    pub fn chunks(&self) -> impl Iterator<Item = (usize, usize, &HexChunk<M>)> {
        let wide = self.layout.chunks_wide;
        self.chunks
            .iter()
            .enumerate()
            .map(move |(i, chunk)| (i % wide, i / wide, chunk))
    }

    /// Hex centers of the map's current left or right edge column, top to bottom.
    pub fn edge_column_centers(&self, direction: ScrollDirection) -> Vec<Vec3> {
        let column = match direction {
            ScrollDirection::LeftEdgeToRight => self.left_chunk_idx,
            ScrollDirection::RightEdgeToLeft => self.right_chunk_idx,
        };
        let mut centers = Vec::with_capacity(self.layout.chunks_deep * self.chunk_depth);
        for z in 0..self.layout.chunks_deep {
            let chunk = &self.chunks[z * self.layout.chunks_wide + column];
            let start = match direction {
                ScrollDirection::LeftEdgeToRight => chunk.left_start_vertex_index,
                ScrollDirection::RightEdgeToLeft => chunk.right_start_vertex_index,
            };
            centers.extend(
                (0..self.chunk_depth)
                    .filter_map(|row| chunk.mesh.vertex(start + row * self.vertices_per_row)),
            );
        }
        centers
    }

    /// Derived layout.
    pub fn layout(&self) -> &MapLayout {
        &self.layout
    }

    /// Pan distance accumulated since the last recycle pass.
    pub fn total_pan_distance(&self) -> f32 {
        self.total_pan_distance
    }

    /// Pan distance that triggers one recycle pass.
    pub fn hex_trigger(&self) -> f32 {
        self.layout.hex_trigger
    }

    /// World offset applied to a recycled column.
    pub fn map_width(&self) -> f32 {
        self.layout.map_width
    }

    /// Chunk column holding the map's left edge.
    pub fn left_chunk_idx(&self) -> usize {
        self.left_chunk_idx
    }

    /// Chunk column holding the map's right edge.
    pub fn right_chunk_idx(&self) -> usize {
        self.right_chunk_idx
    }

    /// Vertex stride of one hex row within a chunk.
    pub fn vertices_per_row(&self) -> usize {
        self.vertices_per_row
    }
}

/// Checks out `mesh`'s vertices, moves one hex per row by `shift_x` and
/// writes the buffer back. Only positions change.
fn shift_hex_column<M: RenderableMesh>(
    mesh: &mut M,
    start: usize,
    stride: usize,
    rows: usize,
    shift_x: f32,
    radius: f32,
) {
    let mut vertices = mesh.vertices();
    for row in 0..rows {
        let base = start + row * stride;
        let new_center = vertices[base] + Vec3::new(shift_x, 0.0, 0.0);
        math::write_hex_vertices(&mut vertices[base..base + HEX_VERTEX_COUNT], new_center, radius);
    }
    mesh.set_vertices(vertices);
    mesh.recalculate_bounds();
}
