use bevy::prelude::*;

use super::ScrollingGrid;

/// Owns the whole scrolling grid; the single mutation point for chunk geometry.
#[derive(Resource)]
pub struct HexMap {
    /// Chunk pool and scroll state.
    pub grid: ScrollingGrid,
}

/// Marker on the entity parenting every chunk mesh.
#[derive(Component)]
pub struct MapRoot;

/// Grid index of a chunk mesh entity.
#[derive(Component, Reflect, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkCoord {
    /// Chunk column.
    pub x: usize,
    /// Chunk row.
    pub z: usize,
}
