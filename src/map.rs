//! Scrolling hex map: chunk tessellation, edge-column recycling, mesh upload.
//!
//! The map is a fixed pool of chunk meshes. Horizontal [`PanDelta`]s are fed
//! to the [`ScrollingGrid`]; when a recycle pass rewrites a chunk column, the
//! affected chunks are re-uploaded to the renderer in the same frame.

mod chunk;
mod entities;
mod scrolling_grid;
mod startup_systems;
mod systems;

pub use chunk::{ChunkMeshBuilder, HexChunk};
pub use entities::{ChunkCoord, HexMap, MapRoot};
pub use scrolling_grid::{MapLayout, Recycle, ScrollDirection, ScrollingGrid};

use bevy::prelude::*;

use crate::GameState;
use crate::config::HexMapConfig;
use crate::pan::{PanDelta, PanSystems};

/// Builds the map at startup and recycles edge columns as panning accumulates.
pub struct HexMapPlugin(pub HexMapConfig);

impl Plugin for HexMapPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<HexMapConfig>()
            .register_type::<ChunkCoord>()
            .insert_resource(self.0.clone())
            .add_message::<PanDelta>()
            .add_systems(Startup, startup_systems::generate_map)
            .add_systems(
                Update,
                systems::scroll_map
                    .after(PanSystems)
                    .run_if(resource_exists::<HexMap>),
            )
            .add_systems(
                Update,
                (systems::draw_chunk_labels, systems::draw_edge_columns)
                    .run_if(resource_exists::<HexMap>)
                    .run_if(in_state(GameState::Debugging)),
            );
    }
}
