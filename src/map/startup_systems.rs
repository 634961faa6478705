use bevy::app::AppExit;
use bevy::prelude::*;

use super::entities::{ChunkCoord, HexMap, MapRoot};
use super::ScrollingGrid;
use crate::config::HexMapConfig;

// ── Startup ─────────────────────────────────────────────────────────

/// Tessellates every chunk, spawns one mesh entity per chunk under a
/// [`MapRoot`], and inserts the [`HexMap`] resource.
///
/// An invalid configuration aborts the app instead of building a broken grid.
pub fn generate_map(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<HexMapConfig>,
    mut exit: MessageWriter<AppExit>,
) {
    let grid: ScrollingGrid = match ScrollingGrid::new(&cfg) {
        Ok(grid) => grid,
        Err(err) => {
            error!("cannot build hex map: {err}");
            exit.write(AppExit::error());
            return;
        }
    };

    let layout = grid.layout();
    info!(
        "hex map: {}x{} chunks of {}x{} hexes, radius {}, wraps every {:.2} world units",
        layout.chunks_wide,
        layout.chunks_deep,
        cfg.chunk_width,
        cfg.chunk_depth,
        cfg.hex_radius,
        layout.map_width
    );

    // Vertex colors carry the palette; the material only has to pass them through.
    let chunk_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    let root = commands
        .spawn((
            Name::new("HexMap"),
            MapRoot,
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    for (x, z, chunk) in grid.chunks() {
        let entity = commands
            .spawn((
                Name::new(format!("chunk({x},{z})")),
                ChunkCoord { x, z },
                Mesh3d(meshes.add(chunk.mesh.to_bevy_mesh())),
                MeshMaterial3d(chunk_material.clone()),
                Transform::default(),
            ))
            .id();
        commands.entity(root).add_child(entity);
    }

    commands.insert_resource(HexMap { grid });
}
