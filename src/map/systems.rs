use bevy::camera::primitives::Aabb;
use bevy::prelude::*;
use bevy_egui::egui;

use super::ScrollDirection;
use super::entities::{ChunkCoord, HexMap};
use crate::math::HEX_VERTEX_COUNT;
use crate::pan::{MapCamera, PanDelta};

// ── Update: scrolling ──────────────────────────────────────────────

/// Feeds every [`PanDelta`] to the grid and re-uploads the chunk column a
/// recycle pass rewrote, refreshing each chunk's `Aabb` from its new bounds.
pub fn scroll_map(
    mut commands: Commands,
    mut pans: MessageReader<PanDelta>,
    mut map: ResMut<HexMap>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut chunk_q: Query<(Entity, &ChunkCoord, &mut Mesh3d)>,
) {
    for pan in pans.read() {
        let Some(recycle) = map.grid.update_pan_distance(pan.0) else {
            continue;
        };
        for (entity, coord, mut mesh3d) in &mut chunk_q {
            if coord.x != recycle.chunk_x {
                continue;
            }
            let Some(chunk) = map.grid.chunk(coord.x, coord.z) else {
                continue;
            };
            mesh3d.0 = meshes.add(chunk.mesh.to_bevy_mesh());
            if let Some(bounds) = chunk.mesh.bounds() {
                commands
                    .entity(entity)
                    .insert(Aabb::from_min_max(bounds.min, bounds.max));
            }
        }
    }
}

// ── Debug overlay ──────────────────────────────────────────────────

/// Draws each chunk's name and edge columns as a screen-projected egui label.
pub fn draw_chunk_labels(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    map: Res<HexMap>,
    mut ready: Local<bool>,
) {
    // The egui context is not ready on the first frame.
    if !*ready {
        *ready = true;
        return;
    }
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    let painter = ctx.get_mut().layer_painter(egui::LayerId::background());

    for (x, z, chunk) in map.grid.chunks() {
        let Some(bounds) = chunk.mesh.bounds() else {
            continue;
        };
        if let Ok(viewport) = camera.world_to_viewport(cam_gt, bounds.center()) {
            painter.text(
                egui::pos2(viewport.x, viewport.y),
                egui::Align2::CENTER_CENTER,
                format!(
                    "chunk({x},{z}) L{} R{}",
                    chunk.left_start_vertex_index / HEX_VERTEX_COUNT,
                    chunk.right_start_vertex_index / HEX_VERTEX_COUNT
                ),
                egui::FontId::proportional(13.0),
                egui::Color32::WHITE,
            );
        }
    }
}

/// Outlines the map's current left (red) and right (green) edge columns.
pub fn draw_edge_columns(mut gizmos: Gizmos, map: Res<HexMap>) {
    let lift = Vec3::Y * 0.05;
    let edges = [
        (ScrollDirection::LeftEdgeToRight, Color::srgb(1.0, 0.3, 0.3)),
        (ScrollDirection::RightEdgeToLeft, Color::srgb(0.3, 1.0, 0.3)),
    ];
    for (edge, color) in edges {
        let centers = map.grid.edge_column_centers(edge);
        gizmos.linestrip(centers.into_iter().map(|p| p + lift), color);
    }
}
