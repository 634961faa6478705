use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use super::PanConfig;
use super::entities::{MapCamera, PanDelta};
use crate::math;

/// Spawns the Camera3d entity with the [`MapCamera`] marker.
pub fn spawn_camera(mut commands: Commands, cfg: Res<PanConfig>) {
    commands.spawn((
        Name::new("MapCamera"),
        Camera3d::default(),
        Transform::from_xyz(0.0, cfg.spawn_height, cfg.spawn_pullback)
            .looking_at(Vec3::ZERO, Vec3::Y),
        MapCamera,
    ));
}

/// Moves the camera while the cursor rests near a window edge.
///
/// Window `y` grows downwards, so the top edge pans towards `-Z`.
pub fn edge_pan(
    windows: Query<&Window>,
    time: Res<Time>,
    cfg: Res<PanConfig>,
    mut camera_q: Query<&mut Transform, With<MapCamera>>,
    mut pans: MessageWriter<PanDelta>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok(mut transform) = camera_q.single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    let dx = math::edge_pan_speed(cursor.x, window.width(), &cfg.x_bands()) * dt;
    let dz = math::edge_pan_speed(cursor.y, window.height(), &cfg.z_bands()) * dt;

    if dx != 0.0 {
        transform.translation.x += dx;
        pans.write(PanDelta(dx));
    }
    if dz != 0.0 {
        transform.translation.z += dz;
    }
}

/// Mouse wheel lowers/raises the camera, never below `min_height`.
pub fn dolly(
    mut scroll: MessageReader<MouseWheel>,
    cfg: Res<PanConfig>,
    mut camera_q: Query<&mut Transform, With<MapCamera>>,
) {
    let Ok(mut transform) = camera_q.single_mut() else {
        return;
    };
    for ev in scroll.read() {
        let lines = match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / 40.0,
        };
        transform.translation.y =
            (transform.translation.y - lines * cfg.dolly_step).max(cfg.min_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bands_follow_config() {
        let cfg = PanConfig::default();
        let x = cfg.x_bands();
        assert_eq!(x.slow_margin, 50.0);
        assert_eq!(x.fast_speed, 10.0);
        assert_eq!(math::edge_pan_speed(795.0, 800.0, &x), 10.0);
        assert_eq!(math::edge_pan_speed(300.0, 600.0, &cfg.z_bands()), 0.0);
    }
}
