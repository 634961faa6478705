//! Edge-of-window panning and mouse-wheel dolly for the map camera.
//!
//! Holding the cursor near a window edge moves the camera; horizontal
//! movement is also published as a [`PanDelta`] for the map to consume.

mod entities;
mod systems;

pub use entities::{MapCamera, PanDelta};

use bevy::prelude::*;

use crate::GameState;
use crate::math::EdgeBands;

/// Per-plugin configuration for the map camera.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct PanConfig {
    /// Pixel distance from the left/right edge where slow panning starts.
    pub x_slow_margin: f32,
    /// Pixel distance from the left/right edge where fast panning starts.
    pub x_fast_margin: f32,
    /// Slow horizontal speed in world-units per second.
    pub x_slow_speed: f32,
    /// Fast horizontal speed in world-units per second.
    pub x_fast_speed: f32,
    /// Pixel distance from the top/bottom edge where slow panning starts.
    pub z_slow_margin: f32,
    /// Pixel distance from the top/bottom edge where fast panning starts.
    pub z_fast_margin: f32,
    /// Slow depth speed in world-units per second.
    pub z_slow_speed: f32,
    /// Fast depth speed in world-units per second.
    pub z_fast_speed: f32,
    /// Height change per scroll line.
    pub dolly_step: f32,
    /// Lowest camera height the dolly allows.
    pub min_height: f32,
    /// Camera height at startup.
    pub spawn_height: f32,
    /// How far behind (towards `+Z`) the camera sits from the point it looks at.
    pub spawn_pullback: f32,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            x_slow_margin: 50.0,
            x_fast_margin: 10.0,
            x_slow_speed: 1.0,
            x_fast_speed: 10.0,
            z_slow_margin: 50.0,
            z_fast_margin: 10.0,
            z_slow_speed: 1.0,
            z_fast_speed: 10.0,
            dolly_step: 1.0,
            min_height: 2.0,
            spawn_height: 20.0,
            spawn_pullback: 12.0,
        }
    }
}

impl PanConfig {
    /// Speed bands for the horizontal axis.
    pub fn x_bands(&self) -> EdgeBands {
        EdgeBands {
            slow_margin: self.x_slow_margin,
            fast_margin: self.x_fast_margin,
            slow_speed: self.x_slow_speed,
            fast_speed: self.x_fast_speed,
        }
    }

    /// Speed bands for the depth axis.
    pub fn z_bands(&self) -> EdgeBands {
        EdgeBands {
            slow_margin: self.z_slow_margin,
            fast_margin: self.z_fast_margin,
            slow_speed: self.z_slow_speed,
            fast_speed: self.z_fast_speed,
        }
    }
}

/// Systems that move the camera and publish [`PanDelta`]s.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PanSystems;

/// Map camera with edge panning and dolly.
pub struct PanPlugin(pub PanConfig);

impl Plugin for PanPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<MapCamera>()
            .register_type::<PanConfig>()
            .insert_resource(self.0.clone())
            .add_message::<PanDelta>()
            .add_systems(Startup, systems::spawn_camera)
            .add_systems(
                Update,
                (systems::edge_pan, systems::dolly)
                    .in_set(PanSystems)
                    .run_if(in_state(GameState::Running)),
            );
    }
}
