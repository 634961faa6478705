use bevy::prelude::*;

/// Marker component for the camera looking down on the map.
#[derive(Component, Reflect)]
pub struct MapCamera;

/// Signed world-space horizontal distance the camera panned this frame.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct PanDelta(pub f32);
