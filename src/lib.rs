#![warn(missing_docs)]
//! Infinitely scrolling hex map.
//!
//! A flat grid of flat-topped hexagons is rendered as fixed-size chunk meshes.
//! Horizontal panning never grows the grid: once the camera has moved one
//! hex column, the column at the trailing edge is moved across the map to
//! the leading edge by rewriting only its vertex positions.

pub mod config;
pub mod error;
pub mod map;
pub mod math;
pub mod mesh;
pub mod pan;

use bevy::prelude::*;

/// Application-wide game state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Normal operation: edge panning scrolls the map.
    #[default]
    Running,
    /// Debug overlay active (Tab to toggle).
    Debugging,
}
