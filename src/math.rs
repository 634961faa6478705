//! Flat-topped hex tessellation and the window-edge pan speed curve.
//!
//! Nothing here touches the ECS. Inputs are plain numbers and `Vec3`s, and
//! the tests below call every function directly.

use bevy::prelude::Vec3;

/// `√3`, the ratio between a flat-topped hex's height and its radius.
pub const SQRT3: f32 = 1.732_050_8;

/// Vertices per hexagon: the center followed by six perimeter points.
pub const HEX_VERTEX_COUNT: usize = 7;

/// Triangle indices per hexagon: a fan of six triangles around the center.
pub const HEX_INDEX_COUNT: usize = 18;

/// Fan triangles as `(center, a, b)` local vertex slots, wound so the face
/// normal points towards `+Y`.
const FAN: [[u32; 3]; 6] = [[0, 2, 1], [0, 3, 2], [0, 4, 3], [0, 5, 4], [0, 6, 5], [0, 1, 6]];

/// Vertical extent (`H = √3·R`) of a flat-topped hex with the given radius.
pub fn hex_height(radius: f32) -> f32 {
    SQRT3 * radius
}

/// Horizontal distance between the centers of two adjacent hex columns.
pub fn column_step(radius: f32) -> f32 {
    1.5 * radius
}

/// Local offsets of the 7 vertices of a flat-topped hex, relative to its center.
///
/// Slot 0 is the center; slots 1–6 walk the perimeter starting at the left
/// point: left, upper-left, upper-right, right, lower-right, lower-left.
/// "Upper" means towards `-Z`. The up axis is always 0.
///
/// # Examples
/// ```
/// # use hex_scroll::math::hex_vertex_offsets;
/// # use bevy::prelude::Vec3;
/// let offsets = hex_vertex_offsets(2.0);
/// assert_eq!(offsets[0], Vec3::ZERO);
/// assert_eq!(offsets[1], Vec3::new(-2.0, 0.0, 0.0));
/// assert_eq!(offsets[4], Vec3::new(2.0, 0.0, 0.0));
/// ```
pub fn hex_vertex_offsets(radius: f32) -> [Vec3; HEX_VERTEX_COUNT] {
    let half_height = hex_height(radius) / 2.0;
    let half_radius = 0.5 * radius;
    [
        Vec3::ZERO,
        Vec3::new(-radius, 0.0, 0.0),
        Vec3::new(-half_radius, 0.0, -half_height),
        Vec3::new(half_radius, 0.0, -half_height),
        Vec3::new(radius, 0.0, 0.0),
        Vec3::new(half_radius, 0.0, half_height),
        Vec3::new(-half_radius, 0.0, half_height),
    ]
}

/// The 18 triangle indices of one hex whose center sits at `vertex_base`.
///
/// Every index lies in `vertex_base..vertex_base + 7`.
pub fn hex_triangle_fan(vertex_base: u32) -> [u32; HEX_INDEX_COUNT] {
    let mut indices = [0; HEX_INDEX_COUNT];
    for (slot, local) in indices.iter_mut().zip(FAN.iter().flatten()) {
        *slot = vertex_base + local;
    }
    indices
}

/// Writes the 7 vertices of a hex centered on `center` into `slot`.
///
/// `slot` must be exactly [`HEX_VERTEX_COUNT`] long.
pub fn write_hex_vertices(slot: &mut [Vec3], center: Vec3, radius: f32) {
    debug_assert_eq!(slot.len(), HEX_VERTEX_COUNT);
    for (vertex, offset) in slot.iter_mut().zip(hex_vertex_offsets(radius)) {
        *vertex = center + offset;
    }
}

/// Computes the face normal of a triangle defined by three vertices.
///
/// Uses the cross product of edges `(v1 - v0)` and `(v2 - v0)`.
/// Returns `Vec3::ZERO` if the triangle is degenerate (collinear points).
pub fn compute_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    edge1.cross(edge2).normalize_or_zero()
}

/// Speed bands for cursor-at-window-edge panning along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeBands {
    /// Pixel distance from the edge where slow panning starts.
    pub slow_margin: f32,
    /// Pixel distance from the edge where fast panning starts.
    pub fast_margin: f32,
    /// Slow speed in world-units per second.
    pub slow_speed: f32,
    /// Fast speed in world-units per second.
    pub fast_speed: f32,
}

/// Signed pan speed for a cursor coordinate along an axis of length `extent`.
///
/// Near the low edge the result is negative, near the high edge positive,
/// and zero in between or when the cursor is outside `[0, extent]`.
pub fn edge_pan_speed(cursor: f32, extent: f32, bands: &EdgeBands) -> f32 {
    if !(0.0..=extent).contains(&cursor) {
        return 0.0;
    }
    let band_speed = |distance: f32| {
        if distance <= bands.fast_margin {
            bands.fast_speed
        } else if distance <= bands.slow_margin {
            bands.slow_speed
        } else {
            0.0
        }
    };
    let low = band_speed(cursor);
    if low > 0.0 {
        return -low;
    }
    band_speed(extent - cursor)
}
