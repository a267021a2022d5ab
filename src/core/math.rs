// Vector math helpers over glam::Vec2

use glam::Vec2;

use crate::core::angle::deg_to_rad;

/// Dot product of two vectors
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.x * b.x + a.y * b.y
}

/// 2D cross product (z component of the 3D cross)
#[allow(dead_code)]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - b.x * a.y
}

/// Magnitude (length) of a vector
pub fn magnitude(v: Vec2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Normalize a vector, returning `fallback` when the magnitude is zero.
///
/// Every call site that can see a degenerate zero-length vector (coincident
/// circle centers, identical velocities in the axis-aligned test) must route
/// through this instead of dividing by the magnitude directly.
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    let mag = magnitude(v);
    if mag == 0.0 {
        log::trace!("normalize_or: zero-length vector, using fallback {fallback:?}");
        fallback
    } else {
        v / mag
    }
}

/// Rotate a vector by an angle in degrees
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    let radians = deg_to_rad(degrees);
    let (sin, cos) = radians.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Scale a vector by a scalar
#[allow(dead_code)]
pub fn scale(v: Vec2, scalar: f32) -> Vec2 {
    Vec2::new(scalar * v.x, scalar * v.y)
}

/// Linear interpolation
#[allow(dead_code)]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Check if two f32 values are approximately equal
#[allow(dead_code)]
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}
