// Shape queries: derived geometry for a body's collider under its transform

use glam::Vec2;

use crate::core::math::rotate_deg;

use super::body::Body;

/// The four corners of a body's bounding rectangle under its current
/// position and rotation. Winding: top-left, top-right, bottom-right,
/// bottom-left in local space.
pub fn bounding_box_vertices(body: &Body) -> [Vec2; 4] {
    let half = half_extents(body);
    let local = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ];
    local.map(|corner| body.position + rotate_deg(corner, body.rotation))
}

/// One outward-perpendicular axis per edge of a convex polygon.
///
/// Axes are left unnormalised: the SAT projections compare both shapes on
/// the same axis, so the shared scale cancels out of the separation test.
pub fn axes(vertices: &[Vec2; 4]) -> [Vec2; 4] {
    let mut result = [Vec2::ZERO; 4];
    for (i, axis) in result.iter_mut().enumerate() {
        let edge = vertices[i] - vertices[(i + 1) % vertices.len()];
        *axis = Vec2::new(-edge.y, edge.x);
    }
    result
}

/// Radius of a body's circle collider, approximated from its nominal
/// bounding size as `(width + height) / 4`.
///
/// For a true circle shape this is exact; the formula is kept for its
/// behaviour on slightly non-square sprites.
pub fn collider_radius(body: &Body) -> f32 {
    let size = body.shape().size();
    (size.x + size.y) / 4.0
}

/// World-space center of the body's bounding box
pub fn center(body: &Body) -> Vec2 {
    // Bodies are origin-centered, so the bounding-box center is the position
    body.position
}

/// Half of the body's nominal (unrotated) bounding size
pub fn half_extents(body: &Body) -> Vec2 {
    body.shape().size() / 2.0
}

/// Axis-aligned bounds of the body's rotated bounding-box vertices
pub fn aabb(body: &Body) -> (Vec2, Vec2) {
    let vertices = bounding_box_vertices(body);
    let mut min = vertices[0];
    let mut max = vertices[0];
    for v in &vertices[1..] {
        min = min.min(*v);
        max = max.max(*v);
    }
    (min, max)
}

/// The visible region of the world, as seen by the render layer
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub center: Vec2,
    pub half_size: Vec2,
}

impl Viewport {
    pub fn new(center: Vec2, half_size: Vec2) -> Self {
        Self { center, half_size }
    }
}

/// Whether any bounding-box vertex of the body lies strictly inside the
/// viewport. Off-screen bodies are skipped for both integration and
/// collision checks.
pub fn is_viewable(body: &Body, viewport: &Viewport) -> bool {
    let top_left = viewport.center - viewport.half_size;
    let bottom_right = viewport.center + viewport.half_size;

    bounding_box_vertices(body).iter().any(|v| {
        v.x > top_left.x && v.x < bottom_right.x && v.y > top_left.y && v.y < bottom_right.y
    })
}
