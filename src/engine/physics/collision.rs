// Narrow-phase collision detection between circle and rectangle colliders
//
// References:
// - impulse basics: gamedevelopment.tutsplus.com "custom 2D physics engine"
// - SAT: dyn4j.org/2010/01/sat

use glam::Vec2;

use crate::core::math::{dot, magnitude, normalize_or, rotate_deg};

use super::body::Body;
use super::shape::{aabb, axes, bounding_box_vertices, center, collider_radius, half_extents};

/// Result of a single narrow-phase query. Created fresh per call, never
/// stored.
///
/// The normal's direction convention depends on the test that produced it:
/// the circle test points from the first body toward the second, the
/// axis-aligned rectangle test derives it from relative velocity, and the
/// box-circle clamp test leaves it in the box's local frame. A zero normal
/// means the test could not produce a direction; responders must skip such
/// contacts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    pub collided: bool,
    pub penetration: f32,
    pub normal: Vec2,
}

impl CollisionInfo {
    /// The no-collision result
    pub const NONE: Self = Self {
        collided: false,
        penetration: 0.0,
        normal: Vec2::ZERO,
    };

    fn hit(penetration: f32, normal: Vec2) -> Self {
        Self {
            collided: true,
            penetration,
            normal,
        }
    }
}

/// Top-level dispatcher: route a body pair to the cheapest test that is
/// valid for their collider types and rotation state.
pub fn have_collided(a: &Body, b: &Body, dt: f32) -> CollisionInfo {
    let both_unrotated = a.rotation == 0.0 && b.rotation == 0.0;

    match (a.shape().is_rectangle(), b.shape().is_rectangle()) {
        (false, false) => circle_test(a, b),
        (true, true) => {
            if both_unrotated {
                axis_aligned_test(a, b, dt)
            } else {
                sat_test(a, b)
            }
        }
        // Mixed rectangle/circle pair: the clamp test needs the box frame
        // to be axis-aligned
        _ => {
            let box_rotation = if a.shape().is_rectangle() {
                a.rotation
            } else {
                b.rotation
            };
            if box_rotation == 0.0 {
                axis_aligned_test(a, b, dt)
            } else {
                oriented_box_circle_test(a, b, dt)
            }
        }
    }
}

/// Exact distance-vs-radius-sum test between two circle colliders.
///
/// The penetration value mixes units: it is the *squared* radius sum minus
/// the *linear* center distance. Downstream positional correction was tuned
/// against this value, so it is preserved as observed behaviour.
pub fn circle_test(a: &Body, b: &Body) -> CollisionInfo {
    let offset = center(b) - center(a);
    let radius_a = collider_radius(a);
    let radii_sum_squared = {
        let sum = radius_a + collider_radius(b);
        sum * sum
    };

    if dot(offset, offset) > radii_sum_squared {
        return CollisionInfo::NONE;
    }

    let distance = magnitude(offset);
    if distance != 0.0 {
        return CollisionInfo::hit(radii_sum_squared - distance, offset / distance);
    }

    // Coincident centers: no direction can be derived, push along +X
    CollisionInfo::hit(radius_a, Vec2::X)
}

/// Axis-aligned overlap test for rectangle-rectangle and rectangle-circle
/// pairs. Neither body's rotation is taken into account beyond its effect
/// on the bounding box.
pub fn axis_aligned_test(a: &Body, b: &Body, dt: f32) -> CollisionInfo {
    match (a.shape().is_rectangle(), b.shape().is_rectangle()) {
        (true, true) => aabb_rect_test(a, b, dt),
        (false, false) => circle_test(a, b),
        _ => box_circle_test(a, b),
    }
}

/// AABB interval-overlap test between two rectangles.
///
/// The contact normal is derived from the bodies' *relative velocity*, not
/// from the overlap geometry: the resolver shoves the bodies apart along
/// their motion direction. Identical velocities produce a zero normal,
/// which responders must treat as "no direction, skip".
fn aabb_rect_test(a: &Body, b: &Body, dt: f32) -> CollisionInfo {
    let (min_a, max_a) = aabb(a);
    let (min_b, max_b) = aabb(b);

    let overlapping =
        min_a.x < max_b.x && min_b.x < max_a.x && min_a.y < max_b.y && min_b.y < max_a.y;
    if !overlapping {
        return CollisionInfo::NONE;
    }

    let relative = (a.velocity() - b.velocity()) * dt;
    CollisionInfo::hit(magnitude(relative), normalize_or(relative, Vec2::ZERO))
}

/// Clamp-to-box test between an axis-aligned rectangle and a circle.
///
/// The circle's center offset is clamped to the box extents; the remaining
/// distance minus the circle radius is the (signed) separation. Collided
/// contacts therefore carry a *negative* penetration, a convention the
/// positional correction step relies on.
fn box_circle_test(a: &Body, b: &Body) -> CollisionInfo {
    let (box_body, circle_body) = if a.shape().is_rectangle() {
        (a, b)
    } else {
        (b, a)
    };

    let offset = circle_body.position - box_body.position;
    let extents = half_extents(box_body);

    let clamp = Vec2::new(
        offset.x.clamp(-extents.x, extents.x),
        offset.y.clamp(-extents.y, extents.y),
    );

    let difference = offset - clamp;
    let distance = magnitude(difference) - collider_radius(circle_body);

    CollisionInfo {
        collided: distance < 0.0,
        penetration: distance,
        normal: normalize_or(clamp, Vec2::X),
    }
}

/// Full Separating Axis Theorem test over both rectangles' edge normals.
///
/// Early-exits on the first separating axis; otherwise reports the axis of
/// minimum overlap (first encountered wins ties, iteration order is body
/// `a`'s axes then body `b`'s, each in edge order).
pub fn sat_test(a: &Body, b: &Body) -> CollisionInfo {
    let vertices_a = bounding_box_vertices(a);
    let vertices_b = bounding_box_vertices(b);
    let axis_sets = [axes(&vertices_a), axes(&vertices_b)];

    let mut min_axis = Vec2::ZERO;
    let mut min_overlap = 0.0_f32;
    let mut first_run = true;

    for axis_set in &axis_sets {
        for &axis in axis_set {
            let (min_a, max_a) = project(&vertices_a, axis);
            let (min_b, max_b) = project(&vertices_b, axis);

            if !(min_b <= max_a && max_b >= min_a) {
                // Separating axis found
                return CollisionInfo::NONE;
            }

            let overlap = max_a.min(max_b) - min_a.max(min_b);
            if first_run || overlap < min_overlap {
                min_overlap = overlap;
                min_axis = axis;
                first_run = false;
            }
        }
    }

    CollisionInfo::hit(min_overlap, normalize_or(min_axis, Vec2::X))
}

/// Project a vertex set onto an axis, returning the [min, max] interval
fn project(vertices: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    let mut min = dot(vertices[0], axis);
    let mut max = min;
    for &vertex in &vertices[1..] {
        let projection = dot(vertex, axis);
        if projection < min {
            min = projection;
        } else if projection > max {
            max = projection;
        }
    }
    (min, max)
}

/// Oriented-box vs circle: rebase both bodies into the box's local frame,
/// where the box is axis-aligned at the origin, and run the clamp test
/// there. The returned normal stays in that local frame.
pub fn oriented_box_circle_test(a: &Body, b: &Body, dt: f32) -> CollisionInfo {
    let box_is_a = a.shape().is_rectangle();
    let (box_body, circle_body) = if box_is_a { (a, b) } else { (b, a) };

    let mut local_box = box_body.clone();
    let mut local_circle = circle_body.clone();

    local_circle.position = rotate_deg(
        circle_body.position - box_body.position,
        -box_body.rotation,
    );
    local_box.position = Vec2::ZERO;
    local_box.rotation = 0.0;

    if box_is_a {
        axis_aligned_test(&local_box, &local_circle, dt)
    } else {
        axis_aligned_test(&local_circle, &local_box, dt)
    }
}
