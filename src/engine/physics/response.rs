// Impulse-based collision response and positional correction
//
// Reference: gamedevelopment.tutsplus.com "custom 2D physics engine -
// the basics and impulse resolution"

use glam::Vec2;

use crate::core::math::dot;

use super::body::Body;
use super::collision::CollisionInfo;

/// Fraction of the penetration depth corrected per call, usually 20% - 80%
const CORRECTION_PERCENT: f32 = 0.8;

/// Resolve a detected collision by adjusting the bodies' velocities.
///
/// Callers must only invoke this with `info.collided == true`. Non-solid
/// bodies never receive a response, nor do pairs where both bodies are
/// static, nor contacts whose normal is degenerate (zero length).
pub fn collide(a: &mut Body, b: &mut Body, info: &CollisionInfo) {
    if !a.is_solid() || !b.is_solid() {
        return;
    }
    if a.is_static() && b.is_static() {
        return;
    }
    if info.normal == Vec2::ZERO {
        log::trace!("collide: degenerate contact normal, skipping response");
        return;
    }

    let normal = info.normal;
    let restitution = a.bounciness().min(b.bounciness());

    match (!a.is_static(), !b.is_static()) {
        (true, false) | (false, true) => {
            // One movable body hitting an immovable one: reflect its
            // velocity across the contact normal
            let (movable, _fixed) = if a.is_static() { (b, a) } else { (a, b) };

            if movable.is_knockable() {
                movable.fall();
            }

            let velocity = movable.velocity();
            let along_normal = dot(velocity, normal);
            movable.set_velocity(velocity - (1.0 + restitution) * normal * along_normal);
        }
        (true, true) => {
            if a.is_knockable() {
                a.fall();
            }
            if b.is_knockable() {
                b.fall();
            }

            let velocity_a = a.velocity();
            let velocity_b = b.velocity();

            let velocity_along_normal = dot(velocity_b - velocity_a, normal);

            // Already separating: adding an impulse would inject energy
            if velocity_along_normal > 0.0 {
                return;
            }

            let inv_mass_a = a.inv_mass();
            let inv_mass_b = b.inv_mass();

            let j = -(1.0 + restitution) * velocity_along_normal / (inv_mass_a + inv_mass_b);
            let impulse = j * normal;

            a.set_velocity(velocity_a - inv_mass_a * impulse);
            b.set_velocity(velocity_b + inv_mass_b * impulse);
        }
        (false, false) => unreachable!("both-static pairs are filtered above"),
    }
}

/// Push overlapping bodies apart along the contact normal, weighted by
/// inverse mass, to stop repeated small overlaps from sinking bodies into
/// each other. Only a fraction of the penetration is corrected per call.
pub fn positional_correction(a: &mut Body, b: &mut Body, info: &CollisionInfo) {
    if a.is_static() && b.is_static() {
        return;
    }
    if info.normal == Vec2::ZERO {
        return;
    }

    let inv_mass_a = a.inv_mass();
    let inv_mass_b = b.inv_mass();

    let correction =
        info.penetration / (inv_mass_a + inv_mass_b) * CORRECTION_PERCENT * info.normal;

    a.position -= inv_mass_a * correction;
    b.position += inv_mass_b * correction;
}
