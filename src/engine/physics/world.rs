// Physics world: body arena, per-frame stepping and contact events

use slotmap::{new_key_type, SlotMap};

use super::body::Body;
use super::collision::have_collided;
use super::response::{collide, positional_correction};
use super::shape::{is_viewable, Viewport};

new_key_type! {
    /// Stable handle to a body in the world's arena
    pub struct BodyKey;
}

/// Which bodies took part in a contact this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPair {
    /// The externally-owned body (the player vehicle) hit an arena body
    PlayerAndBody(BodyKey),
    /// Two arena bodies hit each other
    Bodies(BodyKey, BodyKey),
}

/// A contact recorded during `step`, drained by the game layer each frame
/// (crash sounds, pickups, damage)
#[derive(Debug, Clone, Copy)]
pub struct ContactEvent {
    pub pair: ContactPair,
    /// False when one side was non-solid: detected but not resolved
    pub responded: bool,
}

/// All simulated bodies plus the frame-stepping logic.
///
/// Bodies live in a generational arena and are referred to by `BodyKey`
/// handles; removing a body invalidates its key without disturbing others.
/// Everything is single-threaded and frame-synchronous: one `step` call
/// integrates, detects and resolves before returning.
pub struct PhysicsWorld {
    bodies: SlotMap<BodyKey, Body>,
    events: Vec<ContactEvent>,
}

impl PhysicsWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            bodies: SlotMap::with_key(),
            events: Vec::new(),
        }
    }

    /// Add a body, returning its stable handle
    pub fn insert(&mut self, body: Body) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body; its key becomes invalid
    pub fn remove(&mut self, key: BodyKey) -> Option<Body> {
        self.bodies.remove(key)
    }

    pub fn get(&self, key: BodyKey) -> Option<&Body> {
        self.bodies.get(key)
    }

    #[allow(dead_code)]
    pub fn get_mut(&mut self, key: BodyKey) -> Option<&mut Body> {
        self.bodies.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyKey, &Body)> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Advance the simulation by one fixed timestep.
    ///
    /// Order per frame: every body visible in the viewport is integrated
    /// first, then collision pairs are evaluated on post-integration
    /// positions. The player body is owned by the caller (the vehicle
    /// integrates itself) and is tested against every visible arena body;
    /// arena bodies are then tested pairwise, each unordered pair exactly
    /// once. Off-screen bodies are skipped entirely.
    pub fn step(&mut self, dt: f32, viewport: &Viewport, player: &mut Body) {
        self.events.clear();

        let visible: Vec<BodyKey> = self
            .bodies
            .iter()
            .filter(|(_, body)| is_viewable(body, viewport))
            .map(|(key, _)| key)
            .collect();

        for &key in &visible {
            self.bodies[key].update(dt);
        }

        // Player against every visible arena body
        for &key in &visible {
            let body = &self.bodies[key];
            let info = have_collided(player, body, dt);
            if !info.collided {
                continue;
            }

            let responded = player.is_solid() && body.is_solid();
            self.events.push(ContactEvent {
                pair: ContactPair::PlayerAndBody(key),
                responded,
            });
            log::debug!("player contact with {key:?} (responded: {responded})");

            if responded {
                let body = &mut self.bodies[key];
                collide(player, body, &info);
                positional_correction(player, body, &info);
            }
        }

        // Arena bodies pairwise, each unordered pair once
        for i in 0..visible.len() {
            for j in (i + 1)..visible.len() {
                let (key_a, key_b) = (visible[i], visible[j]);

                let info = {
                    let (a, b) = (&self.bodies[key_a], &self.bodies[key_b]);
                    // Both-static pairs can never respond; skip the test
                    if a.is_static() && b.is_static() {
                        continue;
                    }
                    have_collided(a, b, dt)
                };
                if !info.collided {
                    continue;
                }

                // Keys from the visible snapshot are distinct and live, but
                // degrade to skipping the pair rather than panicking
                let Some([a, b]) = self.bodies.get_disjoint_mut([key_a, key_b]) else {
                    continue;
                };

                let responded = a.is_solid() && b.is_solid();
                self.events.push(ContactEvent {
                    pair: ContactPair::Bodies(key_a, key_b),
                    responded,
                });

                if responded {
                    collide(a, b, &info);
                    positional_correction(a, b, &info);
                }
            }
        }
    }

    /// Take this frame's contact events
    pub fn drain_events(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::Shape;
    use approx::assert_relative_eq;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn wide_viewport() -> Viewport {
        Viewport::new(Vec2::ZERO, Vec2::new(1000.0, 1000.0))
    }

    fn ball(mass: f32, position: Vec2) -> Body {
        Body::movable(mass, Shape::Circle { radius: 1.0 }).at(position)
    }

    #[test]
    fn test_insert_get_remove() {
        let mut world = PhysicsWorld::new();
        let key = world.insert(ball(1.0, Vec2::ZERO));
        assert_eq!(world.len(), 1);
        assert!(world.get(key).is_some());

        world.remove(key);
        assert!(world.get(key).is_none());
        assert!(world.is_empty());
    }

    #[test]
    fn test_step_integrates_visible_bodies() {
        let mut world = PhysicsWorld::new();
        let key = world.insert({
            let mut b = ball(1.0, Vec2::ZERO).with_drag(Vec2::ZERO);
            b.set_velocity(Vec2::new(60.0, 0.0));
            b
        });
        let mut player = ball(1.0, Vec2::new(500.0, 500.0));

        world.step(DT, &wide_viewport(), &mut player);

        assert_relative_eq!(world.get(key).unwrap().position.x, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_step_skips_offscreen_bodies() {
        let mut world = PhysicsWorld::new();
        let key = world.insert({
            let mut b = ball(1.0, Vec2::new(5000.0, 0.0)).with_drag(Vec2::ZERO);
            b.set_velocity(Vec2::new(60.0, 0.0));
            b
        });
        let mut player = ball(1.0, Vec2::ZERO);

        world.step(DT, &wide_viewport(), &mut player);

        // Off-screen: neither integrated nor tested
        assert_relative_eq!(world.get(key).unwrap().position.x, 5000.0);
    }

    #[test]
    fn test_player_contact_produces_event_and_response() {
        let mut world = PhysicsWorld::new();
        let key = world.insert(ball(1.0, Vec2::new(1.5, 0.0)).bouncy(1.0));
        let mut player = ball(1.0, Vec2::ZERO).bouncy(1.0).with_drag(Vec2::ZERO);
        player.set_velocity(Vec2::new(3.0, 0.0));

        world.step(DT, &wide_viewport(), &mut player);

        let events = world.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].pair, ContactPair::PlayerAndBody(key));
        assert!(events[0].responded);
        // Impulse transferred forward momentum to the hit body
        assert!(world.get(key).unwrap().velocity().x > 0.0);
    }

    #[test]
    fn test_collectible_contact_detected_but_not_resolved() {
        let mut world = PhysicsWorld::new();
        let key = world.insert(ball(1.0, Vec2::new(1.0, 0.0)).collectible());
        let mut player = ball(1.0, Vec2::ZERO).with_drag(Vec2::ZERO);
        player.set_velocity(Vec2::new(3.0, 0.0));
        let speed_before = player.velocity().x;

        world.step(DT, &wide_viewport(), &mut player);

        let events = world.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].pair, ContactPair::PlayerAndBody(key));
        assert!(!events[0].responded);
        // No velocity response from a non-solid contact (drag disabled)
        assert_relative_eq!(player.velocity().x, speed_before);
    }

    #[test]
    fn test_pair_checked_once_per_frame() {
        let mut world = PhysicsWorld::new();
        let a = world.insert(ball(1.0, Vec2::ZERO));
        let b = world.insert(ball(1.0, Vec2::new(1.5, 0.0)));
        let mut player = ball(1.0, Vec2::new(500.0, 500.0));

        world.step(DT, &wide_viewport(), &mut player);

        let contacts: Vec<_> = world
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e.pair, ContactPair::Bodies(x, y) if (x, y) == (a, b) || (x, y) == (b, a)))
            .collect();
        assert_eq!(contacts.len(), 1);
    }

    #[test]
    fn test_arena_pair_response_moves_both_bodies() {
        let mut world = PhysicsWorld::new();
        let a = world.insert({
            let mut b = ball(1.0, Vec2::ZERO).bouncy(1.0).with_drag(Vec2::ZERO);
            b.set_velocity(Vec2::new(3.0, 0.0));
            b
        });
        let b = world.insert(ball(1.0, Vec2::new(1.5, 0.0)).bouncy(1.0).with_drag(Vec2::ZERO));
        let mut player = ball(1.0, Vec2::new(500.0, 500.0));

        world.step(DT, &wide_viewport(), &mut player);

        // Elastic head-on between equal masses: the impulse lands on both
        assert!(world.get(a).unwrap().velocity().x < 3.0);
        assert!(world.get(b).unwrap().velocity().x > 0.0);
    }

    #[test]
    fn test_static_pair_skipped() {
        let mut world = PhysicsWorld::new();
        world.insert(Body::fixed(Shape::Circle { radius: 2.0 }));
        world.insert(Body::fixed(Shape::Circle { radius: 2.0 }).at(Vec2::new(1.0, 0.0)));
        let mut player = ball(1.0, Vec2::new(500.0, 500.0));

        world.step(DT, &wide_viewport(), &mut player);

        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_events_cleared_each_step() {
        let mut world = PhysicsWorld::new();
        world.insert(ball(1.0, Vec2::new(1.5, 0.0)));
        let mut player = ball(1.0, Vec2::ZERO);

        world.step(DT, &wide_viewport(), &mut player);
        let first = world.drain_events().len();
        assert!(first >= 1);

        // Move the player far away: the next frame has no contacts
        player.position = Vec2::new(500.0, 500.0);
        world.step(DT, &wide_viewport(), &mut player);
        assert!(world.drain_events().is_empty());
    }
}
