// Level loading and the per-frame update pipeline

use std::collections::HashSet;

use glam::Vec2;
use thiserror::Error;

use crate::engine::input::InputState;
use crate::engine::physics::{Body, BodyKey, ContactPair, PhysicsWorld, Shape, Viewport};

use super::driving::apply_input;
use super::vehicle::{Vehicle, VehicleError, VehicleKind};

/// Fuel restored by picking up a fuel can
const FUEL_CAN_REFILL: f32 = 25.0;
/// Damage per resolved crash contact
const CRASH_DAMAGE: u32 = 1;

/// Static and dynamic props placeable in a level
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleKind {
    /// Immovable rectangular barrier
    Wall { width: f32, height: f32 },
    /// Light traffic cone, knocked flat on contact
    Cone,
    /// Heavy rolling drum
    Barrel,
    /// Pushable wooden box
    Crate,
    /// Fuel pickup, collected on contact
    FuelCan,
}

/// One obstacle placement in a level description
#[derive(Debug, Clone, Copy)]
pub struct ObstacleSpec {
    pub kind: ObstacleKind,
    pub position: Vec2,
    pub rotation: f32,
}

impl ObstacleSpec {
    pub fn new(kind: ObstacleKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            rotation: 0.0,
        }
    }

    pub fn rotated(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Everything needed to build a playable level
#[derive(Debug, Clone)]
pub struct LevelDescription {
    /// Vehicle catalogue name ("car", "motorcycle", "truck")
    pub vehicle: String,
    pub start_position: Vec2,
    pub obstacles: Vec<ObstacleSpec>,
}

/// Errors from level validation and loading
#[derive(Debug, Error)]
pub enum LevelError {
    #[error(transparent)]
    Vehicle(#[from] VehicleError),
    #[error("obstacle {index} has a non-finite position")]
    NonFinitePosition { index: usize },
    #[error("obstacle {index} has a non-positive size")]
    NonPositiveSize { index: usize },
    #[error("start position is non-finite")]
    NonFiniteStart,
}

fn obstacle_body(spec: &ObstacleSpec) -> Body {
    let body = match spec.kind {
        ObstacleKind::Wall { width, height } => Body::fixed(Shape::Rectangle { width, height }),
        ObstacleKind::Cone => Body::movable(5.0, Shape::Circle { radius: 8.0 })
            .knockable()
            .bouncy(0.2),
        ObstacleKind::Barrel => Body::movable(80.0, Shape::Circle { radius: 14.0 }).bouncy(0.4),
        ObstacleKind::Crate => Body::movable(60.0, Shape::Rectangle {
            width: 24.0,
            height: 24.0,
        })
        .bouncy(0.1),
        ObstacleKind::FuelCan => Body::movable(1.0, Shape::Circle { radius: 10.0 }).collectible(),
    };
    body.at(spec.position).rotated(spec.rotation)
}

/// A loaded level: the physics world, the player vehicle and the pickup
/// bookkeeping. Built from a `LevelDescription`, torn down wholesale.
pub struct Level {
    world: PhysicsWorld,
    player: Vehicle,
    fuel_cans: HashSet<BodyKey>,
}

impl Level {
    /// Validate a description and build the level from it.
    ///
    /// Fails fast: the first invalid entry aborts the load and nothing is
    /// half-built.
    pub fn load(description: &LevelDescription) -> Result<Self, LevelError> {
        if !description.start_position.is_finite() {
            return Err(LevelError::NonFiniteStart);
        }

        let kind = VehicleKind::from_name(&description.vehicle)?;

        for (index, spec) in description.obstacles.iter().enumerate() {
            if !spec.position.is_finite() {
                return Err(LevelError::NonFinitePosition { index });
            }
            if let ObstacleKind::Wall { width, height } = spec.kind {
                if width <= 0.0 || height <= 0.0 {
                    return Err(LevelError::NonPositiveSize { index });
                }
            }
        }

        let mut world = PhysicsWorld::new();
        let mut fuel_cans = HashSet::new();
        for spec in &description.obstacles {
            let key = world.insert(obstacle_body(spec));
            if spec.kind == ObstacleKind::FuelCan {
                fuel_cans.insert(key);
            }
        }

        let player = Vehicle::new(kind, description.start_position);
        log::info!(
            "level loaded: {} obstacles, {} fuel cans",
            world.len(),
            fuel_cans.len()
        );

        Ok(Self {
            world,
            player,
            fuel_cans,
        })
    }

    pub fn player(&self) -> &Vehicle {
        &self.player
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn remaining_fuel_cans(&self) -> usize {
        self.fuel_cans.len()
    }

    /// Advance the level by one fixed timestep: input drives the vehicle,
    /// the vehicle integrates itself, the world steps everything else, and
    /// the resulting contacts feed damage and pickups.
    pub fn update(&mut self, dt: f32, input: &InputState, viewport: &Viewport) {
        apply_input(&mut self.player, input, dt);
        self.player.update(dt);
        self.world.step(dt, viewport, &mut self.player.body);

        for event in self.world.drain_events() {
            let ContactPair::PlayerAndBody(key) = event.pair else {
                continue;
            };

            if event.responded {
                self.player.add_damage(CRASH_DAMAGE);
            } else if self.fuel_cans.remove(&key) {
                self.world.remove(key);
                self.player.refill(FUEL_CAN_REFILL);
                log::info!("fuel can collected, tank at {:.0}", self.player.fuel());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn viewport() -> Viewport {
        Viewport::new(Vec2::ZERO, Vec2::new(2000.0, 2000.0))
    }

    fn empty_level() -> LevelDescription {
        LevelDescription {
            vehicle: "car".to_string(),
            start_position: Vec2::ZERO,
            obstacles: Vec::new(),
        }
    }

    #[test]
    fn test_load_rejects_unknown_vehicle() {
        let mut description = empty_level();
        description.vehicle = "zeppelin".to_string();
        assert!(matches!(
            Level::load(&description),
            Err(LevelError::Vehicle(_))
        ));
    }

    #[test]
    fn test_load_rejects_non_finite_obstacle() {
        let mut description = empty_level();
        description.obstacles.push(ObstacleSpec::new(
            ObstacleKind::Cone,
            Vec2::new(f32::NAN, 0.0),
        ));
        assert!(matches!(
            Level::load(&description),
            Err(LevelError::NonFinitePosition { index: 0 })
        ));
    }

    #[test]
    fn test_load_rejects_degenerate_wall() {
        let mut description = empty_level();
        description.obstacles.push(ObstacleSpec::new(
            ObstacleKind::Wall {
                width: 0.0,
                height: 50.0,
            },
            Vec2::ZERO,
        ));
        assert!(matches!(
            Level::load(&description),
            Err(LevelError::NonPositiveSize { index: 0 })
        ));
    }

    #[test]
    fn test_load_rejects_non_finite_start() {
        let mut description = empty_level();
        description.start_position = Vec2::new(f32::INFINITY, 0.0);
        assert!(matches!(
            Level::load(&description),
            Err(LevelError::NonFiniteStart)
        ));
    }

    #[test]
    fn test_load_builds_world_and_player() {
        let mut description = empty_level();
        description.obstacles.push(ObstacleSpec::new(
            ObstacleKind::Wall {
                width: 200.0,
                height: 20.0,
            },
            Vec2::new(0.0, -300.0),
        ));
        description
            .obstacles
            .push(ObstacleSpec::new(ObstacleKind::FuelCan, Vec2::new(50.0, 0.0)));

        let level = Level::load(&description).unwrap();
        assert_eq!(level.world().len(), 2);
        assert_eq!(level.remaining_fuel_cans(), 1);
        assert_eq!(level.player().fuel(), 100.0);
    }

    #[test]
    fn test_update_drives_vehicle_forward() {
        let mut level = Level::load(&empty_level()).unwrap();
        let mut input = InputState::new();
        input.press(Action::Accelerate);

        for _ in 0..120 {
            level.update(DT, &input, &viewport());
            input.end_frame();
        }

        // Nose points up at rotation 0: two seconds of throttle moved it
        assert!(level.player().body.position.y < -1.0);
        assert!(level.player().fuel() < 100.0);
    }

    #[test]
    fn test_fuel_can_pickup_refills_and_despawns() {
        let mut description = empty_level();
        description
            .obstacles
            .push(ObstacleSpec::new(ObstacleKind::FuelCan, Vec2::ZERO));
        let mut level = Level::load(&description).unwrap();
        level.player.consume_fuel(60.0);
        let before = level.player().fuel();

        // Vehicle spawns on top of the can
        level.update(DT, &InputState::new(), &viewport());

        assert_eq!(level.remaining_fuel_cans(), 0);
        assert_eq!(level.world().len(), 0);
        assert_relative_eq!(level.player().fuel(), before + FUEL_CAN_REFILL);
        assert_eq!(level.player().damage(), 0);
    }

    #[test]
    fn test_crash_adds_damage() {
        let mut description = empty_level();
        description
            .obstacles
            .push(ObstacleSpec::new(ObstacleKind::Barrel, Vec2::new(0.0, -40.0)));
        let mut level = Level::load(&description).unwrap();
        level.player.body.set_velocity(Vec2::new(0.0, -200.0));

        let mut crashed = false;
        for _ in 0..60 {
            level.update(DT, &InputState::new(), &viewport());
            if level.player().damage() > 0 {
                crashed = true;
                break;
            }
        }
        assert!(crashed);
    }

    #[test]
    fn test_cone_knocked_over_by_vehicle() {
        let mut description = empty_level();
        description
            .obstacles
            .push(ObstacleSpec::new(ObstacleKind::Cone, Vec2::new(0.0, -40.0)));
        let mut level = Level::load(&description).unwrap();
        level.player.body.set_velocity(Vec2::new(0.0, -200.0));

        let mut knocked = false;
        for _ in 0..60 {
            level.update(DT, &InputState::new(), &viewport());
            if level.world().iter().any(|(_, body)| body.has_fallen()) {
                knocked = true;
                break;
            }
        }
        assert!(knocked);
    }
}
