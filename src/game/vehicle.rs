// Player vehicles: tuning records, gearbox and the bicycle steering model

use glam::Vec2;
use thiserror::Error;

use crate::core::angle::{deg_to_rad, normalize_deg, rad_to_deg};
use crate::engine::physics::{Body, Shape};

/// Automatic gearbox position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gear {
    Reverse,
    Drive,
}

/// Longitudinal pedal intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveDirection {
    Forward,
    Backward,
}

/// Steering intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteerDirection {
    Left,
    Right,
}

/// Vehicle model selectable at level load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    Car,
    Motorcycle,
    Truck,
}

/// Errors from the vehicle catalogue
#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("unknown vehicle kind `{0}`")]
    UnknownKind(String),
}

/// Immutable per-kind tuning record.
///
/// One static record per vehicle kind; vehicles hold a reference instead of
/// carrying mutable copies of these limits.
#[derive(Debug)]
pub struct VehicleTuning {
    /// Acceleration added per accelerate call
    pub acceleration_increment: f32,
    /// Velocity removed per brake call
    pub brake_power: f32,
    /// Acceleration magnitude cap
    pub max_acceleration: f32,
    /// Steering angle cap, degrees
    pub max_steering_angle: f32,
    /// Steering angle change per steer call, degrees
    pub steering_increment: f32,
    /// Distance between the model's front and rear axles
    pub wheel_base: f32,
    /// Redline, used to derive the displayed RPM from speed
    pub max_rpm: u32,
    /// Speed at which the RPM readout pegs
    pub top_speed: f32,
    /// Per-axis drag coefficient
    pub drag: Vec2,
    pub mass: f32,
    /// Collider size (width, length)
    pub size: Vec2,
}

const CAR: VehicleTuning = VehicleTuning {
    acceleration_increment: 25.0,
    brake_power: 5.0,
    max_acceleration: 250.0,
    max_steering_angle: 25.0,
    steering_increment: 0.5,
    wheel_base: 38.4,
    max_rpm: 8000,
    top_speed: 300.0,
    drag: Vec2::new(0.002, 0.001),
    mass: 1000.0,
    size: Vec2::new(32.0, 64.0),
};

const MOTORCYCLE: VehicleTuning = VehicleTuning {
    acceleration_increment: 30.0,
    brake_power: 6.0,
    max_acceleration: 280.0,
    max_steering_angle: 32.0,
    steering_increment: 0.8,
    wheel_base: 28.8,
    max_rpm: 11000,
    top_speed: 340.0,
    drag: Vec2::new(0.004, 0.0028),
    mass: 300.0,
    size: Vec2::new(16.0, 48.0),
};

const TRUCK: VehicleTuning = VehicleTuning {
    acceleration_increment: 18.0,
    brake_power: 4.0,
    max_acceleration: 180.0,
    max_steering_angle: 20.0,
    steering_increment: 0.4,
    wheel_base: 57.6,
    max_rpm: 6000,
    top_speed: 220.0,
    drag: Vec2::new(0.001, 0.00036),
    mass: 2500.0,
    size: Vec2::new(40.0, 96.0),
};

impl VehicleKind {
    /// The tuning record for this kind
    pub fn tuning(self) -> &'static VehicleTuning {
        match self {
            VehicleKind::Car => &CAR,
            VehicleKind::Motorcycle => &MOTORCYCLE,
            VehicleKind::Truck => &TRUCK,
        }
    }

    /// Look a kind up by its level-file name
    pub fn from_name(name: &str) -> Result<Self, VehicleError> {
        match name {
            "car" => Ok(VehicleKind::Car),
            "motorcycle" => Ok(VehicleKind::Motorcycle),
            "truck" => Ok(VehicleKind::Truck),
            other => Err(VehicleError::UnknownKind(other.to_string())),
        }
    }
}

/// The player vehicle: a rigid body plus driving state.
///
/// Created once per level, torn down with it. The body's local convention:
/// negative longitudinal (y) velocity is forward, the heading vector is the
/// body rotation offset by 270 degrees.
pub struct Vehicle {
    pub body: Body,
    kind: VehicleKind,
    tuning: &'static VehicleTuning,
    /// Current steering angle, degrees, within ±max_steering_angle
    steering_angle: f32,
    gear: Gear,
    /// Fuel level, 0-100
    fuel: f32,
    /// Accumulated damage, 0-100
    damage: u32,
    rpm: u32,
}

/// Damage readout cap
const MAX_DAMAGE: u32 = 100;
/// Fuel tank capacity
const MAX_FUEL: f32 = 100.0;

impl Vehicle {
    /// Create a vehicle of the given kind at a starting position
    pub fn new(kind: VehicleKind, position: Vec2) -> Self {
        let tuning = kind.tuning();
        let body = Body::movable(
            tuning.mass,
            Shape::Rectangle {
                width: tuning.size.x,
                height: tuning.size.y,
            },
        )
        .at(position)
        .with_drag(tuning.drag);

        log::info!("spawning {kind:?} at {position:?}");

        Self {
            body,
            kind,
            tuning,
            steering_angle: 0.0,
            gear: Gear::Drive,
            fuel: MAX_FUEL,
            damage: 0,
            rpm: 0,
        }
    }

    // --- queries

    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    pub fn tuning(&self) -> &'static VehicleTuning {
        self.tuning
    }

    pub fn steering_angle(&self) -> f32 {
        self.steering_angle
    }

    pub fn gear(&self) -> Gear {
        self.gear
    }

    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    pub fn has_fuel(&self) -> bool {
        self.fuel > 0.0
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn rpm(&self) -> u32 {
        self.rpm
    }

    /// Current speed in world units per second
    pub fn speed(&self) -> f32 {
        self.body.speed()
    }

    // --- driving controls

    /// Push the throttle in a direction.
    ///
    /// Rolling against the pedal brakes instead of accelerating; otherwise
    /// the longitudinal acceleration moves one increment toward the cap.
    /// Forward is negative along the local longitudinal axis.
    pub fn accelerate(&mut self, direction: DriveDirection) {
        let acceleration = self.body.acceleration();
        let velocity = self.body.velocity();

        let rolling_opposite = match direction {
            DriveDirection::Forward => velocity.y > 0.0,
            DriveDirection::Backward => velocity.y < 0.0,
        };
        if rolling_opposite {
            if acceleration.y != 0.0 {
                self.body.set_acceleration(Vec2::ZERO);
            }
            self.brake();
            return;
        }

        let delta = match direction {
            DriveDirection::Forward => -self.tuning.acceleration_increment,
            DriveDirection::Backward => self.tuning.acceleration_increment,
        };
        let new_y = (acceleration.y + delta)
            .clamp(-self.tuning.max_acceleration, self.tuning.max_acceleration);
        self.body.set_acceleration(Vec2::new(0.0, new_y));
    }

    /// Decay the throttle toward zero when no pedal is pressed
    pub fn coast(&mut self) {
        let acceleration = self.body.acceleration();
        let increment = self.tuning.acceleration_increment;
        let new_y = if acceleration.y > 0.0 {
            (acceleration.y - increment).max(0.0)
        } else if acceleration.y < 0.0 {
            (acceleration.y + increment).min(0.0)
        } else {
            0.0
        };
        self.body.set_acceleration(Vec2::new(0.0, new_y));
    }

    /// Scrub speed off the longitudinal axis, clamped at a standstill
    pub fn brake(&mut self) {
        let velocity = self.body.velocity();
        let brake_power = self.tuning.brake_power;
        let new_y = if velocity.y > 0.0 {
            (velocity.y - brake_power).max(0.0)
        } else if velocity.y < 0.0 {
            (velocity.y + brake_power).min(0.0)
        } else {
            0.0
        };
        self.body.set_velocity(Vec2::new(velocity.x, new_y));
    }

    /// Turn the wheel one increment, limited to the tuning's maximum angle
    pub fn steer(&mut self, direction: SteerDirection) {
        let limit = self.tuning.max_steering_angle;
        let increment = self.tuning.steering_increment;
        self.steering_angle = match direction {
            SteerDirection::Left => (self.steering_angle - increment).max(-limit),
            SteerDirection::Right => (self.steering_angle + increment).min(limit),
        };
    }

    /// Let the steering self-center one increment toward zero
    pub fn reset_steering(&mut self) {
        let increment = self.tuning.steering_increment;
        self.steering_angle = if self.steering_angle > 0.0 {
            (self.steering_angle - increment).max(0.0)
        } else if self.steering_angle < 0.0 {
            (self.steering_angle + increment).min(0.0)
        } else {
            0.0
        };
    }

    /// Select a gearbox position
    pub fn shift(&mut self, gear: Gear) {
        if self.gear != gear {
            log::debug!("gear shift: {:?} -> {gear:?}", self.gear);
            self.gear = gear;
        }
    }

    /// Add fuel, capped at a full tank
    pub fn refill(&mut self, amount: f32) {
        self.fuel = (self.fuel + amount).min(MAX_FUEL);
    }

    /// Burn fuel, floored at empty
    pub fn consume_fuel(&mut self, amount: f32) {
        self.fuel = (self.fuel - amount).max(0.0);
    }

    /// Record crash damage, capped at the readout maximum
    pub fn add_damage(&mut self, amount: u32) {
        self.damage = (self.damage + amount).min(MAX_DAMAGE);
    }

    /// Integrate one tick of vehicle motion using the two-point bicycle
    /// model: the rear wheel tracks the heading, the front wheel tracks
    /// heading plus steering angle, and the body follows their midpoint.
    /// The turning radius falls out of the two-point update without an
    /// explicit wheelbase/tan(steering) formula.
    pub fn update(&mut self, dt: f32) {
        let acceleration = self.body.acceleration();
        let mut velocity = self.body.velocity();
        let speed = self.body.speed();

        let mut displacement = speed * dt;
        // Positive longitudinal velocity means reversing
        if velocity.y > 0.0 {
            displacement = -displacement;
        }

        let heading_rad = deg_to_rad(self.body.rotation + 270.0);
        let steering_rad = deg_to_rad(self.steering_angle) + heading_rad;

        let heading_dir = Vec2::new(heading_rad.cos(), heading_rad.sin());
        let steering_dir = Vec2::new(steering_rad.cos(), steering_rad.sin());

        let half_base = heading_dir * (self.tuning.wheel_base / 2.0);
        let mut front_wheel = self.body.position + half_base;
        let mut rear_wheel = self.body.position - half_base;

        front_wheel += steering_dir * displacement;
        rear_wheel += heading_dir * displacement;

        self.body.position = (front_wheel + rear_wheel) / 2.0;
        let axle = front_wheel - rear_wheel;
        self.body.rotation = normalize_deg(rad_to_deg(axle.y.atan2(axle.x)) - 270.0);

        velocity += acceleration * dt;

        // Speed-proportional drag on the longitudinal axis, clamped so it
        // never pushes through zero
        let drag = self.body.drag() * self.body.mass() * speed * dt;
        if velocity.y > 0.0 {
            velocity.y = (velocity.y - drag.y).max(0.0);
        } else if velocity.y < 0.0 {
            velocity.y = (velocity.y + drag.y).min(0.0);
        }

        // Lateral slip is not modelled; the tires always grip
        self.body.set_velocity(Vec2::new(0.0, velocity.y));

        let rpm_fraction = (speed / self.tuning.top_speed).min(1.0);
        self.rpm = (rpm_fraction * self.tuning.max_rpm as f32) as u32;
    }
}
