// Rigid body data model: shape, kinematic state and capability flags

use glam::Vec2;

/// Collider shape of a body, sized in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
}

impl Shape {
    /// Nominal (unrotated) bounding size of the shape
    pub fn size(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::splat(radius * 2.0),
            Shape::Rectangle { width, height } => Vec2::new(width, height),
        }
    }

    /// True for rectangle colliders
    pub fn is_rectangle(&self) -> bool {
        matches!(self, Shape::Rectangle { .. })
    }
}

/// A 2D rigid body
///
/// Whether a body participates in collision response is expressed through
/// capability flags rather than a type hierarchy: `is_static` (infinite
/// mass), `solid` (non-solid bodies are detect-only), `knockable` (falls
/// over on impact). The inverse mass is computed once at construction and
/// is zero exactly when the body is static.
#[derive(Debug, Clone)]
pub struct Body {
    /// World-space center position
    pub position: Vec2,
    /// Rotation in degrees
    pub rotation: f32,

    velocity: Vec2,
    acceleration: Vec2,
    /// One-shot latch: set by `accelerate`, consumed by `update`
    accelerating: bool,

    shape: Shape,
    mass: f32,
    inv_mass: f32,
    /// Per-axis drag coefficient, always non-negative
    drag: Vec2,
    /// Restitution in [0, 1]
    bounciness: f32,

    solid: bool,
    collectible: bool,
    knockable: bool,
    fallen: bool,
}

/// Default drag applied to movable bodies
const DEFAULT_DRAG: Vec2 = Vec2::new(0.5, 0.5);
/// Default restitution
const DEFAULT_BOUNCINESS: f32 = 0.5;

impl Body {
    /// Create an immovable (static) body: infinite mass, never integrated
    pub fn fixed(shape: Shape) -> Self {
        Self::with_mass(0.0, shape)
    }

    /// Create a movable body with the given mass
    ///
    /// A zero mass yields a zero inverse mass, which makes the body behave
    /// as static; negative masses are taken by absolute value.
    pub fn movable(mass: f32, shape: Shape) -> Self {
        Self::with_mass(mass.abs(), shape)
    }

    fn with_mass(mass: f32, shape: Shape) -> Self {
        let inv_mass = if mass != 0.0 { 1.0 / mass } else { 0.0 };
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            accelerating: false,
            shape,
            mass,
            inv_mass,
            drag: DEFAULT_DRAG,
            bounciness: DEFAULT_BOUNCINESS,
            solid: true,
            collectible: false,
            knockable: false,
            fallen: false,
        }
    }

    /// Set the initial position
    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set the initial rotation in degrees
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set the restitution (clamped on assignment)
    pub fn bouncy(mut self, bounciness: f32) -> Self {
        self.set_bounciness(bounciness);
        self
    }

    /// Set the drag coefficient
    pub fn with_drag(mut self, drag: Vec2) -> Self {
        self.set_drag(drag);
        self
    }

    /// Mark the body as knockable (falls over when hit)
    pub fn knockable(mut self) -> Self {
        self.knockable = true;
        self
    }

    /// Mark the body as a collectible; collectibles are never solid
    pub fn collectible(mut self) -> Self {
        self.collectible = true;
        self.solid = false;
        self
    }

    // --- queries

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    /// Current speed (velocity magnitude)
    pub fn speed(&self) -> f32 {
        crate::core::math::magnitude(self.velocity)
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Inverse mass; zero means immovable
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    /// A body is static exactly when its inverse mass is zero
    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    pub fn drag(&self) -> Vec2 {
        self.drag
    }

    pub fn bounciness(&self) -> f32 {
        self.bounciness
    }

    pub fn is_solid(&self) -> bool {
        self.solid
    }

    #[allow(dead_code)]
    pub fn is_collectible(&self) -> bool {
        self.collectible
    }

    pub fn is_knockable(&self) -> bool {
        self.knockable
    }

    pub fn has_fallen(&self) -> bool {
        self.fallen
    }

    // --- mutators

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration;
    }

    /// Accumulate acceleration for this tick; resets next tick unless
    /// another `accelerate` call arrives
    #[allow(dead_code)]
    pub fn accelerate(&mut self, delta: Vec2) {
        self.acceleration += delta;
        self.accelerating = true;
    }

    /// Clamp restitution into [0, 1] on write
    pub fn set_bounciness(&mut self, bounciness: f32) {
        self.bounciness = bounciness.clamp(0.0, 1.0);
    }

    /// Drag coefficients are stored as absolute values
    pub fn set_drag(&mut self, drag: Vec2) {
        self.drag = drag.abs();
    }

    /// Change solidity; collectibles stay non-solid no matter what
    #[allow(dead_code)]
    pub fn set_solid(&mut self, solid: bool) {
        self.solid = if self.collectible { false } else { solid };
    }

    /// Knock the body over. One-way: stays fallen until `reset_fall`.
    /// Has no effect on bodies that are not knockable.
    pub fn fall(&mut self) {
        if self.knockable && !self.fallen {
            self.fallen = true;
            log::debug!("body knocked over at {:?}", self.position);
        }
    }

    /// Stand the body back up (level restart)
    #[allow(dead_code)]
    pub fn reset_fall(&mut self) {
        self.fallen = false;
    }

    /// Integrate one tick: position from velocity, velocity from
    /// acceleration, then drag.
    ///
    /// Drag is proportional to speed and is clamped per axis so it slows a
    /// body to zero but never reverses it within a single step.
    pub fn update(&mut self, dt: f32) {
        if self.is_static() {
            return;
        }

        self.position += self.velocity * dt;

        // Consume the one-shot acceleration latch
        if self.accelerating {
            self.accelerating = false;
        } else {
            self.acceleration = Vec2::ZERO;
        }

        self.velocity += self.acceleration * dt;

        let drag = self.drag * self.mass * self.speed() * dt;
        self.velocity.x = drag_axis(self.velocity.x, drag.x);
        self.velocity.y = drag_axis(self.velocity.y, drag.y);
    }
}

/// Apply a drag magnitude against one velocity component without letting it
/// cross zero
fn drag_axis(velocity: f32, drag: f32) -> f32 {
    if velocity > 0.0 {
        (velocity - drag).max(0.0)
    } else if velocity < 0.0 {
        (velocity + drag).min(0.0)
    } else {
        0.0
    }
}
