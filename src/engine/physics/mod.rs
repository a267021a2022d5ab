// Handwritten 2D collision and rigid-body physics

pub mod body;
pub mod collision;
pub mod response;
pub mod shape;
mod world;

pub use body::{Body, Shape};
pub use collision::{have_collided, CollisionInfo};
pub use response::{collide, positional_correction};
pub use shape::{is_viewable, Viewport};
pub use world::{BodyKey, ContactEvent, ContactPair, PhysicsWorld};
