// Input intents fed to the simulation by the host each frame

mod action;
mod state;

pub use action::Action;
pub use state::InputState;
