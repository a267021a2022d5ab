// Game layer: vehicles, driving controls and levels

pub mod driving;
pub mod level;
pub mod vehicle;
