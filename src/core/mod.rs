// Pure math leaves: vector helpers and angle arithmetic

pub mod angle;
pub mod math;
