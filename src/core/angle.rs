// Angle arithmetic in degrees and radians

use std::f32::consts::PI;

/// Convert degrees to radians
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

/// Convert radians to degrees
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * 180.0 / PI
}

/// Normalize an angle in degrees into the range (-180, 180].
///
/// Uses modular arithmetic so the cost is constant even for extreme inputs.
pub fn normalize_deg(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}

/// Normalize an angle in radians into the range (-PI, PI].
#[allow(dead_code)]
pub fn normalize_rad(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI {
        PI
    } else {
        wrapped
    }
}

/// Check whether `angle` lies within the shorter arc between `left` and
/// `right` on the circle. Both limits are taken in degrees.
#[allow(dead_code)]
pub fn is_within_range(angle: f32, left: f32, right: f32) -> bool {
    let left = normalize_deg(left - angle);
    let right = normalize_deg(right - angle);
    if left * right >= 0.0 {
        return false;
    }
    (left - right).abs() < 180.0
}
