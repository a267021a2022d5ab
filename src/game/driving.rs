// Maps frame input onto the vehicle's driving controls

use crate::engine::input::{Action, InputState};

use super::vehicle::{DriveDirection, Gear, SteerDirection, Vehicle};

/// Fuel burned per second of held throttle
const FUEL_CONSUMPTION_RATE: f32 = 0.8;

/// Apply one frame of player input to the vehicle.
///
/// The throttle is gear-gated: the same pedal drives forward in `Drive` and
/// backward in `Reverse`. An empty tank kills the throttle but brakes and
/// steering keep working. Steering self-centers whenever neither direction
/// is held, and gear shifts fire on the press edge only.
pub fn apply_input(vehicle: &mut Vehicle, input: &InputState, dt: f32) {
    if input.is_held(Action::Accelerate) {
        if vehicle.has_fuel() {
            let direction = match vehicle.gear() {
                Gear::Drive => DriveDirection::Forward,
                Gear::Reverse => DriveDirection::Backward,
            };
            vehicle.accelerate(direction);
            vehicle.consume_fuel(FUEL_CONSUMPTION_RATE * dt);
        } else {
            vehicle.coast();
        }
    } else if input.is_held(Action::Reverse) {
        vehicle.coast();
        vehicle.brake();
    } else {
        vehicle.coast();
    }

    if input.is_held(Action::SteerLeft) {
        vehicle.steer(SteerDirection::Left);
    } else if input.is_held(Action::SteerRight) {
        vehicle.steer(SteerDirection::Right);
    } else {
        vehicle.reset_steering();
    }

    if input.just_pressed(Action::ShiftUp) {
        vehicle.shift(Gear::Drive);
    }
    if input.just_pressed(Action::ShiftDown) {
        vehicle.shift(Gear::Reverse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::vehicle::VehicleKind;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn car() -> Vehicle {
        Vehicle::new(VehicleKind::Car, Vec2::ZERO)
    }

    #[test]
    fn test_throttle_in_drive_accelerates_forward() {
        let mut vehicle = car();
        let mut input = InputState::new();
        input.press(Action::Accelerate);

        apply_input(&mut vehicle, &input, DT);

        assert!(vehicle.body.acceleration().y < 0.0);
        assert!(vehicle.fuel() < 100.0);
    }

    #[test]
    fn test_throttle_in_reverse_accelerates_backward() {
        let mut vehicle = car();
        vehicle.shift(Gear::Reverse);
        let mut input = InputState::new();
        input.press(Action::Accelerate);

        apply_input(&mut vehicle, &input, DT);

        assert!(vehicle.body.acceleration().y > 0.0);
    }

    #[test]
    fn test_empty_tank_kills_throttle() {
        let mut vehicle = car();
        vehicle.consume_fuel(1000.0);
        let mut input = InputState::new();
        input.press(Action::Accelerate);

        apply_input(&mut vehicle, &input, DT);

        assert_eq!(vehicle.body.acceleration().y, 0.0);
    }

    #[test]
    fn test_brake_scrubs_speed_even_when_empty() {
        let mut vehicle = car();
        vehicle.consume_fuel(1000.0);
        vehicle.body.set_velocity(Vec2::new(0.0, -50.0));
        let mut input = InputState::new();
        input.press(Action::Reverse);

        apply_input(&mut vehicle, &input, DT);

        assert!(vehicle.body.velocity().y > -50.0);
    }

    #[test]
    fn test_no_pedal_coasts_throttle_to_zero() {
        let mut vehicle = car();
        let mut input = InputState::new();
        input.press(Action::Accelerate);
        apply_input(&mut vehicle, &input, DT);
        assert!(vehicle.body.acceleration().y != 0.0);

        input.release(Action::Accelerate);
        for _ in 0..100 {
            apply_input(&mut vehicle, &input, DT);
        }
        assert_eq!(vehicle.body.acceleration().y, 0.0);
    }

    #[test]
    fn test_steering_held_and_self_centering() {
        let mut vehicle = car();
        let mut input = InputState::new();
        input.press(Action::SteerLeft);
        for _ in 0..5 {
            apply_input(&mut vehicle, &input, DT);
        }
        assert!(vehicle.steering_angle() < 0.0);

        input.release(Action::SteerLeft);
        for _ in 0..100 {
            apply_input(&mut vehicle, &input, DT);
        }
        assert_eq!(vehicle.steering_angle(), 0.0);
    }

    #[test]
    fn test_shift_fires_on_press_edge_only() {
        let mut vehicle = car();
        let mut input = InputState::new();
        input.press(Action::ShiftDown);

        apply_input(&mut vehicle, &input, DT);
        assert_eq!(vehicle.gear(), Gear::Reverse);

        // The key stays held across the frame boundary: no re-trigger
        input.end_frame();
        vehicle.shift(Gear::Drive);
        apply_input(&mut vehicle, &input, DT);
        assert_eq!(vehicle.gear(), Gear::Drive);
    }
}
