// Math utilities and helper functions

use glam::Vec2;

/// Convert a per-step velocity (distance moved each fixed step) to per-second
pub fn per_step_to_per_second(velocity: Vec2, dt: f32) -> Vec2 {
    velocity / dt
}

/// Convert a per-second velocity to distance moved each fixed step
pub fn per_second_to_per_step(velocity: Vec2, dt: f32) -> Vec2 {
    velocity * dt
}

/// Floor of `value / divisor` as an integer. Rounds toward negative infinity,
/// so -25 / 10 is -3, not -2.
pub fn floor_div(value: f32, divisor: f32) -> i64 {
    (value / divisor).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_step_velocity_conversion() {
        let dt = 1.0 / 60.0;
        let per_second = per_step_to_per_second(Vec2::new(3.0, -10.0), dt);
        assert_relative_eq!(per_second.x, 180.0, epsilon = 1e-3);
        assert_relative_eq!(per_second.y, -600.0, epsilon = 1e-3);

        let back = per_second_to_per_step(per_second, dt);
        assert_relative_eq!(back.y, -10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_floor_div() {
        assert_eq!(floor_div(345.0, 10.0), 34);
        assert_eq!(floor_div(0.0, 10.0), 0);
        assert_eq!(floor_div(-25.0, 10.0), -3);
        assert_eq!(floor_div(9.99, 10.0), 0);
    }
}
