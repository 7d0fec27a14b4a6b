// Level tuning - every physical constant of the run lives here

use crate::engine::physics::Material;

/// Physical and presentation constants for a level session
///
/// Units are world units (one unit per logical pixel) and seconds, with y
/// growing downward. Velocities handed to the input policy are per fixed
/// step, the way the level feels when played at 60 Hz.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelTuning {
    // Simulation
    /// Downward gravity (units/second²)
    pub gravity: f32,
    /// Fixed physics step (seconds)
    pub timestep: f32,

    // Player body
    pub player_density: f32,
    pub player_material: Material,

    // Level geometry
    pub static_material: Material,

    // Controls
    /// Upward speed set by a jump (units per step)
    pub jump_speed: f32,
    /// Horizontal push applied for one step per key press (newtons)
    pub push_force: f32,

    // Camera and score
    pub view_width: f32,
    pub level_height: f32,
    /// Score is floor(x / score_divisor)
    pub score_divisor: f32,
}

impl LevelTuning {
    pub const DEFAULT: LevelTuning = LevelTuning {
        gravity: 1200.0,
        timestep: 1.0 / 60.0,

        // 20x20 box weighs 0.4
        player_density: 0.001,
        player_material: Material {
            air_friction: 0.06,
            friction: 0.1,
            restitution: 0.1,
        },

        static_material: Material {
            air_friction: 0.0,
            friction: 0.1,
            restitution: 0.0,
        },

        jump_speed: 10.0,
        // ~208 units/s of extra speed per press on a 0.4 box
        push_force: 5000.0,

        view_width: 1200.0,
        level_height: 600.0,
        score_divisor: 10.0,
    };
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport_matches_canvas() {
        let tuning = LevelTuning::default();
        assert_eq!(tuning.view_width, 1200.0);
        assert_eq!(tuning.level_height, 600.0);
    }

    #[test]
    fn test_jump_clears_tall_obstacles_budget() {
        // apex = v² / 2g, with v converted to units per second
        let tuning = LevelTuning::default();
        let v = tuning.jump_speed / tuning.timestep;
        let apex = v * v / (2.0 * tuning.gravity);
        assert!(apex > 100.0, "jump apex {} too low", apex);
    }
}
