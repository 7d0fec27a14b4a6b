// Camera/score updater - runs once per step after integration

use glam::Vec2;

use super::state::SessionState;
use crate::core::math::floor_div;
use crate::engine::renderer::Camera;
use crate::game::tuning::LevelTuning;

/// Score for a horizontal position: floor(x / divisor)
pub fn score_for(x: f32, tuning: &LevelTuning) -> i64 {
    floor_div(x, tuning.score_divisor)
}

/// Text shown by the score display
pub fn score_text(score: i64) -> String {
    format!("Score: {}", score)
}

/// Recompute the score and snap the camera onto the player
pub fn on_step(
    state: SessionState,
    player_position: Vec2,
    camera: &mut Camera,
    tuning: &LevelTuning,
) -> SessionState {
    camera.look_at(player_position.x);
    state.with_score(score_for(player_position.x, tuning))
}
