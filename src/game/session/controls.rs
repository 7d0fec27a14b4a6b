// Input policy - key actions to commands on the player body

use glam::Vec2;

use super::state::SessionState;
use crate::engine::input::Action;
use crate::game::tuning::LevelTuning;

/// What to do to the player body in the physics engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    /// Replace the velocity (units per step)
    SetVelocity(Vec2),
    /// Push at the body's centre for one step (newtons)
    ApplyForce(Vec2),
}

/// Decide what an action does given the current state and the player's
/// per-step velocity
pub fn on_action(
    state: SessionState,
    action: Action,
    velocity: Vec2,
    tuning: &LevelTuning,
) -> (SessionState, Option<PlayerCommand>) {
    match action {
        Action::Jump if state.grounded() => {
            log::debug!("Jump from vx = {:.2}", velocity.x);
            // Leaves the ground now rather than when the contact ends
            let state = state.lift_off();
            let velocity = Vec2::new(velocity.x, -tuning.jump_speed);
            (state, Some(PlayerCommand::SetVelocity(velocity)))
        }
        Action::Jump => (state, None),
        Action::MoveLeft => (
            state,
            Some(PlayerCommand::ApplyForce(Vec2::new(-tuning.push_force, 0.0))),
        ),
        Action::MoveRight => (
            state,
            Some(PlayerCommand::ApplyForce(Vec2::new(tuning.push_force, 0.0))),
        ),
    }
}
