// Level session
//
// One run of the level, from building the world to teardown. Engine
// notifications and key presses are turned into explicit events and handed
// to pure policy functions:
//
// - `collision`: contact begin/end -> grounded state, goal signal
// - `controls`: key actions -> commands on the player body
// - `tracking`: after each step -> score and camera

mod collision;
mod controls;
mod error;
mod state;
mod tracking;

pub use collision::{ContactBody, ContactEvent, LevelSignal};
pub use controls::PlayerCommand;
pub use error::SessionError;
pub use state::SessionState;
pub use tracking::{score_for, score_text};

use glam::Vec2;
use log::{info, trace};
use winit::event::KeyEvent;
use winit::keyboard::KeyCode;

use crate::core::math::{per_second_to_per_step, per_step_to_per_second};
use crate::engine::input::{Action, InputConfig, KeyboardListener};
use crate::engine::physics::{ColliderHandle, CollisionEvent, PhysicsWorld, Vector};
use crate::engine::renderer::{Camera, Quad};
use crate::game::level::{spawn_level, BodyId, BodyKind, LevelLayout, SpawnedLevel};
use crate::game::tuning::LevelTuning;

/// Result of one simulation step
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub score: i64,
    /// Signals raised during this step, in order
    pub signals: Vec<LevelSignal>,
}

/// A running level
///
/// Owns the physics world (and through it every body of the level) and the
/// keyboard subscription. [`Session::teardown`] releases both; it also runs
/// on drop, so every exit path cleans up.
pub struct Session {
    physics: Option<PhysicsWorld>,
    level: SpawnedLevel,
    state: SessionState,
    camera: Camera,
    listener: KeyboardListener,
    tuning: LevelTuning,
    step_count: u64,
}

impl Session {
    /// Build the level and subscribe to the keyboard
    pub fn start(layout: &LevelLayout, tuning: LevelTuning, input: InputConfig) -> Self {
        let mut physics = PhysicsWorld::new(Vector::new(0.0, tuning.gravity), tuning.timestep);
        let level = spawn_level(&mut physics, layout, &tuning);

        let spawn_x = level.player_rect.center.x;
        let camera = Camera::new(spawn_x, tuning.view_width, tuning.level_height);
        let state = SessionState::new().with_score(score_for(spawn_x, &tuning));

        info!("Session started");

        Self {
            physics: Some(physics),
            level,
            state,
            camera,
            listener: KeyboardListener::attach(input),
            tuning,
            step_count: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn tuning(&self) -> &LevelTuning {
        &self.tuning
    }

    /// Process a winit keyboard event
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        if let Some(action) = self.listener.process_keyboard_event(event) {
            self.perform(action);
        }
    }

    /// A key went down. Unbound keys do nothing.
    pub fn key_down(&mut self, key: KeyCode) {
        if let Some(action) = self.listener.key_down(key) {
            self.perform(action);
        }
    }

    /// Run the input policy for `action` and apply its command
    pub fn perform(&mut self, action: Action) {
        let velocity = match self.player_velocity() {
            Ok(velocity) => velocity,
            Err(err) => {
                trace!("Ignoring {:?}: {}", action, err);
                return;
            }
        };

        let (state, command) =
            controls::on_action(std::mem::take(&mut self.state), action, velocity, &self.tuning);
        self.state = state;

        if let Some(command) = command {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: PlayerCommand) {
        let dt = self.tuning.timestep;
        let handle = self.level.player.body;
        let Some(body) = self
            .physics
            .as_mut()
            .and_then(|physics| physics.get_rigid_body_mut(handle))
        else {
            return;
        };

        match command {
            PlayerCommand::SetVelocity(velocity) => {
                let velocity = per_step_to_per_second(velocity, dt);
                body.set_linvel(Vector::new(velocity.x, velocity.y), true);
            }
            PlayerCommand::ApplyForce(force) => {
                // A force held for exactly one step
                body.apply_impulse(Vector::new(force.x * dt, force.y * dt), true);
            }
        }
    }

    /// Advance the simulation one fixed step, then run the collision policy
    /// on this step's contacts and update score and camera
    pub fn step(&mut self) -> Option<StepReport> {
        let Some(physics) = self.physics.as_mut() else {
            trace!("Step on a torn down session");
            return None;
        };
        physics.step();
        let events = physics.collision_events();

        let mut signals = Vec::new();
        for event in events {
            let Some(contact) = self.contact_event(event) else {
                continue;
            };

            let (state, signal) = collision::on_contact(std::mem::take(&mut self.state), &contact);
            self.state = state;

            if let Some(signal) = signal {
                info!("Level complete! Score: {}", self.state.score());
                signals.push(signal);
            }
        }

        let position = self.player_position().ok()?;
        self.state = tracking::on_step(
            std::mem::take(&mut self.state),
            position,
            &mut self.camera,
            &self.tuning,
        );
        self.step_count += 1;

        Some(StepReport {
            score: self.state.score(),
            signals,
        })
    }

    fn contact_event(&self, event: CollisionEvent) -> Option<ContactEvent> {
        match event {
            CollisionEvent::Started {
                collider1,
                collider2,
            } => Some(ContactEvent::Begin {
                a: self.contact_body(collider1)?,
                b: self.contact_body(collider2)?,
            }),
            CollisionEvent::Stopped {
                collider1,
                collider2,
            } => Some(ContactEvent::End {
                a: self.contact_body(collider1)?,
                b: self.contact_body(collider2)?,
            }),
        }
    }

    fn contact_body(&self, collider: ColliderHandle) -> Option<ContactBody> {
        if collider == self.level.player.collider {
            return Some(ContactBody {
                id: BodyId::PLAYER,
                kind: BodyKind::Player,
                position: self.player_position().ok()?,
            });
        }

        let physics = self.physics.as_ref()?;
        let id = BodyId(physics.entity_for_collider(collider)? as u32);

        self.level
            .bodies
            .iter()
            .find(|body| body.id == id)
            .map(|body| ContactBody {
                id,
                kind: body.kind,
                position: body.rect.center,
            })
    }

    /// Player centre in world units
    pub fn player_position(&self) -> Result<Vec2, SessionError> {
        let physics = self.physics.as_ref().ok_or(SessionError::TornDown)?;
        let body = physics
            .get_rigid_body(self.level.player.body)
            .ok_or(SessionError::PlayerMissing)?;

        let translation = body.translation();
        Ok(Vec2::new(translation.x, translation.y))
    }

    /// Player velocity in units per step
    pub fn player_velocity(&self) -> Result<Vec2, SessionError> {
        let physics = self.physics.as_ref().ok_or(SessionError::TornDown)?;
        let body = physics
            .get_rigid_body(self.level.player.body)
            .ok_or(SessionError::PlayerMissing)?;

        let linvel = body.linvel();
        Ok(per_second_to_per_step(
            Vec2::new(linvel.x, linvel.y),
            self.tuning.timestep,
        ))
    }

    /// Everything to draw this frame: static geometry, then the player
    pub fn quads(&self) -> Vec<Quad> {
        let Ok(player) = self.player_position() else {
            return Vec::new();
        };

        self.level
            .bodies
            .iter()
            .map(|body| Quad {
                center: body.rect.center,
                size: body.rect.size,
                color: body.rect.color,
            })
            .chain(std::iter::once(Quad {
                center: player,
                size: self.level.player_rect.size,
                color: self.level.player_rect.color,
            }))
            .collect()
    }

    /// Detach input and release every engine-owned body. Idempotent.
    pub fn teardown(&mut self) {
        self.listener.detach();

        if let Some(mut physics) = self.physics.take() {
            physics.clear();
            info!("Session torn down after {} steps", self.step_count);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn level_one() -> Session {
        Session::start(
            &LevelLayout::level_one(),
            LevelTuning::default(),
            InputConfig::default(),
        )
    }

    /// Step until the player rests on the ground
    fn settle(session: &mut Session) {
        for _ in 0..120 {
            session.step();
        }
        assert!(session.state().grounded(), "player never landed");
    }

    #[test]
    fn test_start_builds_level() {
        let session = level_one();

        assert_eq!(session.quads().len(), 12);
        assert_eq!(session.player_position(), Ok(Vec2::new(100.0, 500.0)));
        assert_eq!(session.state().score(), 10);
        assert!(!session.state().grounded());
    }

    #[test]
    fn test_player_lands_on_ground() {
        let mut session = level_one();
        settle(&mut session);

        let position = session.player_position().unwrap();
        assert_relative_eq!(position.y, 570.0, epsilon = 1.0);
        assert_eq!(session.state().support_count(), 1);
    }

    #[test]
    fn test_jump_when_grounded() {
        let mut session = level_one();
        settle(&mut session);
        let before = session.player_velocity().unwrap();

        session.key_down(KeyCode::Space);

        let after = session.player_velocity().unwrap();
        assert_relative_eq!(after.y, -10.0, epsilon = 1e-3);
        assert_relative_eq!(after.x, before.x, epsilon = 1e-4);
        assert!(!session.state().grounded());

        // Goes up, then comes back down and is grounded again
        session.step();
        assert!(session.player_position().unwrap().y < 570.0);
        settle(&mut session);
    }

    #[test]
    fn test_jump_ignored_in_air() {
        let mut session = level_one();

        session.key_down(KeyCode::ArrowUp);

        assert_eq!(session.player_velocity(), Ok(Vec2::ZERO));
    }

    #[test]
    fn test_world_uses_tuned_gravity_and_push() {
        let tuning = LevelTuning {
            gravity: 0.0,
            ..LevelTuning::default()
        };
        let mut session = Session::start(&LevelLayout::level_one(), tuning, InputConfig::default());

        for _ in 0..30 {
            session.step();
        }
        assert_eq!(session.player_position(), Ok(Vec2::new(100.0, 500.0)));

        // One push of 5000 for 1/60 s on a 0.4 mass box: 208.3 units/s
        session.key_down(KeyCode::ArrowRight);
        let velocity = session.player_velocity().unwrap();
        assert_relative_eq!(velocity.x, 5000.0 / 60.0 / 0.4 / 60.0, epsilon = 1e-3);
        assert_relative_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_push_moves_player() {
        let mut session = level_one();
        settle(&mut session);

        session.key_down(KeyCode::ArrowRight);
        assert!(session.player_velocity().unwrap().x > 0.0);
        for _ in 0..10 {
            session.step();
        }
        assert!(session.player_position().unwrap().x > 100.0);

        let mut session = level_one();
        settle(&mut session);
        session.key_down(KeyCode::ArrowLeft);
        assert!(session.player_velocity().unwrap().x < 0.0);
    }

    #[test]
    fn test_unbound_key_has_no_effect() {
        let mut session = level_one();
        settle(&mut session);
        let velocity = session.player_velocity().unwrap();
        let state = session.state().clone();

        session.key_down(KeyCode::KeyX);

        assert_eq!(session.player_velocity().unwrap(), velocity);
        assert_eq!(session.state(), &state);
    }

    #[test]
    fn test_score_and_camera_follow_player() {
        let mut session = level_one();
        settle(&mut session);
        session.key_down(KeyCode::ArrowRight);

        for _ in 0..30 {
            let report = session.step().unwrap();
            let position = session.player_position().unwrap();

            assert_eq!(report.score, (position.x / 10.0).floor() as i64);
            let bounds = session.camera().viewport_bounds();
            assert_eq!(bounds.min.x, position.x - 600.0);
            assert_eq!(bounds.max.x, position.x + 600.0);
            assert_eq!(bounds.min.y, 0.0);
            assert_eq!(bounds.max.y, 600.0);
        }
    }

    #[test]
    fn test_reaches_goal_and_signals_once() {
        let layout = LevelLayout {
            obstacles: Vec::new(),
            ..LevelLayout::level_one()
        };
        let mut session = Session::start(&layout, LevelTuning::default(), InputConfig::default());

        let mut completions = 0;
        let mut reached = false;
        for step in 0..3000 {
            // Slow key repeat keeps the box well under goal width per step
            if step % 30 == 0 {
                session.key_down(KeyCode::ArrowRight);
            }

            let report = session.step().unwrap();
            completions += report
                .signals
                .iter()
                .filter(|signal| **signal == LevelSignal::LevelComplete)
                .count();

            if session.player_position().unwrap().x > 3000.0 {
                reached = true;
                break;
            }
        }

        assert!(reached, "player never passed the goal");
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_quads_cover_level_and_player() {
        let session = level_one();
        let quads = session.quads();

        assert_eq!(quads.len(), 12);
        let player = quads.last().unwrap();
        assert_eq!(player.center, Vec2::new(100.0, 500.0));
        assert_eq!(player.size, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut session = level_one();
        session.teardown();
        session.teardown();

        assert_eq!(session.step(), None);
        assert_eq!(session.player_position(), Err(SessionError::TornDown));
        assert!(session.quads().is_empty());

        // Input after teardown is dropped silently
        session.key_down(KeyCode::Space);
        session.perform(Action::MoveRight);
        assert_eq!(session.state().score(), 10);
    }
}
