// Collision policy - contact notifications to grounded state and goal signals

use glam::Vec2;

use super::state::SessionState;
use crate::game::level::{BodyId, BodyKind};

/// One side of a contact, as seen when the notification is handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactBody {
    pub id: BodyId,
    pub kind: BodyKind,
    pub position: Vec2,
}

/// Engine contact notification between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEvent {
    Begin { a: ContactBody, b: ContactBody },
    End { a: ContactBody, b: ContactBody },
}

/// Something the session reports outward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSignal {
    /// The player entered the goal sensor
    LevelComplete,
}

/// Split a pair into (player, other) if the player is involved
fn player_pair<'a>(a: &'a ContactBody, b: &'a ContactBody) -> Option<(&'a ContactBody, &'a ContactBody)> {
    if a.kind == BodyKind::Player {
        Some((a, b))
    } else if b.kind == BodyKind::Player {
        Some((b, a))
    } else {
        None
    }
}

/// A body can hold the player up if it is solid and sits lower (larger y)
fn supports(player: &ContactBody, other: &ContactBody) -> bool {
    !other.kind.is_sensor() && other.position.y > player.position.y
}

/// Apply one contact notification
pub fn on_contact(state: SessionState, event: &ContactEvent) -> (SessionState, Option<LevelSignal>) {
    match event {
        ContactEvent::Begin { a, b } => {
            let mut state = state;
            if let Some((player, other)) = player_pair(a, b) {
                if supports(player, other) {
                    log::debug!("Grounded on {:?} {:?}", other.kind, other.id);
                    state = state.add_support(other.id);
                }
            }

            let signal = (a.kind == BodyKind::Goal || b.kind == BodyKind::Goal)
                .then_some(LevelSignal::LevelComplete);
            (state, signal)
        }
        ContactEvent::End { a, b } => {
            let state = match player_pair(a, b) {
                // Matched against what was counted at begin, not the
                // current geometry, so a slide can't strand a support
                Some((_, other)) if state.is_supported_by(other.id) => {
                    let state = state.remove_support(other.id);
                    if !state.grounded() {
                        log::debug!("Left the ground ({:?} {:?})", other.kind, other.id);
                    }
                    state
                }
                _ => state,
            };
            (state, None)
        }
    }
}
