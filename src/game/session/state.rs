// Per-run session state

use std::collections::BTreeSet;

use crate::game::level::BodyId;

/// Mutable state of one run of the level
///
/// Position and velocity belong to the physics engine; this only holds what
/// the policies derive from engine notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    grounded: bool,
    /// Bodies below the player that are currently touching it
    supports: BTreeSet<BodyId>,
    score: i64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the player may jump
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Number of supporting contacts
    #[cfg(test)]
    pub fn support_count(&self) -> usize {
        self.supports.len()
    }

    pub fn is_supported_by(&self, body: BodyId) -> bool {
        self.supports.contains(&body)
    }

    pub(super) fn add_support(mut self, body: BodyId) -> Self {
        self.supports.insert(body);
        self.grounded = true;
        self
    }

    /// Drops a support; only clears `grounded` once none remain
    pub(super) fn remove_support(mut self, body: BodyId) -> Self {
        if self.supports.remove(&body) && self.supports.is_empty() {
            self.grounded = false;
        }
        self
    }

    /// The player has left the ground on its own (jump)
    pub(super) fn lift_off(mut self) -> Self {
        self.grounded = false;
        self
    }

    pub(super) fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SessionState::new();
        assert!(!state.grounded());
        assert_eq!(state.score(), 0);
        assert_eq!(state.support_count(), 0);
    }

    #[test]
    fn test_support_is_idempotent_per_body() {
        let state = SessionState::new()
            .add_support(BodyId(1))
            .add_support(BodyId(1));
        assert_eq!(state.support_count(), 1);

        let state = state.remove_support(BodyId(1));
        assert!(!state.grounded());
    }

    #[test]
    fn test_lift_off_keeps_supports() {
        let state = SessionState::new().add_support(BodyId(1)).lift_off();
        assert!(!state.grounded());
        assert!(state.is_supported_by(BodyId(1)));
    }

    #[test]
    fn test_removing_unknown_support_keeps_grounded() {
        let state = SessionState::new()
            .add_support(BodyId(1))
            .remove_support(BodyId(9));
        assert!(state.grounded());
    }
}
