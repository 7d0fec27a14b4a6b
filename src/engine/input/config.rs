// Key binding configuration

use super::action::{default_bindings, Action};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Maps keys to level actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<KeyCode, Action>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(KeyCode, Action)>) -> Self {
        let mut config = Self::new();
        for (key, action) in bindings {
            config.bind(key, action);
        }
        config
    }

    /// Bind a key to an action, replacing whatever it was bound to
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        if let Some(previous) = self.bindings.insert(key, action) {
            log::debug!("{:?} rebound from {:?} to {:?}", key, previous, action);
        }
    }

    /// Get the action bound to a key
    pub fn get_action(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InputConfig::default();

        assert_eq!(config.get_action(KeyCode::Space), Some(Action::Jump));
        assert_eq!(config.get_action(KeyCode::ArrowUp), Some(Action::Jump));
        assert_eq!(config.get_action(KeyCode::ArrowLeft), Some(Action::MoveLeft));
        assert_eq!(config.get_action(KeyCode::ArrowRight), Some(Action::MoveRight));
        assert_eq!(config.get_action(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_rebind_key() {
        let mut config = InputConfig::new();
        config.bind(KeyCode::KeyA, Action::MoveLeft);
        config.bind(KeyCode::KeyA, Action::MoveRight);

        assert_eq!(config.get_action(KeyCode::KeyA), Some(Action::MoveRight));
    }

    #[test]
    fn test_custom_bindings_replace_defaults() {
        let config = InputConfig::from_bindings(vec![(KeyCode::KeyW, Action::Jump)]);

        assert_eq!(config.get_action(KeyCode::KeyW), Some(Action::Jump));
        assert_eq!(config.get_action(KeyCode::Space), None);
    }
}
