// Level action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Everything the player can ask the box to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

/// Default keyboard bindings: arrows to push, Space or Up to jump
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::ArrowUp, Action::Jump),
        (KeyCode::Space, Action::Jump),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_has_two_keys() {
        let jump_keys: Vec<_> = default_bindings()
            .into_iter()
            .filter(|(_, action)| *action == Action::Jump)
            .map(|(key, _)| key)
            .collect();

        assert_eq!(jump_keys.len(), 2);
        assert!(jump_keys.contains(&KeyCode::Space));
        assert!(jump_keys.contains(&KeyCode::ArrowUp));
    }

    #[test]
    fn test_no_duplicate_keys() {
        let mut seen = std::collections::HashSet::new();
        for (key, _) in default_bindings() {
            assert!(seen.insert(key), "Duplicate key in default bindings");
        }
    }
}
