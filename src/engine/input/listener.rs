// Keyboard listener - turns host key events into level actions

use super::action::Action;
use super::config::InputConfig;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Subscription to the host keyboard for the lifetime of a session
///
/// Key-down is edge triggered per host event: OS key repeat arrives as more
/// key-downs and is passed through untouched.
#[derive(Debug)]
pub struct KeyboardListener {
    config: InputConfig,
    attached: bool,
}

impl KeyboardListener {
    /// Create a listener that is already attached
    pub fn attach(config: InputConfig) -> Self {
        Self {
            config,
            attached: true,
        }
    }

    /// Stop delivering actions. Safe to call more than once.
    pub fn detach(&mut self) {
        if self.attached {
            self.attached = false;
            log::debug!("Keyboard listener detached");
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&self, event: &KeyEvent) -> Option<Action> {
        if event.state != ElementState::Pressed {
            return None;
        }

        match event.physical_key {
            PhysicalKey::Code(code) => self.key_down(code),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    /// Map a pressed key to its action, if bound and still attached
    pub fn key_down(&self, code: KeyCode) -> Option<Action> {
        if !self.attached {
            log::trace!("Ignoring {:?}: listener detached", code);
            return None;
        }
        self.config.get_action(code)
    }
}

impl Default for KeyboardListener {
    fn default() -> Self {
        Self::attach(InputConfig::default())
    }
}
