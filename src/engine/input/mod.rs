// Input handling
//
// - `action`: level actions and default key bindings
// - `config`: key binding configuration and remapping
// - `listener`: keyboard subscription that turns winit key events into actions
//
// ## Usage Example
//
// ```rust
// let listener = KeyboardListener::attach(InputConfig::default());
//
// // In the event loop
// if let Some(action) = listener.process_keyboard_event(&key_event) {
//     session.perform(action);
// }
//
// // At teardown
// listener.detach();
// ```

pub mod action;
pub mod config;
pub mod listener;

pub use action::Action;
pub use config::InputConfig;
pub use listener::KeyboardListener;
