//! Keyboard input adapter (engine-facing).
//!
//! Maps `crossterm` key events onto `(PlayerSlot, Intent)` pairs and
//! supplies held-key auto-repeat for the two shared-keyboard layouts. The
//! engine itself never sees a key code.

pub mod handler;
pub mod map;

pub use duotris_types as types;

pub use handler::InputHandler;
pub use map::{map_key, should_quit};
