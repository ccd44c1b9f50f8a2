//! Terminal rendering adapter.
//!
//! A small styled framebuffer, a raw-mode renderer that flushes it, and the
//! pure view that lays out a match: board panels, status columns, menus,
//! and overlays. Only `renderer` touches the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use duotris_types as types;

pub use fb::{CellStyle, FrameBuffer, Rgb, TermCell};
pub use game_view::{DuelView, UiState, Viewport, PAUSE_MENU_ITEMS, START_MENU_ITEMS};
pub use renderer::TerminalRenderer;
