//! duotris (workspace facade crate).
//!
//! Re-exports the workspace crates under stable module names; the binary,
//! integration tests, and benches all go through this surface.

pub use duotris_core as core;
pub use duotris_input as input;
pub use duotris_term as term;
pub use duotris_types as types;
