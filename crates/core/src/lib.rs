//! Game engine core - pure, deterministic, and I/O-free.
//!
//! This crate contains every rule of the game and nothing else: no
//! rendering, no input devices, no timers. The driver feeds it discrete
//! intents and drop ticks; everything runs synchronously to completion.
//!
//! # Module structure
//!
//! - [`board`]: the 20x10 grid with collision, merge, line clearing, and
//!   garbage injection
//! - [`shape`]: the seven-piece catalog with pure matrix rotation
//! - [`rng`]: seeded LCG behind shape draws and garbage composition
//! - [`scoring`]: batch scores, garbage signals, speed progression
//! - [`player`]: the per-player engine (spawn, move, rotate, hold, drop,
//!   lock)
//! - [`session`]: the match state machine and the two-player coordinator
//!   (garbage handshake, shared speed)
//!
//! # Rules
//!
//! - Pieces are drawn uniformly and independently; there is no bag.
//! - Rotation has no wall kicks: a rotation that collides is discarded.
//! - A batch of n cleared rows scores `10 + 20 + ... + 10n` and arms a
//!   garbage signal of `n - 1`.
//! - Each drop tick, the player with the larger pending signal sends the
//!   difference to the opponent as near-full rows with one random gap.
//! - The combined line total speeds the shared drop timer up in 95 ms
//!   steps at every ten lines, from 1000 ms down to 145 ms.
//! - A piece spawning into occupied cells ends the match; nothing else
//!   does.
//!
//! # Example
//!
//! ```
//! use duotris_core::Session;
//! use duotris_types::{Intent, Phase};
//!
//! let mut session = Session::new(12345);
//! session.begin(2);
//! assert_eq!(session.phase(), Phase::Normal);
//!
//! session.apply(0, Intent::MoveLeft);
//! session.apply(1, Intent::RotateCw);
//! session.tick();
//! ```

pub mod board;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shape;

pub use duotris_types as types;

// Re-export the primary surface for convenience.
pub use board::Board;
pub use player::{Player, StepOutcome};
pub use rng::SimpleRng;
pub use session::{MatchState, Session};
pub use shape::{random_shape, Shape};
