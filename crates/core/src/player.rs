//! Player engine: one board plus the active-piece state machine.
//!
//! Every intent handler is silent-reject: an illegal move, rotation, or
//! hold leaves the player untouched, and callers learn nothing beyond the
//! unchanged query state. The one condition that matters beyond this player
//! is a blocked spawn, surfaced as [`StepOutcome::ToppedOut`]; the session
//! turns it into the match-wide game over.
//!
//! A player always has an active piece: the constructor performs the first
//! spawn, so queries never observe a pieceless engine.

use duotris_types::BOARD_COLS;

use crate::board::Board;
use crate::rng::SimpleRng;
use crate::scoring;
use crate::shape::{random_shape, Shape};

/// Result of one descend-or-lock step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The piece moved down one row.
    Descended,
    /// Contact below: the piece merged, lines resolved, and the next piece
    /// spawned.
    Locked { cleared: u32 },
    /// The next piece spawned into occupied cells. The match is lost; the
    /// colliding piece stays in place for display.
    ToppedOut,
}

/// One player's complete engine state.
#[derive(Debug, Clone)]
pub struct Player {
    board: Board,
    rng: SimpleRng,
    active: Shape,
    x: i8,
    y: i8,
    next: Shape,
    following: Shape,
    held: Option<Shape>,
    hold_used: bool,
    score: u32,
    lines: u32,
    garbage_signal: u32,
}

impl Player {
    /// Fresh player with an empty board and the first piece already live.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = random_shape(&mut rng);
        let following = random_shape(&mut rng);

        let mut player = Self {
            board: Board::new(),
            rng,
            active: next,
            x: 0,
            y: 0,
            next,
            following,
            held: None,
            hold_used: false,
            score: 0,
            lines: 0,
            garbage_signal: 0,
        };
        // An empty board cannot block the first spawn.
        player.spawn_next();
        player
    }

    /// Promote the lookahead queue into a freshly centered active piece.
    /// Returns false iff the new placement already collides - the sole
    /// game-over trigger.
    fn spawn_next(&mut self) -> bool {
        self.active = self.next;
        self.next = self.following;
        self.following = random_shape(&mut self.rng);

        self.x = Self::centered_x(&self.active);
        self.y = 0;
        self.hold_used = false;

        !self.board.collides(&self.active, self.x, self.y)
    }

    fn centered_x(shape: &Shape) -> i8 {
        ((BOARD_COLS - shape.width()) / 2) as i8
    }

    /// Shift one column left (-1) or right (+1).
    ///
    /// The candidate offset is clamped to `[0, cols - width]` before the
    /// collision check, so the piece never leaves the board horizontally.
    /// Returns false (and changes nothing) when the shift is illegal.
    pub fn try_move(&mut self, dir: i8) -> bool {
        let max_x = (BOARD_COLS - self.active.width()) as i8;
        let candidate = (self.x + dir).clamp(0, max_x);
        if candidate == self.x || self.board.collides(&self.active, candidate, self.y) {
            return false;
        }
        self.x = candidate;
        true
    }

    /// Rotate in place, keeping the pre-rotation shape when the rotated
    /// form collides at the current offset. There is no wall-kick search;
    /// rotation simply fails near walls and stacks.
    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        let rotated = if clockwise {
            self.active.rotate_cw()
        } else {
            self.active.rotate_ccw()
        };
        if self.board.collides(&rotated, self.x, self.y) {
            return false;
        }
        self.active = rotated;
        true
    }

    /// Set the active piece aside, usable at most once per spawn.
    ///
    /// With the hold slot empty, the active piece is stashed and the
    /// lookahead queue is consumed (which, like any spawn, can top the
    /// player out). With the slot occupied, held and active swap directly
    /// with no queue advance. Both branches re-center at the top. Returns
    /// false only for a blocked spawn.
    pub fn hold(&mut self) -> bool {
        if self.hold_used {
            return true;
        }

        let spawn_ok = match self.held.take() {
            Some(stash) => {
                self.held = Some(self.active);
                self.active = stash;
                true
            }
            None => {
                self.held = Some(self.active);
                self.spawn_next()
            }
        };

        self.x = Self::centered_x(&self.active);
        self.y = 0;
        self.hold_used = true;
        spawn_ok
    }

    /// One gravity step: descend a row, or lock on contact.
    ///
    /// Locking merges the piece into the board, resolves completed lines
    /// (cascading batch score, line total, garbage signal), and spawns the
    /// next piece. This is the only path that produces a lock.
    pub fn step_down(&mut self) -> StepOutcome {
        if !self.board.collides(&self.active, self.x, self.y + 1) {
            self.y += 1;
            return StepOutcome::Descended;
        }

        self.board.merge(&self.active, self.x, self.y);
        let cleared = self.board.clear_completed_lines();
        if cleared > 0 {
            self.score += scoring::batch_score(cleared);
            self.lines += cleared;
            self.garbage_signal = scoring::garbage_signal(cleared);
        }

        if self.spawn_next() {
            StepOutcome::Locked { cleared }
        } else {
            StepOutcome::ToppedOut
        }
    }

    /// Repeat the single-step descend-or-lock logic until this piece locks
    /// (or the spawn that follows is blocked) within this call.
    pub fn hard_drop(&mut self) -> StepOutcome {
        loop {
            match self.step_down() {
                StepOutcome::Descended => continue,
                outcome => return outcome,
            }
        }
    }

    /// Consume the pending garbage signal (lines cleared by the most recent
    /// lock, minus one), resetting it to zero.
    pub fn take_garbage_signal(&mut self) -> u32 {
        std::mem::take(&mut self.garbage_signal)
    }

    /// Accept `count` garbage rows from the opponent.
    pub fn receive_garbage(&mut self, count: u32) {
        self.board.inject_garbage(count, &mut self.rng);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Shape {
        &self.active
    }

    /// Active piece offset `(x, y)`, top-left anchor.
    pub fn position(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    pub fn next(&self) -> &Shape {
        &self.next
    }

    pub fn following(&self) -> &Shape {
        &self.following
    }

    pub fn held(&self) -> Option<&Shape> {
        self.held.as_ref()
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub fn set_garbage_signal(&mut self, signal: u32) {
        self.garbage_signal = signal;
    }

    #[cfg(test)]
    pub fn set_lines(&mut self, lines: u32) {
        self.lines = lines;
    }
}
