//! Held-intent auto-repeat, one lane per player.
//!
//! Movement and soft drop repeat at a fixed 100 ms cadence while held.
//! Terminals do not reliably deliver key-release events, so each lane also
//! auto-releases after a short quiet period; the terminal's own key repeat
//! keeps a genuinely held key alive by refreshing the press.
//!
//! Timing is driven entirely by the caller's elapsed milliseconds, which
//! keeps the handler deterministic under test.

use arrayvec::ArrayVec;
use duotris_types::{Intent, PlayerSlot, REPEAT_DELAY_MS};

// Quiet period after which a held direction is presumed released.
const AUTO_RELEASE_MS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    None,
    Left,
    Right,
}

impl Horizontal {
    fn intent(self) -> Option<Intent> {
        match self {
            Horizontal::None => None,
            Horizontal::Left => Some(Intent::MoveLeft),
            Horizontal::Right => Some(Intent::MoveRight),
        }
    }
}

/// Repeat state for one player slot.
#[derive(Debug, Clone)]
struct Lane {
    horizontal: Horizontal,
    horizontal_timer: u32,
    down_held: bool,
    down_timer: u32,
    idle_ms: u32,
}

impl Lane {
    fn new() -> Self {
        Self {
            horizontal: Horizontal::None,
            horizontal_timer: 0,
            down_held: false,
            down_timer: 0,
            idle_ms: 0,
        }
    }

    fn release_all(&mut self) {
        self.horizontal = Horizontal::None;
        self.horizontal_timer = 0;
        self.down_held = false;
        self.down_timer = 0;
    }
}

/// Auto-repeat tracker for both players.
#[derive(Debug, Clone)]
pub struct InputHandler {
    lanes: [Lane; 2],
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            lanes: [Lane::new(), Lane::new()],
        }
    }

    /// Record a press of a repeatable intent.
    ///
    /// Returns the intent to apply immediately when this press newly
    /// engages a direction; a refresh of an already-held direction returns
    /// `None` (the repeat timer keeps its phase). Non-repeatable intents
    /// are ignored here and should be applied directly by the caller.
    pub fn note_press(&mut self, slot: PlayerSlot, intent: Intent) -> Option<Intent> {
        let lane = &mut self.lanes[slot.index()];
        lane.idle_ms = 0;

        match intent {
            Intent::MoveLeft | Intent::MoveRight => {
                let direction = if intent == Intent::MoveLeft {
                    Horizontal::Left
                } else {
                    Horizontal::Right
                };
                if lane.horizontal == direction {
                    return None;
                }
                lane.horizontal = direction;
                lane.horizontal_timer = 0;
                Some(intent)
            }
            Intent::SoftDrop => {
                if lane.down_held {
                    return None;
                }
                lane.down_held = true;
                lane.down_timer = 0;
                Some(intent)
            }
            _ => None,
        }
    }

    /// Record a release of a repeatable intent.
    pub fn note_release(&mut self, slot: PlayerSlot, intent: Intent) {
        let lane = &mut self.lanes[slot.index()];
        match intent {
            Intent::MoveLeft if lane.horizontal == Horizontal::Left => {
                lane.horizontal = Horizontal::None;
                lane.horizontal_timer = 0;
            }
            Intent::MoveRight if lane.horizontal == Horizontal::Right => {
                lane.horizontal = Horizontal::None;
                lane.horizontal_timer = 0;
            }
            Intent::SoftDrop => {
                lane.down_held = false;
                lane.down_timer = 0;
            }
            _ => {}
        }
    }

    /// Advance timers by `elapsed_ms`, emitting one repeat per elapsed
    /// 100 ms interval for each held direction.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<(PlayerSlot, Intent), 16> {
        let mut intents = ArrayVec::new();

        for (index, lane) in self.lanes.iter_mut().enumerate() {
            let slot = if index == 0 {
                PlayerSlot::One
            } else {
                PlayerSlot::Two
            };

            lane.idle_ms = lane.idle_ms.saturating_add(elapsed_ms);
            if lane.idle_ms > AUTO_RELEASE_MS {
                lane.release_all();
                continue;
            }

            if let Some(intent) = lane.horizontal.intent() {
                lane.horizontal_timer += elapsed_ms;
                while lane.horizontal_timer >= REPEAT_DELAY_MS {
                    lane.horizontal_timer -= REPEAT_DELAY_MS;
                    let _ = intents.try_push((slot, intent));
                }
            }

            if lane.down_held {
                lane.down_timer += elapsed_ms;
                while lane.down_timer >= REPEAT_DELAY_MS {
                    lane.down_timer -= REPEAT_DELAY_MS;
                    let _ = intents.try_push((slot, Intent::SoftDrop));
                }
            }
        }

        intents
    }

    /// Drop all held state (phase changes, focus loss).
    pub fn reset(&mut self) {
        for lane in &mut self.lanes {
            lane.release_all();
            lane.idle_ms = 0;
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_press_fires_immediately_then_repeats_on_cadence() {
        let mut handler = InputHandler::new();

        assert_eq!(
            handler.note_press(PlayerSlot::One, Intent::MoveLeft),
            Some(Intent::MoveLeft)
        );

        // Before the repeat delay: silence.
        assert!(handler.update(99).is_empty());
        // Crossing it: one repeat.
        assert_eq!(
            handler.update(1).as_slice(),
            &[(PlayerSlot::One, Intent::MoveLeft)]
        );
    }

    #[test]
    fn refresh_of_a_held_direction_does_not_refire() {
        let mut handler = InputHandler::new();
        assert!(handler.note_press(PlayerSlot::One, Intent::MoveRight).is_some());
        assert!(handler.note_press(PlayerSlot::One, Intent::MoveRight).is_none());
        // The refresh keeps the repeat phase: 99 + 1 ms still fires once.
        assert!(handler.update(99).is_empty());
        assert_eq!(handler.update(1).len(), 1);
    }

    #[test]
    fn release_stops_repeats() {
        let mut handler = InputHandler::new();
        handler.note_press(PlayerSlot::Two, Intent::SoftDrop);
        assert_eq!(handler.update(100).len(), 1);

        handler.note_release(PlayerSlot::Two, Intent::SoftDrop);
        assert!(handler.update(100).is_empty());
    }

    #[test]
    fn lanes_are_independent() {
        let mut handler = InputHandler::new();
        handler.note_press(PlayerSlot::One, Intent::MoveLeft);
        handler.note_press(PlayerSlot::Two, Intent::MoveRight);

        let intents = handler.update(100);
        assert!(intents.contains(&(PlayerSlot::One, Intent::MoveLeft)));
        assert!(intents.contains(&(PlayerSlot::Two, Intent::MoveRight)));

        handler.note_release(PlayerSlot::One, Intent::MoveLeft);
        // Keep player two's key alive past the quiet window.
        handler.note_press(PlayerSlot::Two, Intent::MoveRight);
        let intents = handler.update(100);
        assert_eq!(intents.as_slice(), &[(PlayerSlot::Two, Intent::MoveRight)]);
    }

    #[test]
    fn quiet_lane_auto_releases() {
        let mut handler = InputHandler::new();
        handler.note_press(PlayerSlot::One, Intent::MoveLeft);

        // 100ms: one repeat; 60ms more with no refresh: past the auto
        // release threshold, the direction drops.
        assert_eq!(handler.update(100).len(), 1);
        assert!(handler.update(60).is_empty());
        assert!(handler.update(100).is_empty());
    }

    #[test]
    fn refresh_extends_the_hold() {
        let mut handler = InputHandler::new();
        handler.note_press(PlayerSlot::One, Intent::MoveLeft);
        assert_eq!(handler.update(100).len(), 1);

        // Terminal key repeat refreshes the press; the hold survives well
        // past the auto-release window.
        handler.note_press(PlayerSlot::One, Intent::MoveLeft);
        assert_eq!(handler.update(100).len(), 1);
        handler.note_press(PlayerSlot::One, Intent::MoveLeft);
        assert_eq!(handler.update(100).len(), 1);
    }

    #[test]
    fn switching_directions_fires_immediately() {
        let mut handler = InputHandler::new();
        assert!(handler.note_press(PlayerSlot::One, Intent::MoveLeft).is_some());
        assert_eq!(
            handler.note_press(PlayerSlot::One, Intent::MoveRight),
            Some(Intent::MoveRight)
        );
        // The new direction repeats; the old one is gone.
        assert_eq!(
            handler.update(100).as_slice(),
            &[(PlayerSlot::One, Intent::MoveRight)]
        );
    }

    #[test]
    fn reset_clears_everything() {
        let mut handler = InputHandler::new();
        handler.note_press(PlayerSlot::One, Intent::MoveLeft);
        handler.note_press(PlayerSlot::Two, Intent::SoftDrop);
        handler.reset();
        assert!(handler.update(200).is_empty());
    }

    #[test]
    fn non_repeatable_intents_are_ignored() {
        let mut handler = InputHandler::new();
        assert!(handler.note_press(PlayerSlot::One, Intent::RotateCw).is_none());
        assert!(handler.note_press(PlayerSlot::One, Intent::HardDrop).is_none());
        assert!(handler.update(200).is_empty());
    }
}
