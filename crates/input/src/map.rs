//! Key mapping from terminal events to player intents.
//!
//! This is the only place device identity exists: everything past here
//! works in `(PlayerSlot, Intent)` pairs. Player one plays on the letter
//! cluster, player two on the arrow cluster; in single-player mode the
//! driver folds both slots onto the same engine.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use duotris_types::{Intent, PlayerSlot};

/// Map a key event to a player slot and intent.
pub fn map_key(key: KeyEvent) -> Option<(PlayerSlot, Intent)> {
    use PlayerSlot::{One, Two};

    match key.code {
        // Player one: letters.
        KeyCode::Char('a') | KeyCode::Char('A') => Some((One, Intent::MoveLeft)),
        KeyCode::Char('d') | KeyCode::Char('D') => Some((One, Intent::MoveRight)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some((One, Intent::SoftDrop)),
        KeyCode::Char('w') | KeyCode::Char('W') => Some((One, Intent::RotateCw)),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some((One, Intent::RotateCcw)),
        KeyCode::Char('x') | KeyCode::Char('X') => Some((One, Intent::HardDrop)),
        KeyCode::Char('c') | KeyCode::Char('C') => Some((One, Intent::Hold)),

        // Player two: arrow cluster.
        KeyCode::Left => Some((Two, Intent::MoveLeft)),
        KeyCode::Right => Some((Two, Intent::MoveRight)),
        KeyCode::Down => Some((Two, Intent::SoftDrop)),
        KeyCode::Up => Some((Two, Intent::RotateCw)),
        KeyCode::Char(',') => Some((Two, Intent::RotateCcw)),
        KeyCode::Char('.') => Some((Two, Intent::HardDrop)),
        KeyCode::Char('/') => Some((Two, Intent::Hold)),

        // Match-level keys; slot is immaterial.
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
            Some((One, Intent::Pause))
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some((One, Intent::Restart)),

        _ => None,
    }
}

/// Quit keys, checked by the driver before any mapping (Ctrl-C would
/// otherwise read as a hold).
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_cluster_drives_player_one() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('a'))),
            Some((PlayerSlot::One, Intent::MoveLeft))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('d'))),
            Some((PlayerSlot::One, Intent::MoveRight))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('s'))),
            Some((PlayerSlot::One, Intent::SoftDrop))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('x'))),
            Some((PlayerSlot::One, Intent::HardDrop))
        );
    }

    #[test]
    fn arrow_cluster_drives_player_two() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Left)),
            Some((PlayerSlot::Two, Intent::MoveLeft))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Right)),
            Some((PlayerSlot::Two, Intent::MoveRight))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Up)),
            Some((PlayerSlot::Two, Intent::RotateCw))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('/'))),
            Some((PlayerSlot::Two, Intent::Hold))
        );
    }

    #[test]
    fn unmapped_keys_produce_nothing() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('z'))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Tab)), None);
    }

    #[test]
    fn quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
    }
}
