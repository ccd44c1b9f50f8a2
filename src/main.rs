//! Terminal duel runner (default binary).
//!
//! One cooperative loop: poll keyboard events with a frame timeout, feed
//! mapped intents through the auto-repeat handler into the session, and
//! fire the session's drop tick whenever its (mutable) interval elapses.
//! Which keys do what depends entirely on the match phase.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use duotris::core::Session;
use duotris::input::{map_key, should_quit, InputHandler};
use duotris::term::{DuelView, TerminalRenderer, UiState, Viewport, PAUSE_MENU_ITEMS, START_MENU_ITEMS};
use duotris::types::{Intent, Phase, PlayerSlot, FRAME_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut session = Session::new(wall_clock_seed());
    let mut ui = UiState::default();
    let view = DuelView::default();
    let mut input = InputHandler::new();

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();
    let mut drop_ms: u32 = 0;

    loop {
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&session, ui, Viewport::new(width, height));
        term.draw(&fb)?;

        let timeout = frame
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if should_quit(key) {
                    return Ok(());
                }
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        handle_key(&mut session, &mut ui, &mut input, key);
                    }
                    KeyEventKind::Release => {
                        if let Some((slot, intent)) = map_key(key) {
                            input.note_release(slot, intent);
                        }
                    }
                }
            }
        }

        if last_frame.elapsed() >= frame {
            last_frame = Instant::now();

            if session.phase() == Phase::Normal {
                for (slot, intent) in input.update(FRAME_MS) {
                    let player = fold_slot(&session, slot);
                    session.apply(player, intent);
                }

                drop_ms += FRAME_MS;
                if drop_ms >= session.drop_interval_ms() {
                    drop_ms = 0;
                    session.tick();
                }
            }
        }
    }
}

fn handle_key(session: &mut Session, ui: &mut UiState, input: &mut InputHandler, key: KeyEvent) {
    match session.phase() {
        Phase::Starting => {
            if key.kind != KeyEventKind::Press {
                return;
            }
            match key.code {
                KeyCode::Up | KeyCode::Char('w') => {
                    ui.cursor = ui.cursor.checked_sub(1).unwrap_or(START_MENU_ITEMS.len() - 1);
                }
                KeyCode::Down | KeyCode::Char('s') => {
                    ui.cursor = (ui.cursor + 1) % START_MENU_ITEMS.len();
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    session.begin(ui.cursor + 1);
                    input.reset();
                }
                _ => {}
            }
        }
        Phase::Normal => {
            let Some((slot, intent)) = map_key(key) else {
                return;
            };
            let player = fold_slot(session, slot);
            match intent {
                Intent::MoveLeft | Intent::MoveRight | Intent::SoftDrop => {
                    // Repeatable: route through the handler so a refresh of
                    // an already-held key does not double-fire.
                    if let Some(first) = input.note_press(slot, intent) {
                        session.apply(player, first);
                    }
                }
                Intent::Pause => {
                    if key.kind == KeyEventKind::Press {
                        session.pause();
                        ui.cursor = 0;
                        input.reset();
                    }
                }
                Intent::Restart => {
                    if key.kind == KeyEventKind::Press {
                        session.restart();
                        ui.cursor = 0;
                        input.reset();
                    }
                }
                _ => {
                    // One-shot commands ignore terminal key repeat.
                    if key.kind == KeyEventKind::Press {
                        session.apply(player, intent);
                    }
                }
            }
        }
        Phase::Paused => {
            if key.kind != KeyEventKind::Press {
                return;
            }
            match key.code {
                KeyCode::Up | KeyCode::Char('w') => {
                    ui.cursor = ui.cursor.checked_sub(1).unwrap_or(PAUSE_MENU_ITEMS.len() - 1);
                }
                KeyCode::Down | KeyCode::Char('s') => {
                    ui.cursor = (ui.cursor + 1) % PAUSE_MENU_ITEMS.len();
                }
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    session.resume();
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if ui.cursor == 0 {
                        session.resume();
                    } else {
                        session.restart();
                    }
                    ui.cursor = 0;
                }
                _ => {}
            }
        }
        Phase::GameOver => {
            if key.kind != KeyEventKind::Press {
                return;
            }
            if matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter) {
                session.restart();
                ui.cursor = 0;
                input.reset();
            }
        }
    }
}

/// In a solo match both keyboard layouts drive the single player.
fn fold_slot(session: &Session, slot: PlayerSlot) -> usize {
    if session.player_count() <= 1 {
        0
    } else {
        slot.index()
    }
}

/// Seed the match from the wall clock; every launch plays differently.
fn wall_clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos().wrapping_add(elapsed.as_secs() as u32))
        .unwrap_or(1)
}
