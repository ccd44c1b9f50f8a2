//! DuelView: maps a `Session` onto a terminal framebuffer.
//!
//! Pure (no I/O), so layout and phase screens are unit-testable. The
//! driver owns the transient menu cursor and passes it in as [`UiState`].

use duotris_core::{Player, Session, Shape};
use duotris_types::{Phase, PieceKind, BOARD_COLS, BOARD_ROWS, BORDER_COLS, CELL_COLS};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Driver-owned UI state: the pointer position of whichever menu is up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    pub cursor: usize,
}

pub const START_MENU_ITEMS: [&str; 2] = ["1 Player", "2 Player"];
pub const PAUSE_MENU_ITEMS: [&str; 2] = ["Resume", "Quit"];

/// Renders boards, status panels, menus, and overlays.
pub struct DuelView {
    /// Board cell width in terminal columns (cells are one row tall).
    cell_w: u16,
}

impl Default for DuelView {
    fn default() -> Self {
        Self { cell_w: CELL_COLS }
    }
}

const STATUS_W: u16 = 14;
const PANEL_GAP: u16 = 2;

impl DuelView {
    pub fn new(cell_w: u16) -> Self {
        Self { cell_w }
    }

    /// Render the current session into a fresh framebuffer.
    pub fn render(&self, session: &Session, ui: UiState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        match session.phase() {
            Phase::Starting => self.draw_start_menu(&mut fb, ui, viewport),
            Phase::Normal => self.draw_match(&mut fb, session, viewport),
            Phase::Paused => {
                self.draw_match(&mut fb, session, viewport);
                self.draw_pause_menu(&mut fb, ui, viewport);
            }
            Phase::GameOver => {
                self.draw_match(&mut fb, session, viewport);
                self.draw_center_text(&mut fb, viewport, -1, "GAME OVER!", true);
                self.draw_center_text(&mut fb, viewport, 1, "r: new game   esc: quit", false);
            }
        }

        fb
    }

    fn frame_w(&self) -> u16 {
        BOARD_COLS as u16 * self.cell_w + 2 * BORDER_COLS
    }

    fn frame_h(&self) -> u16 {
        BOARD_ROWS as u16 + 2 * BORDER_COLS
    }

    fn draw_match(&self, fb: &mut FrameBuffer, session: &Session, viewport: Viewport) {
        let count = session.player_count().max(1) as u16;
        let lane_w = viewport.width / count;
        let panel_w = self.frame_w() + PANEL_GAP + STATUS_W;

        for (index, player) in session.players().iter().enumerate() {
            let lane_x = lane_w * index as u16;
            let origin_x = lane_x + lane_w.saturating_sub(panel_w) / 2;
            let origin_y = viewport.height.saturating_sub(self.frame_h()) / 2;
            self.draw_player(fb, player, index, origin_x, origin_y);
        }
    }

    fn draw_player(
        &self,
        fb: &mut FrameBuffer,
        player: &Player,
        index: usize,
        origin_x: u16,
        origin_y: u16,
    ) {
        let border = CellStyle::plain(Rgb::new(200, 200, 200));
        self.draw_border(fb, origin_x, origin_y, self.frame_w(), self.frame_h(), border);

        // Locked cells, with a dim dot grid behind the empty ones.
        for y in 0..BOARD_ROWS as i8 {
            for x in 0..BOARD_COLS as i8 {
                match player.board().get(x, y).unwrap_or(None) {
                    Some(kind) => {
                        self.draw_board_cell(fb, origin_x, origin_y, x as u16, y as u16, kind)
                    }
                    None => self.draw_empty_cell(fb, origin_x, origin_y, x as u16, y as u16),
                }
            }
        }

        // Active piece on top.
        let (px, py) = player.position();
        for (r, c) in player.active().occupied() {
            let x = px + c as i8;
            let y = py + r as i8;
            if x >= 0 && x < BOARD_COLS as i8 && y >= 0 && y < BOARD_ROWS as i8 {
                self.draw_board_cell(
                    fb,
                    origin_x,
                    origin_y,
                    x as u16,
                    y as u16,
                    player.active().kind(),
                );
            }
        }

        self.draw_status(fb, player, index, origin_x + self.frame_w() + PANEL_GAP, origin_y);
    }

    fn draw_status(
        &self,
        fb: &mut FrameBuffer,
        player: &Player,
        index: usize,
        x: u16,
        mut y: u16,
    ) {
        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200));

        fb.put_str(x, y, &format!("PLAYER {}", index + 1), label);
        y += 2;

        fb.put_str(x, y, "SCORE", label);
        fb.put_str(x + 6, y, &format!("{}", player.score()), value);
        y += 1;
        fb.put_str(x, y, "LINES", label);
        fb.put_str(x + 6, y, &format!("{}", player.lines()), value);
        y += 2;

        fb.put_str(x, y, "HOLD", label);
        y += 1;
        y = match player.held() {
            Some(shape) => self.draw_preview(fb, shape, x, y),
            None => {
                fb.put_str(x, y, "-", value);
                y + 1
            }
        };
        y += 1;

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        y = self.draw_preview(fb, player.next(), x, y);
        y += 1;
        self.draw_preview(fb, player.following(), x, y);
    }

    /// Draw a shape preview at `(x, y)`; returns the row below it.
    fn draw_preview(&self, fb: &mut FrameBuffer, shape: &Shape, x: u16, y: u16) -> u16 {
        for (r, c) in shape.occupied() {
            let style = CellStyle::plain(kind_color(shape.kind()));
            fb.fill_rect(
                x + c as u16 * self.cell_w,
                y + r as u16,
                self.cell_w,
                1,
                '█',
                style,
            );
        }
        y + shape.height() as u16
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        origin_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(kind_color(kind))
        };
        let px = origin_x + BORDER_COLS + x * self.cell_w;
        let py = origin_y + BORDER_COLS + y;
        fb.fill_rect(px, py, self.cell_w, 1, '█', style);
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, origin_x: u16, origin_y: u16, x: u16, y: u16) {
        let style = CellStyle {
            dim: true,
            ..CellStyle::plain(Rgb::new(90, 90, 100))
        };
        let px = origin_x + BORDER_COLS + x * self.cell_w;
        let py = origin_y + BORDER_COLS + y;
        fb.fill_rect(px, py, self.cell_w, 1, ' ', style);
        fb.put_char(px, py, '·', style);
    }

    fn draw_border(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        style: CellStyle,
    ) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_start_menu(&self, fb: &mut FrameBuffer, ui: UiState, viewport: Viewport) {
        self.draw_menu(
            fb,
            viewport,
            "DUOTRIS",
            &START_MENU_ITEMS,
            ui.cursor,
        );
        self.draw_center_text(
            fb,
            viewport,
            (START_MENU_ITEMS.len() as i16) + 4,
            "up/down: select   enter: start   esc: quit",
            false,
        );
    }

    fn draw_pause_menu(&self, fb: &mut FrameBuffer, ui: UiState, viewport: Viewport) {
        self.draw_menu(fb, viewport, "Paused", &PAUSE_MENU_ITEMS, ui.cursor);
    }

    /// A boxed pointer menu, centered in the viewport.
    fn draw_menu(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        title: &str,
        items: &[&str],
        cursor: usize,
    ) {
        let widest = items
            .iter()
            .map(|item| item.chars().count())
            .chain([title.chars().count()])
            .max()
            .unwrap_or(0) as u16;
        let box_w = widest + 8;
        let box_h = items.len() as u16 + 4;
        let x = viewport.width.saturating_sub(box_w) / 2;
        let y = viewport.height.saturating_sub(box_h) / 2;

        let border = CellStyle::plain(Rgb::new(255, 255, 255));
        fb.fill_rect(x, y, box_w, box_h, ' ', CellStyle::default());
        self.draw_border(fb, x, y, box_w, box_h, border);

        let title_style = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        fb.put_str(x + (box_w - title.chars().count() as u16) / 2, y + 1, title, title_style);

        for (i, item) in items.iter().enumerate() {
            let row = y + 3 + i as u16;
            if i == cursor {
                fb.put_str(x + 2, row, "->", title_style);
            }
            fb.put_str(x + 5, row, item, CellStyle::default());
        }
    }

    /// Centered text, offset in rows from the vertical middle.
    fn draw_center_text(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        row_offset: i16,
        text: &str,
        bold: bool,
    ) {
        let width = text.chars().count() as u16;
        let x = viewport.width.saturating_sub(width) / 2;
        let y = (viewport.height as i16 / 2 + row_offset).max(0) as u16;
        let style = CellStyle {
            bold,
            ..CellStyle::default()
        };
        fb.put_str(x, y, text, style);
    }
}

/// The seven color identities.
fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::Z => Rgb::new(255, 0, 0),
        PieceKind::S => Rgb::new(0, 150, 0),
        PieceKind::T => Rgb::new(0, 0, 255),
        PieceKind::J => Rgb::new(255, 120, 0),
        PieceKind::L => Rgb::new(255, 255, 0),
        PieceKind::O => Rgb::new(180, 0, 255),
        PieceKind::I => Rgb::new(0, 220, 220),
    }
}
