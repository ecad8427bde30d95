//! Terminal rendering layer: all terminal I/O lives here.
//!
//! Screens draw onto a [`TerminalCanvas`] in playfield pixels; the canvas
//! maps them onto a character grid inside the border. `present` then
//! writes the grid plus the HUD and hint rows to the terminal.

use std::f32::consts::TAU;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::error::GameResult;
use crate::render::{Canvas, Paint, Rect, Sprite};
use crate::screens::ScreenId;
use crate::snapshot::HudSnapshot;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_SPECIAL: Color = Color::Magenta;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_UFO: Color = Color::Red;
const C_BOSS: Color = Color::DarkRed;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

fn paint_color(paint: Paint) -> Color {
    match paint {
        Paint::White => Color::White,
        Paint::Dim => Color::DarkGrey,
        Paint::Gold => Color::DarkYellow,
        Paint::Red => Color::Red,
        Paint::Yellow => Color::Yellow,
        Paint::Green => Color::Green,
        Paint::Cyan => Color::Cyan,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

// ── Canvas ────────────────────────────────────────────────────────────────────

/// Character grid covering the area inside the border.
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    /// Terminal size in cells.
    width: u16,
    height: u16,
    /// Playfield size in pixels.
    field_width: f32,
    field_height: f32,
    cells: Vec<Cell>,
}

impl TerminalCanvas {
    pub fn new(width: u16, height: u16, field_width: f32, field_height: f32) -> Self {
        let mut canvas = Self {
            width,
            height,
            field_width,
            field_height,
            cells: Vec::new(),
        };
        canvas.resize(width, height);
        canvas
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![BLANK; self.cols() * self.rows()];
    }

    /// Grid columns inside the side walls.
    fn cols(&self) -> usize {
        self.width.saturating_sub(2) as usize
    }

    /// Grid rows between HUD + top bar and bottom bar + hint.
    fn rows(&self) -> usize {
        self.height.saturating_sub(4) as usize
    }

    fn to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        let col = (x / self.field_width * self.cols() as f32).floor() as i32;
        let row = (y / self.field_height * self.rows() as f32).floor() as i32;
        (col, row)
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 || col as usize >= self.cols() || row as usize >= self.rows() {
            return;
        }
        let idx = row as usize * self.cols() + col as usize;
        self.cells[idx] = Cell { ch, color };
    }

    fn put_str(&mut self, col: i32, row: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }

    /// Lines centred on the cell under `(x, y)`, first line on that row.
    fn put_glyph(&mut self, x: f32, y: f32, lines: &[&str], color: Color) {
        let (col, row) = self.to_cell(x, y);
        for (i, line) in lines.iter().enumerate() {
            let half = line.chars().count() as i32 / 2;
            self.put_str(col - half, row + i as i32, line, color);
        }
    }

    /// Text currently in grid row `row`, trailing blanks trimmed.
    pub fn row_text(&self, row: usize) -> String {
        let cols = self.cols();
        if row >= self.rows() {
            return String::new();
        }
        self.cells[row * cols..(row + 1) * cols]
            .iter()
            .map(|c| c.ch)
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    /// Write a complete frame: border, HUD, grid and hint row.
    pub fn present<W: Write>(&self, out: &mut W, hud: &HudSnapshot) -> GameResult<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        draw_border(out, self.width, self.height)?;
        draw_hud(out, self.width, hud)?;

        let cols = self.cols();
        for (row, line) in self.cells.chunks(cols.max(1)).enumerate() {
            for (col, cell) in line.iter().enumerate() {
                if cell.ch == ' ' {
                    continue;
                }
                out.queue(cursor::MoveTo(col as u16 + 1, row as u16 + 2))?;
                out.queue(style::SetForegroundColor(cell.color))?;
                out.queue(Print(cell.ch))?;
            }
        }

        draw_controls_hint(out, self.height, hud)?;

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

impl Canvas for TerminalCanvas {
    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        let (c0, r0) = self.to_cell(rect.x, rect.y);
        let (c1, r1) = self.to_cell(rect.x + rect.width, rect.y + rect.height);
        let ch = if paint == Paint::Dim { '░' } else { '█' };
        let color = paint_color(paint);
        for row in r0..=r0.max(r1 - 1) {
            for col in c0..c1 {
                self.put(col, row, ch, color);
            }
        }
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, frame: u8) {
        let cx = rect.x + rect.width / 2.0;
        let cy = rect.y + rect.height / 2.0;
        match sprite {
            // Sprite (2 rows, 3 cols):
            //   ▲
            //  /|\
            Sprite::Player => self.put_glyph(cx, cy, &["▲", "/|\\"], C_PLAYER),
            Sprite::PlayerFront => self.put_glyph(cx, cy, &["\\o/", " | ", "/ \\"], C_PLAYER),
            Sprite::Enemy => {
                let lines: &[&str] = if frame % 2 == 0 {
                    &["<▼>", "[_]"]
                } else {
                    &["<▼>", "]_["]
                };
                self.put_glyph(cx, cy, lines, C_ENEMY);
            }
            Sprite::Ufo => self.put_glyph(cx, cy, &["<=◉=>"], C_UFO),
            Sprite::Boss => {
                let lines: &[&str] = if frame % 2 == 0 {
                    &["/‾‾‾‾‾\\", "|(◉)(◉)|", "\\_▼▼▼_/"]
                } else {
                    &["/‾‾‾‾‾\\", "|(◉)(◉)|", "\\_▲▲▲_/"]
                };
                self.put_glyph(cx, cy - rect.height / 4.0, lines, C_BOSS);
            }
            Sprite::Shuriken => self.put_glyph(cx, cy, &["║"], C_BULLET_PLAYER),
            Sprite::SpecialShuriken => self.put_glyph(cx, cy, &["✦✦✦"], Color::DarkYellow),
            Sprite::EnemyBullet => self.put_glyph(cx, cy, &["↓"], C_BULLET_ENEMY),
            Sprite::Rock => self.put_glyph(cx, cy, &["●"], C_BULLET_ENEMY),
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, paint: Paint) {
        self.put_glyph(x, y, &[text], paint_color(paint));
    }

    fn stroke_arc(&mut self, cx: f32, cy: f32, radius: f32, progress: f32, paint: Paint) {
        let color = paint_color(paint);
        let points = 16;
        let lit = (progress.clamp(0.0, 1.0) * points as f32).round() as i32;
        for i in 0..lit {
            // Clockwise from twelve o'clock.
            let angle = i as f32 / points as f32 * TAU - TAU / 4.0;
            let (x, y) = (cx + radius * angle.cos(), cy + radius * angle.sin());
            let (col, row) = self.to_cell(x, y);
            self.put(col, row, '·', color);
        }
    }
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, width: u16, hud: &HudSnapshot) -> std::io::Result<()> {
    // Score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}  Best: {:>6}", hud.score, hud.high_score)))?;

    // Specials or boss, right
    let mut right = match hud.screen {
        Some(ScreenId::Game) => {
            let stars = "✦".repeat(hud.special_uses as usize);
            match hud.boss_health {
                Some((hp, max)) => format!("Boss {hp}/{max}  SP {stars}"),
                None => format!("Left {:>2}  SP {stars}", hud.enemies_left),
            }
        }
        _ => String::new(),
    };
    if hud.muted {
        right.push_str("  [muted]");
    }
    let rx = width.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SPECIAL))?;
    out.queue(Print(&right))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16, hud: &HudSnapshot) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    if let Some(notice) = &hud.notice {
        out.queue(style::SetForegroundColor(Color::Red))?;
        out.queue(Print(notice))?;
        return Ok(());
    }

    let hint = match hud.screen {
        Some(ScreenId::Title) => "ENTER : Start   H : How to play   M : Mute   Q : Quit",
        Some(ScreenId::Instructions) => "ESC / ENTER : Back",
        Some(ScreenId::Game) => "← → / A D : Move   SPACE : Shoot (hold to charge)   M : Mute   Q : Quit",
        Some(ScreenId::GameOver) | Some(ScreenId::GameClear) => "R : Retry   T : Title   Q : Quit",
        None => "",
    };
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_centred_in_the_grid() {
        // 42x24 terminal gives a 40x20 grid for a 400x200 field.
        let mut canvas = TerminalCanvas::new(42, 24, 400.0, 200.0);
        canvas.fill_text("HI", 200.0, 0.0, Paint::White);
        assert_eq!(canvas.row_text(0), format!("{}HI", " ".repeat(19)));

        canvas.clear();
        assert_eq!(canvas.row_text(0), "");
    }

    #[test]
    fn drawing_outside_the_field_is_clipped() {
        let mut canvas = TerminalCanvas::new(42, 24, 400.0, 200.0);
        canvas.draw_sprite(Sprite::Rock, Rect::centered(-50.0, -50.0, 16.0, 16.0), 0);
        canvas.draw_sprite(Sprite::Rock, Rect::centered(900.0, 900.0, 16.0, 16.0), 0);
        assert!((0..20).all(|row| canvas.row_text(row).is_empty()));
    }

    #[test]
    fn present_writes_hud_and_hint() {
        let canvas = TerminalCanvas::new(60, 20, 360.0, 640.0);
        let hud = HudSnapshot {
            screen: Some(ScreenId::Title),
            score: 120,
            ..HudSnapshot::default()
        };
        let mut out = Vec::new();
        canvas.present(&mut out, &hud).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Score:    120"));
        assert!(text.contains("ENTER : Start"));
    }

    struct ClosedTerminal;

    impl Write for ClosedTerminal {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn present_reports_write_failures_as_io() {
        let canvas = TerminalCanvas::new(60, 20, 360.0, 640.0);
        let err = canvas
            .present(&mut ClosedTerminal, &HudSnapshot::default())
            .unwrap_err();
        assert!(matches!(err, crate::error::GameError::Io(_)));
    }
}
