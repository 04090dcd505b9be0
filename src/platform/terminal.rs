//! Crossterm terminal frontend
//!
//! The 1200x800 canvas is scaled onto whatever terminal size is available.
//! Each frame is rasterized into a cell buffer and written with one batch
//! of queued commands and a single flush.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use glam::Vec2;

use super::{Command, FrameClock, InputLatch, Platform};
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::commands::to_rgb8;
use crate::renderer::{DrawCommand, Sprite, colors};
use crate::report::{Choice, RoundReport};
use crate::sim::{Direction, TickInput};

/// Widest bar in the summary chart
const CHART_WIDTH: usize = 30;

/// Map a key press to a game command
pub fn decode_key(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Command::Steer(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::Steer(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Steer(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Steer(Direction::Right))
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Map a key press on the summary screen to one of the offered choices
pub fn decode_choice(key: &KeyEvent, offered: &[Choice; 2]) -> Option<Choice> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let picked = match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Choice::Retry,
        KeyCode::Char('n') | KeyCode::Char('N') => Choice::Next,
        KeyCode::Char('e') | KeyCode::Char('E') => Choice::Exit,
        // Quit keys work whatever the summary offers
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Choice::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Choice::Quit);
        }
        _ => return None,
    };
    offered.contains(&picked).then_some(picked)
}

fn term_color(color: [f32; 4]) -> Color {
    let (r, g, b) = to_rgb8(color);
    Color::Rgb { r, g, b }
}

/// One terminal character cell
#[derive(Debug, Clone, Copy, PartialEq)]
struct Glyph {
    ch: char,
    fg: Color,
    bg: Color,
    bold: bool,
}

impl Glyph {
    fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg,
            bold: false,
        }
    }
}

/// Rasterizes canvas-space draw commands into a character grid
#[derive(Debug, Clone)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    /// Canvas units per column / per row
    scale: Vec2,
    cells: Vec<Glyph>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            scale: Vec2::new(
                SCREEN_WIDTH as f32 / cols as f32,
                SCREEN_HEIGHT as f32 / rows as f32,
            ),
            cells: vec![Glyph::blank(Color::Black); cols as usize * rows as usize],
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Character cell covering a canvas point, if any
    fn cell_at(&self, p: Vec2) -> Option<(u16, u16)> {
        let c = (p / self.scale).floor();
        if c.x < 0.0 || c.y < 0.0 || c.x >= self.cols as f32 || c.y >= self.rows as f32 {
            return None;
        }
        Some((c.x as u16, c.y as u16))
    }

    /// Column/row span covered by a canvas rectangle, clipped to the grid
    fn span(&self, pos: Vec2, size: Vec2) -> Option<(u16, u16, u16, u16)> {
        let lo = (pos / self.scale).floor().max(Vec2::ZERO);
        let hi = ((pos + size) / self.scale).ceil() - Vec2::ONE;
        let hi = hi.min(Vec2::new(self.cols as f32 - 1.0, self.rows as f32 - 1.0));
        if hi.x < lo.x || hi.y < lo.y {
            return None;
        }
        Some((lo.x as u16, lo.y as u16, hi.x as u16, hi.y as u16))
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> &mut Glyph {
        let idx = row as usize * self.cols as usize + col as usize;
        &mut self.cells[idx]
    }

    fn glyph(&self, col: u16, row: u16) -> Glyph {
        self.cells[row as usize * self.cols as usize + col as usize]
    }

    /// Character at a grid position (for tests and debugging)
    pub fn char_at(&self, col: u16, row: u16) -> char {
        self.glyph(col, row).ch
    }

    /// Background at a grid position
    pub fn background_at(&self, col: u16, row: u16) -> Color {
        self.glyph(col, row).bg
    }

    pub fn draw(&mut self, frame: &[DrawCommand]) {
        for command in frame {
            match command {
                DrawCommand::Clear { color } => {
                    self.cells.fill(Glyph::blank(term_color(*color)));
                }
                DrawCommand::Rect { pos, size, color } => self.fill_rect(*pos, *size, *color),
                DrawCommand::Sprite { sprite, pos, size } => {
                    let (ch, color) = match sprite {
                        Sprite::Apple => ('@', colors::APPLE),
                        Sprite::Poison => ('X', colors::POISON),
                    };
                    self.stamp(*pos, *size, ch, color);
                }
                DrawCommand::Text {
                    text,
                    pos,
                    color,
                    big,
                } => self.text(*pos, text, *color, *big),
            }
        }
    }

    /// Rectangles smaller than one character become a dot on top of what is
    /// already there, which keeps details like eyes visible at low resolution
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]) {
        if size.x < self.scale.x && size.y < self.scale.y {
            if let Some((col, row)) = self.cell_at(pos + size / 2.0) {
                let cell = self.cell_mut(col, row);
                cell.ch = '.';
                cell.fg = term_color(color);
            }
            return;
        }
        let Some((c0, r0, c1, r1)) = self.span(pos, size) else {
            return;
        };
        let bg = term_color(color);
        for row in r0..=r1 {
            for col in c0..=c1 {
                *self.cell_mut(col, row) = Glyph::blank(bg);
            }
        }
    }

    /// Foreground glyph over an area, keeping the background
    fn stamp(&mut self, pos: Vec2, size: Vec2, ch: char, color: [f32; 4]) {
        let Some((c0, r0, c1, r1)) = self.span(pos, size) else {
            return;
        };
        let fg = term_color(color);
        for row in r0..=r1 {
            for col in c0..=c1 {
                let cell = self.cell_mut(col, row);
                cell.ch = ch;
                cell.fg = fg;
            }
        }
    }

    fn text(&mut self, pos: Vec2, text: &str, color: [f32; 4], bold: bool) {
        let Some((col, row)) = self.cell_at(pos) else {
            return;
        };
        let fg = term_color(color);
        for (i, ch) in text.chars().enumerate() {
            let c = col as usize + i;
            if c >= self.cols as usize {
                break;
            }
            let cell = self.cell_mut(c as u16, row);
            cell.ch = ch;
            cell.fg = fg;
            cell.bold = bold;
        }
    }

    /// Queue the whole grid to `out`
    fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in 0..self.rows {
            queue!(out, MoveTo(0, row))?;
            let mut current: Option<(Color, Color, bool)> = None;
            for col in 0..self.cols {
                let g = self.glyph(col, row);
                if current != Some((g.fg, g.bg, g.bold)) {
                    let attr = if g.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    queue!(
                        out,
                        SetForegroundColor(g.fg),
                        SetBackgroundColor(g.bg),
                        SetAttribute(attr)
                    )?;
                    current = Some((g.fg, g.bg, g.bold));
                }
                queue!(out, Print(g.ch))?;
            }
        }
        queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Raw mode and alternate screen for as long as it lives
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = execute!(out, ResetColor, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Terminal implementation of `Platform`
pub struct TerminalPlatform {
    out: Stdout,
    tick_rate: u32,
    clock: FrameClock,
    latch: InputLatch,
    audio: AudioManager,
    canvas: Canvas,
    _guard: TerminalGuard,
}

impl TerminalPlatform {
    /// Take over the terminal; it is restored when the platform is dropped
    pub fn new(tick_rate: u32, audio: AudioManager) -> io::Result<Self> {
        let mut out = io::stdout();
        let guard = TerminalGuard::enter(&mut out)?;
        let (cols, rows) = terminal::size()?;
        log::info!("Terminal {}x{}, {} ticks/s", cols, rows, tick_rate);
        Ok(Self {
            out,
            tick_rate,
            clock: FrameClock::new(tick_rate),
            latch: InputLatch::default(),
            audio,
            canvas: Canvas::new(cols, rows),
            _guard: guard,
        })
    }

    /// Resize the raster if the terminal changed
    fn sync_size(&mut self) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        if self.canvas.size() != (cols, rows) {
            self.canvas = Canvas::new(cols, rows);
            queue!(self.out, Clear(ClearType::All))?;
        }
        Ok(())
    }

    fn print_at(&mut self, col: u16, row: u16, text: &str, color: Color) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(col, row),
            SetForegroundColor(color),
            Print(text)
        )
    }

    fn draw_summary(&mut self, report: &RoundReport, offered: &[Choice; 2]) -> io::Result<()> {
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            SetAttribute(Attribute::Bold)
        )?;
        self.print_at(2, 1, report.status_text(), Color::Yellow)?;
        queue!(self.out, SetAttribute(Attribute::Reset))?;

        let mut row = 3;
        for line in report.lines() {
            self.print_at(2, row, &line, Color::White)?;
            row += 1;
        }

        row += 1;
        self.print_at(2, row, "Moves per direction", Color::White)?;
        row += 1;
        let bar_colors = [Color::Blue, Color::Red, Color::Green, Color::DarkYellow];
        for ((dir, count, len), color) in report.move_bars(CHART_WIDTH).into_iter().zip(bar_colors) {
            self.print_at(2, row, &format!("{:>5} ", dir.label()), Color::White)?;
            self.print_at(8, row, &"#".repeat(len), color)?;
            self.print_at(9 + CHART_WIDTH as u16, row, &count.to_string(), Color::White)?;
            row += 1;
        }

        row += 1;
        let buttons: Vec<String> = offered
            .iter()
            .map(|c| {
                let key = match c {
                    Choice::Retry => 'R',
                    Choice::Next => 'N',
                    Choice::Exit => 'E',
                    Choice::Quit => 'Q',
                };
                format!("[{}] {}", key, c.label())
            })
            .collect();
        self.print_at(2, row, &buttons.join("    "), Color::Cyan)?;
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

impl Platform for TerminalPlatform {
    fn poll_input(&mut self) -> io::Result<TickInput> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(command) = decode_key(&key) {
                    self.latch.push(command);
                }
            }
        }
        Ok(self.latch.take())
    }

    fn present(&mut self, frame: &[DrawCommand]) -> io::Result<()> {
        self.sync_size()?;
        self.canvas.draw(frame);
        self.canvas.write_to(&mut self.out)?;
        self.out.flush()
    }

    fn play(&mut self, effect: SoundEffect) -> io::Result<()> {
        if !self.audio.is_audible(effect) {
            return Ok(());
        }
        log::debug!("cue {:?} at volume {:.2}", effect, self.audio.volume(effect));
        // Terminal bell; volume is not expressible here
        queue!(self.out, Print('\u{7}'))?;
        self.out.flush()
    }

    fn show_summary(&mut self, report: &RoundReport) -> io::Result<Choice> {
        let offered = report.choices();
        self.draw_summary(report, &offered)?;
        loop {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(choice) = decode_choice(&key, &offered) {
                        queue!(self.out, Clear(ClearType::All))?;
                        // The round restarts from a fresh deadline
                        self.clock = FrameClock::new(self.tick_rate);
                        self.latch = InputLatch::default();
                        return Ok(choice);
                    }
                }
                Event::Resize(..) => self.draw_summary(report, &offered)?,
                _ => {}
            }
        }
    }

    fn wait_frame(&mut self) {
        self.clock.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_decode_keys() {
        assert_eq!(
            decode_key(&press(KeyCode::Up)),
            Some(Command::Steer(Direction::Up))
        );
        assert_eq!(
            decode_key(&press(KeyCode::Char('a'))),
            Some(Command::Steer(Direction::Left))
        );
        assert_eq!(decode_key(&press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            decode_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(decode_key(&press(KeyCode::Char('c'))), None);

        let release =
            KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(decode_key(&release), None);
    }

    #[test]
    fn test_decode_choice_respects_offer() {
        let after_loss = [Choice::Retry, Choice::Exit];
        assert_eq!(
            decode_choice(&press(KeyCode::Char('r')), &after_loss),
            Some(Choice::Retry)
        );
        assert_eq!(decode_choice(&press(KeyCode::Char('n')), &after_loss), None);
        assert_eq!(
            decode_choice(&press(KeyCode::Char('e')), &after_loss),
            Some(Choice::Exit)
        );
        assert_eq!(
            decode_choice(&press(KeyCode::Char('e')), &[Choice::Retry, Choice::Next]),
            None
        );
    }

    #[test]
    fn test_summary_quit_keys() {
        let after_win = [Choice::Retry, Choice::Next];
        assert_eq!(decode_choice(&press(KeyCode::Esc), &after_win), Some(Choice::Quit));
        assert_eq!(
            decode_choice(&press(KeyCode::Char('q')), &after_win),
            Some(Choice::Quit)
        );
        assert_eq!(
            decode_choice(
                &KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &after_win
            ),
            Some(Choice::Quit)
        );
    }

    #[test]
    fn test_canvas_scaling() {
        // 120x40 terminal: 10 units per column, 20 per row
        let mut canvas = Canvas::new(120, 40);
        canvas.draw(&[
            DrawCommand::Clear {
                color: colors::BACKGROUND,
            },
            DrawCommand::Rect {
                pos: Vec2::new(0.0, 0.0),
                size: Vec2::splat(32.0),
                color: colors::OBSTACLE,
            },
        ]);
        let brown = term_color(colors::OBSTACLE);
        assert_eq!(canvas.background_at(0, 0), brown);
        assert_eq!(canvas.background_at(3, 1), brown);
        assert_eq!(canvas.background_at(4, 1), Color::Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(canvas.background_at(0, 2), Color::Rgb { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn test_canvas_clips_offscreen() {
        let mut canvas = Canvas::new(120, 40);
        canvas.draw(&[DrawCommand::Rect {
            pos: Vec2::new(1190.0, 790.0),
            size: Vec2::splat(32.0),
            color: colors::SNAKE,
        }]);
        assert_eq!(canvas.background_at(119, 39), term_color(colors::SNAKE));

        canvas.draw(&[DrawCommand::Rect {
            pos: Vec2::new(1300.0, 900.0),
            size: Vec2::splat(32.0),
            color: colors::OBSTACLE,
        }]);
        assert_eq!(canvas.background_at(119, 39), term_color(colors::SNAKE));
    }

    #[test]
    fn test_canvas_small_rects_become_dots() {
        let mut canvas = Canvas::new(120, 40);
        let head = IVec2::new(100, 100).as_vec2();
        canvas.draw(&[
            DrawCommand::Rect {
                pos: head,
                size: Vec2::splat(32.0),
                color: colors::SNAKE,
            },
            DrawCommand::Rect {
                pos: head + Vec2::new(22.0, 5.0),
                size: Vec2::splat(5.0),
                color: colors::EYE,
            },
        ]);
        // Eye center (124.5, 107.5) lands in column 12, row 5
        assert_eq!(canvas.char_at(12, 5), '.');
        assert_eq!(canvas.background_at(12, 5), term_color(colors::SNAKE));
    }

    #[test]
    fn test_canvas_text_and_sprites() {
        let mut canvas = Canvas::new(120, 40);
        canvas.draw(&[
            DrawCommand::Sprite {
                sprite: Sprite::Apple,
                pos: Vec2::new(320.0, 320.0),
                size: Vec2::splat(48.0),
            },
            DrawCommand::Text {
                text: "Score: 3/10".to_string(),
                pos: Vec2::new(10.0, 10.0),
                color: colors::HUD,
                big: false,
            },
        ]);
        assert_eq!(canvas.char_at(32, 16), '@');
        assert_eq!(canvas.char_at(36, 17), '@');
        assert_eq!(canvas.char_at(1, 0), 'S');
        assert_eq!(canvas.char_at(11, 0), '0');
    }
}
