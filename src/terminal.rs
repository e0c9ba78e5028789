//! Terminal front end: turns the framebuffer plus overlays into half-block
//! cells, owns the terminal mode, and runs the frame loop.

use crate::card::Card;
use crate::celebration::Acknowledger;
use crate::clock::{Clock, SystemClock};
use crate::color::{palette, Rgb};
use crate::config::Args;
use crate::content::{CardContent, LineStyle};
use crate::error::Result;
use crate::graphics::FrameBuffer;
use crate::machine::TriggerSource;
use crate::state::{FpsCounter, ViewOptions};
use crate::viewport::{Rect, Viewport};
use crossterm::cursor::{self, MoveTo};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use log::{info, warn};
use std::io::{self, Write};
use std::time::Instant;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const HALF_BLOCK: char = '▀';
/// Marks the second column of a wide glyph; never printed.
const CONTINUATION: char = '\0';
const PANEL_OPACITY: f64 = 0.92;

/// One terminal cell: the glyph plus its two colors. For a half block the
/// foreground is the upper pixel and the background the lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            glyph: HALF_BLOCK,
            fg: Rgb::BLACK,
            bg: Rgb::BLACK,
        }
    }
}

/// Colors for a run of overlay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub fg: Rgb,
    /// Solid background behind the text, or `None` to keep the scene.
    pub bg: Option<Rgb>,
}

pub struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Canvas {
            cols,
            rows,
            cells: vec![Cell::default(); usize::from(cols) * usize::from(rows)],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Canvas::new(cols, rows);
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(usize::from(row) * usize::from(self.cols) + usize::from(col))
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> Option<&mut Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells
            .get_mut(usize::from(row) * usize::from(self.cols) + usize::from(col))
    }

    /// Packs pairs of framebuffer rows into half-block cells.
    pub fn draw_frame(&mut self, frame: &FrameBuffer) {
        for row in 0..self.rows {
            let y = usize::from(row) * 2;
            for col in 0..self.cols {
                let x = usize::from(col);
                let (fg, bg) = if x < frame.width() && y + 1 < frame.height() {
                    (frame.pixel(x, y), frame.pixel(x, y + 1))
                } else {
                    (Rgb::BLACK, Rgb::BLACK)
                };
                if let Some(cell) = self.cell_mut(col, row) {
                    *cell = Cell {
                        glyph: HALF_BLOCK,
                        fg,
                        bg,
                    };
                }
            }
        }
    }

    /// Tints every cell of `rect` towards `color`.
    pub fn fill(&mut self, rect: &Rect, color: Rgb, opacity: f64) {
        for row in rect.y..rect.y.saturating_add(rect.height) {
            for col in rect.x..rect.x.saturating_add(rect.width) {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.fg = cell.fg.lerp(color, opacity);
                    cell.bg = cell.bg.lerp(color, opacity);
                }
            }
        }
    }

    /// Writes `text` starting at a cell, blended over what is underneath.
    /// Text running past the right edge is clipped.
    pub fn put_text(&mut self, col: u16, row: u16, text: &str, style: TextStyle, opacity: f64) {
        let mut x = col;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            if u32::from(x) + u32::from(width) > u32::from(self.cols) {
                break;
            }
            let Some(cell) = self.cell_mut(x, row) else {
                break;
            };
            let under = if cell.glyph == HALF_BLOCK {
                cell.fg.lerp(cell.bg, 0.5)
            } else {
                cell.bg
            };
            let bg = match style.bg {
                Some(bg) => under.lerp(bg, opacity),
                None => under,
            };
            *cell = Cell {
                glyph: ch,
                fg: bg.lerp(style.fg, opacity),
                bg,
            };
            if width == 2 {
                if let Some(next) = self.cell_mut(x + 1, row) {
                    *next = Cell {
                        glyph: CONTINUATION,
                        fg: bg,
                        bg,
                    };
                }
            }
            x += width;
        }
    }

    /// Queues the whole canvas. Color changes are only emitted when they
    /// differ from the previous cell.
    pub fn flush<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut current: Option<(Rgb, Rgb)> = None;
        for row in 0..self.rows {
            queue!(out, MoveTo(0, row))?;
            for col in 0..self.cols {
                let Some(cell) = self.cell(col, row) else {
                    continue;
                };
                if cell.glyph == CONTINUATION {
                    continue;
                }
                let (fg, bg) = match current {
                    Some(colors) => colors,
                    None => {
                        queue!(
                            out,
                            SetForegroundColor(term_color(cell.fg)),
                            SetBackgroundColor(term_color(cell.bg))
                        )?;
                        (cell.fg, cell.bg)
                    }
                };
                if fg != cell.fg {
                    queue!(out, SetForegroundColor(term_color(cell.fg)))?;
                }
                if bg != cell.bg {
                    queue!(out, SetBackgroundColor(term_color(cell.bg)))?;
                }
                current = Some((cell.fg, cell.bg));
                queue!(out, Print(cell.glyph))?;
            }
        }
        queue!(out, ResetColor)?;
        out.flush()
    }
}

fn term_color(color: Rgb) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Draws the full picture for one frame into `canvas`.
pub fn compose(
    canvas: &mut Canvas,
    frame: &mut FrameBuffer,
    card: &Card,
    options: ViewOptions,
    stats: FrameStats,
) {
    card.render_scene(frame, options.wireframe);
    canvas.draw_frame(frame);
    draw_prompt(canvas, card);
    draw_content(canvas, card);
    if options.debug {
        draw_debug(canvas, card, stats);
    }
}

/// Numbers shown in the debug overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub elapsed: f64,
    pub fps: f64,
}

fn draw_prompt(canvas: &mut Canvas, card: &Card) {
    let Some(prompt) = card.prompt() else {
        return;
    };
    let rect = prompt.rect(card.viewport());
    let style = TextStyle {
        fg: Rgb::WHITE,
        bg: Some(palette::LOVE_RED),
    };
    canvas.put_text(rect.x, rect.y, &prompt.label(), style, prompt.opacity());
}

fn draw_content(canvas: &mut Canvas, card: &Card) {
    let region = card.content();
    if region.is_hidden() || region.opacity() <= 0.0 {
        return;
    }
    let opacity = region.opacity();
    let layout = region.layout();
    canvas.fill(&layout.panel, palette::PAPER, opacity * PANEL_OPACITY);

    for (index, line) in layout.lines.iter().enumerate() {
        let Some((col, row)) = layout.line_origin(index, region.scroll()) else {
            continue;
        };
        if line.block.is_some_and(|block| !region.is_block_revealed(block)) {
            continue;
        }
        match line.style {
            LineStyle::Blank => {}
            LineStyle::Title => {
                let style = TextStyle {
                    fg: palette::LOVE_RED,
                    bg: None,
                };
                canvas.put_text(col, row, &line.text, style, opacity);
            }
            LineStyle::Body => {
                let style = TextStyle {
                    fg: palette::DEEP_RED,
                    bg: None,
                };
                canvas.put_text(col, row, &line.text, style, opacity);
            }
            LineStyle::Buttons => {
                let style = TextStyle {
                    fg: Rgb::WHITE,
                    bg: Some(palette::LOVE_RED),
                };
                for span in &line.buttons {
                    let start = usize::from(span.offset);
                    let end = start + usize::from(span.width);
                    let label: String = line
                        .text
                        .chars()
                        .scan(0usize, |at, ch| {
                            let here = *at;
                            *at += ch.width().unwrap_or(0);
                            Some((here, ch))
                        })
                        .filter(|(at, _)| (start..end).contains(at))
                        .map(|(_, ch)| ch)
                        .collect();
                    canvas.put_text(col + span.offset, row, &label, style, opacity);
                }
            }
        }
    }

    if region.scroll_enabled() && layout.max_scroll() > 0 {
        let panel = layout.panel;
        let right = panel.x + panel.width.saturating_sub(2);
        let style = TextStyle {
            fg: palette::DEEP_RED,
            bg: None,
        };
        if region.scroll() > 0 {
            canvas.put_text(right, panel.y, "↑", style, opacity);
        }
        if region.scroll() < layout.max_scroll() {
            let bottom = panel.y + panel.height.saturating_sub(1);
            canvas.put_text(right, bottom, "↓", style, opacity);
        }
    }
}

fn draw_debug(canvas: &mut Canvas, card: &Card, stats: FrameStats) {
    let camera = card.scene().camera.position;
    let lines = [
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        format!("State: {:?}", card.state()),
        format!("Elapsed: {:.2}s", stats.elapsed),
        format!("FPS: {:.2}", stats.fps),
        format!(
            "Camera: ({:.2}, {:.2}, {:.2})",
            camera[0], camera[1], camera[2]
        ),
        format!(
            "Hearts: {}  Confetti: {}",
            card.particles().len(),
            card.confetti().len()
        ),
    ];
    let style = TextStyle {
        fg: Rgb::WHITE,
        bg: Some(Rgb::BLACK),
    };
    for (row, line) in lines.iter().enumerate() {
        canvas.put_text(1, row as u16, line, style, 0.8);
    }
}

/// What a terminal event asks the frame loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Trigger,
    Button(usize),
    Scroll(isize),
    Page(isize),
    Click(u16, u16),
    Move(u16, u16),
    Resize(u16, u16),
    ToggleDebug,
    ToggleWireframe,
    Quit,
}

/// Maps a terminal event onto an [`Action`]. Key releases and repeats are
/// ignored.
pub fn action_for(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) => key_action(key),
        Event::Mouse(mouse) => mouse_action(mouse),
        Event::Resize(cols, rows) => Some(Action::Resize(*cols, *rows)),
        _ => None,
    }
}

fn key_action(key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Trigger),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::ToggleDebug),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::ToggleWireframe),
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| Action::Button(d as usize - 1)),
        KeyCode::Up => Some(Action::Scroll(-1)),
        KeyCode::Down => Some(Action::Scroll(1)),
        KeyCode::PageUp => Some(Action::Page(-1)),
        KeyCode::PageDown => Some(Action::Page(1)),
        _ => None,
    }
}

fn mouse_action(mouse: &MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Click(mouse.column, mouse.row)),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            Some(Action::Move(mouse.column, mouse.row))
        }
        MouseEventKind::ScrollUp => Some(Action::Scroll(-1)),
        MouseEventKind::ScrollDown => Some(Action::Scroll(1)),
        _ => None,
    }
}

/// Raw mode, alternate screen, mouse capture and a hidden cursor for as
/// long as the value lives.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        let session = TerminalSession { _private: () };
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            Clear(ClearType::All)
        )?;
        info!("event=terminal_enter");
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal();
        info!("event=terminal_leave");
    }
}

fn restore_terminal() {
    let _ = execute!(
        io::stdout(),
        ResetColor,
        cursor::Show,
        DisableMouseCapture,
        LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();
}

/// Leaves the terminal usable before the panic message is printed.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}

/// Modal dialog drawn over the current frame. Blocks until a key press or
/// a click dismisses it.
pub struct TerminalAcknowledger {
    viewport: Viewport,
}

impl TerminalAcknowledger {
    pub fn new(viewport: Viewport) -> Self {
        TerminalAcknowledger { viewport }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn draw(&self, message: &str) -> io::Result<()> {
        let ok = "[ OK ]";
        let inner = message.width().max(ok.width()) as u16 + 4;
        let width = inner.min(self.viewport.cols);
        let height = 5u16.min(self.viewport.rows);
        let x = self.viewport.cols.saturating_sub(width) / 2;
        let y = self.viewport.rows.saturating_sub(height) / 2;

        let mut canvas = Canvas::new(self.viewport.cols, self.viewport.rows);
        let dialog = Rect {
            x,
            y,
            width,
            height,
        };
        canvas.fill(&dialog, palette::PAPER, 1.0);
        let body = TextStyle {
            fg: palette::DEEP_RED,
            bg: None,
        };
        let button = TextStyle {
            fg: Rgb::WHITE,
            bg: Some(palette::LOVE_RED),
        };
        let center = |text: &str| x + width.saturating_sub(text.width() as u16) / 2;
        canvas.put_text(center(message), y + 1, message, body, 1.0);
        canvas.put_text(center(ok), y + 3, ok, button, 1.0);

        let mut out = io::stdout();
        for row in y..y + height {
            queue!(out, MoveTo(x, row))?;
            for col in x..x + width {
                let Some(cell) = canvas.cell(col, row) else {
                    continue;
                };
                if cell.glyph == CONTINUATION {
                    continue;
                }
                let glyph = if cell.glyph == HALF_BLOCK { ' ' } else { cell.glyph };
                queue!(
                    out,
                    SetForegroundColor(term_color(cell.fg)),
                    SetBackgroundColor(term_color(cell.bg)),
                    Print(glyph)
                )?;
            }
        }
        queue!(out, ResetColor)?;
        out.flush()
    }
}

impl Acknowledger for TerminalAcknowledger {
    fn acknowledge(&mut self, message: &str) -> Result<()> {
        info!("event=acknowledge_shown");
        self.draw(message)?;
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => break,
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(_),
                    ..
                }) => break,
                Event::Resize(cols, rows) => {
                    self.viewport = Viewport::new(cols, rows);
                    execute!(io::stdout(), Clear(ClearType::All))?;
                    self.draw(message)?;
                }
                _ => {}
            }
        }
        info!("event=acknowledge_dismissed");
        Ok(())
    }
}

/// Runs the card until the user quits.
pub fn run(args: &Args, content: CardContent) -> Result<()> {
    let _session = TerminalSession::enter()?;
    let clock = SystemClock::new();
    let viewport = Viewport::detect();

    let mut card = Card::new(content, args.particles, args.seed, viewport);
    let mut options = ViewOptions {
        debug: args.debug,
        wireframe: false,
    };
    let mut fps = FpsCounter::new(clock.elapsed());
    let (width, height) = viewport.pixel_size();
    let mut frame = FrameBuffer::new(width, height);
    let mut canvas = Canvas::new(viewport.cols, viewport.rows);
    let mut acknowledger = TerminalAcknowledger::new(viewport);
    let mut out = io::stdout();
    let budget = args.frame_budget();

    info!(
        "event=loop_start fps={} particles={} seed={:?}",
        args.fps, args.particles, args.seed
    );

    loop {
        let frame_start = Instant::now();
        let now = clock.elapsed();

        for message in card.frame(now) {
            acknowledger.acknowledge(&message)?;
        }

        let stats = FrameStats {
            elapsed: now,
            fps: fps.fps(),
        };
        compose(&mut canvas, &mut frame, &card, options, stats);
        canvas.flush(&mut out)?;
        fps.tick(now);

        loop {
            let remaining = budget.saturating_sub(frame_start.elapsed());
            if !event::poll(remaining)? {
                break;
            }
            let Some(action) = action_for(&event::read()?) else {
                continue;
            };
            let now = clock.elapsed();
            match action {
                Action::Quit => {
                    info!("event=quit state={:?} at={now:.3}", card.state());
                    return Ok(());
                }
                Action::Trigger => {
                    card.trigger(TriggerSource::Prompt, now);
                }
                Action::Button(index) => {
                    if !card.press_button(index, now) {
                        warn!("event=button_unavailable index={index}");
                    }
                }
                Action::Scroll(delta) => card.scroll(delta),
                Action::Page(direction) => {
                    let rows = card.content().layout().visible_rows().max(1) as isize;
                    card.scroll(direction * rows);
                }
                Action::Click(col, row) => card.pointer_click(col, row, now),
                Action::Move(col, row) => card.pointer_move(col, row),
                Action::Resize(cols, rows) => {
                    card.resize(cols, rows);
                    let viewport = card.viewport();
                    let (width, height) = viewport.pixel_size();
                    frame.resize(width, height);
                    canvas.resize(viewport.cols, viewport.rows);
                    acknowledger.set_viewport(viewport);
                    execute!(out, Clear(ClearType::All))?;
                    info!("event=resize cols={} rows={}", viewport.cols, viewport.rows);
                }
                Action::ToggleDebug => options.debug = !options.debug,
                Action::ToggleWireframe => options.wireframe = !options.wireframe,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn frame_rows_pack_into_half_blocks() {
        let mut frame = FrameBuffer::new(2, 4);
        frame.clear(Rgb::BLACK);
        frame.plot_point(0.5, 0.5, 0.0, Rgb::WHITE, 1.0);
        let mut canvas = Canvas::new(2, 2);
        canvas.draw_frame(&frame);
        let cell = canvas.cell(0, 0).copied();
        assert_eq!(
            cell,
            Some(Cell {
                glyph: HALF_BLOCK,
                fg: Rgb::WHITE,
                bg: Rgb::BLACK,
            })
        );
    }

    #[test]
    fn text_is_clipped_at_the_edge() {
        let mut canvas = Canvas::new(4, 1);
        let style = TextStyle {
            fg: Rgb::WHITE,
            bg: None,
        };
        canvas.put_text(2, 0, "abc", style, 1.0);
        assert_eq!(canvas.cell(1, 0).map(|c| c.glyph), Some(HALF_BLOCK));
        assert_eq!(canvas.cell(2, 0).map(|c| c.glyph), Some('a'));
        assert_eq!(canvas.cell(3, 0).map(|c| c.glyph), Some('b'));
    }

    #[test]
    fn wide_glyphs_take_two_cells() {
        let mut canvas = Canvas::new(4, 1);
        let style = TextStyle {
            fg: Rgb::WHITE,
            bg: None,
        };
        canvas.put_text(0, 0, "♥界", style, 1.0);
        assert_eq!(canvas.cell(1, 0).map(|c| c.glyph), Some('界'));
        assert_eq!(canvas.cell(2, 0).map(|c| c.glyph), Some(CONTINUATION));
    }

    #[test]
    fn transparent_text_keeps_the_scene_color() {
        let mut canvas = Canvas::new(1, 1);
        let style = TextStyle {
            fg: Rgb::WHITE,
            bg: None,
        };
        canvas.put_text(0, 0, "x", style, 0.0);
        assert_eq!(canvas.cell(0, 0).map(|c| c.fg), Some(Rgb::BLACK));
    }

    #[test]
    fn flush_only_sets_colors_on_change() {
        let canvas = Canvas::new(3, 2);
        let mut out = Vec::new();
        canvas.flush(&mut out).expect("flush to memory");
        let text = String::from_utf8(out).expect("utf8 output");
        assert_eq!(text.matches("38;2;").count(), 1);
        assert_eq!(text.matches("48;2;").count(), 1);
        assert_eq!(text.matches(HALF_BLOCK).count(), 6);
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(action_for(&key(KeyCode::Enter)), Some(Action::Trigger));
        assert_eq!(action_for(&key(KeyCode::Char(' '))), Some(Action::Trigger));
        assert_eq!(action_for(&key(KeyCode::Char('3'))), Some(Action::Button(2)));
        assert_eq!(action_for(&key(KeyCode::Char('0'))), None);
        assert_eq!(action_for(&key(KeyCode::PageDown)), Some(Action::Page(1)));
        assert_eq!(action_for(&key(KeyCode::Esc)), Some(Action::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(action_for(&ctrl_c), Some(Action::Quit));
        assert_eq!(action_for(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn mouse_maps_to_actions() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(action_for(&click), Some(Action::Click(4, 7)));
        let right = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(action_for(&right), None);
        assert_eq!(action_for(&Event::Resize(100, 30)), Some(Action::Resize(100, 30)));
    }

    #[test]
    fn composed_open_card_shows_the_title() {
        let viewport = Viewport::new(80, 24);
        let mut card = Card::new(CardContent::builtin(), 0, Some(1), viewport);
        card.trigger(TriggerSource::Prompt, 0.0);
        card.frame(0.0);
        card.frame(10.0);

        let (width, height) = viewport.pixel_size();
        let mut frame = FrameBuffer::new(width, height);
        let mut canvas = Canvas::new(viewport.cols, viewport.rows);
        compose(&mut canvas, &mut frame, &card, ViewOptions::default(), FrameStats::default());

        let layout = card.content().layout();
        let (col, row) = layout.line_origin(0, 0).expect("title on screen");
        let title: String = (col..col + 64)
            .filter_map(|c| canvas.cell(c, row).map(|cell| cell.glyph))
            .collect();
        assert!(title.contains("Happy Valentine's Day"));
    }
}
