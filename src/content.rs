//! Text overlays: the entry prompt and the card content revealed when the
//! envelope opens.
//!
//! # Content format
//!
//! ```text
//! Happy Valentine's Day          <- first non-empty line: title
//!
//! A paragraph, possibly          <- blank-line separated sections
//! spanning several lines.
//!
//! [ Yes! ]                       <- a line in brackets is a button
//! ! I love you!                  <- acknowledgement shown after a button
//! ```

use crate::error::{CardError, Result};
use crate::viewport::{Rect, Viewport};
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const BUILTIN: &str = "\
Happy Valentine's Day

Every day with you feels like opening a letter I never want to finish reading.

Thank you for the laughs, the late night talks, the patience and the coffee. \
You make the ordinary things feel like a celebration.

So I have one small question for you: will you be my Valentine?

[ Yes! ]
[ Of course! ]
! I love you, my Valentine! <3
";

const DEFAULT_ACKNOWLEDGEMENT: &str = "I love you, my Valentine! <3";
const PANEL_MAX_WIDTH: u16 = 64;
const PANEL_MARGIN: u16 = 2;
const PADDING_X: u16 = 2;
const BUTTON_GAP: usize = 3;
/// Share of a block that must be on screen before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Parsed card text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardContent {
    pub title: String,
    pub sections: Vec<String>,
    pub buttons: Vec<String>,
    pub acknowledgement: String,
}

impl CardContent {
    pub fn builtin() -> Self {
        Self::parse(BUILTIN)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CardError::Content {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let mut title = None;
        let mut sections = Vec::new();
        let mut buttons = Vec::new();
        let mut acknowledgement = None;
        let mut paragraph: Vec<&str> = Vec::new();

        for line in text.lines().map(str::trim) {
            if line.is_empty() {
                flush(&mut paragraph, &mut sections);
            } else if title.is_none() {
                title = Some(line.to_string());
            } else if let Some(label) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                flush(&mut paragraph, &mut sections);
                buttons.push(label.trim().to_string());
            } else if let Some(message) = line.strip_prefix('!') {
                flush(&mut paragraph, &mut sections);
                acknowledgement = Some(message.trim().to_string());
            } else {
                paragraph.push(line);
            }
        }
        flush(&mut paragraph, &mut sections);

        CardContent {
            title: title.unwrap_or_default(),
            sections,
            buttons,
            acknowledgement: acknowledgement
                .unwrap_or_else(|| DEFAULT_ACKNOWLEDGEMENT.to_string()),
        }
    }
}

fn flush(paragraph: &mut Vec<&str>, sections: &mut Vec<String>) {
    if !paragraph.is_empty() {
        sections.push(paragraph.join(" "));
        paragraph.clear();
    }
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let needed = if current.is_empty() { word_width } else { current_width + 1 + word_width };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Body,
    Buttons,
    Blank,
}

/// A button's position within a laid out line, in cells from the panel's
/// text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSpan {
    pub index: usize,
    pub offset: u16,
    pub width: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    pub text: String,
    pub style: LineStyle,
    /// Reveal block this line belongs to: title, each section, then buttons.
    pub block: Option<usize>,
    pub buttons: Vec<ButtonSpan>,
}

impl LayoutLine {
    fn blank() -> Self {
        LayoutLine {
            text: String::new(),
            style: LineStyle::Blank,
            block: None,
            buttons: Vec::new(),
        }
    }
}

/// Content wrapped to a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLayout {
    pub panel: Rect,
    pub lines: Vec<LayoutLine>,
}

impl ContentLayout {
    pub fn new(content: &CardContent, viewport: Viewport) -> Self {
        let width = viewport
            .cols
            .saturating_sub(PANEL_MARGIN * 2)
            .min(PANEL_MAX_WIDTH)
            .max(PADDING_X * 2 + 1)
            .min(viewport.cols);
        let height = viewport.rows.saturating_sub(PANEL_MARGIN * 2).max(3).min(viewport.rows);
        let panel = Rect {
            x: (viewport.cols - width) / 2,
            y: (viewport.rows - height) / 2,
            width,
            height,
        };
        let text_width = usize::from(width.saturating_sub(PADDING_X * 2)).max(1);

        let mut lines = Vec::new();
        let mut block = 0;
        for line in wrap(&content.title, text_width) {
            lines.push(LayoutLine {
                text: center(&line, text_width),
                style: LineStyle::Title,
                block: Some(block),
                buttons: Vec::new(),
            });
        }
        for section in &content.sections {
            block += 1;
            lines.push(LayoutLine::blank());
            for line in wrap(section, text_width) {
                lines.push(LayoutLine {
                    text: line,
                    style: LineStyle::Body,
                    block: Some(block),
                    buttons: Vec::new(),
                });
            }
        }
        if !content.buttons.is_empty() {
            block += 1;
            lines.push(LayoutLine::blank());
            lines.extend(button_rows(&content.buttons, text_width, block));
        }

        ContentLayout { panel, lines }
    }

    /// Text rows available inside the panel.
    pub fn visible_rows(&self) -> usize {
        usize::from(self.panel.height.saturating_sub(2))
    }

    pub fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.visible_rows())
    }

    /// Viewport cell of the first text column of layout line `index` at
    /// scroll `scroll`, if that line is on screen.
    pub fn line_origin(&self, index: usize, scroll: usize) -> Option<(u16, u16)> {
        let row = index.checked_sub(scroll)?;
        if row >= self.visible_rows() {
            return None;
        }
        Some((self.panel.x + PADDING_X, self.panel.y + 1 + row as u16))
    }
}

fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn button_rows(labels: &[String], width: usize, block: usize) -> Vec<LayoutLine> {
    let mut rows: Vec<Vec<(usize, String)>> = Vec::new();
    let mut row_width = 0;
    for (index, label) in labels.iter().enumerate() {
        let text = format!("[ {label} ]");
        let w = text.width();
        match rows.last_mut() {
            Some(row) if row_width + BUTTON_GAP + w <= width => {
                row.push((index, text));
                row_width += BUTTON_GAP + w;
            }
            _ => {
                rows.push(vec![(index, text)]);
                row_width = w;
            }
        }
    }

    rows.into_iter()
        .map(|row| {
            let total: usize = row.iter().map(|(_, t)| t.width()).sum::<usize>()
                + BUTTON_GAP * row.len().saturating_sub(1);
            let mut offset = width.saturating_sub(total) / 2;
            let mut text = " ".repeat(offset);
            let mut buttons = Vec::new();
            for (i, (index, label)) in row.iter().enumerate() {
                if i > 0 {
                    text.push_str(&" ".repeat(BUTTON_GAP));
                    offset += BUTTON_GAP;
                }
                buttons.push(ButtonSpan {
                    index: *index,
                    offset: offset as u16,
                    width: label.width() as u16,
                });
                text.push_str(label);
                offset += label.width();
            }
            LayoutLine {
                text,
                style: LineStyle::Buttons,
                block: Some(block),
                buttons,
            }
        })
        .collect()
}

/// Seconds the entry prompt takes to fade before it is removed.
pub const PROMPT_FADE_SECS: f64 = 0.5;

/// "Click to open" hint shown until the envelope is triggered.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPrompt {
    pub text: String,
    opacity: f64,
    hidden_at: Option<f64>,
}

impl Default for EntryPrompt {
    fn default() -> Self {
        EntryPrompt {
            text: "Click the envelope (or press Enter) to open".to_string(),
            opacity: 1.0,
            hidden_at: None,
        }
    }
}

impl EntryPrompt {
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Text as drawn, padded into a pill.
    pub fn label(&self) -> String {
        format!("  {}  ", self.text)
    }

    /// Cells the prompt covers: centered, three rows above the bottom.
    pub fn rect(&self, viewport: Viewport) -> Rect {
        let width = (self.label().width() as u16).min(viewport.cols);
        Rect {
            x: (viewport.cols - width) / 2,
            y: viewport.rows.saturating_sub(3),
            width,
            height: 1,
        }
    }

    /// Starts fading the prompt out at `now`. Later calls keep the first time.
    pub fn hide(&mut self, now: f64) {
        self.hidden_at.get_or_insert(now);
    }

    /// Updates the fade. Returns `true` once the prompt should be removed.
    pub fn update(&mut self, now: f64) -> bool {
        let Some(at) = self.hidden_at else {
            return false;
        };
        let elapsed = now - at;
        self.opacity = 1.0 - (elapsed / PROMPT_FADE_SECS).clamp(0.0, 1.0);
        elapsed >= PROMPT_FADE_SECS
    }
}

/// The card content region: hidden until the envelope flies away, then
/// faded in and, once the card is open, scrollable.
#[derive(Debug, Clone)]
pub struct ContentRegion {
    content: CardContent,
    layout: ContentLayout,
    hidden: bool,
    opacity: f64,
    scroll: usize,
    scroll_enabled: bool,
    revealed: Vec<bool>,
}

impl ContentRegion {
    pub fn new(content: CardContent, viewport: Viewport) -> Self {
        let layout = ContentLayout::new(&content, viewport);
        let blocks = 1 + content.sections.len() + usize::from(!content.buttons.is_empty());
        ContentRegion {
            content,
            layout,
            hidden: true,
            opacity: 0.0,
            scroll: 0,
            scroll_enabled: false,
            revealed: vec![false; blocks],
        }
    }

    pub fn content(&self) -> &CardContent {
        &self.content
    }

    pub fn layout(&self) -> &ContentLayout {
        &self.layout
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    pub fn is_block_revealed(&self, block: usize) -> bool {
        self.revealed.get(block).copied().unwrap_or(false)
    }

    /// Unhides the region fully transparent, ready to be faded in.
    pub fn unhide(&mut self) {
        self.hidden = false;
        self.opacity = 0.0;
        self.update_reveals();
    }

    pub fn enable_scroll(&mut self) {
        self.scroll_enabled = true;
    }

    /// Scrolls by `delta` lines. Does nothing until scrolling is enabled.
    pub fn scroll_by(&mut self, delta: isize) {
        if !self.scroll_enabled {
            return;
        }
        let max = self.layout.max_scroll() as isize;
        self.scroll = (self.scroll as isize + delta).clamp(0, max) as usize;
        self.update_reveals();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.layout = ContentLayout::new(&self.content, viewport);
        self.scroll = self.scroll.min(self.layout.max_scroll());
        self.update_reveals();
    }

    /// Screen rectangle of each visible button.
    pub fn button_rects(&self) -> Vec<(usize, Rect)> {
        if self.hidden {
            return Vec::new();
        }
        let mut rects = Vec::new();
        for (i, line) in self.layout.lines.iter().enumerate() {
            let Some((x, y)) = self.layout.line_origin(i, self.scroll) else {
                continue;
            };
            for span in &line.buttons {
                rects.push((
                    span.index,
                    Rect {
                        x: x + span.offset,
                        y,
                        width: span.width,
                        height: 1,
                    },
                ));
            }
        }
        rects
    }

    pub fn button_at(&self, col: u16, row: u16) -> Option<(usize, Rect)> {
        self.button_rects()
            .into_iter()
            .find(|(_, rect)| rect.contains(col, row))
    }

    /// Marks blocks with at least [`REVEAL_THRESHOLD`] of their lines on
    /// screen as revealed. Revealed blocks stay revealed.
    fn update_reveals(&mut self) {
        if self.hidden {
            return;
        }
        let visible = self.scroll..self.scroll + self.layout.visible_rows();
        for (block, revealed) in self.revealed.iter_mut().enumerate() {
            if *revealed {
                continue;
            }
            let (total, shown) = self
                .layout
                .lines
                .iter()
                .enumerate()
                .filter(|(_, line)| line.block == Some(block))
                .fold((0usize, 0usize), |(total, shown), (i, _)| {
                    (total + 1, shown + usize::from(visible.contains(&i)))
                });
            if total > 0 && shown as f64 / total as f64 >= REVEAL_THRESHOLD {
                *revealed = true;
            }
        }
    }
}
