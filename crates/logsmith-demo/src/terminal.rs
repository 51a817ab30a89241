#![forbid(unsafe_code)]

//! Terminal surface and session guard.
//!
//! [`TerminalSurface`] implements [`Surface`] with a row extent of one cell.
//! It keeps its own copy of every pool slot and redraws the list area only
//! when something was committed, scrolled, or resized since the last
//! [`present`](TerminalSurface::present).
//!
//! Screen layout:
//!
//! ```text
//! row 0            header (filter prompt)
//! rows 1..=n       list area, one slot per row
//! last row         status line
//! ```
//!
//! [`TerminalSession`] owns raw mode and the alternate screen. Cleanup runs
//! on drop and from a panic hook, so the shell is usable after any exit.

use std::io::{self, Write};
use std::sync::OnceLock;

use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, event, execute, queue, terminal};
use logsmith::{LogLevel, PoolSlot, SlotDirty, Surface};
use unicode_width::UnicodeWidthChar;

/// Rows above the list area.
pub const HEADER_ROWS: u16 = 1;
/// Rows below the list area.
pub const FOOTER_ROWS: u16 = 1;

const LEVEL_WIDTH: usize = 5;
const LEVEL_PAD: &str = "     ";

/// Screen row (within the list area) for a slot at `offset`, if on screen.
#[must_use]
pub fn project_row(offset: f64, scroll_offset: f64, list_rows: u16) -> Option<u16> {
    let row = (offset - scroll_offset).floor();
    if row >= 0.0 && row < f64::from(list_rows) {
        Some(row as u16)
    } else {
        None
    }
}

/// Longest prefix of `text` that fits in `budget` columns. The width used is
/// subtracted from `budget`.
pub fn clip<'a>(text: &'a str, budget: &mut usize) -> &'a str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > *budget {
            *budget -= used;
            return &text[..idx];
        }
        used += w;
    }
    *budget -= used;
    text
}

/// Foreground color for a level label.
#[must_use]
pub fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Info => Color::Green,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Error => Color::Red,
    }
}

fn segments(slot: &PoolSlot) -> [(&str, Option<Color>); 6] {
    let level = slot.level_text();
    let pad = &LEVEL_PAD[..LEVEL_WIDTH.saturating_sub(level.len())];
    [
        (slot.timestamp(), None),
        (" ", None),
        (level, slot.level().map(level_color)),
        (pad, None),
        (" - ", None),
        (slot.message(), None),
    ]
}

/// Plain text of a row, clipped to `width` columns.
#[must_use]
pub fn row_text(slot: &PoolSlot, width: usize) -> String {
    let mut budget = width;
    let mut out = String::with_capacity(width);
    for (text, _) in segments(slot) {
        out.push_str(clip(text, &mut budget));
    }
    out
}

fn draw_row<W: Write>(out: &mut W, slot: &PoolSlot, width: usize) -> io::Result<()> {
    let mut budget = width;
    for (text, color) in segments(slot) {
        let text = clip(text, &mut budget);
        match color {
            Some(color) => queue!(out, SetForegroundColor(color), Print(text), ResetColor)?,
            None => queue!(out, Print(text))?,
        }
    }
    Ok(())
}

/// Draw a full-width chrome line (header or status) at screen row `row`.
pub fn draw_chrome_line<W: Write>(
    out: &mut W,
    row: u16,
    text: &str,
    cols: u16,
    reverse: bool,
) -> io::Result<()> {
    let mut budget = usize::from(cols);
    let text = clip(text, &mut budget);
    queue!(out, cursor::MoveTo(0, row))?;
    if reverse {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    queue!(out, Print(text), Print(" ".repeat(budget)))?;
    if reverse {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// A [`Surface`] drawn with crossterm.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    content_extent: f64,
    scroll_offset: f64,
    slots: Vec<PoolSlot>,
    row_map: Vec<Option<usize>>,
    damaged: bool,
}

impl TerminalSurface {
    /// A surface for a `cols` x `rows` terminal.
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            content_extent: 0.0,
            scroll_offset: 0.0,
            slots: Vec::new(),
            row_map: Vec::new(),
            damaged: true,
        }
    }

    /// Terminal columns.
    #[must_use]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Terminal rows.
    #[must_use]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Rows available to the list.
    #[must_use]
    pub fn list_rows(&self) -> u16 {
        self.rows.saturating_sub(HEADER_ROWS + FOOTER_ROWS)
    }

    /// Screen row of the status line.
    #[must_use]
    pub fn status_row(&self) -> u16 {
        self.rows.saturating_sub(FOOTER_ROWS)
    }

    /// Slots attached so far.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Record a terminal resize. The engine must be told via `notify_resize`.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.damaged = true;
    }

    /// Whether the list area needs redrawing.
    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.damaged
    }

    /// Force the next `present` to redraw.
    pub fn mark_damaged(&mut self) {
        self.damaged = true;
    }

    /// Text of each list row, top to bottom; `None` for empty rows.
    #[must_use]
    pub fn screen_lines(&mut self) -> Vec<Option<String>> {
        self.rebuild_row_map();
        let width = usize::from(self.cols);
        self.row_map
            .iter()
            .map(|slot| slot.map(|j| row_text(&self.slots[j], width)))
            .collect()
    }

    /// Draw the list area if it changed. Returns whether anything was drawn.
    pub fn present<W: Write>(&mut self, out: &mut W) -> io::Result<bool> {
        if !self.damaged {
            return Ok(false);
        }
        self.rebuild_row_map();
        let width = usize::from(self.cols);
        for (y, slot) in self.row_map.iter().enumerate() {
            queue!(out, cursor::MoveTo(0, HEADER_ROWS + y as u16))?;
            if let Some(j) = slot {
                draw_row(out, &self.slots[*j], width)?;
            }
            queue!(out, Clear(ClearType::UntilNewLine))?;
        }
        self.damaged = false;
        Ok(true)
    }

    fn rebuild_row_map(&mut self) {
        let list_rows = self.list_rows();
        self.row_map.clear();
        self.row_map.resize(usize::from(list_rows), None);
        for (j, slot) in self.slots.iter().enumerate() {
            if !slot.is_visible() {
                continue;
            }
            if let Some(y) = project_row(slot.placement().offset, self.scroll_offset, list_rows) {
                self.row_map[usize::from(y)] = Some(j);
            }
        }
    }
}

impl Surface for TerminalSurface {
    fn viewport_extent(&self) -> f64 {
        f64::from(self.list_rows())
    }

    fn content_extent(&self) -> f64 {
        self.content_extent
    }

    fn set_content_extent(&mut self, extent: f64) {
        self.content_extent = extent;
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        if self.scroll_offset != offset {
            self.scroll_offset = offset;
            self.damaged = true;
        }
    }

    fn attach_slots(&mut self, first: usize, slots: &[PoolSlot]) {
        debug_assert_eq!(first, self.slots.len(), "slots must be appended in order");
        self.slots.extend_from_slice(slots);
    }

    fn commit_slot(&mut self, index: usize, slot: &PoolSlot, dirty: SlotDirty) {
        self.slots[index].apply(slot, dirty);
        self.damaged = true;
    }
}

/// Raw mode and alternate screen for the life of the value.
#[derive(Debug)]
pub struct TerminalSession {
    mouse: bool,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be configured. Anything
    /// already enabled is restored before returning.
    pub fn enter(mouse: bool) -> io::Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        let session = Self { mouse };

        let mut stdout = io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        if mouse {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        tracing::info!(mouse, "terminal session started");
        Ok(session)
    }

    /// Current terminal size (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore(self.mouse);
        tracing::info!("terminal session ended");
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore(true);
            previous(info);
        }));
    });
}

fn restore(mouse: bool) {
    let mut stdout = io::stdout();
    if mouse {
        let _ = execute!(stdout, event::DisableMouseCapture);
    }
    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}
