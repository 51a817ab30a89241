#![forbid(unsafe_code)]

//! Viewer state and the terminal event loop.
//!
//! [`Viewer`] applies input to the engine and draws chrome; it writes to any
//! `io::Write`, so tests drive it without a terminal. [`run`] owns the real
//! terminal: it polls crossterm with the frame clock's timeout and calls
//! [`Viewer::frame`] on every tick.

use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use logsmith::{Dataset, EngineConfig, FpsMeter, FrameClock, RenderEngine, RenderOutcome, Result};

use crate::cli::Opts;
use crate::keymap::{Action, InputMode, map_key, map_mouse};
use crate::mock;
use crate::terminal::{TerminalSession, TerminalSurface, draw_chrome_line};

/// Viewport extent assumed before the terminal size is known.
const FALLBACK_LIST_ROWS: f64 = 24.0;
/// Events handled per poll before a frame gets a chance to run.
const MAX_EVENTS_PER_POLL: usize = 64;

/// Engine configuration for a terminal: one cell per row.
#[must_use]
pub fn terminal_config(fps: Option<u32>) -> EngineConfig {
    let config = EngineConfig::from_env()
        .with_row_extent(1.0)
        .with_fallback_viewport_extent(FALLBACK_LIST_ROWS);
    match fps {
        Some(fps) => config.with_target_fps(fps),
        None => config,
    }
}

/// Interactive viewer over a [`TerminalSurface`].
#[derive(Debug)]
pub struct Viewer {
    engine: RenderEngine<TerminalSurface>,
    mode: InputMode,
    filter: String,
    fps: FpsMeter,
    last_outcome: Option<RenderOutcome>,
    last_header: String,
    last_status: String,
    full_redraw: bool,
    quit: bool,
}

impl Viewer {
    /// Build the engine and run the first render.
    #[must_use]
    pub fn new(dataset: Dataset, surface: TerminalSurface, config: EngineConfig) -> Self {
        let mut engine = RenderEngine::new(dataset, surface, config);
        let outcome = engine.render_now();
        Self {
            engine,
            mode: InputMode::Browse,
            filter: String::new(),
            fps: FpsMeter::new(),
            last_outcome: Some(outcome),
            last_header: String::new(),
            last_status: String::new(),
            full_redraw: true,
            quit: false,
        }
    }

    /// The engine.
    #[must_use]
    pub fn engine(&self) -> &RenderEngine<TerminalSurface> {
        &self.engine
    }

    /// Current input mode.
    #[must_use]
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Filter text as typed.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Whether the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Outcome of the most recent render.
    #[must_use]
    pub fn last_outcome(&self) -> Option<RenderOutcome> {
        self.last_outcome
    }

    /// Route a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if let Some(action) = map_key(&key, self.mode) {
                    self.apply(action);
                }
            }
            Event::Mouse(mouse) => {
                if let Some(action) = map_mouse(&mouse) {
                    self.apply(action);
                }
            }
            Event::Resize(cols, rows) => {
                self.engine.surface_mut().resize(cols, rows);
                self.engine.notify_resize();
                self.full_redraw = true;
            }
            _ => {}
        }
    }

    /// Apply a user action to the engine.
    pub fn apply(&mut self, action: Action) {
        tracing::trace!(?action, "action");
        match action {
            Action::ScrollRows(rows) => self.engine.scroll_by_rows(rows),
            Action::Page(pages) => self.engine.page(pages),
            Action::Home => self.engine.scroll_to_start(),
            Action::End => self.engine.scroll_to_end(),
            Action::FocusFilter => self.mode = InputMode::Filter,
            Action::Blur => self.mode = InputMode::Browse,
            Action::InsertChar(c) => {
                self.filter.push(c);
                self.engine.set_filter_text(&self.filter);
            }
            Action::DeleteChar => {
                if self.filter.pop().is_some() {
                    self.engine.set_filter_text(&self.filter);
                }
            }
            Action::ClearFilter => {
                self.mode = InputMode::Browse;
                if !self.filter.is_empty() {
                    self.filter.clear();
                    self.engine.set_filter_text("");
                }
            }
            Action::Quit => self.quit = true,
        }
    }

    /// Header line: the filter prompt.
    #[must_use]
    pub fn header_text(&self) -> String {
        let cursor = match self.mode {
            InputMode::Filter => "_",
            InputMode::Browse => "",
        };
        format!(" LogSmith | filter: {}{cursor}", self.filter)
    }

    /// Status line: visible range, pool size, and frame rate.
    #[must_use]
    pub fn status_text(&mut self, now: Instant) -> String {
        let dataset = self.engine.dataset();
        let shown = dataset.view_len();
        let range = if shown == 0 {
            "no matching rows".to_string()
        } else {
            let list_rows = usize::from(self.engine.surface().list_rows());
            let first = self.engine.viewport().scroll_offset() as usize;
            let last = (first + list_rows).min(shown);
            format!("rows {}-{last} of {shown}", first + 1)
        };
        format!(
            " {range} ({} total) | pool {} | {} fps | / filter  Esc clear  q quit",
            dataset.len(),
            self.engine.pool().capacity(),
            self.fps.fps(now),
        )
    }

    /// Run one display frame: render if pending, then draw what changed.
    pub fn frame<W: Write>(&mut self, now: Instant, out: &mut W) -> io::Result<()> {
        if let Some(outcome) = self.engine.on_frame() {
            self.fps.record(now);
            self.last_outcome = Some(outcome);
        }

        if self.full_redraw {
            queue!(out, Clear(ClearType::All))?;
            self.engine.surface_mut().mark_damaged();
            self.last_header.clear();
            self.last_status.clear();
            self.full_redraw = false;
        }

        let mut drew = self.engine.surface_mut().present(out)?;
        let cols = self.engine.surface().cols();

        let header = self.header_text();
        if header != self.last_header {
            draw_chrome_line(out, 0, &header, cols, false)?;
            self.last_header = header;
            drew = true;
        }

        let status = self.status_text(now);
        if status != self.last_status {
            let row = self.engine.surface().status_row();
            draw_chrome_line(out, row, &status, cols, true)?;
            self.last_status = status;
            drew = true;
        }

        if drew {
            out.flush()?;
        }
        Ok(())
    }
}

/// Run the viewer until the user quits or the exit timer fires.
///
/// # Errors
///
/// Returns an error if the terminal cannot be driven.
pub fn run(opts: &Opts) -> Result<()> {
    let dataset = mock::dataset(opts.rows, opts.seed);
    let config = terminal_config(opts.fps);
    let mut clock = FrameClock::new(config.frame_interval());

    let session = TerminalSession::enter(true)?;
    let (cols, rows) = session.size()?;
    let mut viewer = Viewer::new(dataset, TerminalSurface::new(cols, rows), config);
    let mut out = BufWriter::new(io::stdout());

    let started = Instant::now();
    let exit_after = (opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms));
    tracing::info!(cols, rows, fps = clock.interval().as_secs_f64().recip(), "viewer started");

    while !viewer.should_quit() {
        let now = Instant::now();
        if exit_after.is_some_and(|limit| now.duration_since(started) >= limit) {
            tracing::info!("exit timer fired");
            break;
        }

        if event::poll(clock.time_until_next_frame(now))? {
            viewer.handle_event(event::read()?);
            let mut handled = 1;
            while handled < MAX_EVENTS_PER_POLL && event::poll(Duration::ZERO)? {
                viewer.handle_event(event::read()?);
                handled += 1;
            }
        }

        let now = Instant::now();
        if clock.tick(now) {
            viewer.frame(now, &mut out)?;
        }
    }

    let stats = viewer.engine().scheduler().stats();
    tracing::info!(
        frames = clock.frames(),
        renders = stats.frames_rendered,
        coalesced = stats.coalesced,
        "viewer stopped"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use logsmith::{LogEntry, LogLevel, Surface};

    fn viewer(n: u64) -> Viewer {
        let data: Dataset = (0..n)
            .map(|i| {
                let level = LogLevel::ALL[(i % 3) as usize];
                LogEntry::new(i, format!("t{i}"), level, format!("{level} event #{i}"))
            })
            .collect();
        let config = EngineConfig::default()
            .with_row_extent(1.0)
            .with_buffer_rows(4)
            .with_fallback_viewport_extent(FALLBACK_LIST_ROWS);
        Viewer::new(data, TerminalSurface::new(80, 12), config)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn first_render_happens_on_construction() {
        let v = viewer(100);
        let window = v.last_outcome().map(|o| o.window()).expect("rendered");
        // 10 list rows + 4 buffer rows
        assert_eq!(window.range(), 0..14);
    }

    #[test]
    fn typing_filters_and_escape_clears() {
        let mut v = viewer(90);
        v.handle_event(key(KeyCode::Char('/')));
        assert_eq!(v.mode(), InputMode::Filter);
        for c in "error".chars() {
            v.handle_event(key(KeyCode::Char(c)));
        }
        assert_eq!(v.filter(), "error");
        assert_eq!(v.engine().dataset().view_len(), 30);
        assert_eq!(v.header_text(), " LogSmith | filter: error_");

        v.handle_event(key(KeyCode::Backspace));
        assert_eq!(v.filter(), "erro");

        v.handle_event(key(KeyCode::Esc));
        assert_eq!(v.mode(), InputMode::Browse);
        assert_eq!(v.filter(), "");
        assert_eq!(v.engine().dataset().view_len(), 90);
    }

    #[test]
    fn navigation_moves_surface_scroll() {
        let mut v = viewer(100);
        v.handle_event(key(KeyCode::Down));
        v.handle_event(key(KeyCode::Down));
        assert_eq!(v.engine().surface().scroll_offset(), 2.0);
        v.handle_event(key(KeyCode::End));
        assert_eq!(v.engine().surface().scroll_offset(), 90.0);
        v.handle_event(key(KeyCode::PageUp));
        assert_eq!(v.engine().surface().scroll_offset(), 80.0);
        v.handle_event(key(KeyCode::Char('g')));
        assert_eq!(v.engine().surface().scroll_offset(), 0.0);
    }

    #[test]
    fn resize_changes_window() {
        let mut v = viewer(100);
        v.handle_event(Event::Resize(80, 22));
        let mut out = Vec::new();
        v.frame(Instant::now(), &mut out).unwrap();
        let window = v.last_outcome().map(|o| o.window()).expect("rendered");
        assert_eq!(window.required_slots, 24);
    }

    #[test]
    fn frame_draws_then_goes_quiet() {
        let mut v = viewer(100);
        let mut out = Vec::new();
        let now = Instant::now();
        v.frame(now, &mut out).unwrap();
        assert!(!out.is_empty());

        out.clear();
        v.frame(now, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn status_reports_range_and_empty_view() {
        let mut v = viewer(100);
        let now = Instant::now();
        assert!(v.status_text(now).starts_with(" rows 1-10 of 100 (100 total)"));
        v.apply(Action::InsertChar('z'));
        assert!(v.status_text(now).starts_with(" no matching rows"));
    }

    #[test]
    fn quit_keys() {
        let mut v = viewer(10);
        v.handle_event(key(KeyCode::Char('q')));
        assert!(v.should_quit());
    }
}
