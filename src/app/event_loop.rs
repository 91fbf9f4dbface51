//! Main event loop for the interactive preview

use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;

use super::render::{render_frame, surface_rows, RenderContext};
use super::{exit_code, highlight_markup, open_input, Config};
use crate::panel::PreviewControl;

/// Poll interval for terminal events
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Scroll position and quit flag
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub scroll: usize,
    pub should_quit: bool,
}

impl ViewState {
    /// Apply a key press given the number of document lines and visible rows
    pub fn handle_key(&mut self, key: KeyEvent, total: usize, rows: usize) {
        let max = total.saturating_sub(rows);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.scroll += 1,
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll += rows.max(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(rows.max(1)),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.scroll = max,
            _ => {}
        }
        self.scroll = self.scroll.min(max);
    }
}

/// Preview `config.input` and run until the user quits
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: Config,
) -> anyhow::Result<i32> {
    let mut control = PreviewControl::with_options(config.file.control_options()?);
    let size = terminal.size()?;
    control.set_size(size.width, size.height);

    let mut stream = open_input(&config.input);
    control.do_preview(&mut stream);
    drop(stream);

    let theme = config.file.ui.highlight.then_some(config.file.ui.theme.as_str());
    let lines = control
        .surface()
        .map(|surface| highlight_markup(&surface.document_text(), theme))
        .unwrap_or_default();
    let title = config.input.display_name();
    let mut view = ViewState::default();

    loop {
        terminal.draw(|frame| {
            render_frame(
                frame,
                &RenderContext {
                    control: &control,
                    title: &title,
                    lines: &lines,
                    scroll: view.scroll,
                },
            )
        })?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let area = Rect::new(0, 0, control.width(), control.height());
                view.handle_key(key, lines.len(), surface_rows(&control, area));
            }
            Event::Resize(width, height) => {
                control.set_size(width, height);
                let rows = surface_rows(&control, Rect::new(0, 0, width, height));
                view.scroll = view.scroll.min(lines.len().saturating_sub(rows));
            }
            _ => {}
        }

        if view.should_quit {
            break;
        }
    }

    control.unload();
    Ok(exit_code::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut view = ViewState::default();
        view.handle_key(key(KeyCode::Char('k')), 100, 10);
        assert_eq!(view.scroll, 0);

        view.handle_key(key(KeyCode::Char('j')), 100, 10);
        assert_eq!(view.scroll, 1);

        view.handle_key(key(KeyCode::Char('G')), 100, 10);
        assert_eq!(view.scroll, 90);

        view.handle_key(key(KeyCode::Down), 100, 10);
        assert_eq!(view.scroll, 90);

        view.handle_key(key(KeyCode::PageUp), 100, 10);
        assert_eq!(view.scroll, 80);

        view.handle_key(key(KeyCode::Home), 100, 10);
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_short_document_never_scrolls() {
        let mut view = ViewState::default();
        view.handle_key(key(KeyCode::PageDown), 5, 10);
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut view = ViewState::default();
        view.handle_key(key(KeyCode::Char('x')), 0, 0);
        assert!(!view.should_quit);
        view.handle_key(key(KeyCode::Esc), 0, 0);
        assert!(view.should_quit);
    }
}
