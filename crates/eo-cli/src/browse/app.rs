//! Browser state and event loop

use super::input::TextInput;
use super::ui;
use anyhow::Result;
use arboard::Clipboard;
use crossterm::{
    cursor::SetCursorStyle,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eo_catalog::{Record, SearchController};
use ratatui::{Terminal, backend::CrosstermBackend, widgets::ListState};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

const TOAST_DURATION: Duration = Duration::from_secs(2);
const PAGE: usize = 10;

pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
    pub is_error: bool,
}

impl Toast {
    pub fn new(message: String) -> Self {
        Self {
            message,
            expires_at: Instant::now() + TOAST_DURATION,
            is_error: false,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            is_error: true,
            ..Self::new(message)
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

pub struct App<'a> {
    pub search_input: TextInput,
    pub controller: SearchController<'a>,
    /// Selection within the controller's visible entries
    pub list_state: ListState,
    pub toast: Option<Toast>,
    pub should_quit: bool,
    /// Preview scroll offset in lines
    pub preview_scroll: u16,
    /// Time spent in the last search-and-render cycle
    pub last_query_time: Option<Duration>,
    clipboard: Option<Clipboard>,
}

impl<'a> App<'a> {
    pub fn new(controller: SearchController<'a>, clipboard: Option<Clipboard>) -> Self {
        let mut app = Self {
            search_input: TextInput::new(),
            controller,
            list_state: ListState::default(),
            toast: None,
            should_quit: false,
            preview_scroll: 0,
            last_query_time: None,
            clipboard,
        };
        app.reset_selection();
        app
    }

    pub fn selected_record(&self) -> Option<&'a Record> {
        let index = self.list_state.selected()?;
        self.controller.entries().get(index).map(|entry| entry.record)
    }

    fn reset_selection(&mut self) {
        let selected = (!self.controller.entries().is_empty()).then_some(0);
        self.list_state.select(selected);
        self.preview_scroll = 0;
    }

    /// Run one search-and-render cycle for the current input
    pub fn refresh(&mut self) {
        let started = Instant::now();
        self.controller.handle_input(&self.search_input.text);
        self.last_query_time = Some(started.elapsed());
        self.reset_selection();
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.controller.entries().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.list_state.select(Some(next));
        self.preview_scroll = 0;
    }

    fn copy_selected(&mut self) {
        let Some(record) = self.selected_record() else {
            self.toast = Some(Toast::error("Nothing selected".to_string()));
            return;
        };
        let Some(url) = record.original_url.as_deref() else {
            self.toast = Some(Toast::error(format!(
                "EO {} has no original document link",
                record.eo_number
            )));
            return;
        };

        self.toast = Some(match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.set_text(url) {
                Ok(()) => Toast::new(format!("Copied: {url}")),
                Err(e) => {
                    log::debug!("Clipboard write failed: {e}");
                    Toast::error("Failed to copy to clipboard".to_string())
                }
            },
            None => Toast::error("Clipboard not available".to_string()),
        });
    }

    fn open_selected(&mut self) {
        let Some(url) = self
            .selected_record()
            .and_then(|record| record.original_url.as_deref())
        else {
            self.toast = Some(Toast::error("No original document link".to_string()));
            return;
        };

        self.toast = Some(match open::that(url) {
            Ok(()) => Toast::new("Opened in browser".to_string()),
            Err(_) => Toast::error("Failed to open browser".to_string()),
        });
    }

    fn update_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                self.move_selection(-1)
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::CONTROL) => {
                self.move_selection(1)
            }
            (KeyCode::PageUp, _) => self.move_selection(-(PAGE as isize)),
            (KeyCode::PageDown, _) => self.move_selection(PAGE as isize),
            (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
                self.preview_scroll = self.preview_scroll.saturating_sub(3)
            }
            (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
                self.preview_scroll = self.preview_scroll.saturating_add(3)
            }
            (KeyCode::Enter, _) => self.copy_selected(),
            (KeyCode::Char('o'), KeyModifiers::CONTROL) => self.open_selected(),
            _ => {
                let before = self.search_input.text.clone();
                if self.search_input.handle_key(key.code, key.modifiers)
                    && self.search_input.text != before
                {
                    self.refresh();
                }
            }
        }
    }
}

/// Take over the terminal until the user quits
pub fn run(controller: SearchController<'_>, query: &str) -> Result<()> {
    let mut app = App::new(controller, Clipboard::new().ok());
    if !query.is_empty() {
        app.search_input = TextInput::with_text(query);
        app.refresh();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetCursorStyle::BlinkingBar)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        SetCursorStyle::DefaultUserShape
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    const TICK: Duration = Duration::from_millis(100);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(TICK)? {
            app.handle_event(event::read()?);
            // Drain the rest of a burst (e.g. a paste) before redrawing
            while event::poll(Duration::from_millis(0))? && !app.should_quit {
                app.handle_event(event::read()?);
            }
        }
        if app.should_quit {
            break;
        }
        app.update_toast();
    }

    Ok(())
}
