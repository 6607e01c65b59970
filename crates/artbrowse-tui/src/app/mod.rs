mod update;


use ratatui::Frame;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use artbrowse_core::{Accumulation, Browser, FetchRequest, PageOutcome};

use crate::model::text_input::TextInput;
use crate::theme::Theme;
use crate::tui_event::{BackendCommand, BackendEvent};
use crate::view;

/// Popup drawn over the grid, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    SelectCount,
    Detail,
    Help,
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    TextInput,
}

/// Clickable regions recorded during the last render (for mouse mapping).
#[derive(Debug, Clone, Copy, Default)]
pub struct HitAreas {
    pub table: Option<Rect>,
    /// Index of the first record row visible in the table.
    pub table_offset: usize,
    pub prev_button: Option<Rect>,
    pub next_button: Option<Rect>,
}

/// Main application state.
pub struct App {
    pub browser: Browser,
    /// Row of the current page under the cursor.
    pub cursor: usize,
    pub theme: Theme,
    pub source_name: String,
    pub overlay: Overlay,
    pub input_mode: InputMode,
    /// Text of the select-count overlay. Holds the remaining count after a
    /// partially satisfied request.
    pub count_input: TextInput,
    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
    pub hit_areas: HitAreas,
}

impl App {
    pub fn new(theme: Theme, source_name: impl Into<String>) -> Self {
        Self {
            browser: Browser::new(),
            cursor: 0,
            theme,
            source_name: source_name.into(),
            overlay: Overlay::None,
            input_mode: InputMode::Normal,
            count_input: TextInput::default(),
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            backend_cmd_tx: None,
            hit_areas: HitAreas::default(),
        }
    }

    /// Kick off the fetch of the first page.
    pub fn start(&mut self) {
        let request = self.browser.start();
        self.send_fetch(request);
    }

    pub(super) fn send_fetch(&self, request: FetchRequest) {
        tracing::debug!(page = request.page, seq = request.seq, "requesting page");
        if let Some(tx) = &self.backend_cmd_tx
            && tx.send(BackendCommand::FetchPage(request)).is_err()
        {
            tracing::warn!(page = request.page, "backend listener is gone");
        }
    }

    /// Apply an event from the backend.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::PageLoaded { request, page } => {
                match self.browser.page_loaded(request, page) {
                    PageOutcome::Applied { accumulation } => {
                        self.clamp_cursor();
                        if let Some(acc) = accumulation {
                            self.sync_count_input(acc);
                            if acc.is_satisfied() && self.overlay == Overlay::SelectCount {
                                self.close_select_count();
                            }
                        }
                    }
                    PageOutcome::Stale => {}
                }
            }
            // Already logged by the backend; nothing is shown.
            BackendEvent::FetchFailed { request, .. } => {
                self.browser.fetch_failed(request);
            }
        }
    }

    /// Keep the overlay text in step with the outstanding count.
    pub(super) fn sync_count_input(&mut self, acc: Accumulation) {
        if acc.is_satisfied() {
            self.count_input.clear();
        } else {
            self.count_input.set(acc.pending.remaining().to_string());
        }
    }

    pub(super) fn clamp_cursor(&mut self) {
        let len = self.browser.records().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Render the full UI.
    pub fn view(&mut self, f: &mut Frame) {
        view::grid::render(f, self);

        match self.overlay {
            Overlay::None => {}
            Overlay::SelectCount => view::select_count::render(f, self),
            Overlay::Detail => {
                if let Some(record) = self.browser.record(self.cursor) {
                    let selected = self.browser.is_selected(self.cursor);
                    view::detail::render(f, &self.theme, record, selected);
                }
            }
            Overlay::Help => view::help::render(f, &self.theme),
        }

        if self.confirm_quit {
            view::quit_confirm::render(f, &self.theme, self.browser.selection().len());
        }
    }
}
