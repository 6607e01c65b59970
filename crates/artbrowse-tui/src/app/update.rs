use super::{App, InputMode, Overlay};
use crate::action::Action;
use crate::view::grid::CHECKBOX_WIDTH;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        if action == Action::Tick {
            self.tick = self.tick.wrapping_add(1);
            return self.should_quit;
        }
        if action == Action::ForceQuit {
            self.should_quit = true;
            return true;
        }

        // Quit confirmation modal: q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => self.should_quit = true,
                Action::NavigateBack => self.confirm_quit = false,
                _ => {}
            }
            return self.should_quit;
        }

        match self.overlay {
            Overlay::SelectCount => self.update_select_count(action),
            Overlay::Help => {
                if matches!(
                    action,
                    Action::ToggleHelp | Action::NavigateBack | Action::Quit
                ) {
                    self.overlay = Overlay::None;
                }
            }
            Overlay::Detail => match action {
                Action::DrillIn | Action::NavigateBack | Action::Quit => {
                    self.overlay = Overlay::None;
                }
                Action::MoveDown | Action::MoveUp | Action::ToggleRow => {
                    self.update_grid(action);
                }
                _ => {}
            },
            Overlay::None => self.update_grid(action),
        }
        self.should_quit
    }

    fn update_grid(&mut self, action: Action) {
        let rows = self.browser.records().len();
        match action {
            Action::Quit => {
                if self.browser.selection().is_empty() {
                    self.should_quit = true;
                } else {
                    self.confirm_quit = true;
                }
            }
            Action::MoveDown => {
                if rows > 0 {
                    self.cursor = (self.cursor + 1).min(rows - 1);
                }
            }
            Action::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Action::GoTop => self.cursor = 0,
            Action::GoBottom => self.cursor = rows.saturating_sub(1),
            Action::PrevPage => self.go_previous(),
            Action::NextPage => self.go_next(),
            Action::ToggleRow => {
                self.browser.toggle_row(self.cursor);
            }
            Action::OpenSelectCount => {
                self.overlay = Overlay::SelectCount;
                self.input_mode = InputMode::TextInput;
                self.count_input.end();
            }
            Action::DrillIn => {
                if self.browser.record(self.cursor).is_some() {
                    self.overlay = Overlay::Detail;
                }
            }
            Action::ToggleHelp => self.overlay = Overlay::Help,
            Action::ClickAt(x, y) => self.click_at(x, y),
            _ => {}
        }
    }

    fn update_select_count(&mut self, action: Action) {
        match action {
            Action::TextInput(ch) => self.count_input.insert(ch),
            Action::TextBackspace => self.count_input.backspace(),
            Action::TextDelete => self.count_input.delete_forward(),
            Action::CursorLeft => self.count_input.left(),
            Action::CursorRight => self.count_input.right(),
            Action::CursorHome => self.count_input.home(),
            Action::CursorEnd => self.count_input.end(),
            Action::TextConfirm => {
                // A zero or unparsable count is a no-op and leaves the overlay open.
                if let Some(acc) = self.browser.submit_count(self.count_input.as_str()) {
                    self.sync_count_input(acc);
                    self.close_select_count();
                }
            }
            Action::TextCancel => self.close_select_count(),
            _ => {}
        }
    }

    pub(super) fn close_select_count(&mut self) {
        self.overlay = Overlay::None;
        self.input_mode = InputMode::Normal;
    }

    // Navigation is disabled while a page is loading.
    fn go_previous(&mut self) {
        if self.browser.is_loading() {
            return;
        }
        if let Some(request) = self.browser.previous() {
            self.send_fetch(request);
        }
    }

    fn go_next(&mut self) {
        if self.browser.is_loading() {
            return;
        }
        if let Some(request) = self.browser.next() {
            self.send_fetch(request);
        }
    }

    /// Map a left click onto a table row or a pager button.
    fn click_at(&mut self, x: u16, y: u16) {
        let hit = |r: Option<ratatui::layout::Rect>| {
            r.is_some_and(|r| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height)
        };
        if hit(self.hit_areas.prev_button) {
            self.go_previous();
            return;
        }
        if hit(self.hit_areas.next_button) {
            self.go_next();
            return;
        }

        let Some(area) = self.hit_areas.table else {
            return;
        };
        // Border (1) + header row (1) precede the first data row; the bottom border follows the last.
        let first_row_y = area.y + 2;
        let bottom_border_y = (area.y + area.height).saturating_sub(1);
        if y < first_row_y || y >= bottom_border_y || x < area.x || x >= area.x + area.width {
            return;
        }
        let row = self.hit_areas.table_offset + (y - first_row_y) as usize;
        if row >= self.browser.records().len() {
            return;
        }
        self.cursor = row;
        if x < area.x + 1 + CHECKBOX_WIDTH {
            self.browser.toggle_row(row);
        }
    }
}
