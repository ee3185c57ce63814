use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::style::Style;
use ratatui::widgets::TableState;

use super::buffer::InputBuffer;
use super::constants::*;
use super::theme::Palette;
use crate::config::AppConfig;
use crate::model::SubmitOutcome;
use crate::store::TodoStore;

mod input;
mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Add,
    Edit,
    Help,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
    Yes,
    No,
}

impl ConfirmChoice {
    fn toggle(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self, palette: &Palette) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(palette.accent),
            StatusKind::Error => Style::default().fg(palette.danger),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

pub(crate) struct App {
    config: AppConfig,
    store: TodoStore,
    first_run: bool,
    selected: usize,
    table_state: TableState,
    input_mode: InputMode,
    input: InputBuffer,
    status: Option<StatusMessage>,
    confirm_choice: ConfirmChoice,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(config: AppConfig, store: TodoStore, first_run: bool) -> Self {
        let mut app = Self {
            config,
            store,
            first_run,
            selected: 0,
            table_state: TableState::default(),
            input_mode: InputMode::Normal,
            input: InputBuffer::new(),
            status: None,
            confirm_choice: ConfirmChoice::No,
            should_quit: false,
        };
        app.sync_selection();
        app
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > Duration::from_secs(5) {
                self.status = None;
            }
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn palette(&self) -> Palette {
        Palette::for_theme(self.store.theme())
    }

    fn selected_item_id(&self) -> Option<u64> {
        self.store.items().get(self.selected).map(|item| item.id)
    }

    fn sync_selection(&mut self) {
        if self.store.items().is_empty() {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            if self.selected >= self.store.items().len() {
                self.selected = self.store.items().len() - 1;
            }
            self.table_state.select(Some(self.selected));
        }
    }

    fn select_next(&mut self) {
        if self.store.items().is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.store.items().len() - 1);
        self.table_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.store.items().is_empty() {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.table_state.select(Some(self.selected));
    }

    fn select_first(&mut self) {
        if !self.store.items().is_empty() {
            self.selected = 0;
            self.table_state.select(Some(self.selected));
        }
    }

    fn select_last(&mut self) {
        if !self.store.items().is_empty() {
            self.selected = self.store.items().len() - 1;
            self.table_state.select(Some(self.selected));
        }
    }

    fn select_item_by_id(&mut self, id: u64) {
        if let Some(idx) = self.store.items().iter().position(|item| item.id == id) {
            self.selected = idx;
            self.table_state.select(Some(idx));
        }
    }

    fn begin_add(&mut self) {
        self.input.clear();
        self.store.set_draft("");
        self.input_mode = InputMode::Add;
        self.set_status_info(STATUS_ENTER_ADD);
    }

    fn begin_edit_selected(&mut self) {
        let Some(id) = self.selected_item_id() else {
            self.set_status_info("Nothing to edit");
            return;
        };
        if self.store.begin_edit(id) {
            let draft = self.store.draft().to_string();
            self.input.set(draft);
            self.input_mode = InputMode::Edit;
            self.set_status_info(STATUS_ENTER_EDIT);
        }
    }

    /// Commit the input buffer through the store. On a blank draft the
    /// store refuses and the mode is left unchanged, so a pending edit
    /// stays on screen.
    fn submit_input(&mut self) -> Result<()> {
        self.store.set_draft(self.input.as_str());
        match self.store.submit()? {
            SubmitOutcome::Added(id) => {
                self.input.clear();
                self.input_mode = InputMode::Normal;
                self.sync_selection();
                self.select_item_by_id(id);
                self.set_status_info("Added task");
            }
            SubmitOutcome::Updated(id) => {
                self.input.clear();
                self.input_mode = InputMode::Normal;
                self.select_item_by_id(id);
                self.set_status_info("Updated task");
            }
            SubmitOutcome::Ignored => {
                if self.input_mode == InputMode::Edit && !self.store.is_editing() {
                    // The edited item was deleted out from under us.
                    self.input.clear();
                    self.input_mode = InputMode::Normal;
                    self.sync_selection();
                    self.set_status_error("Task no longer exists");
                } else {
                    self.set_status_error(STATUS_EMPTY_DRAFT);
                }
            }
        }
        Ok(())
    }

    fn cancel_input(&mut self) {
        if self.store.is_editing() {
            self.store.cancel_edit();
        } else {
            self.store.set_draft("");
        }
        self.input.clear();
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    fn toggle_completed_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_item_id() else {
            self.set_status_info("Nothing to toggle");
            return Ok(());
        };
        if self.store.toggle_completed(id)? {
            let done = self.store.item(id).map(|item| item.completed).unwrap_or(false);
            if done {
                self.set_status_info("Marked task done");
            } else {
                self.set_status_info("Marked task open");
            }
        }
        Ok(())
    }

    fn toggle_priority_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_item_id() else {
            self.set_status_info("Nothing to star");
            return Ok(());
        };
        if self.store.toggle_priority(id)? {
            // The list regrouped; keep the cursor on the same item.
            self.select_item_by_id(id);
            let starred = self
                .store
                .item(id)
                .map(|item| item.is_priority)
                .unwrap_or(false);
            if starred {
                self.set_status_info("Starred task — pinned to the top");
            } else {
                self.set_status_info("Unstarred task");
            }
        }
        Ok(())
    }

    fn prompt_delete(&mut self) {
        if self.store.items().is_empty() {
            self.set_status_info("Nothing to delete");
            return;
        }
        self.confirm_choice = ConfirmChoice::No;
        self.input_mode = InputMode::ConfirmDelete;
        self.set_status_info(STATUS_CONFIRM_DELETE);
    }

    fn perform_delete(&mut self) -> Result<()> {
        let Some(id) = self.selected_item_id() else {
            self.set_status_info("Nothing to delete");
            return Ok(());
        };
        if self.store.delete(id)? {
            self.sync_selection();
            self.set_status_info("Deleted task");
        }
        Ok(())
    }

    fn toggle_theme(&mut self) -> Result<()> {
        let theme = self.store.toggle_theme()?;
        self.set_status_info(format!("Switched to {} theme", theme));
        Ok(())
    }

    fn show_help_overlay(&mut self) {
        self.input_mode = InputMode::Help;
        self.set_status_info(STATUS_HELP);
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        self.status = Some(StatusMessage::new(message.into(), StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        self.status = Some(StatusMessage::new(message.into(), StatusKind::Error));
    }
}
