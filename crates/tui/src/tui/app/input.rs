use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, ConfirmChoice, InputMode};

#[derive(Debug, Clone, Copy)]
pub(crate) enum NormalAction {
    Quit,
    EnterAdd,
    EnterEdit,
    ToggleCompleted,
    TogglePriority,
    Delete,
    ToggleTheme,
    ShowHelp,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
}

impl NormalAction {
    fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') => Some(Self::EnterAdd),
            KeyCode::Char('e') => Some(Self::EnterEdit),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Self::ToggleCompleted),
            KeyCode::Char('s') => Some(Self::TogglePriority),
            KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('t') => Some(Self::ToggleTheme),
            KeyCode::Char('h') | KeyCode::Char('?') => Some(Self::ShowHelp),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Home => Some(Self::SelectFirst),
            KeyCode::End => Some(Self::SelectLast),
            _ => None,
        }
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Add | InputMode::Edit => self.handle_input_mode(key),
            InputMode::Help => self.handle_help_mode(key),
            InputMode::ConfirmDelete => self.handle_confirm_delete_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) -> Result<()> {
        if let Some(action) = NormalAction::from_event(&key) {
            self.execute_normal_action(action)?;
        }
        Ok(())
    }

    fn execute_normal_action(&mut self, action: NormalAction) -> Result<()> {
        match action {
            NormalAction::Quit => {
                self.should_quit = true;
            }
            NormalAction::EnterAdd => {
                self.begin_add();
            }
            NormalAction::EnterEdit => {
                self.begin_edit_selected();
            }
            NormalAction::ToggleCompleted => {
                self.toggle_completed_selected()?;
            }
            NormalAction::TogglePriority => {
                self.toggle_priority_selected()?;
            }
            NormalAction::Delete => {
                self.prompt_delete();
            }
            NormalAction::ToggleTheme => {
                self.toggle_theme()?;
            }
            NormalAction::ShowHelp => {
                self.show_help_overlay();
            }
            NormalAction::SelectNext => self.select_next(),
            NormalAction::SelectPrev => self.select_prev(),
            NormalAction::SelectFirst => self.select_first(),
            NormalAction::SelectLast => self.select_last(),
        }
        Ok(())
    }

    /// Add and Edit share the composition box; they differ only in what
    /// Enter commits and what Esc abandons.
    fn handle_input_mode(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Esc => {
                self.cancel_input();
                Ok(())
            }
            _ => {
                if self.apply_buffer_key(&key) {
                    self.store.set_draft(self.input.as_str());
                }
                Ok(())
            }
        }
    }

    fn apply_buffer_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Char(c) => self.input.insert_char(c),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => return false,
        }
        true
    }

    fn handle_help_mode(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.status = None;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn handle_confirm_delete_mode(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.set_status_info("Deletion cancelled");
                Ok(())
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.confirm_choice = self.confirm_choice.toggle();
                Ok(())
            }
            KeyCode::Enter => {
                if self.confirm_choice == ConfirmChoice::Yes {
                    self.perform_delete()?;
                } else {
                    self.set_status_info("Deletion cancelled");
                }
                self.input_mode = InputMode::Normal;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
