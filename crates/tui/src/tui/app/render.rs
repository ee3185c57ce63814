use std::cmp::min;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::tui::constants::APP_VERSION;
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, checkbox_glyph, inset_rect, star_glyph,
};
use crate::tui::theme::Palette;

use super::{App, ConfirmChoice, InputMode};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let palette = self.palette();
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(palette.bg_base)), size);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0], &palette);
        self.draw_items(f, chunks[1], &palette);
        self.draw_footer(f, chunks[2], &palette);

        match self.input_mode {
            InputMode::Add | InputMode::Edit => self.draw_input_overlay(f, size, &palette),
            InputMode::Help => self.draw_help_overlay(f, size, &palette),
            InputMode::ConfirmDelete => self.draw_confirm_overlay(f, size, &palette),
            InputMode::Normal => {}
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let open = self
            .store
            .items()
            .iter()
            .filter(|item| !item.completed)
            .count();
        let left_line = Line::from(vec![
            Span::styled(
                format!(" tido v{} ", APP_VERSION),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("— {} open / {} total", open, self.store.items().len()),
                Style::default().fg(palette.text),
            ),
            Span::raw("  "),
            Span::styled(
                self.config.db_path().display().to_string(),
                Style::default().fg(palette.text_muted),
            ),
        ]);
        f.render_widget(
            Paragraph::new(left_line).style(Style::default().bg(palette.bg_base)),
            cols[0],
        );

        let theme_badge = match self.store.theme() {
            crate::model::Theme::Dark => "🌙 dark",
            crate::model::Theme::Light => "☀ light",
        };
        let right_line = Line::from(vec![Span::styled(
            format!("{} (t toggles) ", theme_badge),
            Style::default().fg(palette.text_muted),
        )]);
        let right_para = Paragraph::new(right_line)
            .alignment(ratatui::layout::Alignment::Right)
            .style(Style::default().bg(palette.bg_base));
        f.render_widget(right_para, cols[1]);
    }

    fn draw_items(&mut self, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
        if self.store.items().is_empty() {
            self.draw_empty_state(f, area, palette);
            return;
        }

        let rows: Vec<Row> = self
            .store
            .items()
            .iter()
            .map(|item| {
                let star_style = if item.is_priority {
                    Style::default().fg(palette.star)
                } else {
                    Style::default().fg(palette.star_idle)
                };
                let text_style = if item.completed {
                    Style::default()
                        .fg(palette.text_done)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(palette.text)
                };
                Row::new(vec![
                    Cell::from(star_glyph(item.is_priority)).style(star_style),
                    Cell::from(checkbox_glyph(item.completed))
                        .style(Style::default().fg(palette.text_muted)),
                    Cell::from(item.text.clone()).style(text_style),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Min(10),
        ];

        let table = Table::new(rows, widths)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(accent_title("Tasks", palette))
                    .border_style(Style::default().fg(palette.border))
                    .style(Style::default().bg(palette.bg_panel)),
            )
            .highlight_style(
                Style::default()
                    .bg(palette.bg_accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_empty_state(&self, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.bg_panel));
        let inner = block.inner(area);
        f.render_widget(Clear, area);
        f.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut lines: Vec<Line<'static>> = Vec::new();
        lines.push(Line::from(Span::styled(
            "All clear ✨",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Press 'a' to add your first task.",
            Style::default().fg(palette.text),
        )));
        if self.first_run {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!(
                    "Your tido data lives in `{}` (adjust with `--data-dir` or `TIDO_DATA_DIR`).",
                    self.config.data_dir().display()
                ),
                Style::default().fg(palette.text_muted),
            )));
        }

        let width = inner.width.min(80).max(1);
        let height = (lines.len() as u16).saturating_add(2).min(inner.height).max(3);
        let content_area = centered_rect(width, height.min(inner.height), inner);
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .alignment(ratatui::layout::Alignment::Center)
            .style(Style::default().bg(palette.bg_panel));
        f.render_widget(paragraph, content_area);
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(
                status.text.clone(),
                status.style(palette),
            )])
        } else {
            Line::from(vec![Span::styled(
                "Ready",
                Style::default().fg(palette.text_muted),
            )])
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.input_mode {
            InputMode::Normal => {
                "a add • e edit • Space done • s star • x delete • t theme • j/k move • h help • q quit"
            }
            InputMode::Add => "Enter to add ✍ • Esc to cancel",
            InputMode::Edit => "Enter to save ✏ • Esc to cancel",
            InputMode::Help => "Enter/Esc to close",
            InputMode::ConfirmDelete => "←/→ choose • Space toggle • Enter confirm • Esc cancel",
        };
        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(palette.text_muted),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_input_overlay(&self, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let width = min(area.width.saturating_sub(10), 70);
        let popup_area = centered_rect(width, 3, area);
        f.render_widget(Clear, popup_area);

        let title = match self.input_mode {
            InputMode::Edit => "✏ Edit Task",
            _ => "➕ Add Task",
        };
        let input_block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(title, palette))
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.bg_panel));
        let input_area = input_block.inner(popup_area);
        f.render_widget(input_block, popup_area);

        if self.input.is_empty() {
            let placeholder = match self.input_mode {
                InputMode::Edit => "Edit todo…",
                _ => "Add a new task",
            };
            f.render_widget(
                Paragraph::new(placeholder)
                    .style(Style::default().fg(palette.text_muted).bg(palette.bg_panel)),
                input_area,
            );
        } else {
            f.render_widget(
                Paragraph::new(self.input.as_str())
                    .style(Style::default().fg(palette.text).bg(palette.bg_panel)),
                input_area,
            );
        }

        let cursor_x = input_area
            .x
            .saturating_add(self.input.cursor_col() as u16)
            .min(input_area.x + input_area.width.saturating_sub(1));
        f.set_cursor(cursor_x, input_area.y);
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 60);
        let height = min(lines.len() as u16 + 4, area.height.saturating_sub(2)).max(10);
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("⌨ Keyboard Reference", palette))
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.bg_panel));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        if inner.width < 3 || inner.height < 3 {
            return;
        }

        let help_lines: Vec<Line> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<12}", combo),
                        Style::default().fg(palette.accent),
                    ),
                    Span::styled(desc, Style::default().fg(palette.text)),
                ])
            })
            .collect();

        let content = inset_rect(inner, 1);
        f.render_widget(
            Paragraph::new(help_lines)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(palette.bg_panel)),
            content,
        );
    }

    fn draw_confirm_overlay(&self, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let width = min(area.width.saturating_sub(20), 60).max(40);
        let popup_area = centered_rect(width, 8, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("🗑 Confirm Deletion", palette))
            .border_style(Style::default().fg(palette.danger))
            .style(Style::default().bg(palette.bg_panel));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let item_text = self
            .store
            .items()
            .get(self.selected)
            .map(|item| item.text.as_str())
            .unwrap_or("selected task");

        let yes_style = if self.confirm_choice == ConfirmChoice::Yes {
            Style::default()
                .fg(palette.bg_panel)
                .bg(palette.danger)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.danger)
        };
        let no_style = if self.confirm_choice == ConfirmChoice::No {
            Style::default()
                .fg(palette.bg_panel)
                .bg(palette.text_muted)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_muted)
        };

        let lines = vec![
            Line::from(Span::styled(
                "This action cannot be undone.",
                Style::default().fg(palette.danger),
            )),
            Line::from(Span::styled(
                format!("Delete '{}'?", item_text),
                Style::default().fg(palette.text),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("  Yes  ", yes_style),
                Span::raw("    "),
                Span::styled("  No  ", no_style),
            ]),
        ];

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(ratatui::layout::Alignment::Center)
                .style(Style::default().bg(palette.bg_panel)),
            inset_rect(inner, 1),
        );
    }
}
