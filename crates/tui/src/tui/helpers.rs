use std::cmp::min;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::theme::Palette;

pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub(crate) fn inset_rect(area: Rect, padding: u16) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let px = padding.min(area.width / 2);
    let py = padding.min(area.height / 2);
    Rect {
        x: area.x + px,
        y: area.y + py,
        width: area.width.saturating_sub(px * 2),
        height: area.height.saturating_sub(py * 2),
    }
}

pub(crate) fn accent_title(text: &str, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    ))
}

pub(crate) fn star_glyph(is_priority: bool) -> &'static str {
    if is_priority {
        "★"
    } else {
        "☆"
    }
}

pub(crate) fn checkbox_glyph(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

pub(crate) fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("a", "Add a task"),
        ("e", "Edit the selected task"),
        ("Space", "Toggle completed"),
        ("s", "Star / unstar (priority first)"),
        ("x / Del", "Delete the selected task"),
        ("t", "Switch light/dark theme"),
        ("j / ↓", "Move selection down"),
        ("k / ↑", "Move selection up"),
        ("Home / End", "Jump to first / last task"),
        ("h", "This help"),
        ("q / Ctrl-C", "Quit"),
    ]
}
