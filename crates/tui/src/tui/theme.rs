use ratatui::style::Color;

use crate::model::Theme;

/// Terminal palettes for the two themes. The active theme picks the palette
/// that paints the whole frame — the terminal equivalent of restyling the
/// document root.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Palette {
    pub(crate) bg_base: Color,
    pub(crate) bg_panel: Color,
    pub(crate) bg_accent: Color,
    pub(crate) text: Color,
    pub(crate) text_muted: Color,
    pub(crate) text_done: Color,
    pub(crate) accent: Color,
    pub(crate) star: Color,
    pub(crate) star_idle: Color,
    pub(crate) danger: Color,
    pub(crate) border: Color,
}

impl Palette {
    pub(crate) fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg_base: Color::Rgb(14, 17, 23),
                bg_panel: Color::Rgb(22, 26, 34),
                bg_accent: Color::Rgb(32, 37, 47),
                text: Color::Rgb(224, 228, 235),
                text_muted: Color::Rgb(128, 138, 152),
                text_done: Color::Rgb(98, 106, 120),
                accent: Color::Rgb(120, 161, 255),
                star: Color::Rgb(235, 200, 80),
                star_idle: Color::Rgb(90, 98, 112),
                danger: Color::Rgb(224, 94, 94),
                border: Color::Rgb(60, 68, 82),
            },
            Theme::Light => Self {
                bg_base: Color::Rgb(238, 241, 246),
                bg_panel: Color::Rgb(250, 251, 253),
                bg_accent: Color::Rgb(221, 227, 239),
                text: Color::Rgb(28, 32, 40),
                text_muted: Color::Rgb(118, 126, 140),
                text_done: Color::Rgb(154, 160, 172),
                accent: Color::Rgb(42, 92, 220),
                star: Color::Rgb(198, 150, 16),
                star_idle: Color::Rgb(168, 176, 190),
                danger: Color::Rgb(192, 48, 48),
                border: Color::Rgb(176, 184, 198),
            },
        }
    }
}
