/*
[INPUT]:  None
[OUTPUT]: Shared colors and styles for kiosk screens
[POS]:    TUI UI palette
[UPDATE]: When the kiosk color scheme changes
*/

use ratatui::style::{Color, Modifier, Style};

pub(super) const SUCCESS: Color = Color::Rgb(0x56, 0xb0, 0x4c);
pub(super) const PENDING: Color = Color::Rgb(0xf0, 0x8c, 0x2e);
pub(super) const ALERT: Color = Color::Rgb(0xd9, 0x3a, 0x3a);

pub(super) fn title_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub(super) fn border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub(super) fn muted_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub(super) fn task_style(completed: bool) -> Style {
    let color = if completed { SUCCESS } else { PENDING };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
