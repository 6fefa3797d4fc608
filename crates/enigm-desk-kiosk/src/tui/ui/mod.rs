/*
[INPUT]:  Screen view-model, logical screen geometry, terminal frame
[OUTPUT]: Full-frame kiosk rendering
[POS]:    TUI UI module root
[UPDATE]: When the screen layout changes
*/

mod chrome;
mod palette;
mod views;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Block;

use enigm_desk_kiosk::{Screen, ScreenGeometry};

/// Draw `screen` over the whole frame. Header and footer bands are sized in
/// proportion to the logical geometry so taps land where the chrome is drawn.
pub(super) fn draw(frame: &mut Frame, screen: &Screen, geometry: &ScreenGeometry) {
    let area = frame.area();
    frame.render_widget(Block::default(), area);

    let Some(chrome) = screen.chrome() else {
        views::draw_body(frame, area, screen);
        return;
    };

    let header_rows = band(area.height, geometry.header_height, geometry.height);
    let footer_rows = band(area.height, geometry.footer_height, geometry.height);
    let quit_columns = band(area.width, geometry.quit_width, geometry.width);

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(header_rows),
        Constraint::Min(0),
        Constraint::Length(footer_rows),
    ])
    .areas(area);

    chrome::draw_header(frame, header, chrome, quit_columns);
    views::draw_body(frame, body, screen);
    chrome::draw_footer(frame, footer, &chrome.footer);
}

/// Cells covering `part` of a `whole` logical extent, at least one.
fn band(cells: u16, part: u32, whole: u32) -> u16 {
    let whole = whole.max(1);
    let rows = (u32::from(cells) * part).div_ceil(whole);
    u16::try_from(rows).unwrap_or(cells).max(1)
}
