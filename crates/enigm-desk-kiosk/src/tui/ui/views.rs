/*
[INPUT]:  Screen view-model and body area
[OUTPUT]: Body rendering for every kiosk screen
[POS]:    TUI UI screen bodies
[UPDATE]: When a screen's content changes
*/

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use enigm_desk_kiosk::screen::RfidOutcome;
use enigm_desk_kiosk::Screen;

use super::palette::{border_style, muted_style, title_style, ALERT, PENDING, SUCCESS};

pub(super) fn draw_body(frame: &mut Frame, area: Rect, screen: &Screen) {
    match screen {
        Screen::PictureFrame { picture } => {
            if let Some(picture) = picture {
                let name = picture
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                centered(frame, area, Text::from(Line::from(Span::styled(name, muted_style()))));
            }
        }
        Screen::DeskError => desk_error(frame, area),
        Screen::LoadCellClue => {
            let text = Text::from(vec![
                Line::from(Span::styled("Here is a clue!", title_style())),
                Line::default(),
                Line::from("A clean desk is a happy desk."),
            ]);
            centered(frame, area, text);
        }
        Screen::SelectionHub { .. } => selection_hub(frame, area),
        Screen::FloppyLoading { .. } => {
            centered(frame, area, Text::from("Insert the floppy disk and wait..."));
        }
        Screen::FloppyClue { text, compact, .. } => {
            let style = if *compact {
                Style::default()
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let paragraph = Paragraph::new(text.as_str())
                .style(style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
        Screen::RfidScanning { .. } => {
            centered(frame, area, Text::from("Place your badge on the reader"));
        }
        Screen::RfidResult { outcome, .. } => rfid_result(frame, area, outcome),
        Screen::Win { .. } => {
            let text = Text::from(vec![
                Line::from(Span::styled(
                    "Congratulations!",
                    Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from("The drawer is unlocked."),
            ]);
            centered(frame, area, text);
        }
    }
}

fn desk_error(frame: &mut Frame, area: Rect) {
    let text = Text::from(Line::from(Span::styled(
        "Desk Error Detected!",
        Style::default().fg(ALERT).add_modifier(Modifier::BOLD),
    )));
    centered(frame, area, text);
}

fn selection_hub(frame: &mut Frame, area: Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    for (label, target) in [("Floppy Disk", left), ("RFID Badge", right)] {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style());
        let inner = block.inner(target);
        frame.render_widget(block, target);
        centered(frame, inner, Text::from(Line::from(Span::styled(label, title_style()))));
    }
}

fn rfid_result(frame: &mut Frame, area: Rect, outcome: &RfidOutcome) {
    let headline_color = match outcome {
        RfidOutcome::ScanFailed => ALERT,
        RfidOutcome::Unlock(_) => Color::White,
    };
    let mut lines = vec![Line::from(Span::styled(
        outcome.headline(),
        Style::default()
            .fg(headline_color)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(detail) = outcome.detail() {
        lines.push(Line::default());
        lines.push(Line::from(detail));
    }
    if let Some(warning) = outcome.warning() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(warning, Style::default().fg(PENDING))));
    }
    centered(frame, area, Text::from(lines));
}

/// Render `text` vertically and horizontally centered in `area`.
fn centered(frame: &mut Frame, area: Rect, text: Text) {
    let height = u16::try_from(text.lines.len()).unwrap_or(area.height);
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle,
    );
}
