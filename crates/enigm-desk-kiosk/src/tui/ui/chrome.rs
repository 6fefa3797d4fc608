/*
[INPUT]:  Chrome view-model, header/footer areas
[OUTPUT]: Header (back button, title, quit mark) and footer (progress or win prompt)
[POS]:    TUI UI chrome shared by interactive screens
[UPDATE]: When header or footer content changes
*/

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use enigm_desk_kiosk::screen::{Chrome, Footer, WIN_PROMPT_TEXT};

use super::palette::{border_style, muted_style, task_style, title_style, SUCCESS};

pub(super) fn draw_header(frame: &mut Frame, area: Rect, chrome: &Chrome, quit_columns: u16) {
    let [left, title, quit] = Layout::horizontal([
        Constraint::Length(quit_columns),
        Constraint::Min(0),
        Constraint::Length(quit_columns),
    ])
    .areas(area);

    if chrome.back_button {
        frame.render_widget(Paragraph::new(Line::from("< Back")).style(title_style()), left);
    }
    frame.render_widget(
        Paragraph::new(Line::from(chrome.title))
            .alignment(Alignment::Center)
            .style(title_style()),
        title,
    );
    frame.render_widget(
        Paragraph::new(Line::from("x"))
            .alignment(Alignment::Right)
            .style(muted_style()),
        quit,
    );
}

pub(super) fn draw_footer(frame: &mut Frame, area: Rect, footer: &Footer) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(border_style());

    let line = match footer {
        Footer::Progress(progress) => {
            let mut spans = Vec::with_capacity(progress.len() * 2);
            for (index, completed) in progress.iter().enumerate() {
                if index > 0 {
                    spans.push(Span::raw("   "));
                }
                let mark = if *completed { "done" } else { "todo" };
                spans.push(Span::styled(
                    format!("Task {}: {mark}", index + 1),
                    task_style(*completed),
                ));
            }
            Line::from(spans)
        }
        Footer::WinPrompt => Line::from(Span::styled(
            WIN_PROMPT_TEXT,
            Style::default()
                .fg(SUCCESS)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )),
    };

    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
