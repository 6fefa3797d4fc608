/*
[INPUT]:  Screens to render, crossterm events, logical screen geometry
[OUTPUT]: Display and InputSource implementations over the terminal
[POS]:    TUI surface - bridge between the controller and the terminal
[UPDATE]: When input mapping or redraw behavior changes
*/

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Size;
use tracing::debug;

use enigm_desk_kiosk::{Display, InputEvent, InputSource, Point, Screen, ScreenGeometry};

use super::terminal::TerminalGuard;
use super::ui;

pub struct TuiSurface {
    guard: TerminalGuard,
    geometry: ScreenGeometry,
    last: Option<Screen>,
}

impl TuiSurface {
    pub fn new(geometry: ScreenGeometry) -> io::Result<Self> {
        Ok(Self {
            guard: TerminalGuard::new()?,
            geometry,
            last: None,
        })
    }

    fn redraw(&mut self) -> io::Result<()> {
        let Some(screen) = self.last.as_ref() else {
            return Ok(());
        };
        let geometry = self.geometry;
        self.guard
            .draw(|frame| ui::draw(frame, screen, &geometry))
    }

    fn translate(&mut self, event: Event) -> io::Result<Option<InputEvent>> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press && key.code == KeyCode::Esc => {
                Ok(Some(InputEvent::Exit))
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let size = self.guard.size()?;
                let point = scale_to_surface(mouse.column, mouse.row, size, &self.geometry);
                debug!(column = mouse.column, row = mouse.row, x = point.x, y = point.y, "tap");
                Ok(Some(InputEvent::Tap(point)))
            }
            Event::Resize(_, _) => {
                self.redraw()?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

impl Display for TuiSurface {
    fn render(&mut self, screen: &Screen) -> io::Result<()> {
        self.last = Some(screen.clone());
        self.redraw()
    }
}

impl InputSource for TuiSurface {
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let event = event::read()?;
        self.translate(event)
    }
}

/// Map a terminal cell onto the logical surface, using the cell's center.
pub(super) fn scale_to_surface(column: u16, row: u16, size: Size, geometry: &ScreenGeometry) -> Point {
    let scale = |cell: u16, cells: u16, extent: u32| -> u32 {
        let cells = u32::from(cells.max(1));
        let scaled = (2 * u32::from(cell) + 1) * extent / (2 * cells);
        scaled.min(extent.saturating_sub(1))
    };
    Point::new(
        scale(column, size.width, geometry.width),
        scale(row, size.height, geometry.height),
    )
}
