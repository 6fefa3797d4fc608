/*
[INPUT]:  Screens from the game controller, crossterm key and mouse events
[OUTPUT]: Full-screen terminal kiosk surface
[POS]:    TUI module for the enigm-desk-kiosk binary
[UPDATE]: When changing the terminal surface, layout or input mapping
*/

mod surface;
mod terminal;
mod ui;

pub use surface::TuiSurface;
