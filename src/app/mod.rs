mod state;

use crossterm::event::KeyCode;

pub use state::App;

/// Possible input events the app reacts to.
pub enum AppEvent {
    Tick,
    KeyPress(KeyCode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Styler,
    Help,
}

/// Whether keys drive commands or type into the color field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusMode {
    Browse,
    Input,
}
