//! Event handling for the showcase.
//!
//! Terminal input is converted into [`Event`]s that the application's update
//! function consumes one at a time.

mod handler;
mod keys;

use crossterm::event::{KeyEvent, MouseEvent};

pub use handler::{EventHandler, TICK_RATE_MS};
pub use keys::{get_context_hints, KeyContext};

/// An application event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// A mouse button or movement event.
    Mouse(MouseEvent),
    /// Bracketed paste content.
    Paste(String),
    /// The terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for animations and timers.
    Tick,
}
