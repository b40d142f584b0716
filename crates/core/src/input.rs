//! Keyboard-driven view selection and quit requests.
//!
//! The window layer translates raw keys into [`InputCommand`]s; this module
//! holds the state they act on. The combine pass receives [`Selection`]
//! exactly as the user set it.

use serde::{Deserialize, Serialize};

/// Output view chosen with the digit keys 1-4.
///
/// The meaning of each value is owned by the combine fragment shader; this
/// type only guarantees the value is one the keys can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Selection(u8);

impl Selection {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Returns `None` unless `value` is in 1..=4.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// The raw value forwarded to the shader.
    pub fn get(self) -> u8 {
        self.0
    }

    /// The value as the `int` uniform the combine shader reads.
    pub fn as_uniform(self) -> i32 {
        i32::from(self.0)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for Selection {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Selection::new(value).ok_or_else(|| format!("selection must be 1..=4, got {value}"))
    }
}

impl From<Selection> for u8 {
    fn from(s: Selection) -> u8 {
        s.0
    }
}

/// A discrete user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Select(Selection),
    Quit,
}

/// Per-run input state read by the frame loop.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    selection: Selection,
    quit_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, command: InputCommand) {
        match command {
            InputCommand::Select(selection) => {
                if selection != self.selection {
                    log::debug!("selection {} -> {}", self.selection.get(), selection.get());
                }
                self.selection = selection;
            }
            InputCommand::Quit => self.quit_requested = true,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}
