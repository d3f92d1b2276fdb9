//! Host-independent core of the code entry keypad.
//!
//! The crate owns the keystroke state machine and talks to the host UI only through the
//! collaborator traits below. A host implements them for its buttons, its text surface, its
//! audio player and wherever the finished code should go.

pub mod audio;
pub mod charclass;
pub mod controller;
pub mod controls;
pub mod entry;
pub mod keys;

use std::fmt::Debug;
use thiserror::Error;

pub use audio::{AudioCue, CuePool};
pub use charclass::AllowedCharacterClass;
pub use controller::CodeEntryController;
pub use controls::{Action, ControlId, ControlTable};
pub use entry::{EntryState, EntryStatus, RequiredLength};

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum WidgetError {
    #[error("required length must be between 2 and 10, got {0}")]
    InvalidRequiredLength(usize),
    #[error("the audio cue pool is empty")]
    EmptyCuePool,
    #[error("key {0} has an empty label")]
    EmptyKeyLabel(usize),
    #[error("no control registered for {0:?}")]
    UnknownControl(ControlId),
    #[error("unknown character class: {0}")]
    UnknownCharacterClass(String),
    #[error("the code was already submitted")]
    AlreadySubmitted,
    #[error("IO error: {0}")]
    Io(std::io::ErrorKind),
    #[error("host error: {0}")]
    Host(String),
}

impl From<std::io::Error> for WidgetError {
    fn from(err: std::io::Error) -> Self {
        WidgetError::Io(err.kind())
    }
}

pub type WidgetResult<T> = Result<T, WidgetError>;

/// World position of a control, used to place audio cues.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Position { x, y, z }
    }
}

/// A clickable control on the keypad: a key, the backspace or the confirm button.
pub trait Control: Debug {
    /// Gets the name of the control in the host scene.
    fn name(&self) -> &str;

    /// Gets the text currently shown on the control.
    fn label(&self) -> &str;
    /// Replaces the text shown on the control.
    fn set_label(&mut self, label: &str) -> WidgetResult<()>;

    /// Gets where the control sits, for positional audio.
    fn position(&self) -> Position {
        Position::ORIGIN
    }

    /// Gets whether the control currently accepts clicks.
    fn is_interactable(&self) -> bool;
    /// Enables or disables the control.
    fn set_interactable(&mut self, interactable: bool) -> WidgetResult<()>;
}

/// The text surface showing the code entered so far.
pub trait TextSurface: Debug {
    fn set_text(&mut self, text: &str) -> WidgetResult<()>;
}

/// Plays audio cues. Playback is fire-and-forget.
pub trait AudioPlayer: Debug {
    fn play_at(&mut self, cue: &AudioCue, position: Position) -> WidgetResult<()>;
}

/// Receives the completed code. Called at most once per controller.
pub trait CodeSink: Debug {
    fn code_entered(&mut self, code: &str);
}
