//! The keypad controller: wires the entry state machine to the host's collaborators.

use log::{debug, info, warn};
use crate::controls::{Action, ControlId, ControlTable};
use crate::entry::{self, DisplayText, EntryRules, EntryState, EntryStatus, View};
use crate::{AudioPlayer, CodeSink, Control, CuePool, Position, TextSurface, WidgetResult};

/// The text shown after a rejected key press, unless configured otherwise.
pub const DEFAULT_CLEARED_PHRASE: &str = "== Cleared ==";

/// The host objects the controller drives.
#[derive(Debug)]
pub struct KeypadSurfaces<'a> {
    /// Character keys, in configuration order. [ControlId::Key] indexes into this.
    pub keys: Vec<Box<dyn Control + 'a>>,
    pub backspace: Box<dyn Control + 'a>,
    pub confirm: Box<dyn Control + 'a>,
    pub display: Box<dyn TextSurface + 'a>,
    pub audio: Box<dyn AudioPlayer + 'a>,
    pub sink: Box<dyn CodeSink + 'a>,
}

/// Immutable settings of a controller.
#[derive(Debug)]
pub struct EntrySettings {
    pub rules: EntryRules,
    pub cues: CuePool,
    pub cleared_phrase: String,
}

impl EntrySettings {
    pub fn new(rules: EntryRules, cues: CuePool) -> Self {
        EntrySettings {
            rules,
            cues,
            cleared_phrase: DEFAULT_CLEARED_PHRASE.to_string(),
        }
    }

    pub fn with_cleared_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.cleared_phrase = phrase.into();
        self
    }
}

enum Phase {
    /// Accepting input.
    Collecting(EntryState),
    /// The code was emitted. Terminal.
    Submitted(String),
}

/// Collects a fixed-length code from key presses and hands it to the [CodeSink] once confirmed.
pub struct CodeEntryController<'a> {
    rules: EntryRules,
    cues: CuePool,
    cleared_phrase: String,
    phase: Phase,
    table: ControlTable,
    surfaces: KeypadSurfaces<'a>,
}

impl <'a> CodeEntryController<'a> {
    /// Activates the keypad: reads the key labels, registers every control and draws the empty code.
    pub fn new(settings: EntrySettings, surfaces: KeypadSurfaces<'a>) -> WidgetResult<Self> {
        let table = ControlTable::attach(surfaces.keys.iter().map(|k| k.label()))?;
        debug!(
            "Attached {} keys, {} characters required, {} allowed, {} audio cues.",
            table.key_count(),
            settings.rules.required.get(),
            settings.rules.allowed,
            settings.cues.cue_count(),
        );

        let mut controller = CodeEntryController {
            rules: settings.rules,
            cues: settings.cues,
            cleared_phrase: settings.cleared_phrase,
            phase: Phase::Collecting(EntryState::new()),
            table,
            surfaces,
        };
        for key in controller.surfaces.keys.iter_mut() {
            key.set_interactable(true)?;
        }
        controller.draw(&View::initial())?;
        Ok(controller)
    }

    pub fn rules(&self) -> EntryRules {
        self.rules
    }

    pub fn status(&self) -> EntryStatus {
        match &self.phase {
            Phase::Collecting(state) => state.status(self.rules.required),
            Phase::Submitted(_) => EntryStatus::Submitted,
        }
    }

    /// Gets the code entered so far, or the submitted code.
    ///
    /// Submission resets the entry itself; the emitted code stays readable here so a host can
    /// show or log it after the keypad locks.
    pub fn code(&self) -> String {
        match &self.phase {
            Phase::Collecting(state) => state.as_string(),
            Phase::Submitted(code) => code.clone(),
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, Phase::Submitted(_))
    }

    /// Gets the current label of every key, in key order.
    pub fn key_labels(&self) -> Vec<String> {
        self.surfaces.keys.iter().map(|k| k.label().to_string()).collect()
    }

    /// Handles a click on a control and plays a cue at its position.
    ///
    /// Clicks on controls that are not interactable, and any click after submission, are ignored.
    pub fn activate(&mut self, id: ControlId) -> WidgetResult<()> {
        if self.is_submitted() {
            debug!("Ignoring {:?}, the code was already submitted.", id);
            return Ok(());
        }

        let action = self.table.lookup(id)?;
        let control = self.control(id);
        if !control.is_interactable() {
            debug!("Ignoring {:?}, it is not interactable.", id);
            return Ok(());
        }
        let position = control.position();

        match action {
            Action::Append(c) => self.add_character(c)?,
            Action::RemoveLast => self.remove_character()?,
            Action::Submit => self.submit()?,
        }

        self.play_cue(position);
        Ok(())
    }

    /// Appends `candidate` to the code, or clears the code if the character is not allowed
    /// or the code is already complete.
    pub fn add_character(&mut self, candidate: char) -> WidgetResult<()> {
        let Phase::Collecting(state) = &mut self.phase else {
            debug!("Ignoring {:?}, the code was already submitted.", candidate);
            return Ok(());
        };

        let step = entry::add_character(std::mem::take(state), candidate, self.rules);
        *state = step.state;
        if let Some(rejection) = step.rejection {
            debug!("Input cleared: {:?}.", rejection);
        }
        self.draw(&step.view)
    }

    /// Removes the last character of the code.
    pub fn remove_character(&mut self) -> WidgetResult<()> {
        let Phase::Collecting(state) = &mut self.phase else {
            debug!("Ignoring backspace, the code was already submitted.");
            return Ok(());
        };

        let step = entry::remove_character(std::mem::take(state));
        *state = step.state;
        self.draw(&step.view)
    }

    /// Emits the code if it has the required length, then locks the keypad for good.
    ///
    /// An incomplete code only logs a warning and leaves everything as it was.
    pub fn submit(&mut self) -> WidgetResult<()> {
        let code = match &self.phase {
            Phase::Submitted(_) => {
                debug!("Ignoring submit, the code was already submitted.");
                return Ok(());
            }
            Phase::Collecting(state) if state.len() == self.rules.required.get() => state.as_string(),
            Phase::Collecting(state) => {
                warn!(
                    "Code is not of required length {} (got {}).",
                    self.rules.required.get(),
                    state.len(),
                );
                return Ok(());
            }
        };

        self.surfaces.sink.code_entered(&code);
        info!("Code entered.");
        self.phase = Phase::Submitted(code);

        self.table.detach_all();
        self.disable_all()
    }

    /// Sets every key's label back to its control name and re-registers the keys.
    pub fn reset_labels_to_names(&mut self) -> WidgetResult<()> {
        if self.is_submitted() {
            return Err(crate::WidgetError::AlreadySubmitted);
        }

        let names: Vec<String> = self.surfaces.keys.iter().map(|k| k.name().to_string()).collect();
        let table = ControlTable::attach(names.iter().map(String::as_str))?;
        for (key, name) in self.surfaces.keys.iter_mut().zip(&names) {
            key.set_label(name)?;
        }
        self.table = table;
        info!("Key labels reset to control names.");
        Ok(())
    }

    fn control(&self, id: ControlId) -> &dyn Control {
        match id {
            ControlId::Key(index) => &*self.surfaces.keys[index],
            ControlId::Backspace => &*self.surfaces.backspace,
            ControlId::Confirm => &*self.surfaces.confirm,
        }
    }

    fn play_cue(&mut self, position: Position) {
        let cue = self.cues.pick();
        if let Err(e) = self.surfaces.audio.play_at(cue, position) {
            warn!("Failed to play audio cue {}: {}", cue, e);
        }
    }

    /// Pushes a view to the display and the backspace/confirm controls.
    fn draw(&mut self, view: &View) -> WidgetResult<()> {
        let text = match &view.display {
            DisplayText::Code(code) => code.as_str(),
            DisplayText::Cleared => self.cleared_phrase.as_str(),
        };
        self.surfaces.display.set_text(text)?;
        self.surfaces.backspace.set_interactable(view.backspace_enabled)?;
        self.surfaces.confirm.set_interactable(view.confirm_enabled)?;
        Ok(())
    }

    fn disable_all(&mut self) -> WidgetResult<()> {
        for key in self.surfaces.keys.iter_mut() {
            key.set_interactable(false)?;
        }
        self.surfaces.backspace.set_interactable(false)?;
        self.surfaces.confirm.set_interactable(false)?;
        Ok(())
    }
}
