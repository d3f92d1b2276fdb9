//! Terminal host for the keypad: every collaborator the controller needs, backed by stdout and the log.

use std::fmt::Debug;
use std::io::Write;
use log::{debug, info, warn};
use thiserror::Error;
use codepad_widget::controller::KeypadSurfaces;
use codepad_widget::{AudioCue, AudioPlayer, CodeSink, Control, ControlId, Position, TextSurface, WidgetResult};
use crate::config::{Config, KeyConfig};

/// Keys per row when laying the keys out on a grid.
const KEYS_PER_ROW: usize = 4;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseCommandError {
    #[error("no key labelled {0:?}")]
    UnknownKey(String),
}

/// One thing the user asked for on the command line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Press(ControlId),
    ResetLabels,
    Quit,
}

/// Parses a whitespace-free token into commands.
///
/// A token is either a keyword (`<`/`back`, `ok`, `reset`, `quit`), a whole key label, or a
/// run of single-character labels like `1234`, which presses each key in turn.
pub fn parse_token(token: &str, labels: &[String]) -> Result<Vec<Command>, ParseCommandError> {
    match token.to_ascii_lowercase().as_str() {
        "<" | "back" | "backspace" => return Ok(vec![Command::Press(ControlId::Backspace)]),
        "ok" | "enter" => return Ok(vec![Command::Press(ControlId::Confirm)]),
        "reset" => return Ok(vec![Command::ResetLabels]),
        "quit" | "exit" => return Ok(vec![Command::Quit]),
        _ => {}
    }

    if let Some(index) = labels.iter().position(|l| l == token) {
        return Ok(vec![Command::Press(ControlId::Key(index))]);
    }

    token
        .chars()
        .map(|c| {
            labels
                .iter()
                .position(|l| l.chars().eq(std::iter::once(c)))
                .map(|index| Command::Press(ControlId::Key(index)))
                .ok_or_else(|| ParseCommandError::UnknownKey(c.to_string()))
        })
        .collect()
}

/// Where the key at `index` sits when keys are laid out row by row.
pub fn grid_position(index: usize) -> Position {
    let row = index / KEYS_PER_ROW;
    let col = index % KEYS_PER_ROW;
    Position::new(col as f32, -(row as f32), 0.0)
}

/// An on-screen button. Only remembers its state; changes go to the debug log.
#[derive(Debug)]
pub struct TerminalButton {
    name: String,
    label: String,
    position: Position,
    interactable: bool,
}

impl TerminalButton {
    pub fn new(name: impl Into<String>, label: impl Into<String>, position: Position) -> Self {
        TerminalButton {
            name: name.into(),
            label: label.into(),
            position,
            interactable: true,
        }
    }
}

impl Control for TerminalButton {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: &str) -> WidgetResult<()> {
        debug!("{} relabelled {:?} -> {:?}.", self.name, self.label, label);
        self.label = label.to_string();
        Ok(())
    }

    fn position(&self) -> Position {
        self.position
    }

    fn is_interactable(&self) -> bool {
        self.interactable
    }

    fn set_interactable(&mut self, interactable: bool) -> WidgetResult<()> {
        if self.interactable != interactable {
            debug!("{} {}.", self.name, if interactable { "enabled" } else { "disabled" });
        }
        self.interactable = interactable;
        Ok(())
    }
}

/// Prints the code line by line.
#[derive(Debug)]
pub struct TerminalDisplay<W: Write + Debug> {
    out: W,
}

impl <W: Write + Debug> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        TerminalDisplay { out }
    }
}

impl <W: Write + Debug> TextSurface for TerminalDisplay<W> {
    fn set_text(&mut self, text: &str) -> WidgetResult<()> {
        writeln!(self.out, "[ {:^13} ]", text)?;
        self.out.flush()?;
        Ok(())
    }
}

/// "Plays" cues by logging them, optionally ringing the terminal bell.
#[derive(Debug)]
pub struct LogAudioPlayer<W: Write + Debug> {
    bell: Option<W>,
}

impl <W: Write + Debug> Default for LogAudioPlayer<W> {
    fn default() -> Self {
        LogAudioPlayer { bell: None }
    }
}

impl <W: Write + Debug> LogAudioPlayer<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bell(out: W) -> Self {
        LogAudioPlayer { bell: Some(out) }
    }
}

impl <W: Write + Debug> AudioPlayer for LogAudioPlayer<W> {
    fn play_at(&mut self, cue: &AudioCue, position: Position) -> WidgetResult<()> {
        info!("Playing {} at ({:.1}, {:.1}, {:.1}).", cue, position.x, position.y, position.z);
        if let Some(out) = &mut self.bell {
            out.write_all(b"\x07")?;
            out.flush()?;
        }
        Ok(())
    }
}

/// Prints the submitted code.
#[derive(Debug)]
pub struct PrintSink<W: Write + Debug> {
    out: W,
}

impl <W: Write + Debug> PrintSink<W> {
    pub fn new(out: W) -> Self {
        PrintSink { out }
    }
}

impl <W: Write + Debug> CodeSink for PrintSink<W> {
    fn code_entered(&mut self, code: &str) {
        if let Err(e) = writeln!(self.out, "Code entered: {}", code) {
            warn!("Failed to print the entered code: {}", e);
        }
    }
}

/// Builds terminal collaborators for every control in the config.
///
/// `out` opens a writer for each collaborator that prints.
pub fn surfaces<'a, W, F>(config: &Config, out: F) -> KeypadSurfaces<'a>
where
    W: Write + Debug + 'a,
    F: Fn() -> W,
{
    let keys = config
        .keys
        .iter()
        .enumerate()
        .map(|(index, KeyConfig { name, label })| {
            Box::new(TerminalButton::new(name, label, grid_position(index))) as Box<dyn Control + 'a>
        })
        .collect::<Vec<_>>();
    let rows = config.keys.len().div_ceil(KEYS_PER_ROW);
    let bottom = -(rows as f32);

    let audio = if config.bell {
        LogAudioPlayer::with_bell(out())
    } else {
        LogAudioPlayer::new()
    };

    KeypadSurfaces {
        keys,
        backspace: Box::new(TerminalButton::new("Backspace", "<", Position::new(0.0, bottom, 0.0))),
        confirm: Box::new(TerminalButton::new("Ok", "OK", Position::new(3.0, bottom, 0.0))),
        display: Box::new(TerminalDisplay::new(out())),
        audio: Box::new(audio),
        sink: Box::new(PrintSink::new(out())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codepad_widget::controller::EntrySettings;
    use codepad_widget::entry::EntryRules;
    use codepad_widget::{AllowedCharacterClass, CodeEntryController, CuePool, RequiredLength};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Cloneable writer whose clones all append to the same buffer.
    #[derive(Clone, Debug, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    fn labels(s: &str) -> Vec<String> {
        s.chars().map(|c| c.to_string()).collect()
    }

    // --- parse_token tests ---

    #[test]
    fn keywords() {
        let labels = labels("12");
        assert_eq!(parse_token("<", &labels), Ok(vec![Command::Press(ControlId::Backspace)]));
        assert_eq!(parse_token("OK", &labels), Ok(vec![Command::Press(ControlId::Confirm)]));
        assert_eq!(parse_token("reset", &labels), Ok(vec![Command::ResetLabels]));
        assert_eq!(parse_token("quit", &labels), Ok(vec![Command::Quit]));
    }

    #[test]
    fn run_of_labels_presses_each_key() {
        let labels = labels("123A456B789C*0#D");
        assert_eq!(
            parse_token("90*", &labels),
            Ok(vec![
                Command::Press(ControlId::Key(10)),
                Command::Press(ControlId::Key(13)),
                Command::Press(ControlId::Key(12)),
            ])
        );
    }

    #[test]
    fn whole_label_matches_first() {
        let labels = vec!["Key1".to_string(), "K".to_string()];
        assert_eq!(parse_token("Key1", &labels), Ok(vec![Command::Press(ControlId::Key(0))]));
    }

    #[test]
    fn unknown_character_is_reported() {
        let labels = labels("123");
        assert_eq!(
            parse_token("14", &labels),
            Err(ParseCommandError::UnknownKey("4".to_string()))
        );
    }

    // --- Collaborator tests ---

    #[test]
    fn grid_positions_run_row_by_row() {
        assert_eq!(grid_position(0), Position::new(0.0, 0.0, 0.0));
        assert_eq!(grid_position(3), Position::new(3.0, 0.0, 0.0));
        assert_eq!(grid_position(5), Position::new(1.0, -1.0, 0.0));
    }

    #[test]
    fn default_player_stays_silent() {
        let mut audio = LogAudioPlayer::<SharedBuf>::default();
        assert!(audio.bell.is_none());
        audio.play_at(&AudioCue::new("tick"), Position::ORIGIN).unwrap();
    }

    #[test]
    fn bell_rings_once_per_cue() {
        let buf = SharedBuf::default();
        let mut audio = LogAudioPlayer::with_bell(buf.clone());
        audio.play_at(&AudioCue::new("tick"), Position::ORIGIN).unwrap();
        audio.play_at(&AudioCue::new("tock"), Position::ORIGIN).unwrap();
        assert_eq!(buf.text(), "\x07\x07");
    }

    #[test]
    fn keypad_session_prints_code_and_result() {
        let buf = SharedBuf::default();
        let config = Config::default();
        let settings = EntrySettings::new(
            EntryRules::new(RequiredLength::new(4).unwrap(), AllowedCharacterClass::Digits),
            CuePool::seeded(vec![AudioCue::new("tick")], 0).unwrap(),
        );
        let mut controller = CodeEntryController::new(settings, surfaces(&config, || buf.clone())).unwrap();

        let labels = controller.key_labels();
        for command in parse_token("0915", &labels).unwrap() {
            if let Command::Press(id) = command {
                controller.activate(id).unwrap();
            }
        }
        controller.activate(ControlId::Confirm).unwrap();

        let text = buf.text();
        assert!(text.contains("[     0915      ]"));
        assert!(text.ends_with("Code entered: 0915\n"));
        assert!(controller.is_submitted());
    }
}
