use std::env::var_os;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use codepad_widget::controller::{EntrySettings, DEFAULT_CLEARED_PHRASE};
use codepad_widget::entry::EntryRules;
use codepad_widget::keys::KeypadKey;
use codepad_widget::{AllowedCharacterClass, AudioCue, CuePool, RequiredLength, WidgetResult};
use serde::{Deserialize, Serialize};

/// A key on the keypad: its control name and the text printed on it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KeyConfig {
    pub name: String,
    pub label: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// How many characters a code has (2 to 10).
    pub required_length: usize,
    pub allowed: AllowedCharacterClass,
    pub keys: Vec<KeyConfig>,
    /// Names of the sounds to pick from on every press.
    pub audio_cues: Vec<String>,
    pub cleared_phrase: String,
    /// Fixes the cue order. Random when unset.
    pub cue_seed: Option<u64>,
    /// Rings the terminal bell along with every cue.
    pub bell: bool,
}

impl Config {
    /// Gets the config path from `CONFIG_FILE`, falling back to `codepad.json`.
    pub fn path() -> PathBuf {
        let config_str = var_os("CONFIG_FILE");
        let config_str: &OsStr = config_str.as_deref().unwrap_or(OsStr::new("codepad.json"));
        PathBuf::from(config_str)
    }

    pub fn try_load() -> eyre::Result<Option<Self>> {
        Self::try_load_from(&Self::path())
    }

    /// Loads the config at `path`. A missing file is `Ok(None)`, a malformed one is an error.
    pub fn try_load_from(path: &Path) -> eyre::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config = serde_json::from_reader(reader)
            .map_err(|e| eyre::eyre!("Invalid config {}: {}", path.display(), e))?;
        Ok(Some(config))
    }

    pub fn save(&self) -> std::io::Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Checks the config and turns it into controller settings.
    pub fn settings(&self) -> WidgetResult<EntrySettings> {
        let required = RequiredLength::new(self.required_length)?;
        let cues: Vec<AudioCue> = self.audio_cues.iter().map(AudioCue::new).collect();
        let cues = match self.cue_seed {
            Some(seed) => CuePool::seeded(cues, seed)?,
            None => CuePool::new(cues)?,
        };
        Ok(EntrySettings::new(EntryRules::new(required, self.allowed), cues)
            .with_cleared_phrase(self.cleared_phrase.clone()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            required_length: RequiredLength::default().get(),
            allowed: AllowedCharacterClass::Digits,
            keys: KeypadKey::ALL
                .iter()
                .map(|key| KeyConfig {
                    name: key.name().to_string(),
                    label: key.to_char().to_string(),
                })
                .collect(),
            audio_cues: vec![
                "key_press_1".to_string(),
                "key_press_2".to_string(),
                "key_press_3".to_string(),
            ],
            cleared_phrase: DEFAULT_CLEARED_PHRASE.to_string(),
            cue_seed: None,
            bell: false,
        }
    }
}
