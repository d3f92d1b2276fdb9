//! The default key set: a standard 4x4 membrane keypad.

/// Represents the keys on a 4x4 keypad.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum KeypadKey {
    /// The `1` key.
    Key1,
    /// The `2` key.
    Key2,
    /// The `3` key.
    Key3,
    /// The `4` key.
    Key4,
    /// The `5` key.
    Key5,
    /// The `6` key.
    Key6,
    /// The `7` key.
    Key7,
    /// The `8` key.
    Key8,
    /// The `9` key.
    Key9,
    /// The `0` key.
    Key0,
    /// The `*` key.
    KeyAsterisk,
    /// The `#` key.
    KeyHash,
    /// The `A` key.
    KeyA,
    /// The `B` key.
    KeyB,
    /// The `C` key.
    KeyC,
    /// The `D` key.
    KeyD,
}

impl KeypadKey {
    /// Every key, row by row as printed on the keypad.
    pub const ALL: [KeypadKey; 16] = {
        use KeypadKey::*;
        [
            Key1, Key2, Key3, KeyA,
            Key4, Key5, Key6, KeyB,
            Key7, Key8, Key9, KeyC,
            KeyAsterisk, Key0, KeyHash, KeyD,
        ]
    };

    /// Converts the [KeypadKey] to its corresponding character.
    pub fn to_char(self) -> char {
        use KeypadKey::*;

        match self {
            Key1 => '1',
            Key2 => '2',
            Key3 => '3',
            Key4 => '4',
            Key5 => '5',
            Key6 => '6',
            Key7 => '7',
            Key8 => '8',
            Key9 => '9',
            Key0 => '0',
            KeyAsterisk => '*',
            KeyHash => '#',
            KeyA => 'A',
            KeyB => 'B',
            KeyC => 'C',
            KeyD => 'D',
        }
    }

    /// Gets the control name the key gets in a host scene, e.g. `Key7` or `KeyHash`.
    pub fn name(self) -> &'static str {
        use KeypadKey::*;

        match self {
            Key1 => "Key1",
            Key2 => "Key2",
            Key3 => "Key3",
            Key4 => "Key4",
            Key5 => "Key5",
            Key6 => "Key6",
            Key7 => "Key7",
            Key8 => "Key8",
            Key9 => "Key9",
            Key0 => "Key0",
            KeyAsterisk => "KeyAsterisk",
            KeyHash => "KeyHash",
            KeyA => "KeyA",
            KeyB => "KeyB",
            KeyC => "KeyC",
            KeyD => "KeyD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_key_once() {
        let chars: String = KeypadKey::ALL.iter().map(|k| k.to_char()).collect();
        assert_eq!(chars, "123A456B789C*0#D");
    }

    #[test]
    fn names_follow_variants() {
        assert_eq!(KeypadKey::Key0.name(), "Key0");
        assert_eq!(KeypadKey::KeyHash.name(), "KeyHash");
    }
}
