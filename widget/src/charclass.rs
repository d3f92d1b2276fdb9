use crate::WidgetError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Restricts which characters a key press may add to the code.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedCharacterClass {
    /// Alphabetic characters only.
    Letters,
    /// Numeric digits only.
    #[default]
    Digits,
    /// Either of the above.
    LettersOrDigits,
}

impl AllowedCharacterClass {
    /// Checks whether `c` belongs to this class.
    pub fn allows(self, c: char) -> bool {
        match self {
            AllowedCharacterClass::Letters => is_letter(c),
            AllowedCharacterClass::Digits => is_digit(c),
            AllowedCharacterClass::LettersOrDigits => is_letter_or_digit(c),
        }
    }
}

/// Letter categories only (Lu, Ll, Lt, Lm, Lo). Letter-like numbers such as `Ⅻ` are not letters.
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Decimal digits (Nd) in any script. Superscripts and fractions are not digits.
fn is_digit(c: char) -> bool {
    matches!(get_general_category(c), GeneralCategory::DecimalNumber)
}

fn is_letter_or_digit(c: char) -> bool {
    is_letter(c) || is_digit(c)
}

impl FromStr for AllowedCharacterClass {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letters" => Ok(AllowedCharacterClass::Letters),
            "digits" => Ok(AllowedCharacterClass::Digits),
            "letters_or_digits" | "letters-or-digits" | "alphanumeric" => {
                Ok(AllowedCharacterClass::LettersOrDigits)
            }
            _ => Err(WidgetError::UnknownCharacterClass(s.to_string())),
        }
    }
}

impl Display for AllowedCharacterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            AllowedCharacterClass::Letters => "letters",
            AllowedCharacterClass::Digits => "digits",
            AllowedCharacterClass::LettersOrDigits => "letters_or_digits",
        };
        write!(f, "{}", str)
    }
}
