//! The keystroke state machine.
//!
//! Transitions are plain functions: they take the current [EntryState] by value and return a
//! [Step] holding the next state and the [View] the host should show. Nothing here touches a
//! collaborator, so the rules can be exercised without a UI.

use crate::{AllowedCharacterClass, WidgetError, WidgetResult};

/// Length a code must have before it can be submitted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RequiredLength(usize);

impl RequiredLength {
    pub const MIN: usize = 2;
    pub const MAX: usize = 10;

    pub fn new(length: usize) -> WidgetResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&length) {
            Ok(RequiredLength(length))
        } else {
            Err(WidgetError::InvalidRequiredLength(length))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for RequiredLength {
    fn default() -> Self {
        RequiredLength(4)
    }
}

impl TryFrom<usize> for RequiredLength {
    type Error = WidgetError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        RequiredLength::new(value)
    }
}

/// The code entered so far.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EntryState {
    chars: Vec<char>,
}

impl EntryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn status(&self, required: RequiredLength) -> EntryStatus {
        match self.len() {
            0 => EntryStatus::Empty,
            n if n >= required.get() => EntryStatus::Complete,
            n => EntryStatus::Partial(n),
        }
    }
}

/// Coarse state of an entry relative to the required length.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EntryStatus {
    Empty,
    /// Holds the current length.
    Partial(usize),
    Complete,
    /// The code was handed to the sink. Only reported by the controller.
    Submitted,
}

/// Why a key press cleared the entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rejection {
    /// The character is outside the configured class.
    NotAllowed(char),
    /// The entry was already at the required length.
    AlreadyComplete,
}

/// What the display shows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DisplayText {
    Code(String),
    Cleared,
}

/// Everything the host needs to render after a transition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct View {
    pub display: DisplayText,
    pub backspace_enabled: bool,
    pub confirm_enabled: bool,
}

impl View {
    /// The view of a freshly activated keypad.
    pub fn initial() -> Self {
        View {
            display: DisplayText::Code(String::new()),
            backspace_enabled: false,
            confirm_enabled: false,
        }
    }
}

/// Result of a transition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Step {
    pub state: EntryState,
    pub view: View,
    pub rejection: Option<Rejection>,
}

/// Rules the transitions are checked against.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct EntryRules {
    pub required: RequiredLength,
    pub allowed: AllowedCharacterClass,
}

impl EntryRules {
    pub fn new(required: RequiredLength, allowed: AllowedCharacterClass) -> Self {
        EntryRules { required, allowed }
    }
}

/// Appends `candidate`, or clears the entry if it is not allowed or the entry is already full.
pub fn add_character(state: EntryState, candidate: char, rules: EntryRules) -> Step {
    let rejection = if !rules.allowed.allows(candidate) {
        Some(Rejection::NotAllowed(candidate))
    } else if state.len() >= rules.required.get() {
        Some(Rejection::AlreadyComplete)
    } else {
        None
    };

    if let Some(rejection) = rejection {
        return Step {
            state: EntryState::new(),
            view: View {
                display: DisplayText::Cleared,
                backspace_enabled: false,
                confirm_enabled: false,
            },
            rejection: Some(rejection),
        };
    }

    let mut state = state;
    state.chars.push(candidate);
    let view = View {
        display: DisplayText::Code(state.as_string()),
        backspace_enabled: true,
        confirm_enabled: state.len() == rules.required.get(),
    };
    Step { state, view, rejection: None }
}

/// Drops the last character. Removing from an empty entry leaves it empty.
pub fn remove_character(state: EntryState) -> Step {
    let mut state = state;
    state.chars.pop();
    let view = View {
        display: DisplayText::Code(state.as_string()),
        backspace_enabled: !state.is_empty(),
        confirm_enabled: false,
    };
    Step { state, view, rejection: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(length: usize) -> EntryRules {
        EntryRules::new(
            RequiredLength::new(length).unwrap(),
            AllowedCharacterClass::Digits,
        )
    }

    fn type_in(rules: EntryRules, input: &str) -> Step {
        let mut step = Step {
            state: EntryState::new(),
            view: View::initial(),
            rejection: None,
        };
        for c in input.chars() {
            step = add_character(step.state, c, rules);
        }
        step
    }

    // --- RequiredLength tests ---

    #[test]
    fn required_length_bounds() {
        assert!(RequiredLength::new(1).is_err());
        assert!(RequiredLength::new(2).is_ok());
        assert!(RequiredLength::new(10).is_ok());
        assert_eq!(
            RequiredLength::try_from(11),
            Err(WidgetError::InvalidRequiredLength(11))
        );
        assert_eq!(RequiredLength::default().get(), 4);
    }

    // --- add_character tests ---

    #[test]
    fn valid_characters_grow_by_one() {
        let rules = digits(4);
        let mut state = EntryState::new();
        for (i, c) in "123".chars().enumerate() {
            let step = add_character(state, c, rules);
            assert_eq!(step.state.len(), i + 1);
            assert!(step.view.backspace_enabled);
            assert!(!step.view.confirm_enabled);
            assert_eq!(step.rejection, None);
            state = step.state;
        }
    }

    #[test]
    fn confirm_enabled_exactly_at_required_length() {
        let step = type_in(digits(4), "123");
        assert_eq!(step.view.display, DisplayText::Code("123".to_string()));
        assert!(!step.view.confirm_enabled);

        let step = add_character(step.state, '4', digits(4));
        assert_eq!(step.view.display, DisplayText::Code("1234".to_string()));
        assert!(step.view.confirm_enabled);
        assert_eq!(step.state.status(RequiredLength::new(4).unwrap()), EntryStatus::Complete);
    }

    #[test]
    fn invalid_character_clears_everything() {
        let step = type_in(digits(4), "12A");
        assert!(step.state.is_empty());
        assert_eq!(step.view.display, DisplayText::Cleared);
        assert!(!step.view.backspace_enabled);
        assert!(!step.view.confirm_enabled);
        assert_eq!(step.rejection, Some(Rejection::NotAllowed('A')));
    }

    #[test]
    fn invalid_character_on_empty_entry_still_clears() {
        let step = add_character(EntryState::new(), '#', digits(4));
        assert!(step.state.is_empty());
        assert_eq!(step.view.display, DisplayText::Cleared);
    }

    #[test]
    fn vulgar_fraction_and_superscript_are_not_a_code() {
        let step = add_character(EntryState::new(), '½', digits(2));
        assert_eq!(step.rejection, Some(Rejection::NotAllowed('½')));

        let step = type_in(digits(2), "1²");
        assert!(step.state.is_empty());
        assert!(!step.view.confirm_enabled);
        assert_eq!(step.rejection, Some(Rejection::NotAllowed('²')));
    }

    #[test]
    fn press_past_required_length_clears() {
        let step = type_in(digits(2), "12");
        assert!(step.view.confirm_enabled);

        let step = add_character(step.state, '3', digits(2));
        assert!(step.state.is_empty());
        assert_eq!(step.rejection, Some(Rejection::AlreadyComplete));
        assert_eq!(step.view.display, DisplayText::Cleared);
    }

    #[test]
    fn leading_zeros_are_kept() {
        let step = type_in(digits(4), "0042");
        assert_eq!(step.state.as_string(), "0042");
        assert!(step.view.confirm_enabled);
    }

    #[test]
    fn letters_class_rejects_digits() {
        let rules = EntryRules::new(RequiredLength::new(3).unwrap(), AllowedCharacterClass::Letters);
        let step = type_in(rules, "AB");
        assert_eq!(step.state.as_string(), "AB");

        let step = add_character(step.state, '1', rules);
        assert_eq!(step.rejection, Some(Rejection::NotAllowed('1')));
    }

    // --- remove_character tests ---

    #[test]
    fn backspace_removes_last_character() {
        let rules = EntryRules::new(RequiredLength::new(4).unwrap(), AllowedCharacterClass::LettersOrDigits);
        let step = type_in(rules, "A1B");

        let step = remove_character(step.state);
        assert_eq!(step.state.as_string(), "A1");
        assert_eq!(step.view.display, DisplayText::Code("A1".to_string()));
        assert!(step.view.backspace_enabled);
        assert!(!step.view.confirm_enabled);
    }

    #[test]
    fn backspace_to_empty_disables_backspace() {
        let step = type_in(digits(4), "1");
        let step = remove_character(step.state);
        assert!(step.state.is_empty());
        assert_eq!(step.view.display, DisplayText::Code(String::new()));
        assert!(!step.view.backspace_enabled);
    }

    #[test]
    fn backspace_on_empty_is_idempotent() {
        let step = remove_character(EntryState::new());
        let step = remove_character(step.state);
        assert!(step.state.is_empty());
        assert!(!step.view.backspace_enabled);
        assert!(!step.view.confirm_enabled);
    }

    #[test]
    fn backspace_from_complete_disables_confirm() {
        let step = type_in(digits(4), "1234");
        let step = remove_character(step.state);
        assert_eq!(step.state.status(RequiredLength::new(4).unwrap()), EntryStatus::Partial(3));
        assert!(!step.view.confirm_enabled);
    }
}
