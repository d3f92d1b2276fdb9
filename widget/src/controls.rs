use std::collections::HashMap;
use crate::{WidgetError, WidgetResult};

/// Identifies a control on the keypad.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ControlId {
    /// A key, by its index in the configured key list.
    Key(usize),
    Backspace,
    Confirm,
}

/// What activating a control does.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Append(char),
    RemoveLast,
    Submit,
}

/// Maps each control to its action.
///
/// Built once when the keypad is activated and emptied once the code is submitted,
/// after which every lookup fails.
#[derive(Clone, Debug, Default)]
pub struct ControlTable {
    actions: HashMap<ControlId, Action>,
}

impl ControlTable {
    /// Registers every key under the first character of its label, plus backspace and confirm.
    pub fn attach<'l>(labels: impl IntoIterator<Item = &'l str>) -> WidgetResult<Self> {
        let mut actions = HashMap::new();
        for (index, label) in labels.into_iter().enumerate() {
            let c = label
                .chars()
                .next()
                .ok_or(WidgetError::EmptyKeyLabel(index))?;
            actions.insert(ControlId::Key(index), Action::Append(c));
        }
        actions.insert(ControlId::Backspace, Action::RemoveLast);
        actions.insert(ControlId::Confirm, Action::Submit);
        Ok(ControlTable { actions })
    }

    pub fn lookup(&self, id: ControlId) -> WidgetResult<Action> {
        self.actions
            .get(&id)
            .copied()
            .ok_or(WidgetError::UnknownControl(id))
    }

    pub fn detach_all(&mut self) {
        self.actions.clear();
    }

    /// Number of key controls registered.
    pub fn key_count(&self) -> usize {
        self.actions
            .keys()
            .filter(|id| matches!(id, ControlId::Key(_)))
            .count()
    }
}
