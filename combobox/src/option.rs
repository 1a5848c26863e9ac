use serde::{Deserialize, Serialize};

/// A selectable `{value, label}` pair.
///
/// `value` identifies the option and is what gets reported through
/// `on_change`; `label` is what the user sees and searches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// An option whose value and label are the same text.
    pub fn simple(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: text.clone(),
            label: text,
        }
    }
}

impl<V: Into<String>, L: Into<String>> From<(V, L)> for SelectOption {
    fn from((value, label): (V, L)) -> Self {
        Self::new(value, label)
    }
}

/// Position of the option with `value`, if any.
pub(crate) fn index_of(options: &[SelectOption], value: &str) -> Option<usize> {
    options.iter().position(|opt| opt.value == value)
}
