use serde::{Deserialize, Serialize};

/// A combobox value as exchanged with the host form.
///
/// Used both for the initial value and for every `on_change` payload.
/// Single-select widgets report `None` or `Single`; multi-select widgets
/// always report `Multiple`, empty when cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectValue {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl SelectValue {
    /// The empty value for a widget in the given mode.
    pub fn empty(multiple: bool) -> Self {
        if multiple {
            SelectValue::Multiple(Vec::new())
        } else {
            SelectValue::None
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SelectValue::None => true,
            SelectValue::Single(_) => false,
            SelectValue::Multiple(values) => values.is_empty(),
        }
    }

    /// All values, in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            SelectValue::None => Vec::new(),
            SelectValue::Single(v) => vec![v.as_str()],
            SelectValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Serialise for a plain form field: the value itself, or a comma-joined list.
    pub fn to_field_value(&self) -> String {
        self.values().join(",")
    }
}

impl From<&str> for SelectValue {
    fn from(value: &str) -> Self {
        SelectValue::Single(value.to_string())
    }
}

impl From<String> for SelectValue {
    fn from(value: String) -> Self {
        SelectValue::Single(value)
    }
}

impl From<Option<String>> for SelectValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(SelectValue::None, SelectValue::Single)
    }
}

impl From<Vec<String>> for SelectValue {
    fn from(values: Vec<String>) -> Self {
        SelectValue::Multiple(values)
    }
}

impl From<Vec<&str>> for SelectValue {
    fn from(values: Vec<&str>) -> Self {
        SelectValue::Multiple(values.into_iter().map(str::to_string).collect())
    }
}
