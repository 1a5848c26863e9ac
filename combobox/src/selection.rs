//! Selected values and the label derived from them.

use crate::option::{SelectOption, index_of};
use crate::value::SelectValue;

/// Ordered set of chosen option values.
///
/// Values are kept even when no current option matches them, so a selection
/// seeded before its options arrive resolves once they do. Unmatched values
/// are never displayed or reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    values: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a host-supplied value.
    ///
    /// Single mode keeps at most one value: the first that matches an
    /// option, or the first given when none does.
    pub fn from_value(value: &SelectValue, options: &[SelectOption], multiple: bool) -> Self {
        let mut selection = Self::new();
        let values = value.values();
        if multiple {
            for v in values {
                selection.insert(v);
            }
        } else if let Some(v) = values
            .iter()
            .copied()
            .find(|v| index_of(options, v).is_some())
            .or_else(|| values.first().copied())
        {
            selection.insert(v);
        }
        selection
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Raw values, including any that no option currently matches.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    fn insert(&mut self, value: &str) {
        if !self.contains(value) {
            self.values.push(value.to_string());
        }
    }

    /// Make `value` the only selected value.
    pub fn replace(&mut self, value: &str) {
        self.values.clear();
        self.values.push(value.to_string());
    }

    /// Add `value` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, value: &str) -> bool {
        if let Some(pos) = self.values.iter().position(|v| v == value) {
            self.values.remove(pos);
            false
        } else {
            self.values.push(value.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Drop values no option matches.
    pub fn retain_known(&mut self, options: &[SelectOption]) {
        self.values.retain(|v| index_of(options, v).is_some());
    }

    /// Values that match an option, in selection order.
    pub fn resolved<'a>(&'a self, options: &'a [SelectOption]) -> impl Iterator<Item = &'a SelectOption> + 'a {
        self.values
            .iter()
            .filter_map(move |v| index_of(options, v).map(|idx| &options[idx]))
    }

    /// Values no option matches.
    pub fn unresolved<'a>(&'a self, options: &'a [SelectOption]) -> Vec<&'a str> {
        self.values
            .iter()
            .filter(|v| index_of(options, v).is_none())
            .map(String::as_str)
            .collect()
    }

    /// The resolved selection as a host-facing value.
    pub fn to_value(&self, options: &[SelectOption], multiple: bool) -> SelectValue {
        let mut resolved = self.resolved(options).map(|opt| opt.value.clone());
        if multiple {
            SelectValue::Multiple(resolved.collect())
        } else {
            resolved.next().into()
        }
    }
}

/// Text shown in the closed control.
///
/// `None` when nothing resolvable is selected, the option's label for a
/// single resolved value, otherwise `"{n} items selected"`.
pub fn display_label(selection: &Selection, options: &[SelectOption], multiple: bool) -> Option<String> {
    let resolved: Vec<&SelectOption> = selection.resolved(options).collect();
    match resolved.as_slice() {
        [] => None,
        [only] => Some(only.label.clone()),
        [first, ..] if !multiple => Some(first.label.clone()),
        many => Some(format!("{} items selected", many.len())),
    }
}
