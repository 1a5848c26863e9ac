//! Construction-time combobox configuration.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::filter::FilterMode;
use crate::option::SelectOption;
use crate::value::SelectValue;

/// Called with the committed value after every selection change or clear.
pub type ChangeHandler = Arc<dyn Fn(&SelectValue) + Send + Sync>;

/// Called when the user picks one of the menu's escape-hatch actions.
pub type ActionHandler = Arc<dyn Fn() + Send + Sync>;

/// Default number of rows the menu may occupy, also the flip threshold.
pub const DEFAULT_MENU_HEIGHT: u16 = 8;

#[derive(Clone)]
pub struct ComboboxConfig {
    /// Unique field name; also identifies the widget's overlay and signal subscriptions.
    pub name: String,
    pub options: Vec<SelectOption>,
    pub required: bool,
    pub searchable: bool,
    pub multiple: bool,
    pub placeholder: String,
    pub disabled: bool,
    pub initial_value: SelectValue,
    /// Validation message rendered under the control. Cosmetic only.
    pub error: Option<String>,
    /// Rows below the trigger needed to open downward, and the menu's maximum height.
    pub menu_height: u16,
    /// Fixed trigger width; defaults to the width of the area it is laid out in.
    pub width: Option<u16>,
    pub filter_mode: FilterMode,
    pub on_change: Option<ChangeHandler>,
    pub on_add_new: Option<ActionHandler>,
    pub on_refresh: Option<ActionHandler>,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            options: Vec::new(),
            required: false,
            searchable: false,
            multiple: false,
            placeholder: "Select...".to_string(),
            disabled: false,
            initial_value: SelectValue::None,
            error: None,
            menu_height: DEFAULT_MENU_HEIGHT,
            width: None,
            filter_mode: FilterMode::default(),
            on_change: None,
            on_add_new: None,
            on_refresh: None,
        }
    }
}

impl fmt::Debug for ComboboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComboboxConfig")
            .field("name", &self.name)
            .field("options", &self.options.len())
            .field("required", &self.required)
            .field("searchable", &self.searchable)
            .field("multiple", &self.multiple)
            .field("placeholder", &self.placeholder)
            .field("disabled", &self.disabled)
            .field("initial_value", &self.initial_value)
            .field("error", &self.error)
            .field("menu_height", &self.menu_height)
            .field("width", &self.width)
            .field("filter_mode", &self.filter_mode)
            .field("on_change", &self.on_change.is_some())
            .field("on_add_new", &self.on_add_new.is_some())
            .field("on_refresh", &self.on_refresh.is_some())
            .finish()
    }
}

impl ComboboxConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<SelectOption>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(SelectOption::new(value, label));
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn initial_value(mut self, value: impl Into<SelectValue>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn menu_height(mut self, rows: u16) -> Self {
        self.menu_height = rows;
        self
    }

    pub fn width(mut self, columns: u16) -> Self {
        self.width = Some(columns);
        self
    }

    pub fn filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }

    pub fn on_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(&SelectValue) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(handler));
        self
    }

    pub fn on_add_new<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_add_new = Some(Arc::new(handler));
        self
    }

    pub fn on_refresh<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_refresh = Some(Arc::new(handler));
        self
    }

    /// Check the configuration can back a widget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.menu_height == 0 {
            return Err(ConfigError::ZeroMenuHeight {
                field: self.name.clone(),
            });
        }
        validate_options(&self.name, &self.options)
    }

    pub(crate) fn has_actions(&self) -> bool {
        self.on_add_new.is_some() || self.on_refresh.is_some()
    }
}

/// Reject option lists where two entries share a value.
pub(crate) fn validate_options(field: &str, options: &[SelectOption]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for opt in options {
        if !seen.insert(opt.value.as_str()) {
            return Err(ConfigError::DuplicateValue {
                field: field.to_string(),
                value: opt.value.clone(),
            });
        }
    }
    Ok(())
}
