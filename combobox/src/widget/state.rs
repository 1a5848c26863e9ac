//! Combobox state and transitions.

use termgrid::Rect;

use crate::config::{ComboboxConfig, validate_options};
use crate::error::ConfigError;
use crate::filter::filter_options;
use crate::option::SelectOption;
use crate::position::{MenuPosition, OpenDirection, compute_menu_position};
use crate::selection::{Selection, display_label};
use crate::signals::{Signal, SignalRegistry};
use crate::value::SelectValue;

use super::layout::{MenuLayout, menu_layout};

/// What the user is driving the open menu with.
///
/// In `Keyboard` mode pointer enter/leave do not move the highlight, so rows
/// sliding under a stationary pointer while arrowing through a scrolled list
/// don't steal focus. Real pointer movement switches back to `Pointer`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Pointer,
    Keyboard,
}

/// Observable phase of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboState {
    Closed,
    OpenIdle,
    /// Open with a non-empty search term.
    OpenFiltering,
    /// Open and driven by the keyboard.
    OpenKeyboardNav,
}

/// Everything that exists only while the menu is open.
///
/// Dropping it on close is what resets search text, focus and mode.
#[derive(Debug, Clone)]
pub(super) struct OpenMenu {
    pub search: String,
    /// Indices into the option list, in display order.
    pub filtered: Vec<usize>,
    /// Index into `filtered`.
    pub focused: Option<usize>,
    pub mode: InteractionMode,
    pub position: MenuPosition,
    /// First visible row of `filtered`.
    pub scroll: usize,
    /// Pointer is currently over an option row.
    pub hovering: bool,
}

/// A searchable, optionally multi-select dropdown.
///
/// # Example
///
/// ```ignore
/// let mut tags = Combobox::new(
///     ComboboxConfig::new("tags")
///         .multiple(true)
///         .searchable(true)
///         .options([("urgent", "Urgent"), ("q3", "Q3 close")])
///         .on_change(|value| println!("{}", value.to_field_value())),
/// )?;
/// tags.mount(&mut signals);
/// tags.layout(Rect::new(18, 4, 30, 1), compositor.viewport());
/// tags.handle_event(&event, &mut signals);
/// tags.render(&mut compositor, true, &ComboboxTheme::default());
/// ```
#[derive(Debug)]
pub struct Combobox {
    pub(super) config: ComboboxConfig,
    pub(super) selection: Selection,
    last_initial: SelectValue,
    pub(super) menu: Option<OpenMenu>,
    pub(super) trigger: Rect,
    pub(super) viewport: Rect,
    pub(super) last_pointer: Option<(u16, u16)>,
}

impl Combobox {
    /// Build a widget, seeding its selection from `config.initial_value`.
    pub fn new(config: ComboboxConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let selection = Selection::from_value(&config.initial_value, &config.options, config.multiple);
        let widget = Self {
            last_initial: config.initial_value.clone(),
            selection,
            config,
            menu: None,
            trigger: Rect::default(),
            viewport: Rect::default(),
            last_pointer: None,
        };
        widget.log_unresolved();
        Ok(widget)
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &ComboboxConfig {
        &self.config
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.config.options
    }

    pub fn is_multiple(&self) -> bool {
        self.config.multiple
    }

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    // -------------------------------------------------------------------------
    // Host-driven updates
    // -------------------------------------------------------------------------

    /// Replace the option list, e.g. after the host refetched it.
    ///
    /// The selection is left alone; labels resolve against the new list.
    pub fn set_options(&mut self, options: Vec<SelectOption>) -> Result<(), ConfigError> {
        validate_options(&self.config.name, &options)?;
        log::debug!("{}: {} options", self.config.name, options.len());
        self.config.options = options;

        if let Some(menu) = self.menu.as_mut() {
            menu.filtered = filter_options(&self.config.options, &menu.search, self.config.filter_mode);
            menu.focused = match menu.focused {
                _ if menu.filtered.is_empty() => None,
                Some(i) => Some(i.min(menu.filtered.len() - 1)),
                None => None,
            };
            self.reposition();
        }
        Ok(())
    }

    /// Re-seed the selection from a host value.
    ///
    /// Only takes effect when `value` differs from the last initial value seen,
    /// so a host can pass its current value on every frame.
    pub fn set_initial_value(&mut self, value: SelectValue) {
        if value == self.last_initial {
            return;
        }
        log::debug!("{}: initial value changed to {:?}", self.config.name, value);
        self.selection = Selection::from_value(&value, &self.config.options, self.config.multiple);
        self.last_initial = value;
        self.log_unresolved();
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.config.error = error;
    }

    pub fn error(&self) -> Option<&str> {
        self.config.error.as_deref()
    }

    pub fn set_disabled(&mut self, disabled: bool, signals: &mut SignalRegistry) {
        self.config.disabled = disabled;
        if disabled {
            self.close(signals);
        }
    }

    fn log_unresolved(&self) {
        let unresolved = self.selection.unresolved(&self.config.options);
        if !unresolved.is_empty() {
            log::debug!(
                "{}: initial values {:?} match no option; showing no selection for them",
                self.config.name,
                unresolved
            );
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Start listening for clicks elsewhere on screen.
    pub fn mount(&mut self, signals: &mut SignalRegistry) {
        signals.subscribe(&self.config.name, Signal::PointerDownOutside);
    }

    /// Close the menu and drop every subscription.
    pub fn unmount(&mut self, signals: &mut SignalRegistry) {
        self.menu = None;
        signals.unsubscribe_all(&self.config.name);
    }

    /// Record where the widget sits on screen.
    ///
    /// `area` is the widget's full area; the trigger is its first row, narrowed
    /// to the configured width if there is one. An open menu follows the
    /// trigger if it moved.
    pub fn layout(&mut self, area: Rect, viewport: Rect) {
        let width = self.config.width.map_or(area.width, |w| w.min(area.width));
        let trigger = Rect::new(area.x, area.y, width, 1);
        let changed = trigger != self.trigger || viewport != self.viewport;
        self.trigger = trigger;
        self.viewport = viewport;
        if changed && self.menu.is_some() {
            self.reposition();
        }
    }

    /// Rows the widget needs: the trigger plus a line for the error message.
    pub fn height(&self) -> u16 {
        1 + u16::from(self.config.error.is_some())
    }

    pub fn trigger_rect(&self) -> Rect {
        self.trigger
    }

    // -------------------------------------------------------------------------
    // Derived state
    // -------------------------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.menu.is_some()
    }

    pub fn state(&self) -> ComboState {
        match &self.menu {
            None => ComboState::Closed,
            Some(menu) if menu.mode == InteractionMode::Keyboard => ComboState::OpenKeyboardNav,
            Some(menu) if !menu.search.is_empty() => ComboState::OpenFiltering,
            Some(_) => ComboState::OpenIdle,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The committed value, without entries no option matches.
    pub fn value(&self) -> SelectValue {
        self.selection.to_value(&self.config.options, self.config.multiple)
    }

    /// The value serialised for a plain form field.
    pub fn hidden_value(&self) -> String {
        self.value().to_field_value()
    }

    pub fn display_label(&self) -> Option<String> {
        display_label(&self.selection, &self.config.options, self.config.multiple)
    }

    /// Selected values that match no current option.
    pub fn unresolved_values(&self) -> Vec<&str> {
        self.selection.unresolved(&self.config.options)
    }

    /// False when the field is required and nothing resolvable is selected.
    pub fn is_satisfied(&self) -> bool {
        !self.config.required || !self.value().is_empty()
    }

    pub fn search_term(&self) -> &str {
        self.menu.as_ref().map_or("", |menu| menu.search.as_str())
    }

    /// Options currently listed in the menu; empty while closed.
    pub fn filtered_options(&self) -> Vec<&SelectOption> {
        self.menu
            .as_ref()
            .map(|menu| menu.filtered.iter().map(|&i| &self.config.options[i]).collect())
            .unwrap_or_default()
    }

    /// Highlighted row in the filtered list; `None` while closed.
    pub fn focused_index(&self) -> Option<usize> {
        self.menu.as_ref().and_then(|menu| menu.focused)
    }

    pub fn focused_option(&self) -> Option<&SelectOption> {
        let menu = self.menu.as_ref()?;
        let idx = *menu.filtered.get(menu.focused?)?;
        self.config.options.get(idx)
    }

    pub fn interaction_mode(&self) -> Option<InteractionMode> {
        self.menu.as_ref().map(|menu| menu.mode)
    }

    pub fn menu_position(&self) -> Option<MenuPosition> {
        self.menu.as_ref().map(|menu| menu.position)
    }

    pub fn open_direction(&self) -> Option<OpenDirection> {
        self.menu_position().map(|pos| pos.direction)
    }

    pub(super) fn menu_layout(&self) -> Option<MenuLayout> {
        let menu = self.menu.as_ref()?;
        Some(menu_layout(
            menu.position.rect(),
            self.config.searchable,
            self.config.on_add_new.is_some(),
            self.config.on_refresh.is_some(),
        ))
    }

    fn visible_option_rows(&self) -> usize {
        self.menu_layout()
            .map_or(0, |layout| layout.options.height as usize)
    }

    /// Rows the open menu would like: search, options (or the empty notice), footer.
    fn content_rows(&self) -> u16 {
        let Some(menu) = &self.menu else { return 0 };
        let rows = menu.filtered.len().max(1)
            + usize::from(self.config.searchable)
            + usize::from(self.config.has_actions());
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    // -------------------------------------------------------------------------
    // Open / close
    // -------------------------------------------------------------------------

    /// Open the menu. No-op when disabled or already open.
    pub fn open(&mut self, signals: &mut SignalRegistry) {
        self.open_with(InteractionMode::Pointer, signals);
    }

    pub(super) fn open_with(&mut self, mode: InteractionMode, signals: &mut SignalRegistry) {
        if self.config.disabled || self.menu.is_some() {
            return;
        }

        let filtered = filter_options(&self.config.options, "", self.config.filter_mode);
        let focused = filtered
            .iter()
            .position(|&i| self.selection.contains(&self.config.options[i].value))
            .or_else(|| (!filtered.is_empty()).then_some(0));

        self.menu = Some(OpenMenu {
            search: String::new(),
            filtered,
            focused,
            mode,
            position: MenuPosition::default(),
            scroll: 0,
            hovering: false,
        });

        signals.subscribe(&self.config.name, Signal::Resize);
        signals.subscribe(&self.config.name, Signal::Scroll);
        self.reposition();

        if self.menu_has_no_room() {
            log::warn!(
                "{}: no room for the menu in {:?}, not opening",
                self.config.name,
                self.viewport
            );
            self.close(signals);
            return;
        }

        log::debug!(
            "{}: opened ({:?}) focused={:?} direction={:?}",
            self.config.name,
            mode,
            focused,
            self.open_direction()
        );
    }

    /// Close the menu, discarding search text and keyboard focus.
    pub fn close(&mut self, signals: &mut SignalRegistry) {
        if self.menu.take().is_some() {
            signals.unsubscribe(&self.config.name, Signal::Resize);
            signals.unsubscribe(&self.config.name, Signal::Scroll);
            log::debug!("{}: closed", self.config.name);
        }
    }

    pub fn toggle(&mut self, signals: &mut SignalRegistry) {
        if self.is_open() {
            self.close(signals);
        } else {
            self.open(signals);
        }
    }

    /// Laid out, open, and left with zero rows for the menu.
    pub(super) fn menu_has_no_room(&self) -> bool {
        !self.viewport.is_empty()
            && self.menu.as_ref().is_some_and(|menu| menu.position.height == 0)
    }

    /// Recompute the menu's screen position from the trigger and viewport.
    pub(super) fn reposition(&mut self) {
        let rows = self.content_rows();
        if let Some(menu) = self.menu.as_mut() {
            menu.position =
                compute_menu_position(self.trigger, self.viewport, rows, self.config.menu_height);
        }
        self.scroll_to_focus();
    }

    // -------------------------------------------------------------------------
    // Search and focus
    // -------------------------------------------------------------------------

    /// Replace the search text and refilter. Ignored while closed or not searchable.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        if !self.config.searchable {
            return;
        }
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        menu.search = term.into();
        menu.filtered = filter_options(&self.config.options, &menu.search, self.config.filter_mode);
        menu.focused = (!menu.filtered.is_empty()).then_some(0);
        menu.scroll = 0;
        log::trace!(
            "{}: search {:?} -> {} matches",
            self.config.name,
            menu.search,
            menu.filtered.len()
        );
        self.reposition();
    }

    pub(super) fn set_mode(&mut self, mode: InteractionMode) {
        if let Some(menu) = self.menu.as_mut() {
            menu.mode = mode;
        }
    }

    /// Move the highlight down one row, wrapping to the first.
    pub fn focus_next(&mut self) {
        self.move_focus(|focused, len| match focused {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        });
    }

    /// Move the highlight up one row, wrapping to the last.
    pub fn focus_prev(&mut self) {
        self.move_focus(|focused, len| match focused {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        });
    }

    pub fn focus_first(&mut self) {
        self.move_focus(|_, _| 0);
    }

    pub fn focus_last(&mut self) {
        self.move_focus(|_, len| len - 1);
    }

    /// Shift the highlight by `delta` rows without wrapping.
    pub(super) fn focus_by(&mut self, delta: i16) {
        self.move_focus(|focused, len| {
            let current = focused.unwrap_or(0) as isize;
            (current + delta as isize).clamp(0, len as isize - 1) as usize
        });
    }

    /// `step` receives the current focus and the (non-zero) filtered length.
    fn move_focus(&mut self, step: impl FnOnce(Option<usize>, usize) -> usize) {
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        let len = menu.filtered.len();
        menu.focused = (len > 0).then(|| step(menu.focused, len));
        self.scroll_to_focus();
    }

    /// Adjust scrolling so the focused row is visible.
    fn scroll_to_focus(&mut self) {
        let visible = self.visible_option_rows();
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        if visible == 0 {
            menu.scroll = 0;
            return;
        }
        if let Some(focused) = menu.focused {
            if focused < menu.scroll {
                menu.scroll = focused;
            } else if focused >= menu.scroll + visible {
                menu.scroll = focused + 1 - visible;
            }
        }
        menu.scroll = menu.scroll.min(menu.filtered.len().saturating_sub(visible));
    }

    // -------------------------------------------------------------------------
    // Pointer hover
    // -------------------------------------------------------------------------

    /// Pointer entered the option row at `row` of the filtered list.
    ///
    /// Ignored in keyboard mode.
    pub fn pointer_enter(&mut self, row: usize) {
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        if menu.mode == InteractionMode::Keyboard {
            return;
        }
        if row < menu.filtered.len() {
            menu.focused = Some(row);
            menu.hovering = true;
        }
    }

    /// Pointer left the option rows. Ignored in keyboard mode.
    pub fn pointer_leave(&mut self) {
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        if menu.mode == InteractionMode::Keyboard {
            return;
        }
        menu.focused = None;
        menu.hovering = false;
    }

    // -------------------------------------------------------------------------
    // Commit
    // -------------------------------------------------------------------------

    /// Commit the highlighted option.
    ///
    /// With nothing highlighted, single-select widgets commit the first
    /// filtered option; multi-select widgets do nothing.
    pub fn commit_focused(&mut self, signals: &mut SignalRegistry) {
        let Some(menu) = &self.menu else {
            return;
        };
        let target = match menu.focused {
            Some(row) if row < menu.filtered.len() => Some(menu.filtered[row]),
            _ if !self.config.multiple => menu.filtered.first().copied(),
            _ => None,
        };
        if let Some(index) = target {
            self.select_index(index, signals);
        }
    }

    /// Commit the option with `value`. Returns false if no option has it.
    pub fn select_value(&mut self, value: &str, signals: &mut SignalRegistry) -> bool {
        match crate::option::index_of(&self.config.options, value) {
            Some(index) => {
                self.select_index(index, signals);
                true
            }
            None => {
                log::warn!("{}: no option with value {:?}", self.config.name, value);
                false
            }
        }
    }

    /// Single mode replaces the selection and closes; multi mode toggles and stays open.
    fn select_index(&mut self, index: usize, signals: &mut SignalRegistry) {
        let value = self.config.options[index].value.clone();
        if self.config.multiple {
            // A multi commit reports the whole selection, so drop anything unresolvable first.
            self.selection.retain_known(&self.config.options);
            let selected = self.selection.toggle(&value);
            log::debug!(
                "{}: {} {:?}",
                self.config.name,
                if selected { "selected" } else { "deselected" },
                value
            );
            self.emit_change();
        } else {
            log::debug!("{}: selected {:?}", self.config.name, value);
            self.selection.replace(&value);
            self.emit_change();
            self.close(signals);
        }
    }

    /// Empty the selection and report the empty value.
    pub fn clear(&mut self) {
        self.selection.clear();
        log::debug!("{}: cleared", self.config.name);
        self.emit_change();
    }

    fn emit_change(&self) {
        if let Some(handler) = &self.config.on_change {
            handler(&self.value());
        }
    }

    /// Run the "add new" action, closing the menu first. Returns false if none is configured.
    pub fn add_new(&mut self, signals: &mut SignalRegistry) -> bool {
        let Some(handler) = self.config.on_add_new.clone() else {
            return false;
        };
        self.close(signals);
        log::debug!("{}: add new requested", self.config.name);
        handler();
        true
    }

    /// Run the "refresh" action. Returns false if none is configured.
    pub fn refresh(&mut self) -> bool {
        let Some(handler) = self.config.on_refresh.clone() else {
            return false;
        };
        log::debug!("{}: refresh requested", self.config.name);
        handler();
        true
    }
}
