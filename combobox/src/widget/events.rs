//! Event handling for the Combobox widget.

use termgrid::{Event, Key, Modifiers, MouseButton, Rect};

use crate::signals::{Signal, SignalRegistry};

use super::state::{Combobox, InteractionMode};

/// Whether the widget used an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Ignored,
    Consumed,
}

impl EventResult {
    pub fn is_handled(self) -> bool {
        self == EventResult::Consumed
    }
}

/// Width of the trigger's right-hand gutter (clear button and arrow).
const TRIGGER_GUTTER: u16 = 4;

impl Combobox {
    /// Route any input event to the matching handler.
    ///
    /// Key events are assumed to be meant for this widget (the host only
    /// forwards keys to the focused field). Pointer, scroll and resize
    /// events may be delivered to every widget.
    pub fn handle_event(&mut self, event: &Event, signals: &mut SignalRegistry) -> EventResult {
        match *event {
            Event::Key { key, modifiers } => self.handle_key(key, modifiers, signals),
            Event::PointerDown { x, y, button } => {
                let result = self.handle_pointer_down(x, y, button, signals);
                if !result.is_handled()
                    && !self.hit(x, y)
                    && signals.is_subscribed(self.name(), Signal::PointerDownOutside)
                {
                    self.handle_signal(Signal::PointerDownOutside, signals);
                }
                result
            }
            Event::PointerMove { x, y } => self.handle_pointer_move(x, y),
            Event::Scroll { x, y, delta_y } => {
                if self.menu_contains(x, y) {
                    self.set_mode(InteractionMode::Pointer);
                    self.focus_by(delta_y);
                    return EventResult::Consumed;
                }
                if signals.is_subscribed(self.name(), Signal::Scroll) {
                    self.handle_signal(Signal::Scroll, signals);
                }
                EventResult::Ignored
            }
            Event::Resize { width, height } => {
                self.viewport = Rect::from_size(width, height);
                if signals.is_subscribed(self.name(), Signal::Resize) {
                    self.handle_signal(Signal::Resize, signals);
                }
                EventResult::Ignored
            }
        }
    }

    /// React to a subscribed environment signal.
    pub fn handle_signal(&mut self, signal: Signal, signals: &mut SignalRegistry) {
        match signal {
            Signal::Resize | Signal::Scroll => {
                if self.is_open() {
                    log::trace!("{}: {:?}, repositioning", self.name(), signal);
                    self.reposition();
                    if self.menu_has_no_room() {
                        log::debug!("{}: menu squeezed out, closing", self.name());
                        self.close(signals);
                    }
                }
            }
            Signal::PointerDownOutside => {
                if self.is_open() {
                    log::debug!("{}: pointer down outside", self.name());
                    self.close(signals);
                }
            }
        }
    }

    pub fn handle_key(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        signals: &mut SignalRegistry,
    ) -> EventResult {
        if self.is_disabled() || modifiers.ctrl || modifiers.alt {
            return EventResult::Ignored;
        }

        if !self.is_open() {
            return match key {
                Key::Up | Key::Down | Key::Enter => {
                    self.open_with(InteractionMode::Keyboard, signals);
                    EventResult::Consumed
                }
                Key::Delete if !self.selection.is_empty() => {
                    self.clear();
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            };
        }

        match key {
            Key::Down => {
                self.set_mode(InteractionMode::Keyboard);
                self.focus_next();
                EventResult::Consumed
            }
            Key::Up => {
                self.set_mode(InteractionMode::Keyboard);
                self.focus_prev();
                EventResult::Consumed
            }
            Key::Home => {
                self.set_mode(InteractionMode::Keyboard);
                self.focus_first();
                EventResult::Consumed
            }
            Key::End => {
                self.set_mode(InteractionMode::Keyboard);
                self.focus_last();
                EventResult::Consumed
            }
            Key::Enter => {
                self.set_mode(InteractionMode::Keyboard);
                self.commit_focused(signals);
                EventResult::Consumed
            }
            Key::Escape => {
                self.close(signals);
                EventResult::Consumed
            }
            // Tab closes but still lets the host move focus.
            Key::Tab | Key::BackTab => {
                self.close(signals);
                EventResult::Ignored
            }
            Key::Delete => {
                self.clear();
                EventResult::Consumed
            }
            Key::Backspace if self.config.searchable => {
                let mut term = self.search_term().to_string();
                term.pop();
                self.set_search_term(term);
                EventResult::Consumed
            }
            Key::Char(c) if self.config.searchable => {
                let mut term = self.search_term().to_string();
                term.push(c);
                self.set_search_term(term);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    pub fn handle_pointer_down(
        &mut self,
        x: u16,
        y: u16,
        button: MouseButton,
        signals: &mut SignalRegistry,
    ) -> EventResult {
        if self.is_disabled() {
            return if self.trigger.contains(x, y) {
                EventResult::Consumed
            } else {
                EventResult::Ignored
            };
        }

        if self.menu_contains(x, y) {
            if button != MouseButton::Left {
                return EventResult::Consumed;
            }
            if let Some(row) = self.option_row_at(x, y) {
                self.set_mode(InteractionMode::Pointer);
                if let Some(menu) = self.menu.as_mut() {
                    menu.focused = Some(row);
                }
                self.commit_focused(signals);
            } else if let Some(footer) = self.menu_layout().and_then(|layout| layout.footer) {
                if footer.add_new.is_some_and(|r| r.contains(x, y)) {
                    self.add_new(signals);
                } else if footer.refresh.is_some_and(|r| r.contains(x, y)) {
                    self.refresh();
                }
            }
            return EventResult::Consumed;
        }

        if self.trigger.contains(x, y) {
            if button != MouseButton::Left {
                return EventResult::Consumed;
            }
            if self.clear_button_rect().is_some_and(|r| r.contains(x, y)) {
                self.clear();
            } else {
                self.toggle(signals);
            }
            return EventResult::Consumed;
        }

        EventResult::Ignored
    }

    /// Track the pointer for hover highlighting.
    ///
    /// Only an actual change of position counts as movement; a stationary
    /// pointer never takes the highlight back from the keyboard.
    pub fn handle_pointer_move(&mut self, x: u16, y: u16) -> EventResult {
        let moved = self.last_pointer != Some((x, y));
        self.last_pointer = Some((x, y));
        if !self.is_open() {
            return EventResult::Ignored;
        }
        if moved {
            self.set_mode(InteractionMode::Pointer);
        }

        match self.option_row_at(x, y) {
            Some(row) => {
                self.pointer_enter(row);
                EventResult::Consumed
            }
            None => {
                if self.menu.as_ref().is_some_and(|menu| menu.hovering) {
                    self.pointer_leave();
                }
                if self.menu_contains(x, y) {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
        }
    }

    /// Re-apply hover at the last known pointer position.
    ///
    /// Hosts call this after scrolling the form, when rows may have moved
    /// under a pointer that did not.
    pub fn rehover(&mut self) {
        let Some((x, y)) = self.last_pointer else {
            return;
        };
        if let Some(row) = self.option_row_at(x, y) {
            self.pointer_enter(row);
        }
    }

    // -------------------------------------------------------------------------
    // Hit testing
    // -------------------------------------------------------------------------

    /// True if the point is on the trigger or the open menu.
    pub fn hit(&self, x: u16, y: u16) -> bool {
        self.trigger.contains(x, y) || self.menu_contains(x, y)
    }

    fn menu_contains(&self, x: u16, y: u16) -> bool {
        self.menu
            .as_ref()
            .is_some_and(|menu| menu.position.rect().contains(x, y))
    }

    /// Row of the filtered list under the point, if it is a visible option.
    pub(crate) fn option_row_at(&self, x: u16, y: u16) -> Option<usize> {
        let menu = self.menu.as_ref()?;
        let layout = self.menu_layout()?;
        if !layout.options.contains(x, y) {
            return None;
        }
        let row = menu.scroll + (y - layout.options.y) as usize;
        (row < menu.filtered.len()).then_some(row)
    }

    /// Screen cells of the clear button, when one is shown.
    pub(crate) fn clear_button_rect(&self) -> Option<Rect> {
        if self.is_disabled() || self.display_label().is_none() || self.trigger.width < 6 {
            return None;
        }
        Some(Rect::new(
            self.trigger.right() - TRIGGER_GUTTER,
            self.trigger.y,
            2,
            1,
        ))
    }
}
