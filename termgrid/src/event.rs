//! Input events, normalised from crossterm.

use crossterm::event::{
    Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as CtButton,
    MouseEvent, MouseEventKind,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press (repeats included, releases dropped)
    Key { key: Key, modifiers: Modifiers },
    /// Mouse button pressed
    PointerDown { x: u16, y: u16, button: MouseButton },
    /// Mouse moved with no button held
    PointerMove { x: u16, y: u16 },
    /// Wheel scroll; negative `delta_y` is up
    Scroll { x: u16, y: u16, delta_y: i16 },
    /// Terminal resized
    Resize { width: u16, height: u16 },
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl Event {
    /// Shorthand for an unmodified key press.
    pub fn key(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::new(),
        }
    }

    /// Shorthand for a left click.
    pub fn click(x: u16, y: u16) -> Self {
        Self::PointerDown {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    /// Convert a raw crossterm event, dropping anything the UI does not react to.
    pub fn from_crossterm(event: CtEvent) -> Option<Self> {
        match event {
            CtEvent::Key(key) => convert_key_event(key),
            CtEvent::Mouse(mouse) => convert_mouse_event(mouse),
            CtEvent::Resize(width, height) => Some(Event::Resize { width, height }),
            _ => None,
        }
    }

    /// Screen position for pointer events.
    pub fn position(&self) -> Option<(u16, u16)> {
        match *self {
            Event::PointerDown { x, y, .. }
            | Event::PointerMove { x, y }
            | Event::Scroll { x, y, .. } => Some((x, y)),
            Event::Key { .. } | Event::Resize { .. } => None,
        }
    }
}

fn convert_key_event(event: KeyEvent) -> Option<Event> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let key = convert_key_code(event.code)?;
    Some(Event::Key {
        key,
        modifiers: event.modifiers.into(),
    })
}

fn convert_key_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        other => {
            log::trace!("ignoring unsupported key {:?}", other);
            return None;
        }
    };
    Some(key)
}

fn convert_mouse_event(event: MouseEvent) -> Option<Event> {
    let (x, y) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Down(button) => Some(Event::PointerDown {
            x,
            y,
            button: button.into(),
        }),
        MouseEventKind::Moved => Some(Event::PointerMove { x, y }),
        MouseEventKind::ScrollUp => Some(Event::Scroll { x, y, delta_y: -1 }),
        MouseEventKind::ScrollDown => Some(Event::Scroll { x, y, delta_y: 1 }),
        _ => None,
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<CtButton> for MouseButton {
    fn from(btn: CtButton) -> Self {
        match btn {
            CtButton::Left => MouseButton::Left,
            CtButton::Right => MouseButton::Right,
            CtButton::Middle => MouseButton::Middle,
        }
    }
}
