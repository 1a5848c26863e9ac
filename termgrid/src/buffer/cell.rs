use crate::style::{Paint, Rgb, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    /// Right half of a double-width character drawn in the previous cell.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self::painted(' ', Paint::default())
    }
}

impl Cell {
    pub fn new(char: char) -> Self {
        Self {
            char,
            ..Default::default()
        }
    }

    pub const fn painted(char: char, paint: Paint) -> Self {
        Self {
            char,
            fg: paint.fg,
            bg: paint.bg,
            style: paint.style,
            wide_continuation: false,
        }
    }

    pub fn paint(&self) -> Paint {
        Paint {
            fg: self.fg,
            bg: self.bg,
            style: self.style,
        }
    }
}
