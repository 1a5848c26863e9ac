//! Colours used when drawing a combobox.

use termgrid::{Paint, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboboxTheme {
    pub surface: Rgb,
    pub surface_focused: Rgb,
    pub text: Rgb,
    pub placeholder: Rgb,
    pub disabled: Rgb,
    pub error: Rgb,
    pub menu_surface: Rgb,
    pub highlight: Rgb,
    pub highlight_text: Rgb,
    pub accent: Rgb,
}

impl Default for ComboboxTheme {
    fn default() -> Self {
        Self {
            surface: Rgb::new(36, 32, 48),
            surface_focused: Rgb::new(52, 44, 72),
            text: Rgb::new(230, 228, 240),
            placeholder: Rgb::new(130, 124, 150),
            disabled: Rgb::new(90, 86, 100),
            error: Rgb::new(235, 95, 95),
            menu_surface: Rgb::new(44, 40, 60),
            highlight: Rgb::new(124, 92, 214),
            highlight_text: Rgb::new(255, 255, 255),
            accent: Rgb::new(170, 140, 255),
        }
    }
}

impl ComboboxTheme {
    pub(crate) fn trigger(&self, focused: bool, disabled: bool) -> Paint {
        let bg = if focused && !disabled {
            self.surface_focused
        } else {
            self.surface
        };
        let fg = if disabled { self.disabled } else { self.text };
        Paint::new(fg, bg)
    }

    pub(crate) fn menu(&self) -> Paint {
        Paint::new(self.text, self.menu_surface)
    }

    pub(crate) fn focused_row(&self) -> Paint {
        Paint::new(self.highlight_text, self.highlight)
    }
}
