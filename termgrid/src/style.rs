#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            dim: false,
            italic: false,
            underline: false,
            reverse: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub const fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// Foreground, background and text attributes applied together when painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            style: TextStyle::new(),
        }
    }
}

impl Paint {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            style: TextStyle::new(),
        }
    }

    pub const fn fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    pub const fn bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    pub const fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub const fn bold(mut self) -> Self {
        self.style = self.style.bold();
        self
    }

    pub const fn dim(mut self) -> Self {
        self.style = self.style.dim();
        self
    }
}
