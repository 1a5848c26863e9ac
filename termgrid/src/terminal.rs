//! Crossterm backend with diff-based flushing and panic-safe teardown.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::buffer::{Buffer, Cell};
use crate::style::{Rgb, TextStyle};
use crate::text::char_width;

pub struct Terminal {
    stdout: Stdout,
    previous: Buffer,
    /// Set after a resize so the next draw repaints every cell.
    full_redraw: bool,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        // Restore the terminal before the default hook prints the panic.
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        let (width, height) = terminal::size()?;
        log::debug!("terminal initialised at {}x{}", width, height);

        Ok(Self {
            stdout,
            previous: Buffer::new(width, height),
            full_redraw: true,
        })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Write `frame` to the screen, sending only cells that changed since the last draw.
    pub fn draw(&mut self, frame: &Buffer) -> io::Result<()> {
        if frame.width() != self.previous.width() || frame.height() != self.previous.height() {
            self.previous = Buffer::new(frame.width(), frame.height());
            self.full_redraw = true;
        }

        if self.full_redraw {
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
            // Force every cell to differ from `previous`.
            self.previous = Buffer::filled(frame.width(), frame.height(), Cell::new('\0'));
            self.full_redraw = false;
        }

        let mut pen = Pen::reset();
        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        let mut next_x = u16::MAX;
        let mut last_y = u16::MAX;

        for (x, y, cell) in frame.diff(&self.previous) {
            if cell.wide_continuation {
                continue;
            }
            if y != last_y || x != next_x {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }
            pen.apply(&mut self.stdout, cell)?;
            write!(self.stdout, "{}", cell.char)?;

            last_y = y;
            next_x = x.saturating_add(char_width(cell.char).max(1) as u16);
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        self.previous = frame.clone();
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> io::Result<()> {
    terminal::disable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        DisableMouseCapture,
        cursor::Show,
        LeaveAlternateScreen
    )
}

/// Tracks the attributes last sent so unchanged ones are not re-emitted.
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    style: TextStyle,
}

impl Pen {
    fn reset() -> Self {
        Self {
            fg: None,
            bg: None,
            style: TextStyle::new(),
        }
    }

    fn apply(&mut self, out: &mut Stdout, cell: &Cell) -> io::Result<()> {
        if cell.style != self.style {
            // Attribute toggles interact (bold/dim share NormalIntensity), so reset and re-apply.
            queue!(out, SetAttribute(Attribute::Reset))?;
            let s = cell.style;
            for (on, attr) in [
                (s.bold, Attribute::Bold),
                (s.dim, Attribute::Dim),
                (s.italic, Attribute::Italic),
                (s.underline, Attribute::Underlined),
                (s.reverse, Attribute::Reverse),
            ] {
                if on {
                    queue!(out, SetAttribute(attr))?;
                }
            }
            self.style = s;
            self.fg = None;
            self.bg = None;
        }
        if self.fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(to_ct(cell.fg)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(to_ct(cell.bg)))?;
            self.bg = Some(cell.bg);
        }
        Ok(())
    }
}

fn to_ct(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
