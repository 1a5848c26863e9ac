//! Rendering for the Combobox widget.

use termgrid::text::truncate_to_width;
use termgrid::{Buffer, Compositor, Paint, Rect};

use crate::theme::ComboboxTheme;

use super::state::Combobox;

/// Z index of the open menu; above anything the form draws.
pub const MENU_Z: i32 = 100;

const SEARCH_PLACEHOLDER: &str = "Search...";

impl Combobox {
    /// Draw the trigger (and error line) into the base layer and, when open,
    /// the menu into an overlay.
    pub fn render(&self, compositor: &mut Compositor, focused: bool, theme: &ComboboxTheme) {
        self.render_trigger(compositor.base_mut(), focused, theme);
        if let Some(message) = self.error() {
            let row = self.trigger.row(1);
            compositor.base_mut().put_str(
                row.x,
                row.y,
                &truncate_to_width(message, row.width as usize),
                row.width,
                Paint::default().fg(theme.error),
            );
        }
        if self.is_open() {
            self.render_menu(compositor, theme);
        }
    }

    fn render_trigger(&self, buf: &mut Buffer, focused: bool, theme: &ComboboxTheme) {
        let area = self.trigger;
        if area.is_empty() {
            return;
        }
        let paint = theme.trigger(focused, self.is_disabled());
        buf.fill(area, paint);

        // Text gets everything left of the gutter, with one column of padding.
        let text_width = area.width.saturating_sub(5);
        match self.display_label() {
            Some(label) => {
                buf.put_str(
                    area.x + 1,
                    area.y,
                    &truncate_to_width(&label, text_width as usize),
                    text_width,
                    paint,
                );
            }
            None => {
                let placeholder = &self.config.placeholder;
                buf.put_str(
                    area.x + 1,
                    area.y,
                    &truncate_to_width(placeholder, text_width as usize),
                    text_width,
                    paint.fg(theme.placeholder),
                );
            }
        }

        if let Some(clear) = self.clear_button_rect() {
            buf.put_str(clear.x, clear.y, "×", 1, paint.fg(theme.accent));
        }
        if area.width >= 2 {
            let arrow = if self.is_open() { "▴" } else { "▾" };
            buf.put_str(area.right() - 2, area.y, arrow, 1, paint);
        }
    }

    fn render_menu(&self, compositor: &mut Compositor, theme: &ComboboxTheme) {
        let (Some(menu), Some(layout)) = (self.menu.as_ref(), self.menu_layout()) else {
            return;
        };
        let origin = layout.rect;
        if origin.is_empty() {
            return;
        }
        let base = theme.menu();
        let buf = compositor.push_overlay(self.name(), origin, MENU_Z);
        buf.fill(buf.area(), base);

        // Overlay buffers are local: translate screen rows by the menu origin.
        let local = |r: Rect| Rect::new(r.x - origin.x, r.y - origin.y, r.width, r.height);

        if let Some(search) = layout.search.map(local) {
            buf.put_str(search.x, search.y, "⌕ ", 2, base.fg(theme.accent));
            let (text, paint) = if menu.search.is_empty() {
                (SEARCH_PLACEHOLDER, base.fg(theme.placeholder))
            } else {
                (menu.search.as_str(), base)
            };
            let width = search.width.saturating_sub(2);
            buf.put_str(
                search.x + 2,
                search.y,
                &truncate_to_width(text, width as usize),
                width,
                paint,
            );
        }

        let options = local(layout.options);
        if menu.filtered.is_empty() {
            if options.height > 0 {
                let notice = if self.options().is_empty() {
                    "No options"
                } else {
                    "No matches"
                };
                buf.put_str(options.x + 1, options.y, notice, options.width.saturating_sub(1), base.dim());
            }
        } else {
            let visible = menu
                .filtered
                .iter()
                .enumerate()
                .skip(menu.scroll)
                .take(options.height as usize);
            for (offset, (row, &index)) in visible.enumerate() {
                let y = options.y + offset as u16;
                let option = &self.options()[index];
                let selected = self.selection.contains(&option.value);
                let mut paint = if menu.focused == Some(row) {
                    theme.focused_row()
                } else {
                    base
                };
                if selected && !self.is_multiple() {
                    paint = paint.bold();
                }
                buf.fill(Rect::new(options.x, y, options.width, 1), paint);

                let marker = match (self.is_multiple(), selected) {
                    (true, true) => "[x] ",
                    (true, false) => "[ ] ",
                    (false, true) => "✓ ",
                    (false, false) => "  ",
                };
                let written = buf.put_str(options.x + 1, y, marker, options.width.saturating_sub(1), paint);
                let width = options.width.saturating_sub(1 + written);
                buf.put_str(
                    options.x + 1 + written,
                    y,
                    &truncate_to_width(&option.label, width as usize),
                    width,
                    paint,
                );
            }
        }

        if let Some(footer) = layout.footer {
            if let Some(add) = footer.add_new.map(local) {
                buf.put_str(add.x + 1, add.y, "+ Add new", add.width.saturating_sub(1), base.fg(theme.accent));
            }
            if let Some(refresh) = footer.refresh.map(local) {
                buf.put_str(
                    refresh.x + 1,
                    refresh.y,
                    "↻ Refresh",
                    refresh.width.saturating_sub(1),
                    base.fg(theme.accent),
                );
            }
        }
    }
}
