//! Row layout inside an open menu, shared by rendering and hit testing.

use termgrid::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MenuLayout {
    pub rect: Rect,
    pub search: Option<Rect>,
    pub options: Rect,
    pub footer: Option<Footer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Footer {
    pub add_new: Option<Rect>,
    pub refresh: Option<Rect>,
}

/// Split `rect` into search row, option rows and action footer.
///
/// The search row comes first. The footer is only laid out when at least one
/// option row still fits above it.
pub(crate) fn menu_layout(rect: Rect, searchable: bool, add_new: bool, refresh: bool) -> MenuLayout {
    let mut y = rect.y;
    let mut remaining = rect.height;

    let search = (searchable && remaining > 0).then(|| {
        let row = Rect::new(rect.x, y, rect.width, 1);
        y += 1;
        remaining -= 1;
        row
    });

    let wants_footer = (add_new || refresh) && remaining >= 2;
    let option_rows = remaining - u16::from(wants_footer);
    let options = Rect::new(rect.x, y, rect.width, option_rows);

    let footer = wants_footer.then(|| {
        let fy = y + option_rows;
        match (add_new, refresh) {
            (true, true) => {
                let half = rect.width / 2;
                Footer {
                    add_new: Some(Rect::new(rect.x, fy, half, 1)),
                    refresh: Some(Rect::new(rect.x + half, fy, rect.width - half, 1)),
                }
            }
            (true, false) => Footer {
                add_new: Some(Rect::new(rect.x, fy, rect.width, 1)),
                refresh: None,
            },
            _ => Footer {
                add_new: None,
                refresh: Some(Rect::new(rect.x, fy, rect.width, 1)),
            },
        }
    });

    MenuLayout {
        rect,
        search,
        options,
        footer,
    }
}
