//! Placement of the floating menu relative to its trigger.
//!
//! The menu is drawn in the compositor's overlay layer, so every coordinate
//! here is an absolute screen cell rather than an offset inside the form.

use termgrid::Rect;

/// Which side of the trigger the menu opens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenDirection {
    /// Above the trigger.
    Top,
    /// Below the trigger.
    #[default]
    Bottom,
}

/// Screen placement of an open menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuPosition {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub direction: OpenDirection,
}

impl MenuPosition {
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }
}

/// Place a menu of `content_rows` rows next to `trigger`.
///
/// The menu opens upward when fewer than `threshold` rows remain below the
/// trigger, downward otherwise. A trigger on the top row has nothing above
/// it, so it always opens downward. Its height is capped by `threshold` and by
/// the space on the chosen side; its left edge is pulled back so it stays on
/// screen.
pub fn compute_menu_position(
    trigger: Rect,
    viewport: Rect,
    content_rows: u16,
    threshold: u16,
) -> MenuPosition {
    let below = trigger.space_below(viewport);
    let above = trigger.space_above(viewport);

    let direction = if below < threshold && above > 0 {
        OpenDirection::Top
    } else {
        OpenDirection::Bottom
    };

    let wanted = content_rows.min(threshold);
    let (top, height) = match direction {
        OpenDirection::Bottom => (trigger.bottom(), wanted.min(below)),
        OpenDirection::Top => {
            let height = wanted.min(above);
            (trigger.y - height, height)
        }
    };

    let width = trigger.width.min(viewport.width);
    let max_left = viewport.right().saturating_sub(width);
    let left = trigger.x.clamp(viewport.x, max_left.max(viewport.x));

    log::trace!(
        "menu position: below={} above={} threshold={} -> {:?} top={} height={}",
        below,
        above,
        threshold,
        direction,
        top,
        height
    );

    MenuPosition {
        left,
        top,
        width,
        height,
        direction,
    }
}
