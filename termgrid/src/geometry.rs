//! Screen-space rectangles in terminal cells.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if two rectangles overlap. Touching edges do not count.
    pub fn overlaps(&self, other: Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Compute the intersection of two rectangles.
    ///
    /// Returns a zero-sized rect at the origin if they don't overlap.
    pub fn intersect(&self, other: Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right > x && bottom > y {
            Rect::new(x, y, right - x, bottom - y)
        } else {
            Rect::default()
        }
    }

    /// Rows available between the bottom edge of `self` and the bottom of `viewport`.
    pub fn space_below(&self, viewport: Rect) -> u16 {
        viewport.bottom().saturating_sub(self.bottom())
    }

    /// Rows available between the top of `viewport` and the top edge of `self`.
    pub fn space_above(&self, viewport: Rect) -> u16 {
        self.y.saturating_sub(viewport.y)
    }

    /// The single-row strip at `offset` rows from the top.
    pub fn row(&self, offset: u16) -> Rect {
        Rect::new(self.x, self.y.saturating_add(offset), self.width, 1)
    }
}
