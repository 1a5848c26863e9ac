use super::Cell;
use crate::geometry::Rect;
use crate::style::Paint;
use crate::text::char_width;

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, Cell::default())
    }

    pub fn filled(width: u16, height: u16, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Paint every cell inside `rect` (clipped to the buffer) with a blank of `paint`.
    pub fn fill(&mut self, rect: Rect, paint: Paint) {
        let rect = rect.intersect(self.area());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set(x, y, Cell::painted(' ', paint));
            }
        }
    }

    /// Write `text` starting at `(x, y)`, never past `max_width` columns.
    ///
    /// Double-width characters that would straddle the limit are dropped.
    /// Returns the number of columns written.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, max_width: u16, paint: Paint) -> u16 {
        let mut col = 0u16;
        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if col + w > max_width {
                break;
            }
            self.set(x.saturating_add(col), y, Cell::painted(ch, paint));
            if w == 2 {
                let mut cont = Cell::painted(' ', paint);
                cont.wide_continuation = true;
                self.set(x.saturating_add(col + 1), y, cont);
            }
            col += w;
        }
        col
    }

    /// Copy `other` onto this buffer with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, other: &Buffer, x: u16, y: u16) {
        for oy in 0..other.height {
            for ox in 0..other.width {
                if let Some(cell) = other.get(ox, oy) {
                    self.set(x.saturating_add(ox), y.saturating_add(oy), *cell);
                }
            }
        }
    }

    /// The visible characters of row `y`, skipping wide-character continuations.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    /// Cells that differ from `other`, yielded with their coordinates.
    ///
    /// Both buffers must have the same dimensions.
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        let width = self.width as usize;
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| ((i % width) as u16, (i / width) as u16, cell))
    }
}
