use std::ops::Range;

/// Cell-space geometry of the thumbnail grid for one frame.
///
/// Everything here is derived from the item count, the column count and the
/// terminal size; nothing is stored across frames except the scroll offset,
/// which callers thread through [`GridLayout::scroll_into_view`].
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    cols: usize,
    total_rows: usize,
    visible_rows: usize,
    row_height: usize,
    col_width: usize,
    term_rows: usize,
}

impl GridLayout {
    pub fn new(total: usize, cols: usize, term: (u16, u16)) -> Self {
        let term_rows = term.1 as usize;
        let row_height = (crate::THUMB_CELL_ROWS + crate::SPACING_ROWS).max(1) as usize;
        let col_width = (crate::THUMB_CELL_COLS + crate::SPACING_COLS) as usize;
        let cols = cols.max(1);
        let total_rows = total.div_ceil(cols);
        let visible_rows = (term_rows / row_height).max(1);
        Self {
            cols,
            total_rows,
            visible_rows,
            row_height,
            col_width,
            term_rows,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn row_of(&self, idx: usize) -> usize {
        idx / self.cols
    }

    pub fn col_of(&self, idx: usize) -> usize {
        idx % self.cols
    }

    pub fn max_scroll(&self) -> usize {
        self.total_rows.saturating_sub(self.visible_rows)
    }

    /// Clamps a scroll offset into `[0, max_scroll]`. Re-run every frame;
    /// an offset clamped against a previous terminal size is not trusted.
    pub fn clamp_scroll(&self, scroll: usize) -> usize {
        scroll.min(self.max_scroll())
    }

    /// Minimal-scroll adjustment: moves the offset just far enough to bring
    /// the selected item's row into the visible window, then clamps.
    pub fn scroll_into_view(&self, selected: usize, scroll: usize) -> usize {
        let sel_row = self.row_of(selected);
        let adjusted = if sel_row < scroll {
            sel_row
        } else if sel_row >= scroll + self.visible_rows {
            sel_row - self.visible_rows + 1
        } else {
            scroll
        };
        self.clamp_scroll(adjusted)
    }

    /// Grid rows intersecting the visible window at the given offset.
    pub fn visible_row_range(&self, scroll: usize) -> Range<usize> {
        let start = scroll.min(self.total_rows);
        let end = (scroll + self.visible_rows).min(self.total_rows);
        start..end
    }

    /// 1-based terminal position of the top-left cell of a grid slot.
    pub fn screen_position(&self, row: usize, col: usize, scroll: usize) -> (u16, u16) {
        let screen_row = (row - scroll) * self.row_height + 1;
        let screen_col = col * self.col_width + 1;
        (screen_row as u16, screen_col as u16)
    }

    /// Terminal row of the status line: the first line below the grid, or
    /// the last terminal row when the grid exactly fills the screen.
    pub fn status_row(&self) -> u16 {
        let below = self.visible_rows * self.row_height + 1;
        if below < self.term_rows {
            below as u16
        } else {
            self.term_rows.max(1) as u16
        }
    }
}
