//! GridCursor — selection and scroll bookkeeping for a row-major card grid.
//!
//! Items are laid out left to right, then top to bottom, `columns` per row.
//! Scrolling is by whole rows.

use std::ops::Range;

#[derive(Debug, Clone)]
pub struct GridCursor {
    len: usize,
    columns: usize,
    selected: usize,
    scroll_row: usize,
}

impl GridCursor {
    pub fn new() -> Self {
        Self {
            len: 0,
            columns: 1,
            selected: 0,
            scroll_row: 0,
        }
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        let max_scroll = self.total_rows().saturating_sub(1);
        if self.scroll_row > max_scroll {
            self.scroll_row = max_scroll;
        }
    }

    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    pub fn selected(&self) -> Option<usize> {
        if self.len == 0 {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn select(&mut self, idx: usize) {
        if idx < self.len {
            self.selected = idx;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_row = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }

    pub fn select_left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_right(&mut self) {
        if self.len > 0 {
            self.selected = (self.selected + 1).min(self.len - 1);
        }
    }

    /// Move up `rows` rows, staying in the same column where possible.
    pub fn select_up(&mut self, rows: usize) {
        let step = rows * self.columns;
        if self.selected >= step {
            self.selected -= step;
        } else {
            self.selected %= self.columns;
        }
    }

    /// Move down `rows` rows. A short last row clamps to its final card.
    pub fn select_down(&mut self, rows: usize) {
        if self.len == 0 {
            return;
        }
        let target = self.selected + rows * self.columns;
        if target < self.len {
            self.selected = target;
        } else if self.row_of(self.len - 1) > self.row_of(self.selected) {
            self.selected = self.len - 1;
        }
    }

    pub fn total_rows(&self) -> usize {
        (self.len + self.columns - 1) / self.columns
    }

    fn row_of(&self, idx: usize) -> usize {
        idx / self.columns
    }

    /// Adjust the scroll offset so the selected card's row is on screen.
    pub fn ensure_visible(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        let row = self.row_of(self.selected);
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible_rows {
            self.scroll_row = row + 1 - visible_rows;
        }
    }

    /// Item indices drawn when `visible_rows` rows fit on screen.
    pub fn visible_range(&self, visible_rows: usize) -> Range<usize> {
        let start = (self.scroll_row * self.columns).min(self.len);
        let end = ((self.scroll_row + visible_rows) * self.columns).min(self.len);
        start..end
    }
}

impl Default for GridCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(len: usize, columns: usize) -> GridCursor {
        let mut g = GridCursor::new();
        g.set_columns(columns);
        g.set_len(len);
        g
    }

    #[test]
    fn test_empty_grid_has_no_selection() {
        let mut g = grid(0, 3);
        g.select_down(1);
        g.select_right();
        assert_eq!(g.selected(), None);
        assert_eq!(g.visible_range(4), 0..0);
    }

    #[test]
    fn test_vertical_moves_keep_column() {
        // 0 1 2
        // 3 4 5
        // 6 7
        let mut g = grid(8, 3);
        g.select(4);
        g.select_down(1);
        assert_eq!(g.selected(), Some(7));
        g.select_up(2);
        assert_eq!(g.selected(), Some(1));
        g.select_up(1);
        assert_eq!(g.selected(), Some(1));
    }

    #[test]
    fn test_down_into_short_row_clamps_to_last() {
        let mut g = grid(8, 3);
        g.select(5);
        g.select_down(1);
        assert_eq!(g.selected(), Some(7));
        g.select_down(1);
        assert_eq!(g.selected(), Some(7));
    }

    #[test]
    fn test_horizontal_moves_wrap_across_rows() {
        let mut g = grid(5, 2);
        g.select(1);
        g.select_right();
        assert_eq!(g.selected(), Some(2));
        g.select_last();
        g.select_right();
        assert_eq!(g.selected(), Some(4));
        g.select_first();
        g.select_left();
        assert_eq!(g.selected(), Some(0));
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut g = grid(20, 2); // 10 rows
        g.select(13); // row 6
        g.ensure_visible(3);
        assert_eq!(g.visible_range(3), 8..14);
        g.select(1);
        g.ensure_visible(3);
        assert_eq!(g.visible_range(3), 0..6);
    }

    #[test]
    fn test_shrinking_clamps_selection() {
        let mut g = grid(10, 3);
        g.select(9);
        g.set_len(4);
        assert_eq!(g.selected(), Some(3));
        assert_eq!(g.visible_range(2), 0..4);
    }
}
