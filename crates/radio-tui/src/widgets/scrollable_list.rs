//! Generic scrollable + filterable list widget.

pub struct ScrollableList<T> {
    pub items: Vec<T>,
    pub filtered_indices: Vec<usize>,
    pub selected: usize,
    pub scroll_offset: usize,
    pub filter: String,
    filter_fn: Box<dyn Fn(&T, &str) -> bool + Send + Sync>,
}

impl<T> ScrollableList<T> {
    pub fn new(filter_fn: impl Fn(&T, &str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            items: Vec::new(),
            filtered_indices: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            filter: String::new(),
            filter_fn: Box::new(filter_fn),
        }
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.rebuild_filter();
    }

    pub fn set_filter(&mut self, query: &str) {
        self.filter = query.to_string();
        let old_idx = self.filtered_indices.get(self.selected).copied();
        self.rebuild_filter();
        // Try to keep the same item selected after filter change
        self.selected = old_idx
            .and_then(|prev| self.filtered_indices.iter().position(|&i| i == prev))
            .unwrap_or(0);
        self.scroll_offset = 0;
    }

    fn rebuild_filter(&mut self) {
        if self.filter.is_empty() {
            self.filtered_indices = (0..self.items.len()).collect();
        } else {
            self.filtered_indices = self
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| (self.filter_fn)(item, &self.filter))
                .map(|(i, _)| i)
                .collect();
        }
        if self.selected >= self.filtered_indices.len() {
            self.selected = self.filtered_indices.len().saturating_sub(1);
        }
    }

    pub fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        if self.filtered_indices.is_empty() {
            return;
        }
        self.selected = (self.selected + n).min(self.filtered_indices.len() - 1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.filtered_indices.len().saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&T> {
        let idx = self.filtered_indices.get(self.selected)?;
        self.items.get(*idx)
    }

    /// Select the visible entry whose original index is `orig_idx`.
    pub fn set_selected_by_original(&mut self, orig_idx: usize) {
        if let Some(pos) = self.filtered_indices.iter().position(|&i| i == orig_idx) {
            self.selected = pos;
        }
    }

    /// Returns (original_index, &item) pairs visible in `height` rows.
    /// Call ensure_visible first to update scroll_offset.
    pub fn visible_items(&self, height: usize) -> Vec<(usize, &T)> {
        if height == 0 || self.filtered_indices.is_empty() {
            return Vec::new();
        }
        let end = (self.scroll_offset + height).min(self.filtered_indices.len());
        self.filtered_indices[self.scroll_offset..end]
            .iter()
            .map(|&i| (i, &self.items[i]))
            .collect()
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
    }

    /// Handle a click at `row` within the rendered area.
    /// Returns true if the row holds an entry.
    pub fn handle_click(&mut self, row: usize) -> bool {
        let target = self.scroll_offset + row;
        if target < self.filtered_indices.len() {
            self.selected = target;
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.filtered_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_indices.is_empty()
    }
}
