//! Generic scroll-aware selection list for result rows.

pub struct SelectList<T> {
    pub items: Vec<T>,
    pub selected: usize,
    pub scroll_offset: usize,
}

impl<T> SelectList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            scroll_offset: 0,
        }
    }

    /// Replace all items. Selection is clamped; a full replacement (new
    /// search) typically follows with `select_first`.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn select_up(&mut self, n: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + n).min(self.items.len().saturating_sub(1));
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    /// True when the cursor sits on the last item.
    pub fn at_end(&self) -> bool {
        !self.items.is_empty() && self.selected + 1 == self.items.len()
    }

    /// Returns (index, &item) pairs visible in `height` rows.
    /// Call ensure_visible first to update scroll_offset.
    pub fn visible_items(&self, height: usize) -> Vec<(usize, &T)> {
        if height == 0 || self.items.is_empty() {
            return Vec::new();
        }
        let end = (self.scroll_offset + height).min(self.items.len());
        self.items[self.scroll_offset..end]
            .iter()
            .enumerate()
            .map(|(i, item)| (self.scroll_offset + i, item))
            .collect()
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected.saturating_sub(height - 1);
        }
    }

    /// Handle a click at `row` within the rendered area.
    /// Returns true if selection changed.
    pub fn handle_click(&mut self, row: usize) -> bool {
        let target = self.scroll_offset + row;
        if target < self.items.len() {
            self.selected = target;
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for SelectList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_clamps_to_bounds() {
        let mut list: SelectList<u32> = SelectList::new();
        list.set_items(vec![1, 2, 3]);
        list.select_down(10);
        assert_eq!(list.selected, 2);
        list.select_up(10);
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_replacement_clamps_selection() {
        let mut list: SelectList<u32> = SelectList::new();
        list.set_items(vec![1, 2, 3, 4, 5]);
        list.select_last();
        list.set_items(vec![1, 2]);
        assert_eq!(list.selected, 1);
    }

    #[test]
    fn test_ensure_visible_scrolls_window() {
        let mut list: SelectList<u32> = SelectList::new();
        list.set_items((0..20).collect());
        list.select_down(9);
        list.ensure_visible(5);
        assert_eq!(list.scroll_offset, 5);
        let visible: Vec<usize> = list.visible_items(5).iter().map(|(i, _)| *i).collect();
        assert_eq!(visible, [5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_at_end() {
        let mut list: SelectList<u32> = SelectList::new();
        assert!(!list.at_end());
        list.set_items(vec![1, 2]);
        assert!(!list.at_end());
        list.select_last();
        assert!(list.at_end());
    }
}
