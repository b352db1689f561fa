//! "Load more" windowing over a filtered list

/// Page size of the test list
pub const TEST_PAGE_SIZE: usize = 12;
/// Page size of the verb and glossary tables
pub const TABLE_PAGE_SIZE: usize = 15;

/// Number of visible items, grown one page at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    visible: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            visible: page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Back to the first page
    pub fn reset(&mut self) {
        self.visible = self.page_size;
    }

    /// Show one more page, never past `total` (but never below one page)
    pub fn load_more(&mut self, total: usize) {
        self.visible = self.visible.saturating_add(self.page_size).min(total.max(self.page_size));
    }

    /// How many of `total` items are shown
    pub fn shown(&self, total: usize) -> usize {
        self.visible.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        total > self.visible
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.shown(items.len())]
    }

    /// "Showing X of Y"
    pub fn status(&self, total: usize) -> String {
        format!("Showing {} of {}", self.shown(total), total)
    }
}
