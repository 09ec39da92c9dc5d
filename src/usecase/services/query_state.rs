use crate::domain::entities::page::{page_count, QueryParams, DEFAULT_PAGE_NUM, PAGE_NUM_KEY};

/// Current query snapshot of one list.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    params: QueryParams,
}

impl QueryState {
    pub fn new(initial: QueryParams, default_page_size: u32) -> Self {
        let page_num = initial
            .page_num()
            .filter(|page| *page > 0)
            .unwrap_or(DEFAULT_PAGE_NUM);
        let page_size = initial.page_size().unwrap_or(default_page_size);
        Self {
            params: initial.with_page(page_num).with_page_size(page_size),
        }
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn snapshot(&self) -> QueryParams {
        self.params.clone()
    }

    /// Snapshot rewound to the first page.
    pub fn base_params(&self) -> QueryParams {
        self.params.clone().with_page(DEFAULT_PAGE_NUM)
    }

    pub fn page_num(&self) -> u32 {
        self.params.page_num().unwrap_or(DEFAULT_PAGE_NUM)
    }

    pub fn page_size(&self) -> u32 {
        // set in `new` and only replaced by non-zero sizes
        self.params.page_size().unwrap_or(1)
    }

    pub fn clamp_page(&self, requested: u32, total: u64) -> u32 {
        let last = page_count(total, self.page_size()).max(1);
        requested.clamp(1, last)
    }

    /// Returns the new page, or `None` when the clamped page is the current one.
    pub fn change_page(&mut self, requested: u32, total: u64) -> Option<u32> {
        let page = self.clamp_page(requested, total);
        if page == self.page_num() {
            return None;
        }
        self.params.insert(PAGE_NUM_KEY, page);
        Some(page)
    }

    /// Sets the size and rewinds to page 1. Returns false when nothing changed.
    pub fn change_page_size(&mut self, page_size: u32) -> bool {
        if page_size == 0 {
            return false;
        }
        if page_size == self.page_size() && self.page_num() == DEFAULT_PAGE_NUM {
            return false;
        }
        self.params = self
            .params
            .clone()
            .with_page_size(page_size)
            .with_page(DEFAULT_PAGE_NUM);
        true
    }

    /// Replaces every non-paging key and rewinds to page 1.
    pub fn set_filters(&mut self, filters: &QueryParams) -> bool {
        let next = filters.filters();
        if next == self.params.filters() {
            return false;
        }
        self.params = next
            .with_page(DEFAULT_PAGE_NUM)
            .with_page_size(self.page_size());
        true
    }

    pub fn reset_page(&mut self) {
        self.params.insert(PAGE_NUM_KEY, DEFAULT_PAGE_NUM);
    }
}
