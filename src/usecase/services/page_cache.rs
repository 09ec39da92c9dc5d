use std::collections::BTreeMap;

/// Pages fetched so far, keyed by page number, for one page size.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCache<T> {
    page_size: u32,
    pages: BTreeMap<u32, Vec<T>>,
}

impl<T: Clone> PageCache<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            pages: BTreeMap::new(),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn insert(&mut self, page_num: u32, records: Vec<T>) {
        self.pages.insert(page_num, records);
    }

    pub fn contains(&self, page_num: u32) -> bool {
        self.pages.contains_key(&page_num)
    }

    pub fn get(&self, page_num: u32) -> Option<&[T]> {
        self.pages.get(&page_num).map(Vec::as_slice)
    }

    /// Drops everything and switches to `page_size`.
    pub fn reset(&mut self, page_size: u32) {
        self.page_size = page_size;
        self.pages.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All cached records in page order. Missing pages leave no gap.
    pub fn flatten(&self) -> Vec<T> {
        self.pages.values().flatten().cloned().collect()
    }
}
