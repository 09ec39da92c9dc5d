use dioxus::prelude::*;

use crate::domain::entities::page::{QueryParams, KEYWORD_KEY};

/// Signals behind the demo account screen.
#[derive(Clone, Copy)]
pub struct AppState {
    pub keyword_input: Signal<String>,
    pub filters: Signal<QueryParams>,
    /// `(rendered, total)` as last reported by the list.
    pub shown: Signal<(usize, u64)>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            keyword_input: use_signal(String::new),
            filters: use_signal(QueryParams::new),
            shown: use_signal(|| (0_usize, 0_u64)),
            status: use_signal(|| "就绪".to_string()),
        }
    }

    /// Applies the typed keyword as the list filter.
    pub fn apply_keyword(&mut self) {
        let keyword = self.keyword_input.peek().trim().to_string();
        let filters = if keyword.is_empty() {
            QueryParams::new()
        } else {
            QueryParams::new().with(KEYWORD_KEY, keyword)
        };
        self.filters.set(filters);
    }
}
