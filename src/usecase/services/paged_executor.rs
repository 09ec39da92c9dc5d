use log::{debug, warn};

use crate::domain::entities::mode::PageLayout;
use crate::domain::entities::page::{PageResponse, QueryParams};
use crate::usecase::ports::fetcher::FetchError;
use crate::usecase::services::executor::{
    ExecState, FetchKind, FetchTicket, InFlight, Settlement,
};
use crate::usecase::services::page_cache::PageCache;

/// Fetch-and-replace executor for paged lists.
#[derive(Debug, Clone)]
pub struct PagedExecutor<T> {
    layout: PageLayout,
    in_flight: InFlight,
    visible: Vec<T>,
    cache: PageCache<T>,
    total: u64,
    page_num: u32,
    last_page: Option<PageResponse<T>>,
    last_error: Option<FetchError>,
}

impl<T: Clone> PagedExecutor<T> {
    pub fn new(layout: PageLayout, page_num: u32, page_size: u32) -> Self {
        Self {
            layout,
            in_flight: InFlight::default(),
            visible: Vec::new(),
            cache: PageCache::new(page_size),
            total: 0,
            page_num,
            last_page: None,
            last_error: None,
        }
    }

    pub fn layout(&self) -> PageLayout {
        self.layout
    }

    pub fn state(&self) -> ExecState {
        self.in_flight.state()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub fn begin(&mut self, params: QueryParams) -> FetchTicket {
        let generation = self.in_flight.issue();
        self.last_error = None;
        debug!("paged fetch #{generation} for page {:?}", params.page_num());
        FetchTicket {
            generation,
            kind: FetchKind::Replace,
            params,
        }
    }

    pub fn settle(
        &mut self,
        ticket: &FetchTicket,
        result: Result<PageResponse<T>, FetchError>,
    ) -> Settlement {
        if ticket.kind != FetchKind::Replace || !self.in_flight.accept(ticket.generation) {
            warn!(
                "discarding superseded paged fetch #{} for page {}",
                ticket.generation,
                ticket.page_num()
            );
            return Settlement::Stale;
        }

        match result {
            Ok(mut page) => {
                if page.page_num == 0 {
                    page.page_num = ticket.page_num();
                }
                match self.layout {
                    PageLayout::Replace => self.visible = page.list.clone(),
                    PageLayout::Positional => self.cache.insert(page.page_num, page.list.clone()),
                }
                self.total = page.total;
                self.page_num = page.page_num;
                self.last_page = Some(page);
                Settlement::Applied
            }
            Err(err) => {
                self.last_error = Some(err.clone());
                Settlement::Failed(err)
            }
        }
    }

    /// Positional layout only: shows an already fetched page without a round trip.
    pub fn select_cached(&mut self, page_num: u32) -> bool {
        if self.layout != PageLayout::Positional || !self.cache.contains(page_num) {
            return false;
        }
        self.in_flight.invalidate();
        self.page_num = page_num;
        true
    }

    /// Drops cached pages, e.g. after the page size or filters changed.
    pub fn reset_cache(&mut self, page_size: u32) {
        self.cache.reset(page_size);
    }

    /// Full reset, used when the layout itself changes.
    pub fn reset(&mut self, layout: PageLayout, page_num: u32, page_size: u32) {
        self.in_flight.invalidate();
        self.layout = layout;
        self.visible.clear();
        self.cache.reset(page_size);
        self.total = 0;
        self.page_num = page_num;
        self.last_page = None;
        self.last_error = None;
    }

    pub fn list(&self) -> Vec<T> {
        match self.layout {
            PageLayout::Replace => self.visible.clone(),
            PageLayout::Positional => self.cache.flatten(),
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page_num(&self) -> u32 {
        self.page_num
    }

    pub fn last_page(&self) -> Option<&PageResponse<T>> {
        self.last_page.as_ref()
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }
}
