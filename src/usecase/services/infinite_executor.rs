use log::{debug, warn};

use crate::domain::entities::page::{PageResponse, QueryParams, DEFAULT_PAGE_SIZE};
use crate::usecase::ports::fetcher::FetchError;
use crate::usecase::services::executor::{
    ExecState, FetchKind, FetchTicket, InFlight, Settlement,
};

/// Fetch-and-append executor: pages accumulate in fetch order until reset.
#[derive(Debug, Clone)]
pub struct InfiniteExecutor<T> {
    in_flight: InFlight,
    pages: Vec<PageResponse<T>>,
    has_next: bool,
    last_error: Option<FetchError>,
}

impl<T> Default for InfiniteExecutor<T> {
    fn default() -> Self {
        Self {
            in_flight: InFlight::default(),
            pages: Vec::new(),
            has_next: true,
            last_error: None,
        }
    }
}

impl<T: Clone> InfiniteExecutor<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ExecState {
        self.in_flight.state()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn next_page_num(&self) -> u32 {
        self.pages.last().map(|page| page.page_num + 1).unwrap_or(1)
    }

    /// `None` while a page is in flight or once the last page has been seen.
    pub fn request_next(&mut self, base: &QueryParams, page_size: u32) -> Option<FetchTicket> {
        if self.in_flight.is_busy() || !self.has_next {
            return None;
        }
        let page_num = self.next_page_num();
        let generation = self.in_flight.issue();
        self.last_error = None;
        debug!("infinite fetch #{generation} for page {page_num}");
        Some(FetchTicket {
            generation,
            kind: FetchKind::Append,
            params: base.clone().with_page(page_num).with_page_size(page_size),
        })
    }

    pub fn settle(
        &mut self,
        ticket: &FetchTicket,
        result: Result<PageResponse<T>, FetchError>,
    ) -> Settlement {
        if ticket.kind != FetchKind::Append || !self.in_flight.accept(ticket.generation) {
            warn!(
                "discarding superseded append fetch #{} for page {}",
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
                let page_size = if page.page_size > 0 {
                    page.page_size
                } else {
                    ticket.params.page_size().unwrap_or(DEFAULT_PAGE_SIZE)
                };
                self.has_next = page.total > u64::from(page.page_num) * u64::from(page_size);
                self.pages.push(page);
                Settlement::Applied
            }
            Err(err) => {
                self.last_error = Some(err.clone());
                Settlement::Failed(err)
            }
        }
    }

    /// Back to an empty sequence; anything in flight becomes stale.
    pub fn reset(&mut self) {
        self.in_flight.invalidate();
        self.pages.clear();
        self.has_next = true;
        self.last_error = None;
    }

    pub fn list(&self) -> Vec<T> {
        self.pages
            .iter()
            .flat_map(|page| page.list.iter().cloned())
            .collect()
    }

    pub fn total(&self) -> u64 {
        self.pages.last().map(|page| page.total).unwrap_or(0)
    }

    pub fn page_num(&self) -> Option<u32> {
        self.pages.last().map(|page| page.page_num)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn last_page(&self) -> Option<&PageResponse<T>> {
        self.pages.last()
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }
}
