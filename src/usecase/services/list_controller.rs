use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::config::ListConfig;
use crate::domain::entities::device::DeviceClass;
use crate::domain::entities::mode::{FetchMode, PageLayout, SourceKind};
use crate::domain::entities::page::{
    page_count, DataChange, PageResponse, QueryParams, RenderPayload,
};
use crate::usecase::ports::fetcher::{FetchError, FetchFuture, PageFetcher};
use crate::usecase::ports::source::{ListError, ListSource, ServerPage};
use crate::usecase::services::callbacks::ListCallbacks;
use crate::usecase::services::emitter::PayloadEmitter;
use crate::usecase::services::executor::{FetchKind, FetchTicket, Settlement};
use crate::usecase::services::infinite_executor::InfiniteExecutor;
use crate::usecase::services::mode_selector::select_mode;
use crate::usecase::services::paged_executor::PagedExecutor;
use crate::usecase::services::query_state::QueryState;
use crate::usecase::services::reconciler::{reconcile, ActiveState};
use crate::usecase::services::sentinel::SentinelTrigger;

/// State machine behind one list.
///
/// Transitions that need a round trip return a [`FetchTicket`]; the owner runs
/// the fetch (see [`ListController::fetch_future`] or [`drive`]) and hands the
/// result back to [`ListController::settle`].
pub struct ListController<T> {
    config: ListConfig,
    callbacks: ListCallbacks<T>,
    kind: SourceKind,
    device: DeviceClass,
    mode: FetchMode,
    query: QueryState,
    fetcher: Option<Rc<dyn PageFetcher<T>>>,
    server: Option<ServerPage<T>>,
    paged: PagedExecutor<T>,
    infinite: InfiniteExecutor<T>,
    emitter: PayloadEmitter<T>,
}

impl<T: Clone + PartialEq + 'static> ListController<T> {
    pub fn new(
        source: ListSource<T>,
        config: ListConfig,
        device: DeviceClass,
    ) -> Result<Self, ListError> {
        config.validate()?;
        let default_page_size = config.effective_page_size();
        let kind = source.kind();

        let (server, fetcher, initial) = match source {
            ListSource::Server(page) => {
                let mut initial = QueryParams::new();
                if let Some(page_num) = page.page_num {
                    initial = initial.with_page(page_num);
                }
                if let Some(page_size) = page.page_size {
                    initial = initial.with_page_size(page_size);
                }
                (Some(page), None, initial)
            }
            ListSource::Client(client) => {
                let initial = client.merged_params();
                (None, Some(client.fetcher), initial)
            }
        };

        let query = QueryState::new(initial, default_page_size);
        let mode = select_mode(kind, config.infinite_append_on_mobile, device);
        let layout = mode.layout().unwrap_or(PageLayout::Replace);
        info!("list starts in {mode} mode on {device:?}");

        Ok(Self {
            paged: PagedExecutor::new(layout, query.page_num(), query.page_size()),
            infinite: InfiniteExecutor::new(),
            emitter: PayloadEmitter::new(),
            callbacks: ListCallbacks::default(),
            config,
            kind,
            device,
            mode,
            query,
            fetcher,
            server,
        })
    }

    pub fn with_callbacks(mut self, callbacks: ListCallbacks<T>) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn set_callbacks(&mut self, callbacks: ListCallbacks<T>) {
        self.callbacks = callbacks;
    }

    pub fn mode(&self) -> FetchMode {
        self.mode
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn query(&self) -> &QueryParams {
        self.query.params()
    }

    /// Initial fetch for client lists. Server lists only emit their payload.
    pub fn start(&mut self) -> Option<FetchTicket> {
        let ticket = if self.config.enabled {
            match self.mode {
                FetchMode::ServerData => None,
                FetchMode::ClientPaged { .. } => Some(self.paged.begin(self.query.snapshot())),
                FetchMode::ClientInfinite => self.issue_next_page(),
            }
        } else {
            None
        };
        self.emit();
        ticket
    }

    pub fn change_page(&mut self, requested: u32) -> Result<Option<FetchTicket>, ListError> {
        if self.mode.is_infinite() {
            return Err(ListError::UnsupportedInMode {
                operation: "change_page",
                mode: self.mode,
            });
        }

        let total = self.payload().total;
        // after a failed paged fetch the query already holds the failed page,
        // so asking for it again retries
        let retry = matches!(self.mode, FetchMode::ClientPaged { .. })
            && self.paged.last_error().is_some();
        let page = match self.query.change_page(requested, total) {
            Some(page) => page,
            None if retry => self.query.page_num(),
            None => return Ok(None),
        };
        let page_size = self.query.page_size();
        self.callbacks.page_changed(page, page_size);

        let ticket = match self.mode {
            FetchMode::ClientPaged { layout } => {
                if layout == PageLayout::Positional && self.paged.select_cached(page) {
                    debug!("page {page} served from cache");
                    None
                } else {
                    self.begin_paged()
                }
            }
            _ => {
                self.callbacks.query_changed(self.query.params());
                None
            }
        };
        self.emit();
        Ok(ticket)
    }

    pub fn change_page_size(&mut self, page_size: u32) -> Result<Option<FetchTicket>, ListError> {
        if self.mode.is_infinite() {
            return Err(ListError::UnsupportedInMode {
                operation: "change_page_size",
                mode: self.mode,
            });
        }
        if page_size == 0 {
            return Err(ListError::InvalidPageSize(page_size));
        }
        if !self.query.change_page_size(page_size) {
            return Ok(None);
        }
        self.callbacks.page_size_changed(page_size);

        let ticket = match self.mode {
            FetchMode::ClientPaged { .. } => {
                self.paged.reset_cache(page_size);
                self.begin_paged()
            }
            _ => {
                self.callbacks.query_changed(self.query.params());
                None
            }
        };
        self.emit();
        Ok(ticket)
    }

    /// New filter values (e.g. a search keyword): back to page 1, accumulated
    /// pages and cached pages are dropped.
    pub fn set_filters(&mut self, filters: QueryParams) -> Option<FetchTicket> {
        if !self.query.set_filters(&filters) {
            return None;
        }
        debug!("filters changed: {:?}", self.query.params());

        let ticket = match self.mode {
            FetchMode::ServerData => {
                self.callbacks.query_changed(self.query.params());
                None
            }
            FetchMode::ClientPaged { .. } => {
                self.paged.reset_cache(self.query.page_size());
                self.begin_paged()
            }
            FetchMode::ClientInfinite => {
                self.infinite.reset();
                self.issue_next_page()
            }
        };
        self.emit();
        ticket
    }

    /// Infinite mode only; a no-op while a page is in flight or after the last page.
    pub fn request_next_page(&mut self) -> Option<FetchTicket> {
        if !self.mode.is_infinite() {
            return None;
        }
        let ticket = self.issue_next_page()?;
        self.callbacks
            .loading_more(ticket.page_num(), self.query.page_size());
        self.emit();
        Some(ticket)
    }

    pub fn on_sentinel_visible(&mut self, intersecting: bool) -> Option<FetchTicket> {
        let payload = self.payload();
        if !SentinelTrigger::should_fire(self.mode, payload.has_more, payload.loading, intersecting) {
            return None;
        }
        self.request_next_page()
    }

    /// A new viewport class. When it changes the mode, the list starts over.
    pub fn set_device(&mut self, device: DeviceClass) -> Option<FetchTicket> {
        self.device = device;
        let mode = select_mode(self.kind, self.config.infinite_append_on_mobile, device);
        if mode == self.mode {
            return None;
        }
        info!("list mode {} -> {mode} on {device:?}", self.mode);
        self.mode = mode;
        if self.kind == SourceKind::Client {
            self.query.reset_page();
        }
        self.paged.reset(
            mode.layout().unwrap_or(PageLayout::Replace),
            self.query.page_num(),
            self.query.page_size(),
        );
        self.infinite.reset();
        self.start()
    }

    /// Server lists: the parent fetched a new page after `on_query_change`.
    pub fn replace_server_page(&mut self, page: ServerPage<T>) {
        if self.kind != SourceKind::Server {
            warn!("ignoring server page for a client list");
            return;
        }
        self.server = Some(page);
        self.emit();
    }

    pub fn settle(
        &mut self,
        ticket: FetchTicket,
        result: Result<PageResponse<T>, FetchError>,
    ) -> Settlement {
        let settlement = match ticket.kind {
            FetchKind::Replace => self.paged.settle(&ticket, result),
            FetchKind::Append => self.infinite.settle(&ticket, result),
        };

        match &settlement {
            Settlement::Applied => {
                if let Some(page) = self.last_page() {
                    debug!(
                        "page {} applied: {} of {} records",
                        page.page_num,
                        page.list.len(),
                        page.total
                    );
                    self.callbacks.succeeded(page);
                }
            }
            Settlement::Failed(err) => {
                warn!("fetch for page {} failed: {err}", ticket.page_num());
                self.callbacks.failed(err);
            }
            Settlement::Stale => {}
        }
        self.emit();
        settlement
    }

    pub fn fetch_future(&self, ticket: &FetchTicket) -> Option<FetchFuture<T>> {
        self.fetcher
            .as_ref()
            .map(|fetcher| fetcher.fetch(ticket.params.clone()))
    }

    pub fn payload(&self) -> RenderPayload<T> {
        let page_size = self.query.page_size();
        let force = self.config.force_has_more;
        let query_page = self.query.page_num();
        match (self.mode, &self.server) {
            (FetchMode::ServerData, Some(page)) => {
                reconcile(ActiveState::Server { page, query_page }, page_size, force)
            }
            (FetchMode::ServerData, None) => RenderPayload::empty(page_size),
            (FetchMode::ClientPaged { .. }, _) => {
                reconcile(ActiveState::Paged(&self.paged), page_size, force)
            }
            (FetchMode::ClientInfinite, _) => reconcile(
                ActiveState::Infinite {
                    exec: &self.infinite,
                    query_page,
                },
                page_size,
                force,
            ),
        }
    }

    /// Last page the visible payload was derived from.
    pub fn raw(&self) -> Option<PageResponse<T>> {
        match self.mode {
            FetchMode::ServerData => self.server.as_ref().map(|page| {
                let page_size = page.page_size.unwrap_or(self.query.page_size());
                PageResponse::new(
                    page.data.clone(),
                    page.total,
                    page.page_num.unwrap_or(self.query.page_num()),
                    page_size,
                )
            }),
            _ => self.last_page().cloned(),
        }
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        match self.mode {
            FetchMode::ServerData => None,
            FetchMode::ClientPaged { .. } => self.paged.last_error(),
            FetchMode::ClientInfinite => self.infinite.last_error(),
        }
    }

    pub fn total_pages(&self) -> u32 {
        page_count(self.payload().total, self.query.page_size()).max(1)
    }

    pub fn is_loading(&self) -> bool {
        match self.mode {
            FetchMode::ServerData => false,
            FetchMode::ClientPaged { .. } => self.paged.is_loading(),
            FetchMode::ClientInfinite => self.infinite.is_loading(),
        }
    }

    fn last_page(&self) -> Option<&PageResponse<T>> {
        match self.mode {
            FetchMode::ServerData => None,
            FetchMode::ClientPaged { .. } => self.paged.last_page(),
            FetchMode::ClientInfinite => self.infinite.last_page(),
        }
    }

    fn begin_paged(&mut self) -> Option<FetchTicket> {
        if !self.config.enabled {
            return None;
        }
        Some(self.paged.begin(self.query.snapshot()))
    }

    fn issue_next_page(&mut self) -> Option<FetchTicket> {
        if !self.config.enabled {
            return None;
        }
        self.infinite
            .request_next(&self.query.base_params(), self.query.page_size())
    }

    fn emit(&mut self) -> bool {
        let payload = self.payload();
        let changed = self.emitter.observe(&payload);
        if changed.is_empty() {
            return false;
        }
        debug!("payload changed: {}", changed.join(", "));
        if self.callbacks.wants_data_changes() {
            let change = DataChange {
                payload,
                raw: self.raw(),
            };
            self.callbacks.data_changed(&change);
        }
        true
    }
}

/// Runs one ticket to completion against the controller's fetcher.
pub async fn drive<T: Clone + PartialEq + 'static>(
    controller: &RefCell<ListController<T>>,
    ticket: Option<FetchTicket>,
) -> Option<Settlement> {
    let ticket = ticket?;
    let future = controller.borrow().fetch_future(&ticket)?;
    let result = future.await;
    Some(controller.borrow_mut().settle(ticket, result))
}
