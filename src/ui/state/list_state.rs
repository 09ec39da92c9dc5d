use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use log::{debug, warn};

use crate::config::ListConfig;
use crate::domain::entities::device::DeviceClass;
use crate::domain::entities::mode::FetchMode;
use crate::domain::entities::page::{QueryParams, RenderPayload};
use crate::usecase::ports::fetcher::FetchError;
use crate::usecase::ports::source::{ListError, ListSource, ServerPage};
use crate::usecase::services::callbacks::ListCallbacks;
use crate::usecase::services::executor::FetchTicket;
use crate::usecase::services::list_controller::ListController;

/// Copyable handle to a list controller living in a signal.
///
/// Reads subscribe the calling component. Transitions write the controller and
/// spawn the resulting fetch on the current scope. Callbacks fire while the
/// controller is borrowed, so they must not call back into the handle.
pub struct ListHandle<T: 'static> {
    controller: Signal<ListController<T>>,
}

impl<T: 'static> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for ListHandle<T> {}

impl<T: 'static> PartialEq for ListHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.controller == other.controller
    }
}

impl<T: Clone + PartialEq + 'static> ListHandle<T> {
    pub fn payload(&self) -> RenderPayload<T> {
        self.controller.read().payload()
    }

    pub fn mode(&self) -> FetchMode {
        self.controller.read().mode()
    }

    pub fn total_pages(&self) -> u32 {
        self.controller.read().total_pages()
    }

    pub fn last_error(&self) -> Option<FetchError> {
        self.controller.read().last_error().cloned()
    }

    pub fn config(&self) -> ListConfig {
        self.controller.read().config().clone()
    }

    pub fn start(mut self) {
        let ticket = self.controller.write().start();
        self.dispatch(ticket);
    }

    pub fn change_page(mut self, page: u32) {
        let result = self.controller.write().change_page(page);
        match result {
            Ok(ticket) => self.dispatch(ticket),
            Err(err) => warn!("{err}"),
        }
    }

    pub fn change_page_size(mut self, page_size: u32) {
        let result = self.controller.write().change_page_size(page_size);
        match result {
            Ok(ticket) => self.dispatch(ticket),
            Err(err) => warn!("{err}"),
        }
    }

    pub fn set_filters(mut self, filters: QueryParams) {
        let ticket = self.controller.write().set_filters(filters);
        self.dispatch(ticket);
    }

    pub fn request_next_page(mut self) {
        let ticket = self.controller.write().request_next_page();
        self.dispatch(ticket);
    }

    pub fn on_sentinel_visible(mut self, intersecting: bool) {
        if !intersecting {
            return;
        }
        let ticket = self.controller.write().on_sentinel_visible(intersecting);
        self.dispatch(ticket);
    }

    pub fn set_device(mut self, device: DeviceClass) {
        if self.controller.peek().device() == device {
            return;
        }
        let ticket = self.controller.write().set_device(device);
        self.dispatch(ticket);
    }

    pub fn replace_server_page(mut self, page: ServerPage<T>) {
        self.controller.write().replace_server_page(page);
    }

    pub fn set_callbacks(mut self, callbacks: ListCallbacks<T>) {
        self.controller.write().set_callbacks(callbacks);
    }

    fn dispatch(self, ticket: Option<FetchTicket>) {
        let Some(ticket) = ticket else {
            return;
        };
        let Some(future) = self.controller.peek().fetch_future(&ticket) else {
            warn!("no fetcher for page {}", ticket.page_num());
            return;
        };

        let mut controller = self.controller;
        spawn(async move {
            let result = future.await;
            let page_num = ticket.page_num();
            let settlement = controller.write().settle(ticket, result);
            debug!("page {page_num} settled: {settlement:?}");
        });
    }
}

/// Owns a [`ListController`] for the calling component.
///
/// Source and config are read once on mount. Later `callbacks`, `filters`
/// and `device` values are pushed into the controller when they change.
pub fn use_ecom_list<T: Clone + PartialEq + 'static>(
    source: ListSource<T>,
    config: ListConfig,
    callbacks: ListCallbacks<T>,
    filters: QueryParams,
    device: DeviceClass,
) -> Result<ListHandle<T>, ListError> {
    let initial_callbacks = callbacks.clone();
    let handle = use_hook(move || {
        ListController::new(source, config, device).map(|controller| ListHandle {
            controller: Signal::new(controller.with_callbacks(initial_callbacks)),
        })
    });

    let started = handle.clone();
    use_effect(move || {
        if let Ok(handle) = started.clone() {
            handle.start();
        }
    });

    let for_callbacks = handle.clone();
    use_effect(use_reactive(&callbacks, move |callbacks| {
        if let Ok(handle) = for_callbacks.clone() {
            handle.set_callbacks(callbacks);
        }
    }));

    let last_filters = use_hook(|| Rc::new(RefCell::new(filters.clone())));
    let for_filters = handle.clone();
    use_effect(use_reactive(&filters, move |filters| {
        if *last_filters.borrow() == filters {
            return;
        }
        *last_filters.borrow_mut() = filters.clone();
        if let Ok(handle) = for_filters.clone() {
            handle.set_filters(filters);
        }
    }));

    let for_device = handle.clone();
    use_effect(use_reactive(&device, move |device| {
        if let Ok(handle) = for_device.clone() {
            handle.set_device(device);
        }
    }));

    handle
}
