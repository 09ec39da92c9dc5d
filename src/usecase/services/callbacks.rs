use std::rc::Rc;

use crate::domain::entities::page::{DataChange, PageResponse, QueryParams};
use crate::usecase::ports::fetcher::FetchError;

type Hook<A> = Option<Rc<dyn Fn(A)>>;
type RefHook<A> = Option<Rc<dyn Fn(&A)>>;

/// Notifications a list sends to its parent. Every hook is optional; an unset
/// hook is a no-op.
pub struct ListCallbacks<T> {
    /// `(page, page_size)` after a page change.
    pub on_page_change: Hook<(u32, u32)>,
    pub on_page_size_change: Hook<u32>,
    /// Fired only when a tracked payload field changed.
    pub on_data_change: RefHook<DataChange<T>>,
    /// `(next_page, page_size)` when an append fetch is issued.
    pub on_load_more: Hook<(u32, u32)>,
    /// Server lists: the parent owns fetching and receives the new query.
    pub on_query_change: RefHook<QueryParams>,
    pub on_success: RefHook<PageResponse<T>>,
    pub on_error: RefHook<FetchError>,
}

impl<T> Default for ListCallbacks<T> {
    fn default() -> Self {
        Self {
            on_page_change: None,
            on_page_size_change: None,
            on_data_change: None,
            on_load_more: None,
            on_query_change: None,
            on_success: None,
            on_error: None,
        }
    }
}

impl<T> Clone for ListCallbacks<T> {
    fn clone(&self) -> Self {
        Self {
            on_page_change: self.on_page_change.clone(),
            on_page_size_change: self.on_page_size_change.clone(),
            on_data_change: self.on_data_change.clone(),
            on_load_more: self.on_load_more.clone(),
            on_query_change: self.on_query_change.clone(),
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<T> PartialEq for ListCallbacks<T> {
    fn eq(&self, other: &Self) -> bool {
        same(&self.on_page_change, &other.on_page_change)
            && same(&self.on_page_size_change, &other.on_page_size_change)
            && same(&self.on_data_change, &other.on_data_change)
            && same(&self.on_load_more, &other.on_load_more)
            && same(&self.on_query_change, &other.on_query_change)
            && same(&self.on_success, &other.on_success)
            && same(&self.on_error, &other.on_error)
    }
}

fn same<F: ?Sized>(a: &Option<Rc<F>>, b: &Option<Rc<F>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl<T> ListCallbacks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_page_change(mut self, f: impl Fn(u32, u32) + 'static) -> Self {
        self.on_page_change = Some(Rc::new(move |(page, size): (u32, u32)| f(page, size)));
        self
    }

    pub fn on_page_size_change(mut self, f: impl Fn(u32) + 'static) -> Self {
        self.on_page_size_change = Some(Rc::new(f));
        self
    }

    pub fn on_data_change(mut self, f: impl Fn(&DataChange<T>) + 'static) -> Self {
        self.on_data_change = Some(Rc::new(f));
        self
    }

    pub fn on_load_more(mut self, f: impl Fn(u32, u32) + 'static) -> Self {
        self.on_load_more = Some(Rc::new(move |(page, size): (u32, u32)| f(page, size)));
        self
    }

    pub fn on_query_change(mut self, f: impl Fn(&QueryParams) + 'static) -> Self {
        self.on_query_change = Some(Rc::new(f));
        self
    }

    pub fn on_success(mut self, f: impl Fn(&PageResponse<T>) + 'static) -> Self {
        self.on_success = Some(Rc::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&FetchError) + 'static) -> Self {
        self.on_error = Some(Rc::new(f));
        self
    }

    pub(crate) fn page_changed(&self, page: u32, page_size: u32) {
        if let Some(hook) = &self.on_page_change {
            hook((page, page_size));
        }
    }

    pub(crate) fn page_size_changed(&self, page_size: u32) {
        if let Some(hook) = &self.on_page_size_change {
            hook(page_size);
        }
    }

    pub(crate) fn data_changed(&self, change: &DataChange<T>) {
        if let Some(hook) = &self.on_data_change {
            hook(change);
        }
    }

    pub(crate) fn wants_data_changes(&self) -> bool {
        self.on_data_change.is_some()
    }

    pub(crate) fn loading_more(&self, next_page: u32, page_size: u32) {
        if let Some(hook) = &self.on_load_more {
            hook((next_page, page_size));
        }
    }

    pub(crate) fn query_changed(&self, params: &QueryParams) {
        if let Some(hook) = &self.on_query_change {
            hook(params);
        }
    }

    pub(crate) fn succeeded(&self, page: &PageResponse<T>) {
        if let Some(hook) = &self.on_success {
            hook(page);
        }
    }

    pub(crate) fn failed(&self, err: &FetchError) {
        if let Some(hook) = &self.on_error {
            hook(err);
        }
    }
}
