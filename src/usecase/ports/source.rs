use std::rc::Rc;

use serde::de::DeserializeOwned;
use thiserror::Error as ThisError;

use crate::domain::entities::mode::{FetchMode, SourceKind};
use crate::domain::entities::page::QueryParams;
use crate::usecase::ports::fetcher::{PageFetcher, RequestHelper, UrlFetcher};

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ListError {
    /// A client list was configured without anything to fetch with.
    #[error("client list needs a request function or a url with a request helper")]
    MissingFetchCapability,

    #[error("page size must be greater than zero, got {0}")]
    InvalidPageSize(u32),

    #[error("{operation} is not available in {mode} mode")]
    UnsupportedInMode {
        operation: &'static str,
        mode: FetchMode,
    },
}

/// A page the caller already has, typically rendered on the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerPage<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page_num: Option<u32>,
    pub page_size: Option<u32>,
}

impl<T> ServerPage<T> {
    pub fn new(data: Vec<T>, total: u64) -> Self {
        Self {
            data,
            total,
            page_num: None,
            page_size: None,
        }
    }

    pub fn at_page(mut self, page_num: u32, page_size: u32) -> Self {
        self.page_num = Some(page_num);
        self.page_size = Some(page_size);
        self
    }
}

pub struct ClientSource<T> {
    pub fetcher: Rc<dyn PageFetcher<T>>,
    pub params: QueryParams,
    pub data: QueryParams,
}

impl<T> Clone for ClientSource<T> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Rc::clone(&self.fetcher),
            params: self.params.clone(),
            data: self.data.clone(),
        }
    }
}

impl<T> ClientSource<T> {
    pub fn from_request(fetcher: Rc<dyn PageFetcher<T>>) -> Self {
        Self {
            fetcher,
            params: QueryParams::new(),
            data: QueryParams::new(),
        }
    }

    pub fn from_url(url: impl Into<String>, helper: Rc<dyn RequestHelper>) -> Self
    where
        T: DeserializeOwned + 'static,
    {
        Self::from_request(Rc::new(UrlFetcher::<T>::new(url, helper)))
    }

    /// Picks the fetch capability the way a loosely-typed caller describes it:
    /// an explicit request function wins, otherwise url + helper.
    pub fn resolve(
        request: Option<Rc<dyn PageFetcher<T>>>,
        url: Option<String>,
        helper: Option<Rc<dyn RequestHelper>>,
    ) -> Result<Self, ListError>
    where
        T: DeserializeOwned + 'static,
    {
        if let Some(request) = request {
            return Ok(Self::from_request(request));
        }
        match (url, helper) {
            (Some(url), Some(helper)) if !url.trim().is_empty() => {
                Ok(Self::from_url(url, helper))
            }
            _ => Err(ListError::MissingFetchCapability),
        }
    }

    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Alias of `params`; on key clashes `data` wins.
    pub fn with_data(mut self, data: QueryParams) -> Self {
        self.data = data;
        self
    }

    pub fn merged_params(&self) -> QueryParams {
        self.params.clone().merge(&self.data)
    }
}

impl<T> PartialEq for ClientSource<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.fetcher, &other.fetcher)
            && self.params == other.params
            && self.data == other.data
    }
}

/// Either static data or a way to fetch it.
pub enum ListSource<T> {
    Server(ServerPage<T>),
    Client(ClientSource<T>),
}

impl<T> ListSource<T> {
    pub fn kind(&self) -> SourceKind {
        match self {
            ListSource::Server(_) => SourceKind::Server,
            ListSource::Client(_) => SourceKind::Client,
        }
    }
}

impl<T: Clone> Clone for ListSource<T> {
    fn clone(&self) -> Self {
        match self {
            ListSource::Server(page) => ListSource::Server(page.clone()),
            ListSource::Client(source) => ListSource::Client(source.clone()),
        }
    }
}

impl<T: PartialEq> PartialEq for ListSource<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ListSource::Server(a), ListSource::Server(b)) => a == b,
            (ListSource::Client(a), ListSource::Client(b)) => a == b,
            _ => false,
        }
    }
}
