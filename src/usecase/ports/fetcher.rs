use std::future::Future;
use std::marker::PhantomData;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error as ThisError;

use crate::domain::entities::page::{
    PageResponse, PageShape, QueryParams, DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE,
};

pub const SUCCESS_CODE: i64 = 200;

#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum FetchError {
    /// The backend answered, but with a non-success business code.
    #[error("request failed with code {code}: {message}")]
    Business { code: i64, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode page: {0}")]
    Decode(String),

    /// Raised by a caller-supplied fetch function.
    #[error("{0}")]
    Rejected(String),
}

pub type FetchFuture<T> = LocalBoxFuture<'static, Result<PageResponse<T>, FetchError>>;

/// Fetch capability of a client list: one page per call.
pub trait PageFetcher<T> {
    fn fetch(&self, params: QueryParams) -> FetchFuture<T>;
}

impl<T, F, Fut> PageFetcher<T> for F
where
    F: Fn(QueryParams) -> Fut,
    Fut: Future<Output = Result<PageResponse<T>, FetchError>> + 'static,
{
    fn fetch(&self, params: QueryParams) -> FetchFuture<T> {
        (self)(params).boxed_local()
    }
}

/// Response envelope of the hosting environment's request helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl ApiEnvelope {
    pub fn ok(data: Value) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: None,
            data,
        }
    }

    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            data: Value::Null,
        }
    }
}

/// Generic GET helper supplied by the host.
pub trait RequestHelper {
    fn get(
        &self,
        url: &str,
        params: &QueryParams,
    ) -> LocalBoxFuture<'static, Result<ApiEnvelope, FetchError>>;
}

/// Turns a URL plus the host's request helper into a [`PageFetcher`].
pub struct UrlFetcher<T> {
    url: String,
    helper: Rc<dyn RequestHelper>,
    _record: PhantomData<fn() -> T>,
}

impl<T> UrlFetcher<T> {
    pub fn new(url: impl Into<String>, helper: Rc<dyn RequestHelper>) -> Self {
        Self {
            url: url.into(),
            helper,
            _record: PhantomData,
        }
    }
}

impl<T: DeserializeOwned + 'static> PageFetcher<T> for UrlFetcher<T> {
    fn fetch(&self, params: QueryParams) -> FetchFuture<T> {
        let page_num = params.page_num().unwrap_or(DEFAULT_PAGE_NUM);
        let page_size = params.page_size().unwrap_or(DEFAULT_PAGE_SIZE);
        let params = params.with_page(page_num).with_page_size(page_size);

        debug!("GET {} page {page_num} size {page_size}", self.url);
        let request = self.helper.get(&self.url, &params);
        let url = self.url.clone();

        async move {
            let envelope = request.await?;
            decode_page(&url, envelope, page_num, page_size)
        }
        .boxed_local()
    }
}

pub fn decode_page<T: DeserializeOwned>(
    url: &str,
    envelope: ApiEnvelope,
    page_num: u32,
    page_size: u32,
) -> Result<PageResponse<T>, FetchError> {
    if envelope.code != SUCCESS_CODE {
        let message = envelope
            .message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| "request failed".to_string());
        return Err(FetchError::Business {
            code: envelope.code,
            message,
        });
    }

    if !envelope.data.is_object() {
        warn!("{url}: page body is not an object, treating as empty page");
        return Ok(PageResponse::empty(page_num, page_size));
    }

    let shape: PageShape<T> = serde_json::from_value(envelope.data)
        .map_err(|err| FetchError::Decode(format!("{url}: {err}")))?;
    if !shape.is_recognized() {
        warn!("{url}: page body has neither `records` nor `list`, treating as empty page");
    }

    Ok(shape.normalize(page_num, page_size))
}
