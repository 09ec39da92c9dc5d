use std::path::PathBuf;

use futures::future::{FutureExt, LocalBoxFuture};
use log::{debug, error};
use serde_json::json;

use crate::domain::entities::page::{
    page_count, ParamValue, QueryParams, DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE, KEYWORD_KEY,
};
use crate::infra::sqlite::queries::query_account_page;
use crate::platform::desktop::blocking::run_blocking;
use crate::usecase::ports::fetcher::{ApiEnvelope, FetchError, RequestHelper};

pub const ACCOUNT_PAGE_URL: &str = "/admin/account/page/list";

/// Serves list endpoints from the local sqlite catalog, answering in the
/// `records/total/size/current/pages` page shape.
pub struct SqliteRequestHelper {
    pub db_path: PathBuf,
}

impl SqliteRequestHelper {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn handle(&self, url: &str, params: &QueryParams) -> ApiEnvelope {
        if url != ACCOUNT_PAGE_URL {
            return ApiEnvelope::failure(404, format!("no route for {url}"));
        }

        let page_num = params.page_num().unwrap_or(DEFAULT_PAGE_NUM).max(1);
        let page_size = params.page_size().unwrap_or(DEFAULT_PAGE_SIZE);
        let keyword = match params.get(KEYWORD_KEY) {
            Some(ParamValue::Text(keyword)) => keyword.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        match query_account_page(&self.db_path, page_num, page_size, &keyword) {
            Ok((records, total)) => {
                debug!("{url}: page {page_num} -> {} of {total}", records.len());
                ApiEnvelope::ok(json!({
                    "records": records,
                    "total": total,
                    "size": page_size,
                    "current": page_num,
                    "pages": page_count(total, page_size),
                }))
            }
            Err(err) => {
                error!("{url}: {err:#}");
                ApiEnvelope::failure(500, format!("{err:#}"))
            }
        }
    }
}

impl RequestHelper for SqliteRequestHelper {
    fn get(
        &self,
        url: &str,
        params: &QueryParams,
    ) -> LocalBoxFuture<'static, Result<ApiEnvelope, FetchError>> {
        let envelope = run_blocking(url, || self.handle(url, params));
        async move { Ok(envelope) }.boxed_local()
    }
}
