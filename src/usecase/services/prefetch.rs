use log::debug;

use crate::config::ListConfig;
use crate::domain::entities::page::{RenderPayload, DEFAULT_PAGE_NUM};
use crate::usecase::ports::fetcher::FetchError;
use crate::usecase::ports::source::ListSource;

/// First screen for server rendering: static pages pass through, client sources
/// fetch their first requested page once.
pub async fn prefetch_first_page<T: Clone>(
    source: &ListSource<T>,
    config: &ListConfig,
) -> Result<RenderPayload<T>, FetchError> {
    match source {
        ListSource::Server(page) => {
            let page_num = page.page_num.unwrap_or(DEFAULT_PAGE_NUM);
            let page_size = page.page_size.unwrap_or(config.effective_page_size());
            Ok(RenderPayload {
                has_more: config.force_has_more || page.total > page.data.len() as u64,
                total: page.total,
                page_num,
                page_size,
                loading: false,
                list: page.data.clone(),
            })
        }
        ListSource::Client(client) => {
            let params = client.merged_params();
            let page_num = params.page_num().unwrap_or(DEFAULT_PAGE_NUM);
            let page_size = params
                .page_size()
                .unwrap_or(config.effective_page_size());
            debug!("prefetching page {page_num} (size {page_size})");

            let page = client
                .fetcher
                .fetch(params.with_page(page_num).with_page_size(page_size))
                .await?;
            Ok(RenderPayload {
                has_more: config.force_has_more || page.total > page.list.len() as u64,
                total: page.total,
                page_num: page.page_num,
                page_size: page.page_size,
                loading: false,
                list: page.list,
            })
        }
    }
}
