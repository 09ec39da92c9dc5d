use crate::domain::entities::page::RenderPayload;
use crate::usecase::ports::source::ServerPage;
use crate::usecase::services::infinite_executor::InfiniteExecutor;
use crate::usecase::services::paged_executor::PagedExecutor;

/// Whichever internal state currently backs the list.
pub enum ActiveState<'a, T> {
    Server {
        page: &'a ServerPage<T>,
        query_page: u32,
    },
    Paged(&'a PagedExecutor<T>),
    Infinite {
        exec: &'a InfiniteExecutor<T>,
        query_page: u32,
    },
}

pub fn reconcile<T: Clone>(
    state: ActiveState<'_, T>,
    page_size: u32,
    force_has_more: bool,
) -> RenderPayload<T> {
    let mut payload = match state {
        ActiveState::Server { page, query_page } => {
            let list = page.data.clone();
            RenderPayload {
                has_more: page.total > list.len() as u64,
                total: page.total,
                page_num: page.page_num.unwrap_or(query_page),
                page_size: page.page_size.unwrap_or(page_size),
                loading: false,
                list,
            }
        }
        ActiveState::Paged(exec) => {
            let list = exec.list();
            RenderPayload {
                has_more: exec.total() > list.len() as u64,
                total: exec.total(),
                page_num: exec.page_num(),
                page_size,
                loading: exec.is_loading(),
                list,
            }
        }
        ActiveState::Infinite { exec, query_page } => RenderPayload {
            list: exec.list(),
            total: exec.total(),
            page_num: exec.page_num().unwrap_or(query_page),
            page_size,
            loading: exec.is_loading(),
            has_more: exec.has_next(),
        },
    };
    payload.has_more |= force_has_more;
    payload
}
