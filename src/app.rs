use std::path::PathBuf;
use std::rc::Rc;

use dioxus::prelude::*;
use futures::executor::block_on;
use log::{info, warn};

use crate::config::{default_db_path, ListConfig};
use crate::domain::entities::account::AccountRecord;
use crate::domain::entities::page::RenderPayload;
use crate::infra::sqlite::repo::{SqliteRequestHelper, ACCOUNT_PAGE_URL};
use crate::ui::components::device_probe::DeviceProbe;
use crate::ui::components::ecom_list::EcomList;
use crate::ui::components::hydration::HydrationBoundary;
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::fetcher::RequestHelper;
use crate::usecase::ports::source::{ClientSource, ListSource};
use crate::usecase::services::callbacks::ListCallbacks;
use crate::usecase::services::prefetch::prefetch_first_page;

const HEADER_CELL_STYLE: &str =
    "text-align: left; padding: 6px 10px; border-bottom: 1px solid #ddd; background: #f7f7f7;";
const CELL_STYLE: &str = "padding: 6px 10px; border-bottom: 1px solid #f0f0f0;";

fn account_source(db_path: PathBuf) -> ListSource<AccountRecord> {
    let helper: Rc<dyn RequestHelper> = Rc::new(SqliteRequestHelper::new(db_path));
    ListSource::Client(ClientSource::from_url(ACCOUNT_PAGE_URL, helper))
}

#[component]
fn AccountTable(accounts: Vec<AccountRecord>) -> Element {
    rsx! {
        table {
            style: "width: 100%; border-collapse: collapse; font-size: 14px;",
            thead {
                tr {
                    th { style: HEADER_CELL_STYLE, "ID" }
                    th { style: HEADER_CELL_STYLE, "用户名" }
                    th { style: HEADER_CELL_STYLE, "邮箱" }
                    th { style: HEADER_CELL_STYLE, "手机号" }
                    th { style: HEADER_CELL_STYLE, "角色" }
                    th { style: HEADER_CELL_STYLE, "代理商" }
                    th { style: HEADER_CELL_STYLE, "状态" }
                    th { style: HEADER_CELL_STYLE, "创建时间" }
                }
            }
            tbody {
                {accounts.into_iter().map(|account| {
                    let email = account.email.clone().unwrap_or_default();
                    let phone = account.phonenumber.clone().unwrap_or_default();
                    let role = account.role_name.clone().unwrap_or_default();
                    let agency = account.agency_name.clone().unwrap_or_default();
                    let created = account.create_time.clone().unwrap_or_default();
                    let status = if account.is_active() { "正常" } else { "停用" };
                    rsx! {
                        tr { key: "{account.user_id}",
                            td { style: CELL_STYLE, "{account.user_id}" }
                            td { style: CELL_STYLE, "{account.user_name}" }
                            td { style: CELL_STYLE, "{email}" }
                            td { style: CELL_STYLE, "{phone}" }
                            td { style: CELL_STYLE, "{role}" }
                            td { style: CELL_STYLE, "{agency}" }
                            td { style: CELL_STYLE, "{status}" }
                            td { style: CELL_STYLE, "{created}" }
                        }
                    }
                })}
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let mut state = AppState::new();
    let db_path = use_hook(|| default_db_path().map_err(|err| format!("{err:#}")));
    let config = use_hook(ListConfig::default);

    let source = use_hook({
        let db_path = db_path.clone();
        move || db_path.ok().map(account_source)
    });

    // the sqlite helper answers synchronously, so the first page is ready
    // before the live list mounts
    let snapshot = use_hook({
        let source = source.clone();
        let config = config.clone();
        move || {
            let source = source?;
            match block_on(prefetch_first_page(&source, &config)) {
                Ok(payload) => Some(payload),
                Err(err) => {
                    warn!("first page prefetch failed: {err}");
                    None
                }
            }
        }
    });

    let callbacks = use_hook(|| {
        let shown = state.shown;
        let status = state.status;
        ListCallbacks::<AccountRecord>::new()
            .on_data_change(move |change| {
                let mut shown = shown;
                shown.set((change.payload.list.len(), change.payload.total));
            })
            .on_error(move |err| {
                let mut status = status;
                status.set(format!("加载失败：{err}"));
            })
            .on_success(move |page| {
                let mut status = status;
                status.set(format!("已加载第 {} 页", page.page_num));
            })
    });

    let (source, db_path) = match (source, db_path) {
        (Some(source), Ok(db_path)) => (source, db_path),
        (_, Err(err)) => {
            return rsx! {
                div {
                    p { "无法取得数据库路径：{err}" }
                }
            };
        }
        (None, Ok(_)) => return rsx! {},
    };

    let (rendered, total) = (state.shown)();
    let status = (state.status)();
    let filters = (state.filters)();
    let keyword = (state.keyword_input)();
    let db_label = db_path.display().to_string();

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 16px; display: flex; flex-direction: column; gap: 12px;",
            div {
                style: "display: flex; align-items: center; gap: 8px;",
                input {
                    style: "border: 1px solid #bbb; padding: 4px 8px; border-radius: 6px; min-width: 240px;",
                    placeholder: "用户名 / 邮箱 / 手机号",
                    value: "{keyword}",
                    oninput: move |event| state.keyword_input.set(event.value()),
                    onkeydown: move |event| {
                        if event.key() == Key::Enter {
                            state.apply_keyword();
                        }
                    },
                }
                button {
                    style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        info!("search: {}", state.keyword_input.peek());
                        state.apply_keyword();
                    },
                    "搜索"
                }
                span { style: "color: #666;", "已显示 {rendered} / {total}" }
                span { style: "color: #999; margin-left: auto;", "{status}" }
            }
            span { style: "color: #999; font-size: 12px;", "{db_label}" }
            DeviceProbe {
                HydrationBoundary {
                    snapshot: rsx! {
                        {snapshot.map(|payload| rsx! { AccountTable { accounts: payload.list } })}
                    },
                    EcomList {
                        source,
                        config,
                        callbacks,
                        filters,
                        view: move |payload: RenderPayload<AccountRecord>| rsx! {
                            AccountTable { accounts: payload.list }
                        },
                    }
                }
            }
        }
    }
}
