use dioxus::prelude::*;

use crate::config::ListConfig;
use crate::domain::entities::page::{QueryParams, RenderPayload};
use crate::ui::components::device_probe::use_device_class;
use crate::ui::components::hydration::use_hydration_marker;
use crate::ui::components::list_status::ListStatus;
use crate::ui::components::pagination_bar::PaginationBar;
use crate::ui::state::list_state::use_ecom_list;
use crate::usecase::ports::source::ListSource;
use crate::usecase::services::callbacks::ListCallbacks;
use crate::usecase::services::sentinel::SentinelTrigger;

#[derive(Props, Clone, PartialEq)]
pub struct EcomListProps<T: Clone + PartialEq + 'static> {
    pub source: ListSource<T>,
    #[props(default)]
    pub config: ListConfig,
    #[props(default)]
    pub callbacks: ListCallbacks<T>,
    /// Non-paging query keys; a change rewinds to page 1.
    #[props(default)]
    pub filters: QueryParams,
    /// Renders the current payload.
    pub view: Callback<RenderPayload<T>, Element>,
}

/// Paged or appending list over a server page or a client fetcher.
///
/// The device class comes from the nearest `DeviceProbe`; without one the
/// list uses `config.server_device`.
#[component]
pub fn EcomList<T: Clone + PartialEq + 'static>(props: EcomListProps<T>) -> Element {
    let device = use_device_class(props.config.server_device);
    let list = use_ecom_list(
        props.source.clone(),
        props.config.clone(),
        props.callbacks.clone(),
        props.filters.clone(),
        device,
    );

    let hydrated = use_hydration_marker();
    let watched = list.clone();
    use_effect(move || {
        let (Some(hydrated), Ok(handle)) = (hydrated, watched.clone()) else {
            return;
        };
        if !handle.payload().loading {
            hydrated.mark();
        }
    });

    let handle = match list {
        Ok(handle) => handle,
        Err(err) => {
            return rsx! {
                div { class: "ecom-list-error", "{err}" }
            };
        }
    };

    let payload = handle.payload();
    let mode = handle.mode();
    let config = handle.config();
    let total_pages = handle.total_pages();
    let error = handle.last_error().map(|err| err.to_string());
    let show_bar = !mode.is_infinite() && config.show_pagination && payload.total > 0;
    let sentinel_armed = SentinelTrigger::is_armed(mode, payload.has_more);
    let rendered = payload.list.len();

    rsx! {
        div {
            class: "ecom-list",
            "data-mode": "{mode}",
            {props.view.call(payload.clone())}
            {error.map(|err| rsx! {
                div { class: "ecom-list-error", style: "color: #b42318; padding: 8px 0;", "{err}" }
            })}
            if mode.is_infinite() {
                ListStatus { loading: payload.loading, has_more: payload.has_more }
                if sentinel_armed {
                    // keyed by list length: a sentinel still in view after an
                    // append is remounted and reports visibility again
                    for appended in std::iter::once(rendered) {
                        div {
                            key: "{appended}",
                            class: "ecom-list-sentinel",
                            style: "height: 1px;",
                            onvisible: move |event: Event<VisibleData>| {
                                handle.on_sentinel_visible(event.is_intersecting().unwrap_or(false));
                            },
                        }
                    }
                }
            } else if show_bar {
                PaginationBar {
                    page_num: payload.page_num,
                    page_size: payload.page_size,
                    total: payload.total,
                    total_pages,
                    loading: payload.loading,
                    page_size_options: config.page_size_options.clone(),
                    on_page_change: move |page| handle.change_page(page),
                    on_page_size_change: move |size| handle.change_page_size(size),
                }
            }
        }
    }
}
