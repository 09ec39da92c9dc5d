use dioxus::prelude::*;

pub const DEFAULT_LOADING_TEXT: &str = "加载中...";
pub const DEFAULT_NO_MORE_TEXT: &str = "没有更多数据了";

/// Loading / end-of-list line under an appending list.
#[component]
pub fn ListStatus(
    loading: bool,
    has_more: bool,
    #[props(default = DEFAULT_LOADING_TEXT.to_string())] loading_text: String,
    #[props(default = DEFAULT_NO_MORE_TEXT.to_string())] no_more_text: String,
) -> Element {
    if loading {
        return rsx! {
            div { class: "ecom-list-status", style: "padding: 12px 0; text-align: center; color: #888;", "{loading_text}" }
        };
    }
    if !has_more {
        return rsx! {
            div { class: "ecom-list-status", style: "padding: 12px 0; text-align: center; color: #aaa;", "{no_more_text}" }
        };
    }
    rsx! {}
}
