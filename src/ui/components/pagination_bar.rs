use dioxus::prelude::*;

const BUTTON_STYLE: &str =
    "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";

#[component]
pub fn PaginationBar(
    page_num: u32,
    page_size: u32,
    total: u64,
    total_pages: u32,
    loading: bool,
    page_size_options: Vec<u32>,
    on_page_change: EventHandler<u32>,
    on_page_size_change: EventHandler<u32>,
) -> Element {
    let at_first = page_num <= 1;
    let at_last = page_num >= total_pages;

    rsx! {
        div {
            class: "ecom-pagination",
            style: "display: flex; align-items: center; gap: 8px; padding: 8px 0;",
            span { "共 {total} 条" }
            button {
                style: BUTTON_STYLE,
                disabled: at_first || loading,
                onclick: move |_| on_page_change.call(page_num.saturating_sub(1)),
                "上一页"
            }
            span { "{page_num} / {total_pages}" }
            button {
                style: BUTTON_STYLE,
                disabled: at_last || loading,
                onclick: move |_| on_page_change.call(page_num + 1),
                "下一页"
            }
            if page_size_options.len() > 1 {
                select {
                    disabled: loading,
                    value: "{page_size}",
                    onchange: move |event: Event<FormData>| {
                        if let Ok(size) = event.value().parse::<u32>() {
                            on_page_size_change.call(size);
                        }
                    },
                    for size in page_size_options.iter().copied() {
                        option {
                            key: "{size}",
                            value: "{size}",
                            selected: size == page_size,
                            "{size} 条/页"
                        }
                    }
                }
            }
        }
    }
}
