use dioxus::prelude::*;

/// Set once the client list under a [`HydrationBoundary`] has its first data.
#[derive(Clone, Copy, PartialEq)]
pub struct Hydrated(pub Signal<bool>);

impl Hydrated {
    pub fn is_set(&self) -> bool {
        (self.0)()
    }

    pub fn mark(mut self) {
        if !*self.0.peek() {
            self.0.set(true);
        }
    }
}

/// Marks the nearest boundary as hydrated. No-op without a boundary.
pub fn use_hydration_marker() -> Option<Hydrated> {
    try_use_context::<Hydrated>()
}

/// Shows `snapshot` (the prefetched first page) until the live list in
/// `children` reports its first settled payload, then swaps them.
#[component]
pub fn HydrationBoundary(snapshot: Element, children: Element) -> Element {
    let hydrated = use_context_provider(|| Hydrated(Signal::new(false)));
    let ready = hydrated.is_set();
    let live_display = if ready { "block" } else { "none" };

    rsx! {
        if !ready {
            div { class: "ecom-hydration-snapshot", {snapshot} }
        }
        div {
            class: "ecom-hydration-live",
            style: "display: {live_display};",
            {children}
        }
    }
}
