//! Paginated list component for Dioxus apps.
//!
//! One component covers three fetch modes: a page the caller already has
//! (`ServerData`), a client list paged with a pagination bar (`ClientPaged`),
//! and a client list that appends pages as a sentinel scrolls into view
//! (`ClientInfinite`). The mode follows the source kind and the viewport's
//! device class.

pub mod app;
pub mod config;

pub mod domain {
    pub mod entities {
        pub mod account;
        pub mod device;
        pub mod mode;
        pub mod page;
    }
}

pub mod usecase {
    pub mod ports {
        pub mod fetcher;
        pub mod source;
    }

    pub mod services {
        pub mod callbacks;
        pub mod emitter;
        pub mod executor;
        pub mod infinite_executor;
        pub mod list_controller;
        pub mod mode_selector;
        pub mod page_cache;
        pub mod paged_executor;
        pub mod prefetch;
        pub mod query_state;
        pub mod reconciler;
        pub mod sentinel;
    }
}

pub mod infra {
    pub mod import {
        pub mod csv;
    }

    pub mod sqlite {
        pub mod queries;
        pub mod repo;
        pub mod schema;
    }
}

pub mod platform {
    pub mod desktop {
        pub mod blocking;
    }
}

pub mod ui {
    pub mod components {
        pub mod device_probe;
        pub mod ecom_list;
        pub mod hydration;
        pub mod list_status;
        pub mod pagination_bar;
    }

    pub mod state {
        pub mod app_state;
        pub mod list_state;
    }
}

pub use config::{default_db_path, ListConfig};
pub use domain::entities::device::DeviceClass;
pub use domain::entities::mode::{FetchMode, PageLayout, SourceKind};
pub use domain::entities::page::{
    DataChange, PageResponse, PageShape, ParamValue, QueryParams, RenderPayload,
};
pub use ui::components::device_probe::DeviceProbe;
pub use ui::components::ecom_list::{EcomList, EcomListProps};
pub use ui::components::hydration::{HydrationBoundary, Hydrated};
pub use ui::components::list_status::ListStatus;
pub use ui::components::pagination_bar::PaginationBar;
pub use ui::state::list_state::{use_ecom_list, ListHandle};
pub use usecase::ports::fetcher::{
    ApiEnvelope, FetchError, FetchFuture, PageFetcher, RequestHelper, UrlFetcher,
};
pub use usecase::ports::source::{ClientSource, ListError, ListSource, ServerPage};
pub use usecase::services::callbacks::ListCallbacks;
pub use usecase::services::list_controller::{drive, ListController};
pub use usecase::services::prefetch::prefetch_first_page;

#[cfg(test)]
mod tests;
