use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::ProjectDirs;

use crate::domain::entities::device::DeviceClass;
use crate::domain::entities::page::DEFAULT_PAGE_SIZE;
use crate::usecase::ports::source::ListError;

pub const DB_PATH_ENV: &str = "ECOM_LIST_DB";

#[derive(Debug, Clone, PartialEq)]
pub struct ListConfig {
    pub page_size: Option<u32>,
    pub page_size_options: Vec<u32>,
    /// Show the pagination bar on paged layouts.
    pub show_pagination: bool,
    /// Append pages on mobile instead of paging.
    pub infinite_append_on_mobile: bool,
    pub force_has_more: bool,
    /// When false the list never fetches on its own.
    pub enabled: bool,
    /// Device class assumed before a viewport is known.
    pub server_device: DeviceClass,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: None,
            page_size_options: vec![10, 20, 50, 100],
            show_pagination: true,
            infinite_append_on_mobile: true,
            force_has_more: false,
            enabled: true,
            server_device: DeviceClass::Desktop,
        }
    }
}

impl ListConfig {
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_page_size_options(mut self, options: Vec<u32>) -> Self {
        self.page_size_options = options;
        self
    }

    pub fn with_pagination(mut self, show: bool) -> Self {
        self.show_pagination = show;
        self
    }

    pub fn with_infinite_append_on_mobile(mut self, enabled: bool) -> Self {
        self.infinite_append_on_mobile = enabled;
        self
    }

    pub fn with_force_has_more(mut self, force: bool) -> Self {
        self.force_has_more = force;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_server_device(mut self, device: DeviceClass) -> Self {
        self.server_device = device;
        self
    }

    pub fn effective_page_size(&self) -> u32 {
        self.page_size
            .filter(|size| *size > 0)
            .or_else(|| self.page_size_options.first().copied().filter(|size| *size > 0))
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn validate(&self) -> Result<(), ListError> {
        if self.page_size == Some(0) {
            return Err(ListError::InvalidPageSize(0));
        }
        if self.page_size_options.contains(&0) {
            return Err(ListError::InvalidPageSize(0));
        }
        Ok(())
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(DB_PATH_ENV).filter(|path| !path.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "ecom-list")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().join("catalog.sqlite"))
}
