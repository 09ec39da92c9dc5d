use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use log::{error, info};

use ecom_list::app::App;
use ecom_list::config::default_db_path;
use ecom_list::infra::import::csv::import_accounts_csv;
use ecom_list::infra::sqlite::queries::seed_sample_accounts;
use ecom_list::infra::sqlite::schema::init_db;

const SAMPLE_ACCOUNT_COUNT: usize = 137;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(err) = prepare_catalog() {
        error!("failed to prepare account catalog: {err:#}");
        std::process::exit(1);
    }

    let webview_data_dir = match default_webview_data_dir() {
        Ok(dir) => dir,
        Err(err) => {
            error!("{err:#}");
            std::process::exit(1);
        }
    };

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("账号列表"))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
}

/// Creates the catalog, imports the csv given as the first argument and seeds
/// sample rows when the catalog is still empty.
fn prepare_catalog() -> Result<PathBuf> {
    let db_path = default_db_path()?;
    init_db(&db_path)?;
    info!("account catalog at {}", db_path.display());

    if let Some(csv_path) = std::env::args_os().nth(1).map(PathBuf::from) {
        let result = import_accounts_csv(&db_path, &csv_path)?;
        info!(
            "imported {} accounts from {} ({} skipped)",
            result.row_count,
            csv_path.display(),
            result.skipped
        );
    }

    let seeded = seed_sample_accounts(&db_path, SAMPLE_ACCOUNT_COUNT)?;
    if seeded > 0 {
        info!("seeded {seeded} sample accounts");
    }
    Ok(db_path)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "ecom-list")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}

fn ensure_webview_data_dir(base: &Path) -> Result<PathBuf> {
    let dir = base.join("webview");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create webview data dir: {}", dir.display()))?;
    Ok(dir)
}
