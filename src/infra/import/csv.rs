use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use csv::StringRecord;

use crate::domain::entities::account::AccountRecord;
use crate::infra::sqlite::queries::insert_accounts;
use crate::infra::sqlite::schema::init_db;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportResult {
    pub row_count: usize,
    pub skipped: usize,
}

const REQUIRED_HEADERS: [&str; 2] = ["userId", "userName"];

/// Imports account rows from a csv with a camelCase header row
/// (`userId,userName,email,phonenumber,roleName,agencyName,status,createTime`).
/// Rows without a numeric `userId` are skipped; a missing `createTime` is set
/// to the import time.
pub fn import_accounts_csv(db_path: &Path, csv_path: &Path) -> Result<ImportResult> {
    init_db(db_path)?;

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .clone();

    for required in REQUIRED_HEADERS {
        if !headers.iter().any(|header| header == required) {
            anyhow::bail!("csv header `{required}` is required")
        }
    }

    let imported_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut accounts = Vec::new();
    let mut skipped = 0;
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        match account_from_record(&headers, &record, &imported_at) {
            Some(account) => accounts.push(account),
            None => skipped += 1,
        }
    }

    let row_count = insert_accounts(db_path, &accounts)?;
    Ok(ImportResult { row_count, skipped })
}

fn account_from_record(
    headers: &StringRecord,
    record: &StringRecord,
    imported_at: &str,
) -> Option<AccountRecord> {
    let field = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let user_id = field("userId")?.parse::<i64>().ok()?;
    Some(AccountRecord {
        user_id,
        user_name: field("userName")?,
        email: field("email"),
        phonenumber: field("phonenumber"),
        role_name: field("roleName"),
        agency_name: field("agencyName"),
        status: field("status").unwrap_or_else(|| "0".to_string()),
        create_time: field("createTime").or_else(|| Some(imported_at.to_string())),
    })
}
