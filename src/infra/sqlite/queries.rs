use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, types::Value};

use crate::domain::entities::account::AccountRecord;
use crate::infra::sqlite::schema::open_connection;

const ACCOUNT_COLUMNS: &str =
    "user_id, user_name, email, phonenumber, role_name, agency_name, status, create_time";

pub fn insert_accounts(db_path: &Path, accounts: &[AccountRecord]) -> Result<usize> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start account insert transaction")?;

    let mut insert_stmt = tx
        .prepare(&format!(
            "INSERT OR REPLACE INTO account({ACCOUNT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        ))
        .context("failed to prepare account insert")?;

    for account in accounts {
        insert_stmt
            .execute(params![
                account.user_id,
                account.user_name,
                account.email,
                account.phonenumber,
                account.role_name,
                account.agency_name,
                account.status,
                account.create_time,
            ])
            .with_context(|| format!("failed to insert account #{}", account.user_id))?;
    }

    drop(insert_stmt);
    tx.commit()
        .context("failed to commit account insert transaction")?;
    Ok(accounts.len())
}

pub fn count_accounts(db_path: &Path) -> Result<i64> {
    let conn = open_connection(db_path)?;
    conn.query_row("SELECT COUNT(*) FROM account", [], |row| row.get(0))
        .context("failed to count accounts")
}

/// One page of accounts ordered by id. `page_num` is 1-based; `keyword`
/// matches name, email or phone number.
pub fn query_account_page(
    db_path: &Path,
    page_num: u32,
    page_size: u32,
    keyword: &str,
) -> Result<(Vec<AccountRecord>, u64)> {
    if page_size == 0 {
        anyhow::bail!("page_size must be greater than zero")
    }

    let conn = open_connection(db_path)?;

    let mut where_clause = String::new();
    let mut filter_params: Vec<Value> = Vec::new();
    let keyword = keyword.trim();
    if !keyword.is_empty() {
        where_clause = "WHERE user_name LIKE ?1 ESCAPE '\\' \
             OR email LIKE ?1 ESCAPE '\\' \
             OR phonenumber LIKE ?1 ESCAPE '\\'"
            .to_string();
        filter_params.push(Value::Text(format!("%{}%", escape_like(keyword))));
    }

    let total: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM account {where_clause}"),
            rusqlite::params_from_iter(filter_params.iter()),
            |row| row.get(0),
        )
        .context("failed to count filtered accounts")?;

    let offset = i64::from(page_num.max(1) - 1) * i64::from(page_size);
    let limit_idx = filter_params.len() + 1;
    let offset_idx = filter_params.len() + 2;
    let sql = format!(
        "SELECT {ACCOUNT_COLUMNS}
         FROM account
         {where_clause}
         ORDER BY user_id ASC
         LIMIT ?{limit_idx} OFFSET ?{offset_idx}"
    );

    let mut page_params = filter_params;
    page_params.push(Value::Integer(i64::from(page_size)));
    page_params.push(Value::Integer(offset));

    let mut stmt = conn
        .prepare(&sql)
        .context("failed to prepare account page query")?;
    let accounts = stmt
        .query_map(rusqlite::params_from_iter(page_params.iter()), |row| {
            Ok(AccountRecord {
                user_id: row.get(0)?,
                user_name: row.get(1)?,
                email: row.get(2)?,
                phonenumber: row.get(3)?,
                role_name: row.get(4)?,
                agency_name: row.get(5)?,
                status: row.get(6)?,
                create_time: row.get(7)?,
            })
        })
        .context("failed to query account page")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect account page")?;

    Ok((accounts, u64::try_from(total).unwrap_or(0)))
}

/// Escapes `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'` pattern.
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

const SAMPLE_ROLES: [&str; 3] = ["管理员", "运营", "客服"];
const SAMPLE_AGENCIES: [&str; 4] = ["华东代理", "华南代理", "华北代理", "西南代理"];

/// Fills an empty catalog with `count` generated accounts. Returns the number
/// of rows written (0 when the catalog already has data).
pub fn seed_sample_accounts(db_path: &Path, count: usize) -> Result<usize> {
    if count_accounts(db_path)? > 0 {
        return Ok(0);
    }

    let accounts = (1..=count)
        .map(|n| AccountRecord {
            user_id: n as i64,
            user_name: format!("user{n:03}"),
            email: Some(format!("user{n:03}@example.com")),
            phonenumber: Some(format!("138{n:08}")),
            role_name: Some(SAMPLE_ROLES[n % SAMPLE_ROLES.len()].to_string()),
            agency_name: Some(SAMPLE_AGENCIES[n % SAMPLE_AGENCIES.len()].to_string()),
            status: if n % 7 == 0 { "1" } else { "0" }.to_string(),
            create_time: Some(format!("2024-01-{:02} 09:00:00", n % 28 + 1)),
        })
        .collect::<Vec<_>>();

    insert_accounts(db_path, &accounts)
}
