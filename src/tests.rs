use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use futures::executor::block_on;
use rusqlite::Connection;
use serde_json::json;

use crate::config::ListConfig;
use crate::domain::entities::account::AccountRecord;
use crate::domain::entities::device::DeviceClass;
use crate::domain::entities::mode::{FetchMode, PageLayout};
use crate::domain::entities::page::{
    PageResponse, ParamValue, QueryParams, KEYWORD_KEY, PAGE_NUM_KEY, PAGE_SIZE_KEY,
};
use crate::infra::import::csv::import_accounts_csv;
use crate::infra::sqlite::queries::{
    count_accounts, insert_accounts, query_account_page, seed_sample_accounts,
};
use crate::infra::sqlite::repo::{SqliteRequestHelper, ACCOUNT_PAGE_URL};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::fetcher::{
    decode_page, ApiEnvelope, FetchError, PageFetcher, RequestHelper, UrlFetcher,
};
use crate::usecase::ports::source::{ClientSource, ListError, ListSource, ServerPage};
use crate::usecase::services::callbacks::ListCallbacks;
use crate::usecase::services::executor::{FetchKind, Settlement};
use crate::usecase::services::list_controller::{drive, ListController};
use crate::usecase::services::prefetch::prefetch_first_page;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("ecom-list-{prefix}-{nanos}"))
}

fn account(user_id: i64, user_name: &str) -> AccountRecord {
    AccountRecord {
        user_id,
        user_name: user_name.to_string(),
        email: Some(format!("{user_name}@example.com")),
        phonenumber: None,
        role_name: None,
        agency_name: None,
        status: "0".to_string(),
        create_time: None,
    }
}

fn slice_page<T: Clone>(rows: &[T], page_num: u32, page_size: u32) -> PageResponse<T> {
    let start = (page_num.max(1) - 1) as usize * page_size as usize;
    let list = rows
        .iter()
        .skip(start)
        .take(page_size as usize)
        .cloned()
        .collect();
    PageResponse::new(list, rows.len() as u64, page_num, page_size)
}

type Requests = Rc<RefCell<Vec<QueryParams>>>;

/// Serves `rows` page by page and records every request.
fn serving<T: Clone + 'static>(rows: Vec<T>) -> (Rc<dyn PageFetcher<T>>, Requests) {
    let requests: Requests = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&requests);
    let fetcher = move |params: QueryParams| {
        seen.borrow_mut().push(params.clone());
        let page = slice_page(
            &rows,
            params.page_num().unwrap_or(1),
            params.page_size().unwrap_or(10),
        );
        async move { Ok::<_, FetchError>(page) }
    };
    let fetcher: Rc<dyn PageFetcher<T>> = Rc::new(fetcher);
    (fetcher, requests)
}

fn client_list<T: Clone + PartialEq + 'static>(
    rows: Vec<T>,
    config: ListConfig,
    device: DeviceClass,
) -> (ListController<T>, Requests) {
    let (fetcher, requests) = serving(rows);
    let controller = ListController::new(
        ListSource::Client(ClientSource::from_request(fetcher)),
        config,
        device,
    )
    .expect("client list should build");
    (controller, requests)
}

fn numbers(count: u32) -> Vec<u32> {
    (1..=count).collect()
}

#[test]
fn init_db_creates_account_table() {
    let temp_dir = unique_test_dir("init-db");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("catalog.sqlite");

    let result = init_db(&db_path);

    assert!(result.is_ok(), "init_db should succeed: {result:?}");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'account'",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");

    assert_eq!(table_count, 1, "account table should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn account_page_query_filters_by_keyword_and_pages() {
    let temp_dir = unique_test_dir("account-page");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("catalog.sqlite");
    init_db(&db_path).expect("init_db should succeed");

    let accounts = (1..=25)
        .map(|id| {
            let name = if id % 5 == 0 { "lamp" } else { "desk" };
            account(id, &format!("{name}{id}"))
        })
        .collect::<Vec<_>>();
    insert_accounts(&db_path, &accounts).expect("insert should succeed");

    let (page, total) =
        query_account_page(&db_path, 3, 10, "").expect("page query should succeed");
    assert_eq!(total, 25);
    assert_eq!(
        page.iter().map(|a| a.user_id).collect::<Vec<_>>(),
        vec![21, 22, 23, 24, 25]
    );

    let (page, total) =
        query_account_page(&db_path, 1, 2, "lamp").expect("keyword query should succeed");
    assert_eq!(total, 5, "only every fifth account matches");
    assert_eq!(
        page.iter().map(|a| a.user_name.as_str()).collect::<Vec<_>>(),
        vec!["lamp5", "lamp10"]
    );

    let err = query_account_page(&db_path, 1, 0, "").expect_err("zero page size should fail");
    assert!(err.to_string().contains("page_size"));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn keyword_wildcards_match_literally() {
    let temp_dir = unique_test_dir("keyword-escape");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("catalog.sqlite");
    init_db(&db_path).expect("init_db should succeed");

    let accounts = vec![
        account(1, "a_b"),
        account(2, "axb"),
        account(3, "100%"),
        account(4, "1000"),
    ];
    insert_accounts(&db_path, &accounts).expect("insert should succeed");

    let (page, total) =
        query_account_page(&db_path, 1, 10, "a_b").expect("keyword query should succeed");
    assert_eq!(total, 1, "underscore is not a wildcard");
    assert_eq!(page[0].user_name, "a_b");

    let (page, total) =
        query_account_page(&db_path, 1, 10, "0%").expect("keyword query should succeed");
    assert_eq!(total, 1, "percent is not a wildcard");
    assert_eq!(page[0].user_name, "100%");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn seed_only_fills_an_empty_catalog() {
    let temp_dir = unique_test_dir("seed");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("catalog.sqlite");
    init_db(&db_path).expect("init_db should succeed");

    assert_eq!(seed_sample_accounts(&db_path, 12).expect("seed should succeed"), 12);
    assert_eq!(seed_sample_accounts(&db_path, 12).expect("reseed should succeed"), 0);
    assert_eq!(count_accounts(&db_path).expect("count should succeed"), 12);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn sqlite_helper_answers_with_records_shape() {
    let temp_dir = unique_test_dir("helper");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("catalog.sqlite");
    init_db(&db_path).expect("init_db should succeed");
    seed_sample_accounts(&db_path, 23).expect("seed should succeed");

    let helper = SqliteRequestHelper::new(db_path.clone());
    let envelope = helper.handle(
        ACCOUNT_PAGE_URL,
        &QueryParams::new().with_page(3).with_page_size(10),
    );

    assert_eq!(envelope.code, 200);
    assert_eq!(envelope.data["total"], json!(23));
    assert_eq!(envelope.data["current"], json!(3));
    assert_eq!(envelope.data["size"], json!(10));
    assert_eq!(envelope.data["pages"], json!(3));
    assert_eq!(
        envelope.data["records"]
            .as_array()
            .expect("records should be an array")
            .len(),
        3
    );

    let missing = helper.handle("/admin/unknown", &QueryParams::new());
    assert_eq!(missing.code, 404);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn url_fetcher_reads_accounts_through_sqlite_helper() {
    let temp_dir = unique_test_dir("url-fetcher");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("catalog.sqlite");
    init_db(&db_path).expect("init_db should succeed");
    seed_sample_accounts(&db_path, 15).expect("seed should succeed");

    let helper: Rc<dyn RequestHelper> = Rc::new(SqliteRequestHelper::new(db_path.clone()));
    let fetcher = UrlFetcher::<AccountRecord>::new(ACCOUNT_PAGE_URL, helper);

    let page = block_on(fetcher.fetch(QueryParams::new().with_page(2)))
        .expect("fetch should succeed");

    assert_eq!(page.total, 15);
    assert_eq!(page.page_num, 2);
    assert_eq!(page.page_size, 10, "missing page size defaults to 10");
    assert_eq!(
        page.list.iter().map(|a| a.user_id).collect::<Vec<_>>(),
        (11..=15).collect::<Vec<_>>()
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_import_maps_headers_and_fills_create_time() {
    let temp_dir = unique_test_dir("csv-import");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("catalog.sqlite");
    let csv_path = temp_dir.join("accounts.csv");
    fs::write(
        &csv_path,
        "userId,userName,email,status,createTime\n\
         1,alice,alice@example.com,0,2024-03-01 10:00:00\n\
         2,bob,,1,\n\
         x,broken,,0,\n",
    )
    .expect("should write csv");

    let result = import_accounts_csv(&db_path, &csv_path).expect("import should succeed");

    assert_eq!(result.row_count, 2);
    assert_eq!(result.skipped, 1, "row without a numeric id is skipped");

    let (accounts, total) =
        query_account_page(&db_path, 1, 10, "").expect("page query should succeed");
    assert_eq!(total, 2);
    assert_eq!(accounts[0].create_time.as_deref(), Some("2024-03-01 10:00:00"));
    assert_eq!(accounts[1].email, None);
    assert!(!accounts[1].is_active());
    assert!(
        accounts[1].create_time.is_some(),
        "missing create time should be filled with the import time"
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_import_requires_id_and_name_headers() {
    let temp_dir = unique_test_dir("csv-headers");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("catalog.sqlite");
    let csv_path = temp_dir.join("accounts.csv");
    fs::write(&csv_path, "name,email\nalice,a@example.com\n").expect("should write csv");

    let err = import_accounts_csv(&db_path, &csv_path).expect_err("import should fail");
    assert!(err.to_string().contains("userId"));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn both_page_shapes_normalize_to_the_same_page() {
    let records = ApiEnvelope::ok(json!({
        "records": [1, 2, 3],
        "total": 23,
        "size": 3,
        "current": 2,
    }));
    let list = ApiEnvelope::ok(json!({
        "list": [1, 2, 3],
        "total": 23,
        "pageNum": 2,
        "pageSize": 3,
    }));

    let from_records = decode_page::<u32>("/a", records, 1, 10).expect("records should decode");
    let from_list = decode_page::<u32>("/b", list, 1, 10).expect("list should decode");

    assert_eq!(from_records, from_list);
    assert_eq!(from_records.page_num, 2);
    assert_eq!(from_records.page_size, 3);
}

#[test]
fn desktop_client_list_fetches_first_page_on_start() {
    let (controller, requests) = client_list(numbers(35), ListConfig::default(), DeviceClass::Desktop);
    assert_eq!(controller.mode(), FetchMode::ClientPaged { layout: PageLayout::Replace });

    let cell = RefCell::new(controller);
    let ticket = cell.borrow_mut().start();
    assert!(cell.borrow().payload().loading);

    let settlement = block_on(drive(&cell, ticket));
    assert_eq!(settlement, Some(Settlement::Applied));

    let payload = cell.borrow().payload();
    assert_eq!(payload.list, (1..=10).collect::<Vec<_>>());
    assert_eq!(payload.total, 35);
    assert!(payload.has_more);
    assert!(!payload.loading);
    assert_eq!(cell.borrow().total_pages(), 4);

    let first = &requests.borrow()[0];
    assert_eq!(first.get(PAGE_NUM_KEY), Some(&ParamValue::from(1_u32)));
    assert_eq!(first.get(PAGE_SIZE_KEY), Some(&ParamValue::from(10_u32)));
}

#[test]
fn earlier_page_resolving_late_does_not_overwrite_newer_page() {
    let rows = numbers(100);
    let (mut controller, _) = client_list(rows.clone(), ListConfig::default(), DeviceClass::Desktop);
    let first = controller.start().expect("start should fetch");
    controller.settle(first, Ok(slice_page(&rows, 1, 10)));

    let page_two = controller
        .change_page(2)
        .expect("change_page should be allowed")
        .expect("page 2 should fetch");
    let page_three = controller
        .change_page(3)
        .expect("change_page should be allowed")
        .expect("page 3 should fetch");

    assert_eq!(
        controller.settle(page_three, Ok(slice_page(&rows, 3, 10))),
        Settlement::Applied
    );
    assert_eq!(
        controller.settle(page_two, Ok(slice_page(&rows, 2, 10))),
        Settlement::Stale
    );

    let payload = controller.payload();
    assert_eq!(payload.page_num, 3);
    assert_eq!(payload.list, (21..=30).collect::<Vec<_>>());
    assert!(!payload.loading);
}

#[test]
fn change_page_clamps_to_last_page() {
    let rows = numbers(35);
    let (mut controller, _) = client_list(rows.clone(), ListConfig::default(), DeviceClass::Desktop);
    let first = controller.start().expect("start should fetch");
    controller.settle(first, Ok(slice_page(&rows, 1, 10)));

    let ticket = controller
        .change_page(99)
        .expect("change_page should be allowed")
        .expect("clamped page should fetch");
    assert_eq!(ticket.page_num(), 4);

    assert_eq!(
        controller.change_page(0).expect("change_page should be allowed").map(|t| t.page_num()),
        Some(1)
    );
}

#[test]
fn changing_page_size_rewinds_to_first_page() {
    let rows = numbers(100);
    let sizes = Rc::new(RefCell::new(Vec::new()));
    let seen_sizes = Rc::clone(&sizes);
    let (controller, _) = client_list(rows.clone(), ListConfig::default(), DeviceClass::Desktop);
    let mut controller = controller.with_callbacks(
        ListCallbacks::new().on_page_size_change(move |size| seen_sizes.borrow_mut().push(size)),
    );

    let first = controller.start().expect("start should fetch");
    controller.settle(first, Ok(slice_page(&rows, 1, 10)));
    let third = controller
        .change_page(3)
        .expect("change_page should be allowed")
        .expect("page 3 should fetch");
    controller.settle(third, Ok(slice_page(&rows, 3, 10)));

    let ticket = controller
        .change_page_size(20)
        .expect("change_page_size should be allowed")
        .expect("new size should fetch");

    assert_eq!(ticket.page_num(), 1);
    assert_eq!(ticket.params.page_size(), Some(20));
    assert_eq!(*sizes.borrow(), vec![20]);

    controller.settle(ticket, Ok(slice_page(&rows, 1, 20)));
    let payload = controller.payload();
    assert_eq!(payload.page_num, 1);
    assert_eq!(payload.page_size, 20);
    assert_eq!(payload.list.len(), 20);

    let err = controller
        .change_page_size(0)
        .expect_err("zero page size should be rejected");
    assert_eq!(err, ListError::InvalidPageSize(0));
}

#[test]
fn failed_fetch_keeps_previous_page_and_reports_error() {
    let rows = numbers(30);
    let errors = Rc::new(RefCell::new(Vec::new()));
    let seen_errors = Rc::clone(&errors);
    let (controller, _) = client_list(rows.clone(), ListConfig::default(), DeviceClass::Desktop);
    let mut controller = controller.with_callbacks(
        ListCallbacks::new().on_error(move |err: &FetchError| seen_errors.borrow_mut().push(err.clone())),
    );

    let first = controller.start().expect("start should fetch");
    controller.settle(first, Ok(slice_page(&rows, 1, 10)));
    let second = controller
        .change_page(2)
        .expect("change_page should be allowed")
        .expect("page 2 should fetch");

    let failure = FetchError::Business {
        code: 500,
        message: "boom".to_string(),
    };
    let settlement = controller.settle(second, Err(failure.clone()));

    assert_eq!(settlement, Settlement::Failed(failure.clone()));
    assert_eq!(*errors.borrow(), vec![failure.clone()]);
    assert_eq!(controller.last_error(), Some(&failure));

    let payload = controller.payload();
    assert_eq!(payload.list, (1..=10).collect::<Vec<_>>(), "stale data stays visible");
    assert!(!payload.loading);
}

#[test]
fn failed_page_is_fetched_again_when_requested_again() {
    let rows = numbers(30);
    let (mut controller, _) = client_list(rows.clone(), ListConfig::default(), DeviceClass::Desktop);
    let first = controller.start().expect("start should fetch");
    controller.settle(first, Ok(slice_page(&rows, 1, 10)));
    let second = controller
        .change_page(2)
        .expect("change_page should be allowed")
        .expect("page 2 should fetch");
    controller.settle(second, Err(FetchError::Transport("offline".to_string())));

    let visible = controller.payload().page_num;
    assert_eq!(visible, 1, "last good page stays visible");

    let retry = controller
        .change_page(visible + 1)
        .expect("change_page should be allowed")
        .expect("failed page should be fetched again");
    assert_eq!(retry.page_num(), 2);
    assert!(controller.last_error().is_none(), "a new fetch clears the error");

    assert_eq!(
        controller.settle(retry, Ok(slice_page(&rows, 2, 10))),
        Settlement::Applied
    );
    let payload = controller.payload();
    assert_eq!(payload.page_num, 2);
    assert_eq!(payload.list, (11..=20).collect::<Vec<_>>());
    assert_eq!(
        controller.change_page(2).expect("change_page should be allowed"),
        None,
        "once applied, the same page is a no-op again"
    );
}

#[test]
fn data_change_fires_only_when_payload_changes() {
    let rows = numbers(30);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&changes);
    let (controller, _) = client_list(rows.clone(), ListConfig::default(), DeviceClass::Desktop);
    let mut controller = controller.with_callbacks(ListCallbacks::new().on_data_change(
        move |change| seen.borrow_mut().push(change.payload.loading),
    ));

    let first = controller.start().expect("start should fetch");
    controller.settle(first, Ok(slice_page(&rows, 1, 10)));
    assert_eq!(*changes.borrow(), vec![true, false]);

    assert!(controller.set_filters(QueryParams::new()).is_none());
    assert_eq!(
        controller.change_page(1).expect("change_page should be allowed"),
        None
    );
    assert_eq!(changes.borrow().len(), 2, "no-op transitions emit nothing");
}

#[test]
fn data_change_carries_the_raw_page() {
    let rows = numbers(12);
    let raw_pages = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&raw_pages);
    let (controller, _) = client_list(rows.clone(), ListConfig::default(), DeviceClass::Desktop);
    let mut controller = controller.with_callbacks(ListCallbacks::new().on_data_change(
        move |change| seen.borrow_mut().push(change.raw.clone()),
    ));

    let first = controller.start().expect("start should fetch");
    controller.settle(first, Ok(slice_page(&rows, 1, 10)));

    let last = raw_pages.borrow().last().cloned().flatten();
    assert_eq!(last, Some(slice_page(&rows, 1, 10)));
}

#[test]
fn tablet_list_serves_visited_pages_from_cache() {
    let rows = numbers(30);
    let (mut controller, _) = client_list(rows.clone(), ListConfig::default(), DeviceClass::Tablet);
    assert_eq!(
        controller.mode(),
        FetchMode::ClientPaged { layout: PageLayout::Positional }
    );

    let first = controller.start().expect("start should fetch");
    controller.settle(first, Ok(slice_page(&rows, 1, 10)));
    let second = controller
        .change_page(2)
        .expect("change_page should be allowed")
        .expect("page 2 should fetch");
    controller.settle(second, Ok(slice_page(&rows, 2, 10)));

    let back = controller.change_page(1).expect("change_page should be allowed");

    assert!(back.is_none(), "cached page should not be fetched again");
    let payload = controller.payload();
    assert_eq!(payload.page_num, 1);
    assert_eq!(payload.list, (1..=20).collect::<Vec<_>>());
}

#[test]
fn filter_change_on_tablet_drops_cached_pages() {
    let rows = numbers(30);
    let (mut controller, _) = client_list(rows.clone(), ListConfig::default(), DeviceClass::Tablet);
    let first = controller.start().expect("start should fetch");
    controller.settle(first, Ok(slice_page(&rows, 1, 10)));

    let ticket = controller
        .set_filters(QueryParams::new().with(KEYWORD_KEY, "lamp"))
        .expect("new filters should fetch");

    assert_eq!(ticket.page_num(), 1);
    assert_eq!(ticket.params.get(KEYWORD_KEY), Some(&ParamValue::from("lamp")));
    controller.settle(ticket, Ok(slice_page(&rows[..3], 1, 10)));
    assert_eq!(controller.payload().list, vec![1, 2, 3]);
}

#[test]
fn mobile_list_appends_until_total_is_reached() {
    let rows = vec!['a', 'b', 'c', 'd', 'e'];
    let loads = Rc::new(RefCell::new(Vec::new()));
    let seen_loads = Rc::clone(&loads);
    let (controller, _) = client_list(
        rows.clone(),
        ListConfig::default().with_page_size(2),
        DeviceClass::Mobile,
    );
    let mut controller = controller.with_callbacks(
        ListCallbacks::new().on_load_more(move |page, size| seen_loads.borrow_mut().push((page, size))),
    );
    assert_eq!(controller.mode(), FetchMode::ClientInfinite);

    let first = controller.start().expect("start should fetch");
    assert_eq!(first.kind, FetchKind::Append);
    controller.settle(first, Ok(slice_page(&rows, 1, 2)));
    assert_eq!(controller.payload().list, vec!['a', 'b']);

    let second = controller.request_next_page().expect("page 2 should fetch");
    assert!(
        controller.request_next_page().is_none(),
        "no second request while one is in flight"
    );
    controller.settle(second, Ok(slice_page(&rows, 2, 2)));
    let payload = controller.payload();
    assert_eq!(payload.list, vec!['a', 'b', 'c', 'd']);
    assert!(payload.has_more, "5 > 4");

    let third = controller
        .on_sentinel_visible(true)
        .expect("visible sentinel should fetch page 3");
    controller.settle(third, Ok(slice_page(&rows, 3, 2)));
    let payload = controller.payload();
    assert_eq!(payload.list, vec!['a', 'b', 'c', 'd', 'e']);
    assert!(!payload.has_more, "5 > 6 is false");

    assert!(controller.request_next_page().is_none());
    assert!(controller.on_sentinel_visible(true).is_none());
    assert_eq!(*loads.borrow(), vec![(2, 2), (3, 2)]);
}

#[test]
fn mobile_filter_change_restarts_accumulation() {
    let rows = numbers(9);
    let (mut controller, _) = client_list(
        rows.clone(),
        ListConfig::default().with_page_size(3),
        DeviceClass::Mobile,
    );
    let first = controller.start().expect("start should fetch");
    controller.settle(first, Ok(slice_page(&rows, 1, 3)));
    let in_flight = controller.request_next_page().expect("page 2 should fetch");

    let restart = controller
        .set_filters(QueryParams::new().with(KEYWORD_KEY, "x"))
        .expect("new filters should fetch page 1");
    assert_eq!(restart.page_num(), 1);
    assert!(controller.payload().list.is_empty());

    assert_eq!(
        controller.settle(in_flight, Ok(slice_page(&rows, 2, 3))),
        Settlement::Stale
    );
    controller.settle(restart, Ok(slice_page(&rows[..2], 1, 3)));
    assert_eq!(controller.payload().list, vec![1, 2]);
    assert!(!controller.payload().has_more);
}

#[test]
fn mobile_list_rejects_page_navigation() {
    let (mut controller, _) = client_list(numbers(9), ListConfig::default(), DeviceClass::Mobile);

    let err = controller.change_page(2).expect_err("paging is unavailable");
    assert_eq!(
        err,
        ListError::UnsupportedInMode {
            operation: "change_page",
            mode: FetchMode::ClientInfinite,
        }
    );
    assert!(controller.change_page_size(20).is_err());
}

#[test]
fn switching_to_mobile_restarts_in_infinite_mode() {
    let rows = numbers(50);
    let (mut controller, _) = client_list(rows.clone(), ListConfig::default(), DeviceClass::Desktop);
    let first = controller.start().expect("start should fetch");
    controller.settle(first, Ok(slice_page(&rows, 1, 10)));
    let third = controller
        .change_page(3)
        .expect("change_page should be allowed")
        .expect("page 3 should fetch");
    controller.settle(third, Ok(slice_page(&rows, 3, 10)));

    let restart = controller
        .set_device(DeviceClass::Mobile)
        .expect("mode change should restart the list");

    assert_eq!(controller.mode(), FetchMode::ClientInfinite);
    assert_eq!(restart.kind, FetchKind::Append);
    assert_eq!(restart.page_num(), 1);
    let payload = controller.payload();
    assert!(payload.list.is_empty());
    assert!(payload.loading);
    assert_eq!(payload.page_num, 1);

    assert!(
        controller.set_device(DeviceClass::Mobile).is_none(),
        "same device is a no-op"
    );
}

#[test]
fn infinite_append_can_be_disabled_for_mobile() {
    let (controller, _) = client_list(
        numbers(5),
        ListConfig::default().with_infinite_append_on_mobile(false),
        DeviceClass::Mobile,
    );
    assert_eq!(
        controller.mode(),
        FetchMode::ClientPaged { layout: PageLayout::Positional }
    );
}

#[test]
fn disabled_list_never_fetches() {
    let (mut controller, _) = client_list(
        numbers(30),
        ListConfig::default().with_enabled(false),
        DeviceClass::Desktop,
    );

    assert!(controller.start().is_none());
    assert!(controller
        .set_filters(QueryParams::new().with(KEYWORD_KEY, "x"))
        .is_none());
    assert!(!controller.payload().loading);
}

#[test]
fn server_list_hands_paging_to_parent() {
    let queries = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&queries);
    let page = ServerPage::new((1..=10).collect::<Vec<u32>>(), 35).at_page(1, 10);
    let mut controller =
        ListController::new(ListSource::Server(page), ListConfig::default(), DeviceClass::Mobile)
            .expect("server list should build")
            .with_callbacks(
                ListCallbacks::new().on_query_change(move |params: &QueryParams| {
                    seen.borrow_mut().push(params.page_num())
                }),
            );

    assert_eq!(controller.mode(), FetchMode::ServerData);
    assert!(controller.start().is_none());
    assert!(controller.payload().has_more);

    let ticket = controller.change_page(2).expect("change_page should be allowed");
    assert!(ticket.is_none(), "server lists never fetch themselves");
    assert_eq!(*queries.borrow(), vec![Some(2)]);

    controller.replace_server_page(ServerPage::new((11..=20).collect(), 35).at_page(2, 10));
    let payload = controller.payload();
    assert_eq!(payload.page_num, 2);
    assert_eq!(payload.list.first(), Some(&11));
    assert_eq!(
        controller.raw().map(|raw| raw.page_num),
        Some(2),
        "raw page mirrors the server page"
    );
}

#[test]
fn client_source_needs_a_fetch_capability() {
    let err = ClientSource::<u32>::resolve(None, Some("/admin/account/page/list".into()), None)
        .err()
        .expect("url without helper should be rejected");
    assert_eq!(err, ListError::MissingFetchCapability);
}

#[test]
fn prefetch_returns_first_page_payload() {
    let rows = numbers(23);
    let (fetcher, requests) = serving(rows);
    let source = ListSource::Client(
        ClientSource::from_request(fetcher).with_params(QueryParams::new().with(KEYWORD_KEY, "k")),
    );

    let payload = block_on(prefetch_first_page(&source, &ListConfig::default().with_page_size(5)))
        .expect("prefetch should succeed");

    assert_eq!(payload.list, vec![1, 2, 3, 4, 5]);
    assert_eq!(payload.total, 23);
    assert!(payload.has_more);
    assert!(!payload.loading);
    assert_eq!(
        requests.borrow()[0].get(KEYWORD_KEY),
        Some(&ParamValue::from("k"))
    );
}

#[test]
fn prefetch_passes_server_pages_through() {
    let source = ListSource::Server(ServerPage::new(vec![1_u32, 2], 2));

    let payload = block_on(prefetch_first_page(&source, &ListConfig::default()))
        .expect("prefetch should succeed");

    assert_eq!(payload.list, vec![1, 2]);
    assert!(!payload.has_more);
    assert_eq!(payload.page_num, 1);
}
