use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const PAGE_NUM_KEY: &str = "pageNum";
pub const PAGE_SIZE_KEY: &str = "pageSize";
pub const KEYWORD_KEY: &str = "keyword";

pub const DEFAULT_PAGE_NUM: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            ParamValue::Int(value) => u32::try_from(*value).ok(),
            ParamValue::Float(value) if value.is_finite() && *value >= 0.0 => {
                Some(value.trunc() as u32)
            }
            ParamValue::Text(value) => value.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(value) => write!(f, "{value}"),
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::Float(value) => write!(f, "{value}"),
            ParamValue::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Query snapshot handed to every fetch. `pageNum` and `pageSize` are reserved keys,
/// everything else is a filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, ParamValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn page_num(&self) -> Option<u32> {
        self.get(PAGE_NUM_KEY).and_then(ParamValue::as_u32)
    }

    pub fn page_size(&self) -> Option<u32> {
        self.get(PAGE_SIZE_KEY)
            .and_then(ParamValue::as_u32)
            .filter(|size| *size > 0)
    }

    pub fn with_page(mut self, page_num: u32) -> Self {
        self.insert(PAGE_NUM_KEY, page_num);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.insert(PAGE_SIZE_KEY, page_size);
        self
    }

    /// Everything except the reserved paging keys.
    pub fn filters(&self) -> QueryParams {
        QueryParams(
            self.0
                .iter()
                .filter(|(key, _)| !is_reserved_key(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    /// Entries of `other` override entries of `self`.
    pub fn merge(mut self, other: &QueryParams) -> Self {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect()
    }
}

impl FromIterator<(String, ParamValue)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        QueryParams(iter.into_iter().collect())
    }
}

pub fn is_reserved_key(key: &str) -> bool {
    key == PAGE_NUM_KEY || key == PAGE_SIZE_KEY
}

/// Canonical page result every backend shape is normalized into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub list: Vec<T>,
    pub total: u64,
    pub page_num: u32,
    pub page_size: u32,
    #[serde(default)]
    pub pages: u32,
}

impl<T> PageResponse<T> {
    pub fn empty(page_num: u32, page_size: u32) -> Self {
        Self {
            list: Vec::new(),
            total: 0,
            page_num,
            page_size,
            pages: 0,
        }
    }

    pub fn new(list: Vec<T>, total: u64, page_num: u32, page_size: u32) -> Self {
        let pages = page_count(total, page_size);
        Self {
            list,
            total,
            page_num,
            page_size,
            pages,
        }
    }
}

/// Loose page body as backends send it: either `records/total/size/current`
/// or `list/total/pageNum/pageSize`, both optionally with `pages`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageShape<T> {
    #[serde(default)]
    pub records: Option<Vec<T>>,
    #[serde(default)]
    pub list: Option<Vec<T>>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub current: Option<u32>,
    #[serde(default)]
    pub page_num: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
}

impl<T> Default for PageShape<T> {
    fn default() -> Self {
        Self {
            records: None,
            list: None,
            total: None,
            size: None,
            current: None,
            page_num: None,
            page_size: None,
            pages: None,
        }
    }
}

impl<T> PageShape<T> {
    pub fn is_recognized(&self) -> bool {
        self.records.is_some() || self.list.is_some()
    }

    pub fn normalize(self, requested_page: u32, requested_size: u32) -> PageResponse<T> {
        let total = self.total.unwrap_or(0);
        let pages = self.pages.unwrap_or(0);

        if let Some(records) = self.records {
            return PageResponse {
                list: records,
                total,
                page_num: self.current.unwrap_or(requested_page),
                page_size: self.size.filter(|s| *s > 0).unwrap_or(requested_size),
                pages,
            };
        }

        PageResponse {
            list: self.list.unwrap_or_default(),
            total,
            page_num: self.page_num.unwrap_or(requested_page),
            page_size: self
                .page_size
                .filter(|s| *s > 0)
                .unwrap_or(requested_size),
            pages,
        }
    }
}

/// What the presentation layer receives.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload<T> {
    pub list: Vec<T>,
    pub total: u64,
    pub page_num: u32,
    pub page_size: u32,
    pub loading: bool,
    pub has_more: bool,
}

impl<T> RenderPayload<T> {
    pub fn empty(page_size: u32) -> Self {
        Self {
            list: Vec::new(),
            total: 0,
            page_num: DEFAULT_PAGE_NUM,
            page_size,
            loading: false,
            has_more: false,
        }
    }

    pub fn total_pages(&self) -> u32 {
        page_count(self.total, self.page_size).max(1)
    }
}

/// Payload delivered to `on_data_change`, with the page it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct DataChange<T> {
    pub payload: RenderPayload<T>,
    pub raw: Option<PageResponse<T>>,
}

pub fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
