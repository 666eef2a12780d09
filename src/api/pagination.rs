//! Paginated listing responses
//!
//! The API answers listings either with a Laravel-style paginator object or,
//! on some endpoints, a bare JSON array. Both are accepted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::audit::AuditRecord;
use crate::error::{AssetDeskError, AssetDeskResult};

/// Position of a page within a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
    pub from: u64,
    pub to: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            total: 0,
            from: 0,
            to: 0,
        }
    }
}

impl Pagination {
    /// Read paginator fields, defaulting any that are missing or invalid
    pub fn from_body(body: &Value) -> Self {
        let defaults = Self::default();
        let field = |name: &str| body.get(name).and_then(Value::as_u64).filter(|n| *n > 0);

        Self {
            current_page: field("current_page").map_or(defaults.current_page, clamp_u32),
            last_page: field("last_page").map_or(defaults.last_page, clamp_u32),
            total: field("total").unwrap_or(defaults.total),
            from: field("from").unwrap_or(defaults.from),
            to: field("to").unwrap_or(defaults.to),
        }
    }

    /// Whether `page` exists in this listing
    pub fn can_go_to(&self, page: u32) -> bool {
        page >= 1 && page <= self.last_page
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }
}

fn clamp_u32(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Parse a listing body, converting each item with `convert`
    ///
    /// Items `convert` rejects are skipped with a warning.
    pub fn from_body(body: Value, convert: impl Fn(Value) -> Option<T>) -> Self {
        let (items, pagination) = match body {
            Value::Array(items) => {
                let count = items.len() as u64;
                let pagination = Pagination {
                    total: count,
                    from: u64::from(count > 0),
                    to: count,
                    ..Pagination::default()
                };
                (items, pagination)
            }
            Value::Object(mut obj) => {
                let items = match obj.remove("data") {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                };
                (items, Pagination::from_body(&Value::Object(obj)))
            }
            _ => (Vec::new(), Pagination::default()),
        };

        let received = items.len();
        let data: Vec<T> = items.into_iter().filter_map(convert).collect();
        if data.len() != received {
            tracing::warn!(
                skipped = received - data.len(),
                "Skipped malformed items in listing"
            );
        }

        Self { data, pagination }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Parse an `/audits` listing body
pub fn parse_audit_page(body: Value) -> Page<AuditRecord> {
    Page::from_body(body, AuditRecord::from_value)
}

/// Filters for the `/audits` listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditQuery {
    pub page: Option<u32>,
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
}

impl AuditQuery {
    /// Build a query, validating the page number and `YYYY-MM-DD` date
    pub fn new(
        page: Option<u32>,
        search: Option<String>,
        date: Option<&str>,
    ) -> AssetDeskResult<Self> {
        if page == Some(0) {
            return Err(AssetDeskError::Validation(
                "Page numbers start at 1".into(),
            ));
        }

        let date = date.map(parse_query_date).transpose()?;
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self { page, search, date })
    }

    /// Query-string pairs in the order the API documents them
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(date) = self.date {
            pairs.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

fn parse_query_date(raw: &str) -> AssetDeskResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AssetDeskError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
    })
}
