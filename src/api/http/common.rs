// src/api/http/common.rs
// Helpers shared by the REST handlers: the success envelope, the single-user
// placeholder id, and pagination/date-filter resolution for history queries.

use axum::Json;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::error::{ApiResult, IntoApiErrorOption};
use crate::config::CONFIG;

// Single-user deployment; replaced once auth exists.
pub const DEFAULT_USER_ID: &str = "default-user";

/// `{"status": "success", "data": ...}`
pub fn success_data<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": data,
    }))
}

/// `{"status": "success", "message": ...}`
pub fn success_message(message: &str) -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": message,
    }))
}

// Strict YYYY-MM-DD; chrono alone would accept unpadded fields.
static DATE_PARAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap_or_else(|e| panic!("invalid date regex: {e}"))
});

pub fn parse_date_param(raw: &str) -> Option<NaiveDate> {
    if !DATE_PARAM_RE.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Query parameters accepted by the paginated history endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Resolved paging window with parsed date bounds.
#[derive(Debug, Clone, Copy)]
pub struct HistoryFilter {
    pub page: i64,
    pub limit: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

impl HistoryQuery {
    /// Apply paging defaults and validate the optional date bounds.
    pub fn resolve(&self) -> ApiResult<HistoryFilter> {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(CONFIG.page_default_limit as i64)
            .clamp(1, CONFIG.page_max_limit as i64);

        let start_date = match self.start_date.as_deref() {
            Some(raw) => Some(
                parse_date_param(raw).ok_or_bad_request("Invalid startDate format. Use YYYY-MM-DD")?,
            ),
            None => None,
        };

        let end_date = match self.end_date.as_deref() {
            Some(raw) => Some(
                parse_date_param(raw).ok_or_bad_request("Invalid endDate format. Use YYYY-MM-DD")?,
            ),
            None => None,
        };

        Ok(HistoryFilter {
            page,
            limit,
            start_date,
            end_date,
        })
    }
}
