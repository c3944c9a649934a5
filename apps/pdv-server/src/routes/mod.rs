//! # API Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          /api route table                               │
//! │                                                                         │
//! │  auth      POST /login                                                  │
//! │  catalog   GET|POST /categories      GET /categories/{id}               │
//! │            GET|POST /products        GET /products/{id}                 │
//! │  sales     GET|POST /sales           GET /sales/{id}                    │
//! │  cash      GET|POST /cash-transactions                                  │
//! │  register  GET|POST /daily-registers GET /register-summary              │
//! │  health    GET /health                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod cash;
pub mod catalog;
pub mod register;
pub mod sales;

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use pdv_core::DateRange;

/// Builds the `/api` router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/login", post(auth::login))
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route("/categories/{id}", get(catalog::get_category))
        .route(
            "/products",
            get(catalog::list_products).post(catalog::create_product),
        )
        .route("/products/{id}", get(catalog::get_product))
        .route("/sales", get(sales::list_sales).post(sales::create_sale))
        .route("/sales/{id}", get(sales::get_sale))
        .route(
            "/cash-transactions",
            get(cash::list_transactions).post(cash::create_transaction),
        )
        .route(
            "/daily-registers",
            get(register::list_registers).post(register::close_register),
        )
        .route("/register-summary", get(register::summary))
}

/// `GET /api/health` with the current table sizes.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let counts = state.store.counts().await;
    Json(json!({ "status": "ok", "counts": counts }))
}

// =============================================================================
// Shared Parameter Parsing
// =============================================================================

/// Parses an `{id}` path segment.
///
/// A segment that is not an integer cannot name an existing record, so it
/// reports the entity as not found rather than as a bad request.
pub(crate) fn parse_id(raw: &str, entity: &str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::not_found(entity))
}

/// `?startDate=&endDate=` on the history listings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRangeQuery {
    /// `None` when neither bound is given; an error when only one is.
    pub fn range(&self) -> ApiResult<Option<DateRange>> {
        match (non_blank(&self.start_date), non_blank(&self.end_date)) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => Ok(Some(DateRange::new(
                parse_bound(start, "startDate", Bound::Start)?,
                parse_bound(end, "endDate", Bound::End)?,
            ))),
            _ => Err(ApiError::validation(
                "startDate and endDate must be given together",
            )),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Start,
    End,
}

/// RFC 3339 timestamp, or a plain date covering the whole UTC day.
fn parse_bound(raw: &str, field: &str, bound: Bound) -> ApiResult<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::validation(format!("Invalid {}: '{}'", field, raw)))?;

    let time = match bound {
        Bound::Start => NaiveTime::MIN,
        Bound::End => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
            .ok_or_else(|| ApiError::Internal("end of day out of range".into()))?,
    };
    Ok(date.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(start: Option<&str>, end: Option<&str>) -> DateRangeQuery {
        DateRangeQuery {
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
        }
    }

    #[test]
    fn test_no_bounds_means_unfiltered() {
        assert!(query(None, None).range().unwrap().is_none());
        assert!(query(Some(" "), Some("")).range().unwrap().is_none());
    }

    #[test]
    fn test_plain_dates_cover_whole_days() {
        let range = query(Some("2025-03-01"), Some("2025-03-01"))
            .range()
            .unwrap()
            .unwrap();

        assert_eq!(range.start.to_rfc3339(), "2025-03-01T00:00:00+00:00");
        assert!(range.contains("2025-03-01T23:59:59Z".parse().unwrap()));
        assert!(!range.contains("2025-03-02T00:00:00Z".parse().unwrap()));
    }

    #[test]
    fn test_rfc3339_bounds_are_exact() {
        let range = query(Some("2025-03-01T10:00:00-03:00"), Some("2025-03-01T14:00:00Z"))
            .range()
            .unwrap()
            .unwrap();
        assert_eq!(range.start.to_rfc3339(), "2025-03-01T13:00:00+00:00");
    }

    #[test]
    fn test_bad_bounds_rejected() {
        assert!(matches!(
            query(Some("2025-03-01"), None).range(),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            query(Some("yesterday"), Some("2025-03-01")).range(),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12", "Sale").unwrap(), 12);
        assert!(matches!(parse_id("abc", "Sale"), Err(ApiError::NotFound(m)) if m == "Sale not found"));
    }
}
