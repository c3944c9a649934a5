//! Sales history and checkout.
//!
//! `POST /api/sales` is the end of the checkout flow. The body carries the
//! client's own `total` and `change`; the store recomputes both from the
//! items and refuses a sale whose figures disagree by more than a cent.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ValidJson, ValidQuery};
use crate::routes::{parse_id, DateRangeQuery};
use crate::AppState;
use pdv_core::{NewSale, Sale};

/// `GET /api/sales[?startDate=&endDate=]`
pub async fn list_sales(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<DateRangeQuery>,
) -> ApiResult<Json<Vec<Sale>>> {
    let sales = match query.range()? {
        Some(range) => state.store.sales().list_by_date_range(range).await?,
        None => state.store.sales().list_all().await?,
    };
    Ok(Json(sales))
}

pub async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Sale>> {
    let id = parse_id(&id, "Sale")?;
    state
        .store
        .sales()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Sale"))
}

pub async fn create_sale(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<NewSale>,
) -> ApiResult<(StatusCode, Json<Sale>)> {
    let sale = state.store.sales().create(input).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}
