//! Till movements outside of sales: the opening float, adjustments,
//! withdrawals (negative amounts).

use axum::{extract::State, http::StatusCode, Json};

use crate::error::ApiResult;
use crate::extract::{ValidJson, ValidQuery};
use crate::routes::DateRangeQuery;
use crate::AppState;
use pdv_core::{CashTransaction, NewCashTransaction};

/// `GET /api/cash-transactions[?startDate=&endDate=]`
pub async fn list_transactions(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<DateRangeQuery>,
) -> ApiResult<Json<Vec<CashTransaction>>> {
    let repo = state.store.cash_transactions();
    let transactions = match query.range()? {
        Some(range) => repo.list_by_date_range(range).await?,
        None => repo.list_all().await?,
    };
    Ok(Json(transactions))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<NewCashTransaction>,
) -> ApiResult<(StatusCode, Json<CashTransaction>)> {
    let transaction = state.store.cash_transactions().create(input).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}
