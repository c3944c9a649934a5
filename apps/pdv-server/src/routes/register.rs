//! Register summary and close-of-day.

use axum::{extract::State, http::StatusCode, Json};

use crate::error::ApiResult;
use crate::extract::{ValidJson, ValidQuery};
use crate::routes::DateRangeQuery;
use crate::AppState;
use pdv_core::{CloseRegisterRequest, DailyRegister, RegisterSummary};

/// `GET /api/register-summary`
pub async fn summary(State(state): State<AppState>) -> ApiResult<Json<RegisterSummary>> {
    Ok(Json(state.store.register().summary().await?))
}

/// `GET /api/daily-registers[?startDate=&endDate=]`
pub async fn list_registers(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<DateRangeQuery>,
) -> ApiResult<Json<Vec<DailyRegister>>> {
    let repo = state.store.daily_registers();
    let registers = match query.range()? {
        Some(range) => repo.list_by_date_range(range).await?,
        None => repo.list_all().await?,
    };
    Ok(Json(registers))
}

/// `POST /api/daily-registers`
///
/// Only the count, operator and free text are read from the body. Balances
/// and per-method totals come from the summary taken inside the close.
pub async fn close_register(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<CloseRegisterRequest>,
) -> ApiResult<(StatusCode, Json<DailyRegister>)> {
    let record = state.store.register().close(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
