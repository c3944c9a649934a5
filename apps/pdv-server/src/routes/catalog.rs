//! Categories and products.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::extract::{ValidJson, ValidQuery};
use crate::routes::parse_id;
use crate::AppState;
use pdv_core::{Category, NewCategory, NewProduct, Product};

// =============================================================================
// Categories
// =============================================================================

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.store.categories().list_all().await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    let id = parse_id(&id, "Category")?;
    state
        .store
        .categories()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Category"))
}

pub async fn create_category(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = state.store.categories().create(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category_id: Option<String>,
}

/// `GET /api/products[?categoryId=]`
pub async fn list_products(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<ProductQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    let category = query
        .category_id
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty());

    let products = match category {
        Some(raw) => {
            let category_id = raw
                .parse::<i64>()
                .map_err(|_| ApiError::validation(format!("Invalid categoryId: '{}'", raw)))?;
            state.store.products().list_by_category(category_id).await?
        }
        None => state.store.products().list_all().await?,
    };

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id = parse_id(&id, "Product")?;
    state
        .store
        .products()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product"))
}

pub async fn create_product(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = state.store.products().create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}
