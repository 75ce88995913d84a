use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use inventory_core::{
    product::Product,
    storage::{require_institution_code_format, PageRequest, RepositoryError, DEFAULT_PAGE_SIZE},
};

use crate::{
    handlers::AppError,
    models::{ProductRequest, ProductResponse},
    state::AppState,
};

/// Query parameters for listing all products.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn into_responses(products: Vec<Product>) -> Json<Vec<ProductResponse>> {
    Json(products.into_iter().map(ProductResponse::from).collect())
}

/// List one page of all products (GET /mngt).
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let page = PageRequest::new(query.page, query.page_size).map_err(RepositoryError::from)?;
    let products = state
        .products
        .list_products(page, &state.request_token())
        .await?;

    Ok(into_responses(products))
}

/// List every product of an institution (GET /mngt/{institution_code}).
pub async fn list_by_institution(
    State(state): State<AppState>,
    Path(institution_code): Path<String>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    require_institution_code_format(&institution_code)?;

    let products = state
        .products
        .list_products_by_institution(&institution_code, &state.request_token())
        .await?;

    Ok(into_responses(products))
}

/// Search an institution's products (POST /mngt/search).
pub async fn search_products(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let query = payload.into_query();
    let products = state
        .products
        .query_products(&query, &state.request_token())
        .await?;

    Ok(into_responses(products))
}

/// Register a new product (PUT /mngt/{institution_code}).
pub async fn insert_product(
    State(state): State<AppState>,
    Path(institution_code): Path<String>,
    Json(payload): Json<ProductRequest>,
) -> Result<StatusCode, AppError> {
    require_institution_code_format(&institution_code)?;
    let product = payload.for_institution(&institution_code)?.into_product();

    state
        .products
        .insert_product(&product, &state.request_token())
        .await?;

    Ok(StatusCode::OK)
}

/// Update an existing product (POST /mngt/{institution_code}).
pub async fn update_product(
    State(state): State<AppState>,
    Path(institution_code): Path<String>,
    Json(payload): Json<ProductRequest>,
) -> Result<StatusCode, AppError> {
    require_institution_code_format(&institution_code)?;
    let product = payload.for_institution(&institution_code)?.into_product();

    state
        .products
        .update_product(&product, &state.request_token())
        .await?;

    Ok(StatusCode::OK)
}
