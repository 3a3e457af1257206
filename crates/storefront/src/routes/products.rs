//! Product catalog route handlers.
//!
//! The catalog is an external collaborator; these handlers proxy it and
//! surface fetch failures as retryable errors without touching cart or
//! order state.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use karvaan_core::ProductId;

use crate::catalog::{ProductPage, ProductRecord};
use crate::error::Result;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: u32 = 30;

/// Catalog pagination query.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

/// List catalog products.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductPage>> {
    let page = state
        .catalog()
        .list_products(
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            query.skip.unwrap_or(0),
        )
        .await?;
    Ok(Json(page))
}

/// Show a single catalog product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductRecord>> {
    let product = state.catalog().get_product(ProductId::new(id)).await?;
    Ok(Json(product))
}
