use super::RecordOf;
use crate::{
    ApiApplication, ApiError,
    config::AxumConfig,
    extract::Query,
    response::{Reply, success},
};
use axum::{Extension, extract::State, http::StatusCode};
use catalog_core::{
    models::{ProductPage, ProductQuery},
    ports::ProductRepository as _,
};
use std::sync::Arc;

/// Search the catalog.
///
/// Filters combine: `keyword` matches the product name case-insensitively,
/// `category` must match exactly, and the `*_gte` / `*_lte` bounds are
/// inclusive. Results come `page_limit` at a time; `page` starts at 1.
///
/// `total_products` counts the whole catalog, not just the matches.
///
/// # Returns
///
/// - `200 OK`: One page of products
/// - `400 Bad Request`: The query string is malformed
/// - `500 Internal Server Error`: Database query failed
pub(crate) async fn list_products<T: ApiApplication>(
    State(app): State<T>,
    Extension(config): Extension<Arc<AxumConfig>>,
    Query(query): Query<ProductQuery>,
) -> Reply<ProductPage<RecordOf<T>>> {
    let db = app.database();

    let products = db
        .query_products(&query, config.page_limit)
        .await
        .map_err(ApiError::storage("query products"))?;

    let total_products = db
        .count_products()
        .await
        .map_err(ApiError::storage("count products"))?;

    success(
        StatusCode::OK,
        "All Products fetched successfully",
        ProductPage {
            total_products,
            result_per_page: config.page_limit,
            products,
        },
    )
}
