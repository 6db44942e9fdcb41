use super::{Auth, Id, ProductIdOf, RecordOf, require_admin};
use crate::{
    ApiApplication, ApiError,
    extract::{Json, Path},
    response::{Reply, success},
};
use axum::{extract::State, http::StatusCode};
use catalog_core::{
    models::{ProductData, ProductPatch},
    ports::ProductRepository as _,
};
use tracing::{Level, event};

/// Create a new product.
///
/// # Authorization
///
/// Requires `can_manage_products` permission.
///
/// # Returns
///
/// - `201 Created`: The product as stored
/// - `400 Bad Request`: The product data is invalid
/// - `401 Unauthorized`: The caller could not be identified
/// - `403 Forbidden`: Missing management permissions
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn create_product<T: ApiApplication>(
    State(app): State<T>,
    auth: Auth,
    Json(product_data): Json<ProductData>,
) -> Reply<RecordOf<T>> {
    let created_by = require_admin(&app, auth).await?;
    let product_data = product_data.validate()?;

    let product_id = app.generate_product_id(&product_data);
    let record = app
        .database()
        .create_product(product_id, created_by, product_data, app.now())
        .await
        .map_err(ApiError::storage("create product"))?;

    event!(Level::INFO, product_id = %record.id, "created product");
    success(
        StatusCode::CREATED,
        "Product created successfully",
        record,
    )
}

/// Retrieve a product, including its reviews.
///
/// # Returns
///
/// - `200 OK`: The product
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database query failed
pub(crate) async fn read_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id<ProductIdOf<T>>>,
) -> Reply<RecordOf<T>> {
    let record = app
        .database()
        .get_product(product_id)
        .await
        .map_err(ApiError::storage("get product"))?
        .ok_or(ApiError::NotFound("product"))?;

    success(
        StatusCode::OK,
        "Single Product fetched successfully",
        record,
    )
}

/// Update some or all of a product's data.
///
/// Fields absent from the body keep their current value. The merged product
/// is validated as a whole. A product's rating and reviews cannot be changed
/// here.
///
/// # Authorization
///
/// Requires `can_manage_products` permission.
///
/// # Returns
///
/// - `200 OK`: The product after the update
/// - `400 Bad Request`: The updated product would be invalid
/// - `401 Unauthorized`: The caller could not be identified
/// - `403 Forbidden`: Missing management permissions
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn update_product<T: ApiApplication>(
    State(app): State<T>,
    auth: Auth,
    Path(Id { product_id }): Path<Id<ProductIdOf<T>>>,
    Json(patch): Json<ProductPatch>,
) -> Reply<RecordOf<T>> {
    require_admin(&app, auth).await?;
    let db = app.database();

    let current = db
        .get_product(product_id.clone())
        .await
        .map_err(ApiError::storage("get product"))?
        .ok_or(ApiError::NotFound("product"))?;

    let product_data = patch.apply(current.data).validate()?;

    let record = db
        .update_product(product_id, product_data, app.now())
        .await
        .map_err(ApiError::storage("update product"))?
        .ok_or(ApiError::NotFound("product"))?;

    success(StatusCode::OK, "Product updated successfully", record)
}

/// Delete a product along with its reviews.
///
/// # Authorization
///
/// Requires `can_manage_products` permission.
///
/// # Returns
///
/// - `200 OK`: The product as it was before deletion
/// - `401 Unauthorized`: The caller could not be identified
/// - `403 Forbidden`: Missing management permissions
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn delete_product<T: ApiApplication>(
    State(app): State<T>,
    auth: Auth,
    Path(Id { product_id }): Path<Id<ProductIdOf<T>>>,
) -> Reply<RecordOf<T>> {
    require_admin(&app, auth).await?;

    let record = app
        .database()
        .delete_product(product_id)
        .await
        .map_err(ApiError::storage("delete product"))?
        .ok_or(ApiError::NotFound("product"))?;

    event!(Level::INFO, product_id = %record.id, "deleted product");
    success(StatusCode::OK, "Product deleted successfully", record)
}
