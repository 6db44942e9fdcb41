use super::{Auth, Id, ProductIdOf, RecordOf, ReviewIdOf, ReviewPath, UserIdOf, require_reviewer};
use crate::{
    ApiApplication, ApiError,
    extract::{Json, Path},
    response::{Reply, success},
};
use axum::{extract::State, http::StatusCode};
use catalog_core::{
    models::{Review, ReviewSubmission, remove_review, upsert_review},
    ports::ProductRepository as _,
};
use serde::Deserialize;
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use tracing::{Level, event};

type ReviewsOf<T> = Vec<Review<UserIdOf<T>, ReviewIdOf<T>>>;

/// Body of a review submission.
#[serde_as]
#[derive(Deserialize, schemars::JsonSchema)]
pub(crate) struct ReviewBody {
    /// The rating, as a number or a numeric string
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schemars(with = "f64")]
    rating: f64,
    /// Free-text comment
    #[serde(default)]
    comment: String,
}

/// List the reviews of a product.
///
/// # Returns
///
/// - `200 OK`: The reviews, oldest first
/// - `400 Bad Request`: The product id is malformed
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database query failed
pub(crate) async fn list_reviews<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id<ProductIdOf<T>>>,
) -> Reply<ReviewsOf<T>> {
    let record = app
        .database()
        .get_product(product_id)
        .await
        .map_err(ApiError::storage("get product"))?
        .ok_or(ApiError::NotFound("product"))?;

    success(StatusCode::OK, "Reviews fetched successfully", record.reviews)
}

/// Create or update the caller's review of a product.
///
/// A caller has at most one review per product: submitting again replaces
/// the rating and comment of the earlier review. The product's mean rating
/// and review count are recomputed either way.
///
/// # Returns
///
/// - `200 OK`: The product after the submission
/// - `400 Bad Request`: The rating is missing, not a number, or not finite
/// - `401 Unauthorized`: The caller could not be identified
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn submit_review<T: ApiApplication>(
    State(app): State<T>,
    auth: Auth,
    Path(Id { product_id }): Path<Id<ProductIdOf<T>>>,
    Json(ReviewBody { rating, comment }): Json<ReviewBody>,
) -> Reply<RecordOf<T>> {
    let reviewer = require_reviewer(&app, auth).await?;
    let submission = ReviewSubmission {
        reviewer,
        rating,
        comment,
    }
    .validate()?;
    let db = app.database();

    let record = db
        .get_product(product_id.clone())
        .await
        .map_err(ApiError::storage("get product"))?
        .ok_or(ApiError::NotFound("product"))?;

    let summary = upsert_review(record.reviews, submission, || app.generate_review_id());

    let record = db
        .replace_reviews(product_id, summary, app.now())
        .await
        .map_err(ApiError::storage("save reviews"))?
        .ok_or(ApiError::NotFound("product"))?;

    event!(
        Level::DEBUG,
        product_id = %record.id,
        num_of_reviews = record.num_of_reviews,
        ratings = record.ratings,
        "review submitted"
    );
    success(StatusCode::OK, "Review submitted successfully", record)
}

/// Delete a review from a product.
///
/// Any identified caller may delete any review. Deleting a review that does
/// not exist leaves the product unchanged and still succeeds.
///
/// # Returns
///
/// - `200 OK`: The product after the deletion
/// - `401 Unauthorized`: The caller could not be identified
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn delete_review<T: ApiApplication>(
    State(app): State<T>,
    auth: Auth,
    Path(ReviewPath {
        product_id,
        review_id,
    }): Path<ReviewPath<ProductIdOf<T>, ReviewIdOf<T>>>,
) -> Reply<RecordOf<T>> {
    require_reviewer(&app, auth).await?;
    let db = app.database();

    let record = db
        .get_product(product_id.clone())
        .await
        .map_err(ApiError::storage("get product"))?
        .ok_or(ApiError::NotFound("product"))?;

    let summary = remove_review(record.reviews, &review_id);

    let record = db
        .replace_reviews(product_id, summary, app.now())
        .await
        .map_err(ApiError::storage("save reviews"))?
        .ok_or(ApiError::NotFound("product"))?;

    success(StatusCode::OK, "Review deleted successfully", record)
}
