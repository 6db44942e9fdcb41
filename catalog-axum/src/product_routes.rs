//! REST API endpoints for products and their reviews.
//!
//! Reading is open to anyone. Creating, updating and deleting products needs
//! an administrator; submitting or removing a review needs any identified
//! user.

use crate::{ApiApplication, ApiError};
use aide::{
    axum::{
        ApiRouter,
        routing::{delete_with, get_with},
    },
    transform::TransformOperation,
};
use axum_extra::TypedHeader;
use catalog_core::{
    models::Reviewer,
    ports::{Application, ProductRecordOf, Repository},
};
use headers::{Authorization, authorization::Bearer};

mod crud;
mod list;
mod reviews;

/// Path parameter for product-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
struct Id<T> {
    /// The unique identifier of the product
    product_id: T,
}

/// Path parameters for review-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
struct ReviewPath<P, R> {
    /// The unique identifier of the product
    product_id: P,
    /// The unique identifier of the review
    review_id: R,
}

type ProductIdOf<T> = <<T as Application>::Repository as Repository>::ProductId;
type ReviewIdOf<T> = <<T as Application>::Repository as Repository>::ReviewId;
type UserIdOf<T> = <<T as Application>::Repository as Repository>::UserId;
type RecordOf<T> = ProductRecordOf<<T as Application>::Repository>;

/// Creates a router with product- and review-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route(
            "/",
            get_with(list::list_products::<T>, products)
                .post_with(crud::create_product::<T>, admin),
        )
        .api_route(
            "/{product_id}",
            get_with(crud::read_product::<T>, products)
                .put_with(crud::update_product::<T>, admin)
                .delete_with(crud::delete_product::<T>, admin),
        )
        .api_route(
            "/{product_id}/reviews",
            get_with(reviews::list_reviews::<T>, review)
                .put_with(reviews::submit_review::<T>, review),
        )
        .api_route(
            "/{product_id}/reviews/{review_id}",
            delete_with(reviews::delete_review::<T>, review),
        )
}

fn products(op: TransformOperation) -> TransformOperation {
    op.tag("products")
}

fn admin(op: TransformOperation) -> TransformOperation {
    op.tag("products").tag("admin").security_requirement("jwt")
}

fn review(op: TransformOperation) -> TransformOperation {
    op.tag("reviews")
}

/// The bearer token of a request, if it sent one.
type Auth = Option<TypedHeader<Authorization<Bearer>>>;

/// Resolve the caller to an administrator, distinguishing an unknown caller
/// from one that is known but lacks the rights.
async fn require_admin<T: ApiApplication>(app: &T, auth: Auth) -> Result<UserIdOf<T>, ApiError> {
    let Some(TypedHeader(auth)) = auth else {
        return Err(ApiError::Unauthorized);
    };
    if let Some(user_id) = app.can_manage_products(&auth).await {
        Ok(user_id)
    } else if app.reviewer(&auth).await.is_some() {
        Err(ApiError::Forbidden)
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// Resolve the caller to a reviewer.
async fn require_reviewer<T: ApiApplication>(
    app: &T,
    auth: Auth,
) -> Result<Reviewer<UserIdOf<T>>, ApiError> {
    let Some(TypedHeader(auth)) = auth else {
        return Err(ApiError::Unauthorized);
    };
    app.reviewer(&auth).await.ok_or(ApiError::Unauthorized)
}
