//! Type definitions for the SQLite implementation.
//!
//! This module contains both public types used throughout the crate and internal
//! types used for database row mapping. The public types include strongly-typed
//! IDs and datetime representations that ensure type safety across the system.

use catalog_core::models::{ProductData, ProductImage, ProductRecord, Review};

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::{ProductId, ReviewId, UserId};

/// The columns of a product row, in the shape [`ProductRow`] decodes.
pub(crate) const PRODUCT_COLUMNS: &str = r#"
    id,
    created_by,
    created_at,
    updated_at,
    name,
    description,
    price,
    category,
    stock,
    json(images) as images,
    ratings,
    num_of_reviews,
    json(reviews) as reviews
"#;

#[derive(sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: ProductId,
    pub created_by: UserId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    pub images: sqlx::types::Json<Vec<ProductImage>>,
    pub ratings: f64,
    pub num_of_reviews: u32,
    pub reviews: sqlx::types::Json<Vec<Review<UserId, ReviewId>>>,
}

impl From<ProductRow> for ProductRecord<DateTime, UserId, ProductId, ReviewId> {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            data: ProductData {
                name: row.name,
                description: row.description,
                price: row.price,
                category: row.category,
                stock: row.stock,
                images: row.images.0,
            },
            ratings: row.ratings,
            num_of_reviews: row.num_of_reviews,
            reviews: row.reviews.0,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
