//! Repository trait implementations for the SQLite database.

use crate::{
    Db,
    types::{DateTime, ProductId, ReviewId, UserId},
};
use catalog_core::ports::Repository;

mod product;

impl Repository for Db {
    type Error = sqlx::Error;
    type DateTime = DateTime;
    type UserId = UserId;
    type ProductId = ProductId;
    type ReviewId = ReviewId;
}
