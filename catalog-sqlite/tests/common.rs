#![allow(dead_code)]

use catalog_core::models::{ProductData, ProductImage, Review, Reviewer, ReviewSubmission};
use catalog_sqlite::{
    Db,
    config::SqliteConfig,
    types::{DateTime, ProductId, ReviewId, UserId},
};

pub async fn open() -> anyhow::Result<Db> {
    Ok(Db::open(&SqliteConfig::default()).await?)
}

pub fn now() -> DateTime {
    time::OffsetDateTime::now_utc().into()
}

pub fn product_id() -> ProductId {
    uuid::Uuid::new_v4().into()
}

pub fn review_id() -> ReviewId {
    uuid::Uuid::new_v4().into()
}

pub fn user_id() -> UserId {
    uuid::Uuid::new_v4().into()
}

pub fn product(name: &str, category: &str, price: f64) -> ProductData {
    ProductData {
        name: name.to_owned(),
        description: format!("A {name}"),
        price,
        category: category.to_owned(),
        stock: 10,
        images: vec![ProductImage {
            public_id: format!("{name}-1"),
            url: format!("https://images.example/{name}-1.png"),
        }],
    }
}

pub fn submission(user: UserId, rating: f64) -> ReviewSubmission<UserId> {
    ReviewSubmission {
        reviewer: Reviewer {
            id: user,
            name: format!("user {user}"),
        },
        rating,
        comment: format!("{rating} stars"),
    }
}

pub fn ratings_of(reviews: &[Review<UserId, ReviewId>]) -> Vec<f64> {
    reviews.iter().map(|review| review.rating).collect()
}
