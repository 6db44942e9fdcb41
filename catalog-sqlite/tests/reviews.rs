mod common;

use catalog_core::{
    models::{ProductQuery, ReviewSummary, remove_review, upsert_review},
    ports::ProductRepository as _,
};
use common::{now, open, product, product_id, ratings_of, review_id, submission, user_id};

#[tokio::test]
async fn test_review_lifecycle() -> anyhow::Result<()> {
    let db = open().await?;
    let id = product_id();
    db.create_product(id, user_id(), product("kettle", "kitchen", 25.0), now())
        .await?;

    let alice = user_id();
    let bob = user_id();

    // first review
    let record = db.get_product(id).await?.unwrap();
    let summary = upsert_review(record.reviews, submission(alice, 4.0), review_id);
    let record = db.replace_reviews(id, summary, now()).await?.unwrap();
    assert_eq!(record.num_of_reviews, 1);
    assert_eq!(record.ratings, 4.0);

    // a second reviewer
    let summary = upsert_review(record.reviews, submission(bob, 5.0), review_id);
    let record = db.replace_reviews(id, summary, now()).await?.unwrap();
    assert_eq!(record.num_of_reviews, 2);
    assert_eq!(record.ratings, 4.5);

    // the first reviewer changes their mind
    let summary = upsert_review(record.reviews, submission(alice, 2.0), review_id);
    let record = db.replace_reviews(id, summary, now()).await?.unwrap();
    assert_eq!(record.num_of_reviews, 2);
    assert_eq!(ratings_of(&record.reviews), [2.0, 5.0]);
    assert_eq!(record.ratings, 3.5);

    // remove bob's review
    let bobs = record
        .reviews
        .iter()
        .find(|review| review.user == bob)
        .map(|review| review.id)
        .unwrap();
    let summary = remove_review(record.reviews, &bobs);
    let record = db.replace_reviews(id, summary, now()).await?.unwrap();
    assert_eq!(record.num_of_reviews, 1);
    assert_eq!(record.ratings, 2.0);

    // and the last one
    let alices = record.reviews[0].id;
    let summary = remove_review(record.reviews, &alices);
    let record = db.replace_reviews(id, summary, now()).await?.unwrap();
    assert_eq!(record.num_of_reviews, 0);
    assert_eq!(record.ratings, 0.0);
    assert!(record.reviews.is_empty());

    // what was written is what is read
    assert_eq!(db.get_product(id).await?, Some(record));
    Ok(())
}

#[tokio::test]
async fn test_replace_reviews_of_missing_product() -> anyhow::Result<()> {
    let db = open().await?;
    let written = db
        .replace_reviews(product_id(), ReviewSummary::default(), now())
        .await?;
    assert!(written.is_none());
    Ok(())
}

#[tokio::test]
async fn test_ratings_filter_uses_aggregate() -> anyhow::Result<()> {
    let db = open().await?;
    let good = product_id();
    let poor = product_id();
    db.create_product(good, user_id(), product("good", "kitchen", 10.0), now())
        .await?;
    db.create_product(poor, user_id(), product("poor", "kitchen", 10.0), now())
        .await?;

    for (id, rating) in [(good, 5.0), (good, 4.0), (poor, 1.0)] {
        let record = db.get_product(id).await?.unwrap();
        let summary = upsert_review(record.reviews, submission(user_id(), rating), review_id);
        db.replace_reviews(id, summary, now()).await?;
    }

    let found = db
        .query_products(
            &ProductQuery {
                ratings_gte: Some(4.5),
                ..Default::default()
            },
            10,
        )
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, good);
    assert_eq!(found[0].ratings, 4.5);
    Ok(())
}

#[tokio::test]
async fn test_non_finite_rating_is_not_written() -> anyhow::Result<()> {
    let db = open().await?;
    let id = product_id();
    db.create_product(id, user_id(), product("kettle", "kitchen", 25.0), now())
        .await?;

    let record = db.get_product(id).await?.unwrap();
    let summary = upsert_review(record.reviews, submission(user_id(), 4.0), review_id);
    let before = db.replace_reviews(id, summary, now()).await?.unwrap();

    for rating in [f64::INFINITY, f64::NAN] {
        let summary = upsert_review(
            before.reviews.clone(),
            submission(user_id(), rating),
            review_id,
        );
        assert!(db.replace_reviews(id, summary, now()).await.is_err());
    }

    // the product is still readable, and unchanged
    assert_eq!(db.get_product(id).await?, Some(before));
    assert_eq!(db.query_products(&ProductQuery::default(), 10).await?.len(), 1);
    Ok(())
}
