use crate::models::{ProductData, ProductQuery, ProductRecord, ReviewSummary};

/// The product record type of a repository.
pub type ProductRecordOf<R> = ProductRecord<
    <R as super::Repository>::DateTime,
    <R as super::Repository>::UserId,
    <R as super::Repository>::ProductId,
    <R as super::Repository>::ReviewId,
>;

/// Repository interface for product storage.
///
/// A product is stored as a single document: its data, its reviews and the
/// values derived from the reviews. Operations addressing a product by id
/// report a missing product as `Ok(None)`; the caller decides what that means.
///
/// Nothing here coordinates a read followed by a write. Two clients that read
/// the same product, change its reviews and write them back will race, and
/// the later write wins.
pub trait ProductRepository: super::Repository {
    /// Store a new product with no reviews.
    fn create_product(
        &self,
        product_id: Self::ProductId,
        created_by: Self::UserId,
        data: ProductData,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<ProductRecordOf<Self>, Self::Error>> + Send;

    /// Retrieve a product.
    fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> impl Future<Output = Result<Option<ProductRecordOf<Self>>, Self::Error>> + Send;

    /// Replace the user-settable data of a product.
    ///
    /// # Returns
    ///
    /// The product as it is after the update, or None if it does not exist.
    fn update_product(
        &self,
        product_id: Self::ProductId,
        data: ProductData,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<ProductRecordOf<Self>>, Self::Error>> + Send;

    /// Delete a product, returning it as it was, or None if it did not exist.
    fn delete_product(
        &self,
        product_id: Self::ProductId,
    ) -> impl Future<Output = Result<Option<ProductRecordOf<Self>>, Self::Error>> + Send;

    /// Count every product in the store.
    fn count_products(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Find the products matching `query`, at most `limit` of them, starting
    /// at the query's page. Products are returned in creation order.
    fn query_products(
        &self,
        query: &ProductQuery,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ProductRecordOf<Self>>, Self::Error>> + Send;

    /// Overwrite a product's reviews together with their count and mean.
    ///
    /// # Returns
    ///
    /// The product as it is after the write, or None if it does not exist.
    fn replace_reviews(
        &self,
        product_id: Self::ProductId,
        summary: ReviewSummary<Self::UserId, Self::ReviewId>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<ProductRecordOf<Self>>, Self::Error>> + Send;
}
