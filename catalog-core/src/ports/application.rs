use super::{ProductRepository, Repository};
use crate::models::{ProductData, Reviewer};

/// An application ties a repository to the concerns that sit outside of it:
/// the clock, identifier generation and deciding who the caller is.
///
/// The `Context` is whatever the transport extracts from a request to make
/// identity decisions (a bearer token, for example).
pub trait Application {
    /// Per-request identity material
    type Context: Send + Sync;

    /// The storage backend
    type Repository: ProductRepository;

    /// Get a handle to the repository
    fn database(&self) -> &Self::Repository;

    /// The current time
    fn now(&self) -> <Self::Repository as Repository>::DateTime;

    /// Generate an id for a product about to be created
    fn generate_product_id(&self, data: &ProductData)
    -> <Self::Repository as Repository>::ProductId;

    /// Generate an id for a review about to be created
    fn generate_review_id(&self) -> <Self::Repository as Repository>::ReviewId;

    /// Resolve the caller to a reviewer, or None if the caller is anonymous
    /// or their credentials are invalid.
    fn reviewer(
        &self,
        context: &Self::Context,
    ) -> impl Future<Output = Option<Reviewer<<Self::Repository as Repository>::UserId>>> + Send;

    /// If the caller may create, update and delete products, return their id.
    fn can_manage_products(
        &self,
        context: &Self::Context,
    ) -> impl Future<Output = Option<<Self::Repository as Repository>::UserId>> + Send;
}
