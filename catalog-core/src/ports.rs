mod application;
mod product;

pub use application::Application;
pub use product::{ProductRecordOf, ProductRepository};

/// The base trait of every repository port.
///
/// It fixes the error type and the concrete identifier and timestamp types a
/// backend works with, so that the other ports can be written generically.
pub trait Repository: Sized {
    /// The error a repository operation may fail with
    type Error: std::error::Error + Send + Sync + 'static;

    /// A timestamp
    type DateTime: Clone + Send + Sync;

    /// The identity of a user (an administrator or a reviewer)
    type UserId: Clone + PartialEq + Send + Sync;

    /// The identity of a product
    type ProductId: Clone + Send + Sync;

    /// The identity of a review
    type ReviewId: Clone + PartialEq + Send + Sync;
}
