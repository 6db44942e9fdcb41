mod aggregate;
pub use aggregate::{remove_review, upsert_review};

mod product;
pub use product::{ProductData, ProductImage, ProductPatch, ProductRecord, ValidationError};

mod query;
pub use query::{ProductPage, ProductQuery};

mod review;
pub use review::{Review, ReviewSubmission, ReviewSummary, Reviewer};
