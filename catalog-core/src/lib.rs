#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the catalog crates.
//! [catalog_core]: https://docs.rs/catalog_core/latest/catalog_core/index.html
//! [catalog_axum]: https://docs.rs/catalog_axum/latest/catalog_axum/index.html
//! [catalog_sqlite]: https://docs.rs/catalog_sqlite/latest/catalog_sqlite/index.html
#![doc = include_str!("../README.md")]

/// Core domain models for the catalog.
///
/// Products and their reviews are plain data. The one piece of business logic
/// that lives here is review aggregation: every change to a product's reviews
/// goes through [`models::upsert_review`] or [`models::remove_review`], which
/// return the new review list together with its derived count and mean rating.
pub mod models;

/// Interface traits for the catalog.
///
/// These are the "ports" of a hexagonal architecture. A storage backend
/// implements [`ports::Repository`] and [`ports::ProductRepository`]; an
/// application binds a backend to identity and id generation by implementing
/// [`ports::Application`].
pub mod ports;
