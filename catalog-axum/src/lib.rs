#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the catalog-axum crate.
//! [catalog_core]: https://docs.rs/catalog_core/latest/catalog_core/index.html
//! [catalog_axum]: https://docs.rs/catalog_axum/latest/catalog_axum/index.html
//! [catalog_sqlite]: https://docs.rs/catalog_sqlite/latest/catalog_sqlite/index.html
#![doc = include_str!("../README.md")]

mod product_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json};
use catalog_core::ports::{Application, Repository};
use headers::{Authorization, authorization::Bearer};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt::Display, sync::Arc};
use tower_http::trace::TraceLayer;

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

mod error;
pub use error::ApiError;

mod extract;

mod response;
pub use response::Envelope;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct a full API router with the given state and config.
///
/// The generated OpenAPI document is returned alongside the router, so that
/// it can be written out without starting a server.
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> (axum::Router, Arc<OpenApi>) {
    let mut api = OpenApi::default();
    let router = ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/product", product_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs);

    let api = Arc::new(api);
    let router = router
        .layer(Extension(api.clone())) // Arc is very important here or you will face massive memory and performance issues
        .layer(Extension(Arc::new(config)))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    (router, api)
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let (service, _) = router(app, config);
    axum::serve(listener, service).await
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Context = Authorization<Bearer>,
        Repository: Clone
                        + Send
                        + Sync
                        + 'static
                        + Repository<
            DateTime: Serialize + DeserializeOwned + JsonSchema + Send + Sync,
            UserId: Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
            ProductId: Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
            ReviewId: Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
        >,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Context = Authorization<Bearer>,
            Repository: Clone
                            + Send
                            + Sync
                            + 'static
                            + Repository<
                DateTime: Serialize + DeserializeOwned + JsonSchema + Send + Sync,
                UserId: Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
                ProductId: Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
                ReviewId: Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
            >,
        >
{
}
