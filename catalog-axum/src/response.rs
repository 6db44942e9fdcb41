use axum::{Json, http::StatusCode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The uniform body of every reply.
///
/// Successful replies always carry `data`; failures never do.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct Envelope<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// A human-readable description of the outcome
    pub message: String,
    /// The payload, present on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub(crate) fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
            data: None,
        }
    }
}

/// What every handler in this crate returns.
pub(crate) type Reply<T> = Result<(StatusCode, Json<Envelope<T>>), crate::ApiError>;

pub(crate) fn success<T>(status: StatusCode, message: &str, data: T) -> Reply<T> {
    Ok((
        status,
        Json(Envelope {
            success: true,
            message: message.to_owned(),
            data: Some(data),
        }),
    ))
}
