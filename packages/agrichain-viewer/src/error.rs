//! Error types for the viewer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;

/// Viewer error type.
#[derive(Debug)]
pub enum Error {
    /// Configuration error (bad address, bad ABI, bad settings).
    Config(String),
    /// JSON-RPC transport or node error, including reverts.
    Rpc(String),
    /// ABI encoding or decoding error.
    Abi(String),
    /// No provider or no bound contract.
    ProviderUnavailable(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Rpc(msg) => write!(f, "rpc error: {msg}"),
            Error::Abi(msg) => write!(f, "abi error: {msg}"),
            Error::ProviderUnavailable(msg) => write!(f, "provider unavailable: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Rpc(_) | Error::Abi(_) => StatusCode::BAD_GATEWAY,
            Error::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string()
        });
        (status, Json(body)).into_response()
    }
}
