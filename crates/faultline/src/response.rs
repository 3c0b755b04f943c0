//! Rendering of error values into an HTTP response description

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::HttpError;

/// Wire-ready description of an error response
///
/// Consumers (typically an HTTP server layer) translate this into an
/// actual response; that translation is outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseParts {
    /// HTTP status code
    pub code: u16,
    /// Protocol headers, absent when the error carries none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, String>>,
    /// Response body description
    pub payload: Value,
}

/// Strategy for rendering an error into response parts
///
/// Installed per instance with [`HttpError::set_renderer`]. When present
/// it replaces the built-in rendering entirely; only its output is
/// observable.
pub trait Render {
    /// Produce the response description for `error`
    fn render(&self, error: &HttpError) -> ResponseParts;
}

impl<F> Render for F
where
    F: Fn(&HttpError) -> ResponseParts,
{
    fn render(&self, error: &HttpError) -> ResponseParts {
        self(error)
    }
}

/// Built-in rendering used when no override is installed
pub(crate) fn default_render(error: &HttpError) -> ResponseParts {
    let code = error.code.as_u16();
    ResponseParts {
        code,
        headers: error.headers().cloned(),
        payload: json!({
            "code": code,
            "error": error.code.canonical_reason().unwrap_or("Unknown"),
            "message": error.message,
        }),
    }
}
