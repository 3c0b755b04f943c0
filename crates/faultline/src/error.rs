//! HTTP error values and their constructors

use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::challenge::{self, ChallengeAttributes, WWW_AUTHENTICATE};
use crate::response::{Render, ResponseParts, default_render};

/// A caller-supplied status code outside the range the HTTP grammar allows
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid HTTP status code: {0}")]
pub struct InvalidStatus(pub u16);

/// An HTTP-protocol error value
///
/// Carries a status code, a human-readable message, an optional opaque
/// data payload, and optional wrapping info. Protocol headers required by
/// the status (currently the 401 `WWW-Authenticate` challenge) are
/// computed at construction time. Core fields are fixed once constructed;
/// only the rendering strategy may be replaced afterwards.
pub struct HttpError {
    /// HTTP status code
    pub code: StatusCode,
    /// Human-readable description, may be empty
    pub message: String,
    /// Opaque payload for downstream consumers, never interpreted here
    pub data: Option<Value>,
    /// Annotation supplied when wrapping a pre-existing error
    pub info: Option<String>,
    headers: Option<IndexMap<String, String>>,
    renderer: Option<Box<dyn Render + Send + Sync>>,
}

impl HttpError {
    /// Create an error with an explicit status code and message
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            info: None,
            headers: None,
            renderer: None,
        }
    }

    /// Create an error from a raw numeric status code
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStatus`] when the code is outside the range the
    /// HTTP grammar allows.
    pub fn from_code(code: u16, message: impl Into<String>) -> Result<Self, InvalidStatus> {
        let status = StatusCode::from_u16(code).map_err(|_| InvalidStatus(code))?;
        Ok(Self::new(status, message))
    }

    /// Attach an opaque data payload
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Wrap a pre-existing error with an annotation
    ///
    /// The message is taken from the wrapped error and `info` holds the
    /// annotation verbatim; the two are never merged. Wrapping another
    /// [`HttpError`] adopts its status code, anything else maps to 500.
    pub fn wrap(source: &(dyn StdError + 'static), info: impl Into<String>) -> Self {
        let code = source
            .downcast_ref::<Self>()
            .map_or(StatusCode::INTERNAL_SERVER_ERROR, |inner| inner.code);
        let mut err = Self::new(code, source.to_string());
        err.info = Some(info.into());
        err
    }

    /// 400 Bad Request
    pub fn bad_request(message: Option<&str>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, message)
    }

    /// 401 Unauthorized, without an authentication challenge
    ///
    /// No `WWW-Authenticate` header is attached; use
    /// [`unauthorized_challenge`](Self::unauthorized_challenge) when the
    /// response must name a scheme.
    pub fn unauthorized(message: Option<&str>) -> Self {
        Self::with_status(StatusCode::UNAUTHORIZED, message)
    }

    /// 401 Unauthorized carrying a `WWW-Authenticate` challenge
    ///
    /// The header value is built at construction time from the scheme,
    /// the attributes in insertion order, and a trailing `error="…"` pair
    /// holding the message.
    pub fn unauthorized_challenge(
        message: Option<&str>,
        scheme: &str,
        attributes: &ChallengeAttributes,
    ) -> Self {
        let mut err = Self::with_status(StatusCode::UNAUTHORIZED, message);
        let value = challenge::format_challenge(scheme, attributes, &err.message);
        err.headers = Some(IndexMap::from([(WWW_AUTHENTICATE.to_owned(), value)]));
        err
    }

    /// 403 Forbidden
    pub fn forbidden(message: Option<&str>) -> Self {
        Self::with_status(StatusCode::FORBIDDEN, message)
    }

    /// 404 Not Found
    pub fn not_found(message: Option<&str>) -> Self {
        Self::with_status(StatusCode::NOT_FOUND, message)
    }

    /// 500 Internal Server Error, optionally carrying a data payload
    pub fn internal(message: Option<&str>, data: Option<Value>) -> Self {
        let mut err = Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, message);
        err.data = data;
        err
    }

    /// Protocol headers required by this error's status, if any
    ///
    /// Absent rather than empty when the status carries none.
    pub fn headers(&self) -> Option<&IndexMap<String, String>> {
        self.headers.as_ref()
    }

    /// Replace the rendering strategy for this instance
    ///
    /// The override bypasses the built-in rendering entirely; a plain
    /// `Fn(&HttpError) -> ResponseParts` closure works via the blanket
    /// [`Render`] impl.
    pub fn set_renderer(&mut self, renderer: impl Render + Send + Sync + 'static) {
        self.renderer = Some(Box::new(renderer));
    }

    /// Render into a response description
    ///
    /// Pure with respect to the error's fields: rendering twice yields
    /// structurally equal results.
    pub fn to_response(&self) -> ResponseParts {
        match &self.renderer {
            Some(renderer) => renderer.render(self),
            None => default_render(self),
        }
    }

    fn with_status(code: StatusCode, message: Option<&str>) -> Self {
        let message = message.map_or_else(|| default_message(code), str::to_owned);
        Self::new(code, message)
    }
}

/// Stable placeholder message for a status constructed without one
fn default_message(code: StatusCode) -> String {
    code.canonical_reason().unwrap_or("Unknown").to_owned()
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpError")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("data", &self.data)
            .field("info", &self.info)
            .field("headers", &self.headers)
            .field("renderer", &self.renderer.as_ref().map(|_| "<override>"))
            .finish()
    }
}

impl StdError for HttpError {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn named_constructors_fix_their_codes() {
        assert_eq!(HttpError::bad_request(None).code, StatusCode::BAD_REQUEST);
        assert_eq!(HttpError::unauthorized(None).code, StatusCode::UNAUTHORIZED);
        assert_eq!(HttpError::forbidden(None).code, StatusCode::FORBIDDEN);
        assert_eq!(HttpError::not_found(None).code, StatusCode::NOT_FOUND);
        assert_eq!(
            HttpError::internal(None, None).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn explicit_message_round_trips() {
        assert_eq!(HttpError::bad_request(Some("my message")).message, "my message");
        assert_eq!(HttpError::not_found(Some("my message")).message, "my message");
    }

    #[test]
    fn omitted_message_gets_stable_default() {
        let first = HttpError::forbidden(None);
        let second = HttpError::forbidden(None);
        assert!(!first.message.is_empty());
        assert_eq!(first.message, second.message);
    }

    #[test]
    fn internal_attaches_data_verbatim() {
        let err = HttpError::internal(Some("my message"), Some(json!({"my": "data"})));
        assert_eq!(err.data, Some(json!({"my": "data"})));
    }

    #[test]
    fn wrap_copies_message_and_keeps_info_separate() {
        let inner = std::io::Error::other("inner");
        let err = HttpError::wrap(&inner, "outer");
        assert_eq!(err.message, "inner");
        assert_eq!(err.info.as_deref(), Some("outer"));
        assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn wrap_adopts_a_recognized_status() {
        let inner = HttpError::not_found(Some("missing"));
        let err = HttpError::wrap(&inner, "lookup failed");
        assert_eq!(err.code, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "missing");
    }

    #[test]
    fn unauthorized_without_scheme_has_no_headers() {
        assert!(HttpError::unauthorized(None).headers().is_none());
    }

    #[test]
    fn challenge_header_is_built_at_construction() {
        let err = HttpError::unauthorized_challenge(
            Some("boom"),
            "Test",
            &ChallengeAttributes::new(),
        );
        let headers = err.headers().unwrap();
        assert_eq!(headers[WWW_AUTHENTICATE], "Test error=\"boom\"");
    }

    #[test]
    fn from_code_rejects_out_of_range_codes() {
        assert_eq!(
            HttpError::from_code(1000, "nope").unwrap_err(),
            InvalidStatus(1000)
        );
    }

    #[test]
    fn from_code_accepts_any_valid_status() {
        let err = HttpError::from_code(418, "teapot").unwrap();
        assert_eq!(err.code.as_u16(), 418);
    }

    #[test]
    fn data_builder_attaches_payload() {
        let err = HttpError::new(StatusCode::BAD_REQUEST, "bad").data(json!({"field": "name"}));
        assert_eq!(err.data, Some(json!({"field": "name"})));
    }
}
