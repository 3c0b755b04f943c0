//! HTTP-protocol error values with response rendering
//!
//! Constructs error values carrying a status code, a message, optional
//! opaque data, and optional wrapping info, and renders them into a
//! response description (status code, headers, payload). Statuses that
//! require protocol headers — currently 401 with its `WWW-Authenticate`
//! challenge — get their header content built at construction time.
//!
//! ```
//! use faultline::{ChallengeAttributes, HttpError};
//!
//! let err = HttpError::unauthorized_challenge(
//!     Some("token expired"),
//!     "Bearer",
//!     &ChallengeAttributes::new(),
//! );
//! let response = err.to_response();
//! assert_eq!(response.code, 401);
//! ```

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod challenge;
mod error;
mod response;

pub use http::StatusCode;

pub use crate::challenge::{ChallengeAttributes, WWW_AUTHENTICATE};
pub use crate::error::{HttpError, InvalidStatus};
pub use crate::response::{Render, ResponseParts};
