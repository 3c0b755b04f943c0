//! `WWW-Authenticate` challenge formatting for 401 responses

use indexmap::IndexMap;
use serde_json::Value;

/// Header name carried by 401 errors constructed with a scheme
pub const WWW_AUTHENTICATE: &str = "WWW-Authenticate";

/// Ordered attribute set for an authentication challenge
///
/// Insertion order is preserved verbatim in the formatted header value.
pub type ChallengeAttributes = IndexMap<String, Value>;

/// Format a challenge header value
///
/// Attribute pairs render in insertion order as `key="value"`, followed
/// by a trailing `error="<message>"` pair, joined with `", "` and
/// prefixed with the scheme.
pub(crate) fn format_challenge(
    scheme: &str,
    attributes: &ChallengeAttributes,
    message: &str,
) -> String {
    let mut pairs: Vec<String> = attributes
        .iter()
        .map(|(name, value)| format!("{name}=\"{}\"", coerce_scalar(value)))
        .collect();
    pairs.push(format!("error=\"{message}\""));

    format!("{scheme} {}", pairs.join(", "))
}

/// Render an attribute scalar into its header form
///
/// `null` coerces to the empty string; numbers keep their decimal form,
/// so `0` renders as `"0"` rather than disappearing.
fn coerce_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
