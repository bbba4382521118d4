//! Target URL validation.
//!
//! Ensures every stored target is a syntactically valid absolute URL with
//! a safe scheme before it reaches the store.

use url::Url;

/// Errors that can occur during target validation.
#[derive(Debug, thiserror::Error)]
pub enum TargetUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Validates a redirect target and returns it in canonical form.
///
/// # Rules
///
/// 1. **Absolute**: relative references are rejected
/// 2. **Protocol**: only HTTP and HTTPS are allowed (rejects `javascript:`,
///    `data:`, `file:`, and friends)
/// 3. **Hostname**: lowercased by the parser
///
/// # Errors
///
/// Returns [`TargetUrlError::InvalidFormat`] for malformed URLs.
/// Returns [`TargetUrlError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn validate_target(input: &str) -> Result<String, TargetUrlError> {
    let url = Url::parse(input).map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(TargetUrlError::UnsupportedProtocol),
    }

    Ok(url.to_string())
}
