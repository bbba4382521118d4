//! Cloudflare Turnstile CAPTCHA verification.

use serde::Deserialize;
use tracing::{debug, error};

const SITEVERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

#[derive(Debug, Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Turnstile challenge verifier.
///
/// When no secret key is configured, verification is skipped and every
/// request passes. With a secret configured, a missing or rejected token
/// fails the check; transport errors fail closed.
pub struct TurnstileVerifier {
    secret_key: Option<String>,
    http: reqwest::Client,
}

impl TurnstileVerifier {
    /// Creates a verifier; `secret_key = None` disables verification.
    pub fn new(secret_key: Option<String>) -> Self {
        if secret_key.is_none() {
            debug!("Turnstile secret key not configured, CAPTCHA checks disabled");
        }

        Self {
            secret_key,
            http: reqwest::Client::new(),
        }
    }

    /// Returns true when the verifier performs real checks.
    pub fn is_enabled(&self) -> bool {
        self.secret_key.is_some()
    }

    /// Verifies a challenge token against the siteverify endpoint.
    pub async fn verify(&self, token: Option<&str>, remote_ip: Option<&str>) -> bool {
        let Some(secret) = &self.secret_key else {
            return true;
        };

        let Some(token) = token.filter(|t| !t.is_empty()) else {
            debug!("No Turnstile token provided");
            return false;
        };

        let mut form = vec![("secret", secret.as_str()), ("response", token)];
        if let Some(ip) = remote_ip {
            form.push(("remoteip", ip));
        }

        let response = match self.http.post(SITEVERIFY_URL).form(&form).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Turnstile verification request failed");
                return false;
            }
        };

        match response.json::<SiteverifyResponse>().await {
            Ok(body) => {
                if !body.success {
                    debug!(errors = ?body.error_codes, "Turnstile verification rejected");
                }
                body.success
            }
            Err(e) => {
                error!(error = %e, "Turnstile verification returned malformed body");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_verifier_passes_everything() {
        let verifier = TurnstileVerifier::new(None);

        assert!(!verifier.is_enabled());
        assert!(verifier.verify(None, None).await);
        assert!(verifier.verify(Some("anything"), None).await);
    }

    #[tokio::test]
    async fn enabled_verifier_rejects_missing_token() {
        let verifier = TurnstileVerifier::new(Some("secret".to_string()));

        assert!(verifier.is_enabled());
        assert!(!verifier.verify(None, None).await);
        assert!(!verifier.verify(Some(""), None).await);
    }
}
