//! Password hashing and verification service.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use pbkdf2::pbkdf2_hmac;
use serde_json::json;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::AppError;

/// Algorithm tag carried in the encoded hash.
const SCHEME: &str = "pbkdf2";

/// PBKDF2-HMAC-SHA256 iteration count for newly created hashes.
///
/// Stored hashes are self-describing, so this can be raised without
/// breaking verification of existing hashes.
const DEFAULT_ITERATIONS: u32 = 100_000;

const SALT_LEN: usize = 32;
const KEY_LEN: usize = 32;

/// Service deriving and verifying password hashes.
///
/// Hashes are encoded as `pbkdf2:<iterations>:<base64(salt ++ key)>` with a
/// 32-byte random salt and a 32-byte PBKDF2-HMAC-SHA256 derived key.
/// Derivation is CPU-bound, so the async entry points run it on the
/// blocking thread pool to keep request handling responsive.
pub struct CredentialHasher {
    iterations: u32,
}

impl CredentialHasher {
    /// Creates a hasher using the default iteration count.
    pub fn new() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Creates a hasher with an explicit iteration count.
    ///
    /// Used by tests to keep derivation cheap; the encoded format records
    /// the count, so verification is unaffected.
    pub fn with_iterations(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Derives an encoded hash for a password on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the blocking task is cancelled.
    pub async fn hash(&self, password: String) -> Result<String, AppError> {
        let iterations = self.iterations;

        tokio::task::spawn_blocking(move || hash_with_iterations(&password, iterations))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "password hashing task failed");
                AppError::internal("Password hashing failed", json!({}))
            })
    }

    /// Verifies a password against an encoded hash on the blocking pool.
    ///
    /// Fail-closed: any malformed hash, unknown tag, or task failure
    /// yields `false`.
    pub async fn verify(&self, encoded: String, password: String) -> bool {
        tokio::task::spawn_blocking(move || verify_encoded(&encoded, &password))
            .await
            .unwrap_or(false)
    }

    /// Synchronous hashing entry point for CLI use.
    pub fn hash_blocking(&self, password: &str) -> String {
        hash_with_iterations(password, self.iterations)
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives the encoded hash with a fresh random salt.
fn hash_with_iterations(password: &str, iterations: u32) -> String {
    let mut salt = [0u8; SALT_LEN];
    getrandom::fill(&mut salt).expect("Failed to generate random salt");

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, iterations, &mut key);

    let mut payload = Vec::with_capacity(SALT_LEN + KEY_LEN);
    payload.extend_from_slice(&salt);
    payload.extend_from_slice(&key);

    format!("{}:{}:{}", SCHEME, iterations, BASE64.encode(payload))
}

/// Verifies a password against an encoded hash.
///
/// Parsing is strict: an unrecognized tag, a bad iteration count, or a
/// payload of the wrong length returns `false` without deriving anything.
/// The derived key comparison is constant-time; the payload length check
/// may short-circuit since length is not secret.
fn verify_encoded(encoded: &str, password: &str) -> bool {
    let mut parts = encoded.splitn(3, ':');

    let (Some(scheme), Some(iterations), Some(payload)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    if scheme != SCHEME {
        return false;
    }

    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    if iterations == 0 {
        return false;
    }

    let Ok(payload) = BASE64.decode(payload) else {
        return false;
    };
    if payload.len() != SALT_LEN + KEY_LEN {
        return false;
    }

    let (salt, stored_key) = payload.split_at(SALT_LEN);

    let mut derived = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut derived);

    derived.ct_eq(stored_key).into()
}
