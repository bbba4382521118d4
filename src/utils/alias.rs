//! Alias generation and validation utilities.
//!
//! Provides cryptographically secure random alias generation and validation
//! for user-provided aliases.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Allowed alias syntax: 1-64 chars of lowercase letters, digits,
/// hyphens, and underscores.
static ALIAS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9_-]{1,64}$").unwrap());

/// Aliases reserved for system endpoints to prevent routing conflicts.
const RESERVED_ALIASES: &[&str] = &["api", "login", "logout", "register", "admin", "info"];

/// Generates a random alias from `entropy_bytes` bytes of CSPRNG output,
/// hex-encoded to `2 * entropy_bytes` lowercase characters.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn random_alias(entropy_bytes: usize) -> String {
    let mut buffer = vec![0u8; entropy_bytes];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    hex::encode(buffer)
}

/// Validates a user-provided alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: lowercase letters, digits, hyphens, underscores
/// - Cannot be a reserved system path
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if !ALIAS_REGEX.is_match(alias) {
        return Err(AppError::bad_request(
            "Alias must be 1-64 lowercase letters, digits, hyphens, or underscores",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn random_alias_has_requested_width() {
        assert_eq!(random_alias(4).len(), 8);
        assert_eq!(random_alias(6).len(), 12);
    }

    #[test]
    fn random_alias_is_lowercase_hex() {
        let alias = random_alias(4);
        assert!(alias.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn random_alias_produces_unique_values() {
        let mut aliases = HashSet::new();

        for _ in 0..1000 {
            aliases.insert(random_alias(4));
        }

        assert_eq!(aliases.len(), 1000);
    }

    #[test]
    fn random_alias_is_itself_valid() {
        assert!(validate_alias(&random_alias(4)).is_ok());
        assert!(validate_alias(&random_alias(6)).is_ok());
    }

    #[test]
    fn validate_accepts_common_shapes() {
        assert!(validate_alias("discord").is_ok());
        assert!(validate_alias("my-link").is_ok());
        assert!(validate_alias("my_link_2024").is_ok());
        assert!(validate_alias("a").is_ok());
        assert!(validate_alias("0123456789").is_ok());
    }

    #[test]
    fn validate_rejects_empty() {
        assert!(validate_alias("").is_err());
    }

    #[test]
    fn validate_rejects_uppercase() {
        assert!(validate_alias("MyLink").is_err());
    }

    #[test]
    fn validate_rejects_spaces_and_slashes() {
        assert!(validate_alias("my link").is_err());
        assert!(validate_alias("a/b").is_err());
    }

    #[test]
    fn validate_rejects_too_long() {
        let alias = "a".repeat(65);
        assert!(validate_alias(&alias).is_err());
    }

    #[test]
    fn validate_rejects_reserved_aliases() {
        for &reserved in RESERVED_ALIASES {
            assert!(
                validate_alias(reserved).is_err(),
                "Reserved alias '{}' should be invalid",
                reserved
            );
        }
    }
}
