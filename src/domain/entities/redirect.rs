//! Redirect entity representing an alias to target URL mapping.

use chrono::{DateTime, Utc};

/// A short link with its resolution metadata.
///
/// Maps a globally unique alias to a target URL. The `hits` counter is
/// incremented by every successful resolution and is non-decreasing from
/// the directory's perspective. `owner_id` is `None` for links created
/// through the legacy shared-secret surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Redirect {
    pub id: i64,
    pub alias: String,
    pub target: String,
    pub hits: i64,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Input data for inserting a new redirect.
#[derive(Debug, Clone)]
pub struct NewRedirect {
    pub alias: String,
    pub target: String,
    pub owner_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_fields_round_trip() {
        let now = Utc::now();
        let redirect = Redirect {
            id: 1,
            alias: "abc12345".to_string(),
            target: "https://example.com/".to_string(),
            hits: 0,
            owner_id: Some(7),
            created_at: now,
        };

        assert_eq!(redirect.alias, "abc12345");
        assert_eq!(redirect.target, "https://example.com/");
        assert_eq!(redirect.hits, 0);
        assert_eq!(redirect.owner_id, Some(7));
        assert_eq!(redirect.created_at, now);
    }

    #[test]
    fn new_redirect_without_owner() {
        let new_redirect = NewRedirect {
            alias: "deadbeef".to_string(),
            target: "https://rust-lang.org/".to_string(),
            owner_id: None,
        };

        assert!(new_redirect.owner_id.is_none());
    }
}
