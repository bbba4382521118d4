//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Redirect;

/// Request to create a redirect under one or more aliases.
///
/// When `aliases` is absent or empty, a random alias is generated.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinksRequest {
    /// Target URL (must be an absolute HTTP/HTTPS URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Aliases to register for the target.
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Request to re-point existing aliases at a new target.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinksRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    #[validate(length(min = 1, message = "At least one alias is required"))]
    pub aliases: Vec<String>,
}

/// Request to delete aliases.
#[derive(Debug, Deserialize)]
pub struct DeleteLinksRequest {
    pub aliases: Vec<String>,
}

/// A redirect as exposed through the API.
#[derive(Debug, Serialize)]
pub struct LinkItem {
    pub alias: String,
    pub target: String,
    pub hits: i64,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<Redirect> for LinkItem {
    fn from(redirect: Redirect) -> Self {
        Self {
            alias: redirect.alias,
            target: redirect.target,
            hits: redirect.hits,
            owner_id: redirect.owner_id,
            created_at: redirect.created_at,
        }
    }
}

/// Summary of a batch mutation.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub requested: usize,
    pub succeeded: usize,
}

/// Response for create/update batches.
#[derive(Debug, Serialize)]
pub struct MutateLinksResponse {
    pub summary: BatchSummary,
    pub items: Vec<LinkItem>,
}

/// Response for delete batches.
#[derive(Debug, Serialize)]
pub struct DeleteLinksResponse {
    pub deleted: u64,
}

/// Response listing links with aggregate counters.
#[derive(Debug, Serialize)]
pub struct LinksListResponse {
    pub total_links: usize,
    pub total_hits: i64,
    pub items: Vec<LinkItem>,
}

impl LinksListResponse {
    /// Builds the listing with its aggregate counters.
    pub fn from_redirects(redirects: Vec<Redirect>) -> Self {
        let total_links = redirects.len();
        let total_hits = redirects.iter().map(|r| r.hits).sum();

        Self {
            total_links,
            total_hits,
            items: redirects.into_iter().map(Into::into).collect(),
        }
    }
}
