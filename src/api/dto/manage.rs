//! DTOs for the delete, info and stats endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::Link;

#[derive(Debug, Deserialize, Validate)]
pub struct DeleteRequest {
    #[validate(required, length(min = 1))]
    pub id: Option<String>,

    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

/// Addresses a link by `(domain, slug)`. Used by info and stats.
#[derive(Debug, Deserialize, Validate)]
pub struct LinkLookupRequest {
    #[validate(required, length(min = 1))]
    pub slug: Option<String>,

    #[validate(required, length(min = 1))]
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkInfo {
    pub id: Uuid,
    pub destination: String,
    pub created: DateTime<Utc>,
    pub locked: bool,
    pub lock_reason: Option<String>,
}

impl From<Link> for LinkInfo {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            destination: link.destination,
            created: link.created_at,
            locked: link.locked,
            lock_reason: link.lock_reason.filter(|r| !r.trim().is_empty()),
        }
    }
}
