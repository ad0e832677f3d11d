//! Google Safe Browsing v4 Lookup API client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ReputationChecker;
use crate::error::{AppError, SAFETY_CHECK_FAILED};

const THREAT_TYPES: &[&str] = &[
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "UNWANTED_SOFTWARE",
    "POTENTIALLY_HARMFUL_APPLICATION",
];

/// Checks URLs with `threatMatches:find`.
///
/// An empty response object means no threat is known for the URL.
pub struct SafeBrowsingChecker {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FindRequest<'a> {
    client: ClientInfo<'a>,
    threat_info: ThreatInfo<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo<'a> {
    client_id: &'a str,
    client_version: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreatInfo<'a> {
    threat_types: &'a [&'a str],
    platform_types: &'a [&'a str],
    threat_entry_types: &'a [&'a str],
    threat_entries: Vec<ThreatEntry<'a>>,
}

#[derive(Serialize)]
struct ThreatEntry<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    matches: Vec<serde_json::Value>,
}

impl SafeBrowsingChecker {
    pub fn new(client: reqwest::Client, api_key: String, endpoint: String) -> Self {
        Self {
            client,
            api_key,
            endpoint,
        }
    }
}

#[async_trait]
impl ReputationChecker for SafeBrowsingChecker {
    async fn is_unsafe(&self, url: &str) -> Result<bool, AppError> {
        let request = FindRequest {
            client: ClientInfo {
                client_id: env!("CARGO_PKG_NAME"),
                client_version: env!("CARGO_PKG_VERSION"),
            },
            threat_info: ThreatInfo {
                threat_types: THREAT_TYPES,
                platform_types: &["ANY_PLATFORM"],
                threat_entry_types: &["URL"],
                threat_entries: vec![ThreatEntry { url }],
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Safe Browsing request failed: {}", e);
                AppError::upstream(SAFETY_CHECK_FAILED)
            })?;

        if response.status() != reqwest::StatusCode::OK {
            tracing::error!("Safe Browsing answered with status {}", response.status());
            return Err(AppError::upstream(SAFETY_CHECK_FAILED));
        }

        let body: FindResponse = response.json().await.map_err(|e| {
            tracing::error!("Safe Browsing returned an unreadable body: {}", e);
            AppError::upstream(SAFETY_CHECK_FAILED)
        })?;

        Ok(!body.matches.is_empty())
    }
}
