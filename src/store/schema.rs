//! On-disk descriptor schema.
//!
//! The store file is a JSON document:
//!
//! ```json
//! {
//!   "version": 1,
//!   "apps": [
//!     {
//!       "id": "6f1c…",
//!       "name": "Hacker News",
//!       "url": "https://news.ycombinator.com",
//!       "bundleIdentifier": "com.web2app.hacker-news",
//!       "iconData": "iVBORw0KGgo…",
//!       "createdAt": "2026-01-05T09:30:00Z",
//!       "generatedAppPath": "/Users/me/Library/Application Support/Web2App/GeneratedApps/Hacker News.app",
//!       "allowedDomains": ["ycombinator.com"]
//!     }
//!   ]
//! }
//! ```
//!
//! Files written by earlier releases hold a bare array of records; those are
//! read as version 0 and rewritten as version 1 on the next save.

use super::StoreError;
use crate::model::{WebApp, validate};
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Document version written by this release.
pub const STORE_VERSION: u32 = 1;

/// Top-level store document.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreDocument {
    pub version: u32,
    pub apps: Vec<WebAppRecord>,
}

/// One persisted descriptor. Optional fields are omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebAppRecord {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub bundle_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_data: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_app_path: Option<PathBuf>,
    #[serde(default)]
    pub allowed_domains: Vec<String>,
}

impl From<&WebApp> for WebAppRecord {
    fn from(app: &WebApp) -> Self {
        Self {
            id: app.id,
            name: app.name.clone(),
            url: app.url.to_string(),
            bundle_identifier: app.bundle_identifier.clone(),
            icon_data: app.icon.as_deref().map(|bytes| STANDARD.encode(bytes)),
            created_at: app.created_at,
            generated_app_path: app.generated_path.clone(),
            allowed_domains: app.allowed_domains.clone(),
        }
    }
}

impl TryFrom<WebAppRecord> for WebApp {
    type Error = StoreError;

    fn try_from(record: WebAppRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: String| StoreError::InvalidRecord {
            id: record.id,
            reason,
        };

        let url = validate(&record.url).map_err(|e| invalid(format!("url: {e}")))?;
        let icon = record
            .icon_data
            .as_deref()
            .map(|encoded| STANDARD.decode(encoded))
            .transpose()
            .map_err(|e| invalid(format!("iconData: {e}")))?;

        Ok(WebApp {
            id: record.id,
            name: record.name,
            url,
            bundle_identifier: record.bundle_identifier,
            icon,
            created_at: record.created_at,
            generated_path: record.generated_app_path,
            allowed_domains: record.allowed_domains,
        })
    }
}

/// Serializes descriptors as a pretty printed version 1 document.
pub fn encode(apps: &[WebApp]) -> Result<Vec<u8>, StoreError> {
    let document = StoreDocument {
        version: STORE_VERSION,
        apps: apps.iter().map(WebAppRecord::from).collect(),
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

/// Parses a store document of any supported version.
pub fn decode(bytes: &[u8]) -> Result<Vec<WebApp>, StoreError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;

    let records: Vec<WebAppRecord> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        let document: StoreDocument = serde_json::from_value(value)?;
        if document.version != STORE_VERSION {
            return Err(StoreError::UnsupportedVersion(document.version));
        }
        document.apps
    };

    records.into_iter().map(WebApp::try_from).collect()
}
