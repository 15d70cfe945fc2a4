//! Object identity and the metadata a stat call returns.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single object in a bucket.
///
/// Supplied by the caller for each evaluation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Storage-layer attributes of an object.
///
/// Only `last_modified` drives the expiry decision. The other fields are
/// kept so `--debug` can show what the server reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub last_modified: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ObjectMetadata {
    pub fn new(last_modified: DateTime<Utc>) -> Self {
        Self {
            last_modified,
            size: None,
            etag: None,
            content_type: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn object_ref_displays_as_bucket_slash_key() {
        let object = ObjectRef::new("my-vm-images", "templates/debian-12.raw");
        assert_eq!(object.to_string(), "my-vm-images/templates/debian-12.raw");
    }

    #[test]
    fn metadata_json_omits_unknown_fields() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let metadata = ObjectMetadata::new(at);

        let v = serde_json::to_value(&metadata).unwrap();
        assert_eq!(v["last_modified"], "2024-01-01T12:00:00Z");
        assert!(v.get("size").is_none());
        assert!(v.get("etag").is_none());
    }

    #[test]
    fn metadata_json_includes_reported_fields() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let metadata = ObjectMetadata::new(at)
            .with_size(4096)
            .with_etag("\"abc\"")
            .with_content_type("application/octet-stream");

        let v = serde_json::to_value(&metadata).unwrap();
        assert_eq!(v["size"], 4096);
        assert_eq!(v["etag"], "\"abc\"");
        assert_eq!(v["content_type"], "application/octet-stream");
    }
}
