//! S3-backed object store (MinIO, Ceph RGW, AWS S3, ...).

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use chrono::DateTime;
use tracing::debug;

use crate::domain::{ConnectionError, ObjectMetadata, ObjectRef, Operation, StoreError};
use crate::ports::ObjectStore;

/// Region sent when the endpoint does not care (MinIO's default).
pub const DEFAULT_REGION: &str = "us-east-1";

/// Connection parameters for an S3-compatible endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct S3Config {
    /// `host:port`, or a full URL with scheme.
    pub endpoint: String,

    pub access_key: String,

    pub secret_key: String,

    /// Scheme used when `endpoint` has none.
    pub https: bool,

    pub region: String,
}

impl S3Config {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: String::new(),
            secret_key: String::new(),
            https: false,
            region: DEFAULT_REGION.to_string(),
        }
    }

    /// Set static credentials.
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = access_key.into();
        self.secret_key = secret_key.into();
        self
    }

    pub fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Endpoint as a URL the SDK accepts.
    pub fn endpoint_url(&self) -> Result<String, ConnectionError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConnectionError::EmptyEndpoint);
        }

        let (scheme, host) = match endpoint.split_once("://") {
            Some((scheme @ ("http" | "https"), rest)) => (scheme, rest),
            Some(_) => return Err(ConnectionError::InvalidEndpoint(self.endpoint.clone())),
            None if self.https => ("https", endpoint),
            None => ("http", endpoint),
        };

        let host = host.trim_end_matches('/');
        if host.is_empty() || host.contains(char::is_whitespace) || host.contains('/') {
            return Err(ConnectionError::InvalidEndpoint(self.endpoint.clone()));
        }

        Ok(format!("{scheme}://{host}"))
    }
}

impl std::fmt::Debug for S3Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Config")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("https", &self.https)
            .field("region", &self.region)
            .finish()
    }
}

/// ObjectStore over the S3 protocol (`HeadObject` / `DeleteObject`).
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from configuration.
    ///
    /// Path-style addressing is always on; most self-hosted endpoints need it.
    /// SDK の retry は無効。各リクエストは 1 回だけ送る（timeout は呼び出し側で管理）。
    pub async fn connect(config: &S3Config) -> Result<Self, ConnectionError> {
        let endpoint_url = config.endpoint_url()?;
        debug!(endpoint = %endpoint_url, region = %config.region, "building s3 client");

        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "image-manager",
        );

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(endpoint_url)
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .build();

        Ok(Self::new(Client::from_conf(s3_config)))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn stat(&self, object: &ObjectRef) -> Result<ObjectMetadata, StoreError> {
        let output = self
            .client
            .head_object()
            .bucket(&object.bucket)
            .key(&object.key)
            .send()
            .await
            .map_err(|err| {
                let err = err.into_service_error();
                if err.is_not_found() {
                    StoreError::NotFound {
                        object: object.clone(),
                    }
                } else {
                    StoreError::Transport {
                        operation: Operation::Stat,
                        message: DisplayErrorContext(&err).to_string(),
                    }
                }
            })?;

        let last_modified = output
            .last_modified()
            .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()))
            .ok_or_else(|| StoreError::MissingLastModified {
                object: object.clone(),
            })?;

        let mut metadata = ObjectMetadata::new(last_modified);
        if let Some(size) = output.content_length().and_then(|n| u64::try_from(n).ok()) {
            metadata = metadata.with_size(size);
        }
        if let Some(etag) = output.e_tag() {
            metadata = metadata.with_etag(etag);
        }
        if let Some(content_type) = output.content_type() {
            metadata = metadata.with_content_type(content_type);
        }
        Ok(metadata)
    }

    async fn delete(&self, object: &ObjectRef) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(&object.bucket)
            .key(&object.key)
            .send()
            .await
            .map_err(|err| StoreError::Transport {
                operation: Operation::Delete,
                message: DisplayErrorContext(&err).to_string(),
            })?;
        Ok(())
    }
}
