//! On-disk JSON config.
//!
//! Field names match the files already deployed next to the tool, e.g.
//!
//! ```json
//! {
//! 	"Endpoint": "localhost:9000",
//! 	"AccessKey": "...",
//! 	"SecretKey": "...",
//! 	"HTTPS": false,
//! 	"DefaultExpiryTime": 48,
//! 	"DefaultBucket": "my-vm-images",
//! 	"DefaultTimeoutMS": 1000
//! }
//! ```

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use super::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "./config.json";

pub const DEFAULT_ENDPOINT: &str = "localhost:9000";
pub const DEFAULT_EXPIRY_HOURS: u32 = 48;
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Config file contents. Missing fields take their defaults.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    #[serde(rename = "Endpoint")]
    pub endpoint: String,

    #[serde(rename = "AccessKey")]
    pub access_key: String,

    #[serde(rename = "SecretKey")]
    pub secret_key: String,

    #[serde(rename = "HTTPS")]
    pub https: bool,

    /// Hours.
    #[serde(rename = "DefaultExpiryTime")]
    pub default_expiry_hours: u32,

    #[serde(rename = "DefaultBucket")]
    pub default_bucket: String,

    #[serde(rename = "DefaultTimeoutMS")]
    pub default_timeout_ms: u64,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: String::new(),
            secret_key: String::new(),
            https: false,
            default_expiry_hours: DEFAULT_EXPIRY_HOURS,
            default_bucket: String::new(),
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl std::fmt::Debug for ConfigFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigFile")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("https", &self.https)
            .field("default_expiry_hours", &self.default_expiry_hours)
            .field("default_bucket", &self.default_bucket)
            .field("default_timeout_ms", &self.default_timeout_ms)
            .finish()
    }
}

impl ConfigFile {
    /// Placeholder config written by `write-example-config`.
    pub fn example() -> Self {
        Self {
            access_key: "x".repeat(20),
            secret_key: "x".repeat(40),
            default_bucket: "my-vm-images".to_string(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Tab-indented JSON.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, ConfigError> {
        let mut out = Vec::new();
        let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
        self.serialize(&mut ser).map_err(ConfigError::Serialize)?;
        Ok(out)
    }

    /// Write [`ConfigFile::example`] to `path`.
    ///
    /// Never overwrites: an existing path is an error. The file is created
    /// with mode 0600 on Unix since it holds credentials.
    pub fn write_example(path: &Path) -> Result<(), ConfigError> {
        let body = Self::example().to_pretty_json()?;

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut file = options.open(path).map_err(|source| match source.kind() {
            ErrorKind::AlreadyExists => ConfigError::AlreadyExists(path.to_path_buf()),
            _ => write_err(source),
        })?;
        file.write_all(&body).map_err(write_err)?;
        Ok(())
    }
}
