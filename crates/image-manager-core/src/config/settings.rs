//! Settings - 統合済みの設定値
//!
//! フラグが「明示的に指定されたか」は `Option` で表す（`Some` = 指定あり）。

use std::time::Duration;

use super::{ConfigError, ConfigFile};
use crate::domain::ExpiryPolicy;
use crate::impls::S3Config;

/// Overrides はコマンドラインで明示指定された値
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub bucket: Option<String>,
    pub expiry_hours: Option<u32>,
    pub timeout_ms: Option<u64>,
}

/// Settings は 1 回の実行で使う不変の設定
///
/// # 検証
/// - bucket は空でない
/// - timeout_ms は 0 でない
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub https: bool,
    pub bucket: String,
    pub expiry_hours: u32,
    pub timeout_ms: u64,
}

impl Settings {
    /// 設定ファイルの値にフラグの値を重ねて検証する
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Result<Self, ConfigError> {
        let settings = Self {
            endpoint: file.endpoint,
            access_key: file.access_key,
            secret_key: file.secret_key,
            https: file.https,
            bucket: overrides.bucket.unwrap_or(file.default_bucket),
            expiry_hours: overrides.expiry_hours.unwrap_or(file.default_expiry_hours),
            timeout_ms: overrides.timeout_ms.unwrap_or(file.default_timeout_ms),
        };

        if settings.bucket.trim().is_empty() {
            return Err(ConfigError::MissingBucket);
        }
        if settings.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn expiry_policy(&self, remove_if_expired: bool) -> ExpiryPolicy {
        ExpiryPolicy::new(self.expiry_hours, self.timeout()).with_removal(remove_if_expired)
    }

    pub fn s3_config(&self) -> S3Config {
        S3Config::new(&self.endpoint)
            .with_credentials(&self.access_key, &self.secret_key)
            .with_https(self.https)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("https", &self.https)
            .field("bucket", &self.bucket)
            .field("expiry_hours", &self.expiry_hours)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn file() -> ConfigFile {
        ConfigFile {
            endpoint: "minio:9000".to_string(),
            access_key: "ak".to_string(),
            secret_key: "sk".to_string(),
            https: true,
            default_expiry_hours: 72,
            default_bucket: "from-file".to_string(),
            default_timeout_ms: 2500,
        }
    }

    #[test]
    fn file_values_apply_without_overrides() {
        let s = Settings::resolve(file(), Overrides::default()).unwrap();
        assert_eq!(s.bucket, "from-file");
        assert_eq!(s.expiry_hours, 72);
        assert_eq!(s.timeout(), Duration::from_millis(2500));
        assert!(s.https);
    }

    #[test]
    fn explicit_flags_win_over_file() {
        let overrides = Overrides {
            bucket: Some("from-flag".to_string()),
            expiry_hours: Some(12),
            timeout_ms: Some(300),
        };
        let s = Settings::resolve(file(), overrides).unwrap();
        assert_eq!(s.bucket, "from-flag");
        assert_eq!(s.expiry_hours, 12);
        assert_eq!(s.timeout_ms, 300);
    }

    #[test]
    fn explicit_zero_hours_is_honoured() {
        let overrides = Overrides {
            expiry_hours: Some(0),
            ..Overrides::default()
        };
        let s = Settings::resolve(file(), overrides).unwrap();
        assert_eq!(s.expiry_hours, 0);
    }

    #[test]
    fn defaults_apply_when_file_is_empty() {
        let overrides = Overrides {
            bucket: Some("b".to_string()),
            ..Overrides::default()
        };
        let s = Settings::resolve(ConfigFile::default(), overrides).unwrap();
        assert_eq!(s.endpoint, "localhost:9000");
        assert_eq!(s.expiry_hours, 48);
        assert_eq!(s.timeout_ms, 1000);
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("  ")]
    fn empty_bucket_is_rejected(#[case] bucket: &str) {
        let overrides = Overrides {
            bucket: Some(bucket.to_string()),
            ..Overrides::default()
        };
        let err = Settings::resolve(file(), overrides).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBucket));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let overrides = Overrides {
            timeout_ms: Some(0),
            ..Overrides::default()
        };
        let err = Settings::resolve(file(), overrides).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));
    }

    #[test]
    fn policy_and_s3_config_follow_settings() {
        let s = Settings::resolve(file(), Overrides::default()).unwrap();

        let policy = s.expiry_policy(true);
        assert_eq!(policy.threshold_hours, 72);
        assert_eq!(policy.timeout, Duration::from_millis(2500));
        assert!(policy.remove_if_expired);

        let s3 = s.s3_config();
        assert_eq!(s3.endpoint_url().unwrap(), "https://minio:9000");
        assert_eq!(s3.access_key, "ak");
        assert_eq!(s3.secret_key, "sk");
    }
}
