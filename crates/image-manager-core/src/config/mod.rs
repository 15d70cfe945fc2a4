//! Config - 設定ファイルとフラグの統合
//!
//! # 優先順位
//! 組み込みデフォルト < 設定ファイル（JSON） < 明示的に指定された CLI フラグ
//!
//! 統合結果は不変の [`Settings`] として評価の前に一度だけ作られる。

pub mod file;
pub mod settings;

pub use self::file::{ConfigFile, DEFAULT_CONFIG_PATH};
pub use self::settings::{Overrides, Settings};

use std::path::PathBuf;

use thiserror::Error;

/// ConfigError は設定の読み込み・書き出し・検証のエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("path {0} exists, refusing to overwrite it with an example config")]
    AlreadyExists(PathBuf),

    #[error("cannot write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("missing bucket, pass --bucket or set DefaultBucket in the config file")]
    MissingBucket,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}
