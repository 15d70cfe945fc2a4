use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::{ConnectionError, StatError};

/// 1 回の実行を中断させるエラー
///
/// delete の失敗はここに含まれない（評価結果として返る）。
#[derive(Debug, Error)]
pub enum ImageManagerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot create storage client: {0}")]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Stat(#[from] StatError),
}
