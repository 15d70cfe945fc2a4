//! Errors - エラー型と分類
//!
//! # 分類
//! - StoreError: ストレージ呼び出し 1 回分の失敗（stat / delete 共通）
//! - StatError: メタデータ取得の失敗。評価そのものが成立しない（致命的）
//! - ConnectionError: クライアント構築の失敗
//!
//! delete の失敗は評価結果（`EvaluationOutcome::ExpiredDeleteFailed`）に
//! StoreError として格納されるため、専用のエラー型は持たない。

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use super::object::ObjectRef;

/// ストレージに対する操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Stat,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Stat => f.write_str("stat"),
            Operation::Delete => f.write_str("delete"),
        }
    }
}

/// ErrorKind は StoreError の運用分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// オブジェクトが存在しない
    NotFound,
    /// 時間枠内に応答がなかった
    Timeout,
    /// ネットワーク・認証・サーバー側の失敗
    Transport,
    /// 応答はあったが必要な情報が欠けていた
    InvalidResponse,
}

/// StoreError はストレージ呼び出し 1 回分の失敗
///
/// リトライはしない。1 回の失敗がその実行における最終結果。
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object {object} not found")]
    NotFound { object: ObjectRef },

    #[error("{operation} timed out after {after:?}")]
    Timeout { operation: Operation, after: Duration },

    #[error("{operation} failed: {message}")]
    Transport { operation: Operation, message: String },

    #[error("object {object} has no last-modified timestamp")]
    MissingLastModified { object: ObjectRef },
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Timeout { .. } => ErrorKind::Timeout,
            StoreError::Transport { .. } => ErrorKind::Transport,
            StoreError::MissingLastModified { .. } => ErrorKind::InvalidResponse,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }
}

/// StatError はメタデータ取得の失敗
///
/// 「期限切れではない」とは解釈しない。評価結果を作らずに呼び出し元へ返す。
#[derive(Debug, Error)]
#[error("stat {object} failed: {source}")]
pub struct StatError {
    pub object: ObjectRef,
    #[source]
    pub source: StoreError,
}

impl StatError {
    pub fn new(object: ObjectRef, source: StoreError) -> Self {
        Self { object, source }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// ConnectionError はストレージクライアント構築時のエラー
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("endpoint is empty")]
    EmptyEndpoint,

    #[error("invalid endpoint '{0}'")]
    InvalidEndpoint(String),
}
