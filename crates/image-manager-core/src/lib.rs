//! image-manager-core
//!
//! S3 互換ストレージ上の VM イメージテンプレートの期限切れ判定と削除。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ObjectRef, ExpiryPolicy, EvaluationOutcome, errors）
//! - **ports**: 抽象化レイヤー（ObjectStore, Clock）
//! - **app**: アプリケーションロジック（ExpiryEvaluator）
//! - **impls**: 実装（S3ObjectStore, InMemoryObjectStore）
//! - **config**: 設定ファイルとフラグの統合（Settings）

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod impls;
pub mod ports;

pub use self::error::ImageManagerError;
