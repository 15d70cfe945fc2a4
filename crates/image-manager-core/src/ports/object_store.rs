//! ObjectStore port - S3 互換ストレージ（MinIO/S3/InMemory）
//!
//! 評価に必要なのは stat と delete の 2 操作だけ。
//!
//! # 実装
//! - **S3ObjectStore**: aws-sdk-s3 による本番用
//! - **InMemoryObjectStore**: 開発・テスト用

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ObjectMetadata, ObjectRef, StoreError};

/// ObjectStore はオブジェクト 1 件に対する stat / delete を提供
///
/// # 設計原則
/// - 時間枠（timeout）は呼び出し側が `tokio::time::timeout` で強制する
///   実装がハングしても future を drop すれば呼び出しは中断される
/// - 実装はリトライしない
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// メタデータを取得（読み取り専用）
    async fn stat(&self, object: &ObjectRef) -> Result<ObjectMetadata, StoreError>;

    /// オブジェクトを削除
    async fn delete(&self, object: &ObjectRef) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for Arc<T> {
    async fn stat(&self, object: &ObjectRef) -> Result<ObjectMetadata, StoreError> {
        (**self).stat(object).await
    }

    async fn delete(&self, object: &ObjectRef) -> Result<(), StoreError> {
        (**self).delete(object).await
    }
}
