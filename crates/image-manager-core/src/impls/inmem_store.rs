//! InMemoryObjectStore - 開発・テスト用のストレージ
//!
//! # 学習ポイント
//! - Mutex で保護した HashMap によるバケット/キー管理
//! - 呼び出し回数のカウント（「delete は最大 1 回」の検証用）
//! - 障害注入（失敗・ハング）によるタイムアウト経路のテスト

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::{ObjectMetadata, ObjectRef, Operation, StoreError};
use crate::ports::ObjectStore;

/// Fault は次の呼び出しで注入する障害
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Transport エラーを即座に返す
    Fail(String),
    /// 応答を返さない（呼び出し側のタイムアウトでのみ終わる）
    Hang,
}

#[derive(Default)]
struct Faults {
    stat: Option<Fault>,
    delete: Option<Fault>,
}

/// InMemoryObjectStore は開発用の ObjectStore
///
/// # 実装詳細
/// - HashMap<ObjectRef, ObjectMetadata> でオブジェクトを管理
/// - delete に成功するとエントリが消える（以後の stat は NotFound）
/// - 注入した障害は解除するまで毎回適用される
///
/// # 使用例
/// ```ignore
/// let store = InMemoryObjectStore::new();
/// store.insert(ObjectRef::new("b", "k"), ObjectMetadata::new(Utc::now()));
/// store.inject_delete_fault(Fault::Hang);
/// ```
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<ObjectRef, ObjectMetadata>>,
    faults: Mutex<Faults>,
    stat_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl InMemoryObjectStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// オブジェクトを追加（同じキーは上書き）
    pub fn insert(&self, object: ObjectRef, metadata: ObjectMetadata) {
        lock(&self.objects).insert(object, metadata);
    }

    pub fn contains(&self, object: &ObjectRef) -> bool {
        lock(&self.objects).contains_key(object)
    }

    pub fn inject_stat_fault(&self, fault: Fault) {
        lock(&self.faults).stat = Some(fault);
    }

    pub fn inject_delete_fault(&self, fault: Fault) {
        lock(&self.faults).delete = Some(fault);
    }

    pub fn clear_faults(&self) {
        *lock(&self.faults) = Faults::default();
    }

    /// これまでの stat 呼び出し回数
    pub fn stat_calls(&self) -> usize {
        self.stat_calls.load(Ordering::SeqCst)
    }

    /// これまでの delete 呼び出し回数
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

/// ロック中に panic したテストがあっても後続の呼び出しを止めない
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn apply(fault: Option<Fault>, operation: Operation) -> Result<(), StoreError> {
    match fault {
        None => Ok(()),
        Some(Fault::Fail(message)) => Err(StoreError::Transport { operation, message }),
        Some(Fault::Hang) => std::future::pending().await,
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn stat(&self, object: &ObjectRef) -> Result<ObjectMetadata, StoreError> {
        self.stat_calls.fetch_add(1, Ordering::SeqCst);

        // guard を await 越しに保持しない
        let fault = lock(&self.faults).stat.clone();
        apply(fault, Operation::Stat).await?;

        lock(&self.objects)
            .get(object)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                object: object.clone(),
            })
    }

    async fn delete(&self, object: &ObjectRef) -> Result<(), StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        let fault = lock(&self.faults).delete.clone();
        apply(fault, Operation::Delete).await?;

        // S3 と同じく、存在しないキーの削除も成功扱い
        lock(&self.objects).remove(object);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn object() -> ObjectRef {
        ObjectRef::new("my-vm-images", "debian.raw")
    }

    fn metadata() -> ObjectMetadata {
        ObjectMetadata::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn stat_returns_inserted_metadata() {
        let store = InMemoryObjectStore::new();
        store.insert(object(), metadata());

        let got = store.stat(&object()).await.unwrap();
        assert_eq!(got, metadata());
        assert_eq!(store.stat_calls(), 1);
    }

    #[tokio::test]
    async fn stat_missing_is_not_found() {
        let store = InMemoryObjectStore::new();
        let err = store.stat(&object()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_removes_and_counts() {
        let store = InMemoryObjectStore::new();
        store.insert(object(), metadata());

        store.delete(&object()).await.unwrap();
        assert!(!store.contains(&object()));
        assert_eq!(store.delete_calls(), 1);
        assert!(store.stat(&object()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn injected_failure_keeps_object() {
        let store = InMemoryObjectStore::new();
        store.insert(object(), metadata());
        store.inject_delete_fault(Fault::Fail("access denied".to_string()));

        let err = store.delete(&object()).await.unwrap_err();
        assert_eq!(err.to_string(), "delete failed: access denied");
        assert!(store.contains(&object()));

        store.clear_faults();
        store.delete(&object()).await.unwrap();
        assert!(!store.contains(&object()));
    }

    #[tokio::test(start_paused = true)]
    async fn injected_hang_never_completes() {
        let store = InMemoryObjectStore::new();
        store.insert(object(), metadata());
        store.inject_stat_fault(Fault::Hang);

        let res = tokio::time::timeout(Duration::from_secs(60), store.stat(&object())).await;
        assert!(res.is_err());
        assert_eq!(store.stat_calls(), 1);
    }
}
