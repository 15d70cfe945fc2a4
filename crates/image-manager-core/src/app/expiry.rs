//! ExpiryEvaluator - 期限切れオブジェクトの判定と削除
//!
//! # フロー
//! 1. stat（timeout 付き）。失敗したら StatError で終了（delete はしない）
//! 2. `last_modified + threshold_hours` と現在時刻を比較（strictly after）
//! 3. 期限切れかつ削除要求ありなら delete（新しい timeout 枠で 1 回だけ）
//!
//! # 状態遷移（1 オブジェクト・1 実行）
//! `Start → Stated → {NotExpired | ExpiredKept | ExpiredDeleted | ExpiredDeleteFailed}`

use std::future::Future;
use std::time::Duration;

use tracing::{debug, error};

use crate::domain::{EvaluationOutcome, ExpiryPolicy, ObjectRef, Operation, StatError, StoreError};
use crate::ports::{Clock, ObjectStore, SystemClock};

/// ExpiryEvaluator は ObjectStore と Clock を注入して使う
///
/// # 使用例
/// ```ignore
/// let evaluator = ExpiryEvaluator::new(store);
/// let policy = ExpiryPolicy::new(48, Duration::from_millis(1000)).with_removal(true);
/// match evaluator.evaluate(&ObjectRef::new("my-vm-images", "tmpl.raw"), &policy).await? {
///     EvaluationOutcome::ExpiredDeleted => { /* ... */ }
///     _ => {}
/// }
/// ```
///
/// 状態を持たないので、同じ evaluator を何度呼んでも結果は互いに独立。
pub struct ExpiryEvaluator<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: ObjectStore> ExpiryEvaluator<S> {
    /// システム時刻で判定する evaluator を作成
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: ObjectStore, C: Clock> ExpiryEvaluator<S, C> {
    /// 時刻源を指定して作成（テストでは FixedClock）
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// オブジェクト 1 件を評価する
    ///
    /// # Errors
    /// stat が失敗した場合（NotFound / Timeout / Transport）は `StatError`。
    /// delete の失敗はエラーではなく `EvaluationOutcome::ExpiredDeleteFailed`。
    pub async fn evaluate(
        &self,
        object: &ObjectRef,
        policy: &ExpiryPolicy,
    ) -> Result<EvaluationOutcome, StatError> {
        let metadata = bounded(Operation::Stat, policy.timeout, self.store.stat(object))
            .await
            .map_err(|source| StatError::new(object.clone(), source))?;

        debug!(
            %object,
            metadata = %serde_json::to_string(&metadata).unwrap_or_default(),
            "stat"
        );

        let now = self.clock.now();
        let expires_at = policy.expires_at(metadata.last_modified);

        if !policy.is_expired(metadata.last_modified, now) {
            debug!(%object, %expires_at, "not expired");
            return Ok(EvaluationOutcome::NotExpired);
        }

        debug!(
            %object,
            last_modified = %metadata.last_modified,
            %expires_at,
            "expired"
        );

        if !policy.remove_if_expired {
            return Ok(EvaluationOutcome::ExpiredKept);
        }

        debug!(%object, "removing");
        match bounded(Operation::Delete, policy.timeout, self.store.delete(object)).await {
            Ok(()) => {
                debug!(%object, "removed");
                Ok(EvaluationOutcome::ExpiredDeleted)
            }
            Err(e) => {
                error!(%object, error = %e, "failed to remove expired object");
                Ok(EvaluationOutcome::ExpiredDeleteFailed(e))
            }
        }
    }
}

/// 1 回のストレージ呼び出しを時間枠で打ち切る
///
/// 時間切れになると future は drop され、呼び出しは中断される。
async fn bounded<T>(
    operation: Operation,
    limit: Duration,
    call: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| StoreError::Timeout {
            operation,
            after: limit,
        })?
}
