//! ExpiryPolicy - 期限切れ判定のルール
//!
//! # 学習ポイント
//! - 判定ロジック（純粋関数）と I/O（stat/delete）の分離
//! - 境界値は「strictly after」: 経過時間がちょうど閾値なら期限切れではない

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// ExpiryPolicy は 1 回の実行で使う判定ルール
///
/// 設定ファイルと CLI フラグから一度だけ解決され、評価中は読み取り専用。
///
/// # フィールド
/// - `threshold_hours`: この時間を超えたオブジェクトを期限切れとみなす
/// - `timeout`: stat / delete それぞれに与える時間枠（共有しない）
/// - `remove_if_expired`: 期限切れなら削除するか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    pub threshold_hours: u32,
    pub timeout: Duration,
    pub remove_if_expired: bool,
}

impl ExpiryPolicy {
    /// 削除なしのポリシーを作成
    pub fn new(threshold_hours: u32, timeout: Duration) -> Self {
        Self {
            threshold_hours,
            timeout,
            remove_if_expired: false,
        }
    }

    /// 期限切れ時に削除するかを設定
    pub fn with_removal(mut self, remove_if_expired: bool) -> Self {
        self.remove_if_expired = remove_if_expired;
        self
    }

    /// `last_modified + threshold_hours` を返す
    ///
    /// 加算が表現範囲を超える場合は `DateTime::<Utc>::MAX_UTC`（= 期限切れにならない）。
    pub fn expires_at(&self, last_modified: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::try_hours(i64::from(self.threshold_hours))
            .and_then(|threshold| last_modified.checked_add_signed(threshold))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// `now` が期限時刻より厳密に後なら true
    pub fn is_expired(&self, last_modified: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now > self.expires_at(last_modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn policy(hours: u32) -> ExpiryPolicy {
        ExpiryPolicy::new(hours, Duration::from_millis(1000))
    }

    #[test]
    fn new_policy_does_not_remove() {
        let p = policy(48);
        assert!(!p.remove_if_expired);
        assert!(p.with_removal(true).remove_if_expired);
    }

    #[test]
    fn expires_at_adds_threshold_hours() {
        let last_modified = now() - TimeDelta::hours(10);
        assert_eq!(policy(48).expires_at(last_modified), now() + TimeDelta::hours(38));
    }

    #[rstest]
    #[case::well_within(TimeDelta::hours(47), false)]
    #[case::one_second_before(TimeDelta::hours(48) - TimeDelta::seconds(1), false)]
    #[case::exactly_at_threshold(TimeDelta::hours(48), false)]
    #[case::one_nanosecond_after(TimeDelta::hours(48) + TimeDelta::nanoseconds(1), true)]
    #[case::one_hour_after(TimeDelta::hours(49), true)]
    #[case::long_gone(TimeDelta::hours(100), true)]
    fn expiry_boundary_is_strict(#[case] age: TimeDelta, #[case] expected: bool) {
        let last_modified = now() - age;
        assert_eq!(policy(48).is_expired(last_modified, now()), expected);
    }

    #[test]
    fn zero_threshold_expires_anything_older_than_now() {
        let p = policy(0);
        assert!(!p.is_expired(now(), now()));
        assert!(p.is_expired(now() - TimeDelta::milliseconds(1), now()));
    }

    #[test]
    fn huge_threshold_saturates_instead_of_overflowing() {
        let p = policy(u32::MAX);
        assert_eq!(p.expires_at(now()), DateTime::<Utc>::MAX_UTC);
        assert!(!p.is_expired(now() - TimeDelta::days(365 * 100), now()));
    }

    #[test]
    fn modified_in_the_future_is_not_expired() {
        let last_modified = now() + TimeDelta::hours(5);
        assert!(!policy(0).is_expired(last_modified, now()));
    }
}
