//! Ports - 抽象化レイヤー
//!
//! 評価ロジックが外部（S3 互換ストレージ、時刻）に依存する箇所を trait で切り出す。
//! テストでは InMemoryObjectStore と FixedClock に差し替える。

pub mod clock;
pub mod object_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::object_store::ObjectStore;
