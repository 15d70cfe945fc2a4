//! App - アプリケーション層
//!
//! ports を組み合わせて期限切れ判定を実装する。
//!
//! # 主要コンポーネント
//! - **ExpiryEvaluator**: stat → 判定 → （必要なら）delete

pub mod expiry;

pub use self::expiry::ExpiryEvaluator;
