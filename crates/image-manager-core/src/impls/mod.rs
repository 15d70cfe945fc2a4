//! Impls - ports の実装
//!
//! - **S3ObjectStore**: 本番用（aws-sdk-s3）
//! - **InMemoryObjectStore**: 開発・テスト用

pub mod inmem_store;
pub mod s3_store;

pub use self::inmem_store::{Fault, InMemoryObjectStore};
pub use self::s3_store::{S3Config, S3ObjectStore};
