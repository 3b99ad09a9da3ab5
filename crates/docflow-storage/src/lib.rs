//! Docflow Storage Library
//!
//! The object storage gateway: a `Storage` trait with S3 (via `object_store`) and local
//! filesystem implementations.
//!
//! # Storage key format
//!
//! Every uploaded document gets a fresh key `documents/{uuid}.{ext}`. Keys are never
//! reused and must not contain `..` or a leading `/`. Key generation lives in the `keys`
//! module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use docflow_core::StorageBackend;
pub use factory::create_storage;
pub use keys::{generate_filename, storage_key_for};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ByteStream, Storage, StorageError, StorageResult};
