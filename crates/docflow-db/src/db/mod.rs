//! Database repositories for data access layer
//!
//! `document` owns the `documents` table. Callers depend on the `DocumentStore` trait so
//! the pipeline can run against an in-memory store in tests.

pub mod document;

pub use document::{DocumentRepository, DocumentStore};
