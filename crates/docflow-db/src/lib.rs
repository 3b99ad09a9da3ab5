//! Docflow Database Layer
//!
//! The document repository: a `DocumentStore` trait and its PostgreSQL implementation.

pub mod db;

pub use db::{DocumentRepository, DocumentStore};
