//! Multi-document strategies
//!
//! - collection: cut an in-memory collection into documents
//! - parallel: parse many documents at once with rayon

pub mod collection;
pub mod parallel;

pub use collection::split_documents;
pub use parallel::{parse_collection, parse_parallel};
