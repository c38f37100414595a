//! Parallel Document Parsing
//!
//! Uses Rayon to parse independent documents concurrently. Every parse owns
//! its state, so results only depend on the input and come back in input
//! order.

use rayon::prelude::*;

use super::collection::split_documents;
use crate::syntax::error::ParseError;
use crate::tree::{parse_with, ParseOptions, Value};

/// Parse several documents in parallel
pub fn parse_parallel(
    documents: &[&str],
    options: &ParseOptions,
) -> Vec<Result<Value, ParseError>> {
    documents
        .par_iter()
        .map(|doc| parse_with(doc, options))
        .collect()
}

/// Split an in-memory collection and parse its documents in parallel
pub fn parse_collection(
    input: &str,
    start_token: &str,
    options: &ParseOptions,
) -> Vec<Result<Value, ParseError>> {
    let documents = split_documents(input, start_token);
    parse_parallel(&documents, options)
}
