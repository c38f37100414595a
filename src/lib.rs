//! xmldict - XML documents as nested maps
//!
//! Parsing runs in two stages:
//! 1. syntax: single-pass lexer from text to a flat node sequence
//! 2. tree: fold the nodes into maps, lists and text
//!
//! reader and strategy add files, collection streams and parallel parsing on
//! top; the NIFs below expose all of it to Elixir.

use rustler::{Binary, Encoder, Env, NifResult, ResourceArc, Term};

pub mod reader;
pub mod strategy;
pub mod syntax;
pub mod tree;

mod resource;
mod term;

pub use syntax::error::{ErrorKind, ParseError};
pub use syntax::node::{Attribute, Node};
pub use tree::{ListMode, Map, ParseOptions, Value, DEFAULT_ATTR_PREFIX, TEXT_KEY};

use reader::CollectionOptions;
use resource::{CollectionRef, CollectionResource};
use term::{error_to_term, nodes_to_term, result_to_term};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn parse_options(attr_prefix: &str, legacy_lists: bool) -> ParseOptions {
    let list_mode = if legacy_lists {
        ListMode::PassWide
    } else {
        ListMode::Scoped
    };
    ParseOptions::new()
        .with_attr_prefix(attr_prefix)
        .with_list_mode(list_mode)
}

// ============================================================================
// Documents
// ============================================================================

/// Parse one document (returns {:ok, map} or {:error, reason})
#[rustler::nif]
fn parse<'a>(
    env: Env<'a>,
    input: Binary<'a>,
    attr_prefix: &str,
    legacy_lists: bool,
) -> NifResult<Term<'a>> {
    let options = parse_options(attr_prefix, legacy_lists);
    let result = std::str::from_utf8(input.as_slice())
        .map_err(ParseError::from)
        .and_then(|text| tree::parse_with(text, &options));
    result_to_term(env, result)
}

/// Read and parse one document from disk
#[rustler::nif(schedule = "DirtyIo")]
fn parse_file<'a>(
    env: Env<'a>,
    path: &str,
    attr_prefix: &str,
    legacy_lists: bool,
) -> NifResult<Term<'a>> {
    let options = parse_options(attr_prefix, legacy_lists);
    result_to_term(env, reader::parse_file(path, &options))
}

/// Lexer output as tagged tuples, for inspecting what the folder sees
#[rustler::nif]
fn scan_nodes<'a>(env: Env<'a>, input: Binary<'a>) -> NifResult<Term<'a>> {
    let scanned = std::str::from_utf8(input.as_slice())
        .map_err(ParseError::from)
        .and_then(syntax::lexer::scan);
    match scanned {
        Ok(nodes) => Ok((term::ok(), nodes_to_term(env, &nodes)).encode(env)),
        Err(e) => Ok(error_to_term(env, &e)),
    }
}

// ============================================================================
// Collections
// ============================================================================

/// Split a concatenated collection and parse its documents in parallel.
/// Returns one {:ok, map} | {:error, reason} per document, in input order.
#[rustler::nif(schedule = "DirtyCpu")]
fn parse_collection<'a>(
    env: Env<'a>,
    input: Binary<'a>,
    attr_prefix: &str,
    start_token: &str,
) -> NifResult<Term<'a>> {
    let text = match std::str::from_utf8(input.as_slice()) {
        Ok(text) => text,
        Err(e) => return Ok(error_to_term(env, &ParseError::from(e))),
    };
    let options = parse_options(attr_prefix, false);
    let results = strategy::parse_collection(text, start_token, &options);

    let mut list = Term::list_new_empty(env);
    for result in results.into_iter().rev() {
        list = list.list_prepend(result_to_term(env, result)?);
    }
    Ok(list)
}

/// Open a collection file for document-at-a-time reading
#[rustler::nif(schedule = "DirtyIo")]
fn collection_open<'a>(env: Env<'a>, path: &str, start_token: &str) -> NifResult<Term<'a>> {
    let collection = CollectionOptions::default().with_start_token(start_token);
    match reader::parse_collection_file(path, &collection, &ParseOptions::default()) {
        Ok(documents) => {
            let arc = ResourceArc::new(CollectionResource::new(documents));
            Ok(arc.encode(env))
        }
        Err(e) => Ok(error_to_term(env, &e)),
    }
}

/// Parse the next document of an open collection, or :done
#[rustler::nif(schedule = "DirtyIo")]
fn collection_next<'a>(
    env: Env<'a>,
    collection: CollectionRef,
    attr_prefix: &str,
) -> NifResult<Term<'a>> {
    let options = parse_options(attr_prefix, false);
    match collection.next_document(&options) {
        Ok(Some(result)) => result_to_term(env, result),
        Ok(None) => Ok(term::done().encode(env)),
        Err(reason) => Ok((term::error(), reason).encode(env)),
    }
}

// ============================================================================
// NIF Initialization
// ============================================================================

// CollectionResource registers itself through #[rustler::resource_impl]
rustler::init!("Elixir.XmlDict.Native");
