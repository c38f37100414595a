//! File and stream input
//!
//! - `parse_file`: read a whole document from disk and parse it
//! - `DocumentSplitter`: cut a concatenated collection stream into documents
//! - `Documents`: parse each document of a collection as it is split off

pub mod documents;

pub use documents::{CollectionOptions, DocumentSplitter, DEFAULT_CHUNK_SIZE, DEFAULT_START_TOKEN};

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::syntax::error::ParseError;
use crate::tree::{parse_with, ParseOptions, Value};

/// Read a file that must hold UTF-8 text
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String, ParseError> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| ParseError::from(e.utf8_error()))
}

/// Parse a single document stored in a file
pub fn parse_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Value, ParseError> {
    let text = read_file(path)?;
    parse_with(&text, options)
}

/// Parsed documents of a collection stream, in stream order
pub struct Documents<R: Read> {
    splitter: DocumentSplitter<R>,
    options: ParseOptions,
}

impl<R: Read> Documents<R> {
    pub fn new(reader: R, collection: &CollectionOptions, options: ParseOptions) -> Self {
        Documents {
            splitter: DocumentSplitter::with_options(reader, collection),
            options,
        }
    }

    /// Parse the next document with options other than the ones given at
    /// construction
    pub fn next_with(&mut self, options: &ParseOptions) -> Option<Result<Value, ParseError>> {
        next_document(&mut self.splitter, options)
    }
}

impl<R: Read> Iterator for Documents<R> {
    type Item = Result<Value, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        next_document(&mut self.splitter, &self.options)
    }
}

fn next_document<R: Read>(
    splitter: &mut DocumentSplitter<R>,
    options: &ParseOptions,
) -> Option<Result<Value, ParseError>> {
    let document = match splitter.next()? {
        Ok(document) => document,
        Err(e) => return Some(Err(e.into())),
    };
    let text = match std::str::from_utf8(&document) {
        Ok(text) => text,
        Err(e) => return Some(Err(e.into())),
    };
    Some(parse_with(text, options))
}

/// Parse every document of a collection read from `reader`
pub fn parse_collection_reader<R: Read>(
    reader: R,
    collection: &CollectionOptions,
    options: &ParseOptions,
) -> Documents<R> {
    Documents::new(reader, collection, options.clone())
}

/// Parse every document of a collection stored in a file
pub fn parse_collection_file<P: AsRef<Path>>(
    path: P,
    collection: &CollectionOptions,
    options: &ParseOptions,
) -> Result<Documents<File>, ParseError> {
    let file = File::open(path)?;
    Ok(parse_collection_reader(file, collection, options))
}
