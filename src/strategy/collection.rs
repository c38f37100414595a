//! In-memory collection splitting

use memchr::memmem;

use crate::reader::documents::is_blank;

/// Cut `input` before every occurrence of `start_token` past offset 0.
///
/// Whitespace-only pieces are dropped. An empty token yields the whole input
/// as a single document.
pub fn split_documents<'a>(input: &'a str, start_token: &str) -> Vec<&'a str> {
    let mut documents = Vec::new();
    let mut start = 0;

    if !start_token.is_empty() && input.len() > 1 {
        for offset in memmem::find_iter(&input.as_bytes()[1..], start_token.as_bytes()) {
            let boundary = offset + 1;
            documents.push(&input[start..boundary]);
            start = boundary;
        }
    }
    documents.push(&input[start..]);

    documents.retain(|doc| !is_blank(doc.as_bytes()));
    log::debug!(target: "xmldict.reader", "split {} documents", documents.len());
    documents
}
