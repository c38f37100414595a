//! Document splitter for concatenated collections
//!
//! Reads any `Read` source in fixed-size chunks and cuts it into documents,
//! one per occurrence of the start token. The first document may be preceded
//! by anything; a token at the very start of the buffer never splits.

use std::io::{self, Read};

use memchr::memmem;

/// Token that begins each document in a collection
pub const DEFAULT_START_TOKEN: &str = "<?xml";

/// Bytes requested from the reader per fill
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// How a collection stream is cut into documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionOptions {
    /// Document boundary marker. Empty disables splitting.
    pub start_token: String,
    pub chunk_size: usize,
}

impl CollectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_token(mut self, token: impl Into<String>) -> Self {
        self.start_token = token.into();
        self
    }

    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }
}

impl Default for CollectionOptions {
    fn default() -> Self {
        CollectionOptions {
            start_token: DEFAULT_START_TOKEN.to_owned(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Iterator over the raw documents of a collection stream
pub struct DocumentSplitter<R: Read> {
    reader: R,
    buffer: Vec<u8>,
    start_token: Vec<u8>,
    chunk_size: usize,
    /// Offset where the next token search resumes
    search_from: usize,
    eof: bool,
}

impl<R: Read> DocumentSplitter<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, &CollectionOptions::default())
    }

    pub fn with_options(reader: R, options: &CollectionOptions) -> Self {
        DocumentSplitter {
            reader,
            buffer: Vec::new(),
            start_token: options.start_token.as_bytes().to_vec(),
            chunk_size: options.chunk_size.max(1),
            search_from: 1,
            eof: false,
        }
    }

    /// Read one chunk onto the end of the buffer
    fn fill_buffer(&mut self) -> io::Result<()> {
        let end = self.buffer.len();
        self.buffer.resize(end + self.chunk_size, 0);
        let read = loop {
            match self.reader.read(&mut self.buffer[end..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buffer.truncate(end);
                    return Err(e);
                }
            }
        };
        self.buffer.truncate(end + read);
        if read == 0 {
            self.eof = true;
        }
        Ok(())
    }

    /// Offset of the next document boundary in the buffer, if buffered yet
    fn find_boundary(&mut self) -> Option<usize> {
        if self.start_token.is_empty() || self.search_from >= self.buffer.len() {
            return None;
        }
        match memmem::find(&self.buffer[self.search_from..], &self.start_token) {
            Some(offset) => {
                // The buffer will start with the token once the document is cut
                let boundary = self.search_from + offset;
                self.search_from = 1;
                Some(boundary)
            }
            None => {
                // A token may straddle the end of what has been read so far
                let overlap = self.start_token.len() - 1;
                self.search_from = self.buffer.len().saturating_sub(overlap).max(1);
                None
            }
        }
    }
}

impl<R: Read> Iterator for DocumentSplitter<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(boundary) = self.find_boundary() {
                let document: Vec<u8> = self.buffer.drain(..boundary).collect();
                if is_blank(&document) {
                    continue;
                }
                log::debug!(target: "xmldict.reader", "split document of {} bytes", document.len());
                return Some(Ok(document));
            }

            if self.eof {
                let document = std::mem::take(&mut self.buffer);
                if is_blank(&document) {
                    return None;
                }
                log::debug!(target: "xmldict.reader", "last document of {} bytes", document.len());
                return Some(Ok(document));
            }

            if let Err(e) = self.fill_buffer() {
                log::debug!(target: "xmldict.reader", "read failed: {}", e);
                self.eof = true;
                self.buffer.clear();
                return Some(Err(e));
            }
        }
    }
}

/// True when the bytes hold nothing but ASCII whitespace
pub(crate) fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn split(data: &str, options: &CollectionOptions) -> Vec<String> {
        DocumentSplitter::with_options(Cursor::new(data.as_bytes().to_vec()), options)
            .map(|doc| String::from_utf8(doc.unwrap()).unwrap())
            .collect()
    }

    #[test]
    fn test_splits_on_start_token() {
        let data = "<?xml v?><a/><?xml v?><b/>";
        let docs = split(data, &CollectionOptions::default());
        assert_eq!(docs, ["<?xml v?><a/>", "<?xml v?><b/>"]);
    }

    #[test]
    fn test_token_straddles_chunks() {
        let data = "<?xml v?><a>1</a>\n<?xml v?><a>2</a>\n<?xml v?><a>3</a>";
        for chunk_size in 1..8 {
            let options = CollectionOptions::default().with_chunk_size(chunk_size);
            let docs = split(data, &options);
            assert_eq!(
                docs,
                ["<?xml v?><a>1</a>\n", "<?xml v?><a>2</a>\n", "<?xml v?><a>3</a>"],
                "chunk_size={}",
                chunk_size
            );
        }
    }

    #[test]
    fn test_leading_bytes_stay_with_first_document() {
        let docs = split("junk<?xml?><a/>", &CollectionOptions::default());
        assert_eq!(docs, ["junk", "<?xml?><a/>"]);
    }

    #[test]
    fn test_blank_documents_skipped() {
        let docs = split("  \n<?xml?><a/>\n\n", &CollectionOptions::default());
        assert_eq!(docs, ["<?xml?><a/>\n\n"]);
        assert!(split("", &CollectionOptions::default()).is_empty());
        assert!(split(" \t\n", &CollectionOptions::default()).is_empty());
    }

    #[test]
    fn test_empty_token_disables_splitting() {
        let options = CollectionOptions::default().with_start_token("").with_chunk_size(3);
        let docs = split("<?xml?><a/><?xml?><b/>", &options);
        assert_eq!(docs, ["<?xml?><a/><?xml?><b/>"]);
    }

    #[test]
    fn test_custom_token() {
        let options = CollectionOptions::default().with_start_token("<rec").with_chunk_size(4);
        let docs = split("<rec>1</rec><rec>2</rec>", &options);
        assert_eq!(docs, ["<rec>1</rec>", "<rec>2</rec>"]);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "boom"))
        }
    }

    #[test]
    fn test_read_error_ends_iteration() {
        let mut splitter = DocumentSplitter::new(FailingReader);
        assert!(matches!(splitter.next(), Some(Err(_))));
        assert!(splitter.next().is_none());
    }
}
