//! ResourceArc Wrappers
//!
//! Persistent state for collection streams read across NIF calls.

use std::fs::File;
use std::sync::Mutex;

use rustler::ResourceArc;

use crate::reader::Documents;
use crate::syntax::error::ParseError;
use crate::tree::{ParseOptions, Value};

/// Wrapper for an open collection file that can be stored in a ResourceArc
pub struct CollectionResource {
    pub inner: Mutex<Documents<File>>,
}

impl CollectionResource {
    pub fn new(documents: Documents<File>) -> Self {
        CollectionResource {
            inner: Mutex::new(documents),
        }
    }

    /// Parse the next document of the collection.
    ///
    /// # Errors
    ///
    /// Returns `"mutex_poisoned"` if the collection mutex is poisoned.
    pub fn next_document(
        &self,
        options: &ParseOptions,
    ) -> Result<Option<Result<Value, ParseError>>, &'static str> {
        let mut guard = self.inner.lock().map_err(|_| "mutex_poisoned")?;
        Ok(guard.next_with(options))
    }
}

#[rustler::resource_impl]
impl rustler::Resource for CollectionResource {}

/// Type alias for the ResourceArc
pub type CollectionRef = ResourceArc<CollectionResource>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{parse_collection_file, CollectionOptions};

    #[test]
    fn test_next_document_until_exhausted() {
        let path = std::env::temp_dir().join(format!("xmldict-{}-resource.xml", std::process::id()));
        std::fs::write(&path, "<?xml?><a k='1'/><?xml?><b/>").unwrap();
        let documents =
            parse_collection_file(&path, &CollectionOptions::default(), &ParseOptions::default())
                .unwrap();
        let resource = CollectionResource::new(documents);

        let options = ParseOptions::new().with_attr_prefix("-");
        let first = resource.next_document(&options).unwrap().unwrap().unwrap();
        assert_eq!(first.get("a").and_then(|a| a.get("-k")).and_then(Value::as_str), Some("1"));
        let second = resource.next_document(&options).unwrap().unwrap().unwrap();
        assert!(second.get("b").is_some());
        assert!(resource.next_document(&options).unwrap().is_none());
        std::fs::remove_file(&path).unwrap();
    }
}
