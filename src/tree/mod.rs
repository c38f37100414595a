//! Document folding
//!
//! Turns the lexer's node sequence into a [`Value`] tree:
//!
//! ```text
//! &str ---> syntax::lexer::scan ---> Vec<Node> ---> folder::fold ---> Value
//! ```
//!
//! Attributes become `@`-prefixed keys (prefix configurable), text lands
//! under [`TEXT_KEY`], repeated siblings become lists, and an element with
//! nothing but text collapses to its text.

pub mod folder;
pub mod options;
pub mod value;

pub use folder::{fold, TEXT_KEY};
pub use options::{ListMode, ParseOptions, DEFAULT_ATTR_PREFIX};
pub use value::{Map, Value};

use crate::syntax::error::ParseError;
use crate::syntax::lexer::scan;

/// Parse a document with the given attribute prefix and default options
pub fn parse(input: &str, attr_prefix: &str) -> Result<Value, ParseError> {
    let options = ParseOptions::default().with_attr_prefix(attr_prefix);
    parse_with(input, &options)
}

/// Parse a document
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Value, ParseError> {
    scan(input)
        .and_then(|nodes| fold(nodes, &options.attr_prefix, options.list_mode))
        .map_err(|e| {
            log::debug!(target: "xmldict.fold", "parse failed: {}", e);
            e
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::error::ErrorKind;
    use proptest::prelude::*;

    fn parse_default(input: &str) -> Result<Value, ParseError> {
        parse(input, DEFAULT_ATTR_PREFIX)
    }

    fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
        entries.into_iter().collect()
    }

    #[test]
    fn test_leaf_element() {
        assert_eq!(parse_default("<a>v</a>").unwrap(), map([("a", "v".into())]));
    }

    #[test]
    fn test_attributes_and_repeated_children() {
        let v = parse_default(r#"<a x="1"><b>1</b><b>2</b></a>"#).unwrap();
        let expected = map([(
            "a",
            map([
                ("@x", "1".into()),
                ("b", Value::List(vec!["1".into(), "2".into()])),
            ]),
        )]);
        assert_eq!(v, expected);
    }

    #[test]
    fn test_self_closing_keeps_attribute_map() {
        let v = parse_default(r#"<a x="1"/>"#).unwrap();
        assert_eq!(v, map([("a", map([("@x", "1".into())]))]));
    }

    #[test]
    fn test_comment_contributes_nothing() {
        let v = parse_default("<a><!-- c --><b/></a>").unwrap();
        assert_eq!(v, map([("a", map([("b", Value::default())]))]));
    }

    #[test]
    fn test_cdata_bypasses_text_restrictions() {
        let v = parse_default("<a><![CDATA[raw&text]]></a>").unwrap();
        assert_eq!(v, map([("a", "raw&text".into())]));
        assert!(parse_default("<a>raw&text</a>").is_err());
    }

    #[test]
    fn test_mismatch_and_unclosed() {
        let err = parse_default("<a><b></a>").unwrap_err();
        assert!(matches!(err, ParseError::TagMismatch { .. }));
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let err = parse_default("<a><b>").unwrap_err();
        assert!(matches!(err, ParseError::UnclosedTags { count: 2 }));
        assert_eq!(err.kind(), ErrorKind::Unclosed);
    }

    #[test]
    fn test_whitespace_only_text_dropped() {
        assert_eq!(
            parse_default("<a>   </a>").unwrap(),
            map([("a", Value::default())])
        );
    }

    #[test]
    fn test_prolog_and_nested_document() {
        let input = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalog>
  <book id="bk101">
    <author>Gambardella, Matthew</author>
    <title>XML Developer Guide</title>
  </book>
  <book id="bk102">
    <author>Ralls, Kim</author>
    <title><![CDATA[Midnight Rain & Fog]]></title>
  </book>
</catalog>"#;
        let v = parse_default(input).unwrap();
        let books = v
            .get("catalog")
            .and_then(|c| c.get("book"))
            .and_then(Value::as_list)
            .unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].get("@id").and_then(Value::as_str), Some("bk101"));
        assert_eq!(
            books[1].get("title").and_then(Value::as_str),
            Some("Midnight Rain & Fog")
        );
    }

    #[test]
    fn test_parse_with_options() {
        let options = ParseOptions::new().with_attr_prefix("-");
        let v = parse_with("<a k='v'/>", &options).unwrap();
        assert_eq!(v.get("a").and_then(|a| a.get("-k")).and_then(Value::as_str), Some("v"));
    }

    #[test]
    fn test_malformed_reports_position() {
        let err = parse_default("<a>1 > 0</a>").unwrap_err();
        assert_eq!(err.to_string(), "not well formed (violation at pos=5)");
    }

    #[test]
    fn test_parse_is_repeatable() {
        let input = "<r><a x='1'>t</a><a/><b><![CDATA[c]]></b></r>";
        assert_eq!(parse_default(input).unwrap(), parse_default(input).unwrap());
    }

    fn tag_soup() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![
                Just("<a>".to_owned()),
                Just("</a>".to_owned()),
                Just("<b x='1'>".to_owned()),
                Just("</b>".to_owned()),
                Just("<c/>".to_owned()),
                Just("<!-- n -->".to_owned()),
                Just("<![CDATA[&]]>".to_owned()),
                "[a-z \n]{0,6}",
                "[<>/!?=\"'&\\[\\]a-zé -]{0,8}",
            ],
            0..24,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn prop_never_panics(input in tag_soup()) {
            let _ = parse_default(&input);
            let _ = parse_with(&input, &ParseOptions::new().with_list_mode(ListMode::PassWide));
        }

        #[test]
        fn prop_deterministic(input in tag_soup()) {
            let first = parse_default(&input);
            let second = parse_default(&input);
            match (first, second) {
                (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
                (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
                _ => prop_assert!(false, "results differ"),
            }
        }

        #[test]
        fn prop_arbitrary_text_never_panics(input in "\\PC{0,64}") {
            let _ = parse_default(&input);
        }
    }
}
