//! Lexical units produced by the lexer
//!
//! A document is a flat, ordered sequence of nodes. Nesting is implied by
//! matching `ContainerOpen`/`ContainerClose` pairs; the folder rebuilds the
//! tree from it without any parent/child links here.

use std::borrow::Cow;

/// Attribute as written in the tag, value not decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// A lexical unit borrowed from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    /// Self-closing element: `<name .../>`
    Primitive {
        name: &'a str,
        attributes: Vec<Attribute<'a>>,
    },
    /// Open tag: `<name ...>`
    ContainerOpen {
        name: &'a str,
        attributes: Vec<Attribute<'a>>,
    },
    /// Close tag: `</name>`
    ContainerClose { name: &'a str },
    /// Raw text, including CDATA payloads. Owned only once runs were merged.
    Text(Cow<'a, str>),
    /// Comment, content discarded
    Comment,
}

impl<'a> Node<'a> {
    /// Element name for open, close and self-closing nodes
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Node::Primitive { name, .. }
            | Node::ContainerOpen { name, .. }
            | Node::ContainerClose { name } => Some(name),
            _ => None,
        }
    }

    pub fn attributes(&self) -> &[Attribute<'a>] {
        match self {
            Node::Primitive { attributes, .. } | Node::ContainerOpen { attributes, .. } => {
                attributes
            }
            _ => &[],
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(t.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let open = Node::ContainerOpen {
            name: "a",
            attributes: vec![Attribute { key: "x", value: "1" }],
        };
        assert_eq!(open.name(), Some("a"));
        assert_eq!(open.attributes().len(), 1);
        assert_eq!(open.as_text(), None);

        let text = Node::Text(Cow::Borrowed("hi"));
        assert_eq!(text.name(), None);
        assert!(text.attributes().is_empty());
        assert_eq!(text.as_text(), Some("hi"));
    }
}
