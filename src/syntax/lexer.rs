//! Lexer - single pass over the document producing a flat node sequence
//!
//! Recognizes a leading `<?xml ... ?>` prolog, open/close/self-closing tags,
//! text, comments and CDATA sections. Everything else is rejected. Nesting is
//! only tracked far enough to attach text to its enclosing element: text that
//! is split by child elements or CDATA sections is merged into the first text
//! node of that element.

use std::borrow::Cow;
use std::collections::HashMap;

use super::attributes::{scan_attributes, TagEnd};
use super::error::ParseError;
use super::node::Node;
use super::scanner::{is_name_char, is_name_start_char, is_space, Scanner};

/// Container id of the implicit document root
const ROOT_ID: usize = 0;

/// Scan `input` into nodes
pub fn scan(input: &str) -> Result<Vec<Node<'_>>, ParseError> {
    Lexer::new(input).run()
}

/// Per-call lexer state
struct Lexer<'a> {
    scanner: Scanner<'a>,
    nodes: Vec<Node<'a>>,
    /// Incremented for every dispatched unit; open tags take it as their id
    node_counter: usize,
    /// Ids of open containers, rooted with `ROOT_ID`
    ancestors: Vec<usize>,
    /// Container id -> index of its text node in `nodes`
    text_nodes: HashMap<usize, usize>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            scanner: Scanner::new(input),
            nodes: Vec::with_capacity(input.len() / 16),
            node_counter: ROOT_ID,
            ancestors: vec![ROOT_ID],
            text_nodes: HashMap::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Node<'a>>, ParseError> {
        self.skip_prolog()?;

        while let Some(b) = self.scanner.peek() {
            self.node_counter += 1;
            if b == b'<' {
                self.scanner.advance(1);
                match (self.scanner.peek(), self.scanner.peek_at(1)) {
                    (Some(b'/'), _) => self.scan_close()?,
                    (Some(b'!'), Some(b'[')) => self.scan_cdata()?,
                    (Some(b'!'), _) => self.scan_comment()?,
                    _ => self.scan_open()?,
                }
            } else {
                self.scan_text()?;
            }
        }

        Ok(self.nodes)
    }

    fn emit(&mut self, node: Node<'a>) {
        log::trace!(target: "xmldict.lexer", "node {}: {:?}", self.nodes.len(), node);
        self.nodes.push(node);
    }

    fn skip_prolog(&mut self) -> Result<(), ParseError> {
        if !self.scanner.starts_with(b"<?xml") {
            return Ok(());
        }
        self.scanner.advance(5);
        let end = self.scanner.find_seq(b"?>").ok_or(ParseError::UnclosedToken)?;
        self.scanner.seek(end + 2);
        Ok(())
    }

    /// `</name>`, cursor on the `/`
    fn scan_close(&mut self) -> Result<(), ParseError> {
        self.scanner.advance(1);
        let start = self.scanner.position();
        let first = self.scanner.peek().ok_or(ParseError::UnclosedToken)?;
        if !is_name_start_char(first) {
            return Err(ParseError::not_well_formed(start));
        }
        self.scanner.advance(1);

        let mut name_end = None;
        loop {
            let pos = self.scanner.position();
            let b = self.scanner.peek().ok_or(ParseError::UnclosedToken)?;
            if b == b'>' {
                break;
            }
            if is_space(b) {
                name_end.get_or_insert(pos);
            } else if !is_name_char(b) || name_end.is_some() {
                return Err(ParseError::not_well_formed(pos));
            }
            self.scanner.advance(1);
        }

        let end = self.scanner.position();
        let name = self.scanner.slice(start, name_end.unwrap_or(end));
        self.scanner.advance(1);

        if self.ancestors.len() > 1 {
            self.ancestors.pop();
        }
        self.emit(Node::ContainerClose { name });
        Ok(())
    }

    /// `<name ...>` or `<name .../>`, cursor on the first name byte
    fn scan_open(&mut self) -> Result<(), ParseError> {
        let start = self.scanner.position();
        let first = self.scanner.peek().ok_or(ParseError::UnclosedToken)?;
        if !is_name_start_char(first) {
            return Err(ParseError::not_well_formed(start));
        }
        self.scanner.advance(1);

        let mut attributes = Vec::new();
        let (name, end) = loop {
            let pos = self.scanner.position();
            let b = self.scanner.peek().ok_or(ParseError::UnclosedToken)?;
            match b {
                b'>' => {
                    self.scanner.advance(1);
                    break (self.scanner.slice(start, pos), TagEnd::Open);
                }
                b'/' if self.scanner.peek_at(1) == Some(b'>') => {
                    self.scanner.advance(2);
                    break (self.scanner.slice(start, pos), TagEnd::SelfClosing);
                }
                b if is_name_char(b) => self.scanner.advance(1),
                b if is_space(b) => {
                    let name = self.scanner.slice(start, pos);
                    let end = scan_attributes(&mut self.scanner, &mut attributes)?;
                    break (name, end);
                }
                _ => return Err(ParseError::not_well_formed(pos)),
            }
        };

        match end {
            TagEnd::SelfClosing => self.emit(Node::Primitive { name, attributes }),
            TagEnd::Open => {
                self.ancestors.push(self.node_counter);
                self.emit(Node::ContainerOpen { name, attributes });
            }
        }
        Ok(())
    }

    /// `<!-- ... -->`, cursor on the `!`
    fn scan_comment(&mut self) -> Result<(), ParseError> {
        self.scanner.advance(1);
        match (self.scanner.peek(), self.scanner.peek_at(1)) {
            (Some(b'-'), Some(b'-')) => {}
            (None, _) | (Some(b'-'), None) => return Err(ParseError::UnclosedToken),
            _ => return Err(ParseError::not_well_formed(self.scanner.position())),
        }
        self.scanner.advance(2);

        let end = self.scanner.find_seq(b"-->").ok_or(ParseError::UnclosedToken)?;
        // `--->` ends the comment with a `--` inside it
        if self.scanner.byte_at(end - 1) == Some(b'-') {
            return Err(ParseError::not_well_formed(end - 1));
        }
        self.scanner.seek(end + 3);
        self.emit(Node::Comment);
        Ok(())
    }

    /// `<![CDATA[ ... ]]>`, cursor on the `!`
    fn scan_cdata(&mut self) -> Result<(), ParseError> {
        self.scanner.advance(2);
        for &expected in b"CDATA[" {
            let pos = self.scanner.position();
            match self.scanner.peek() {
                None => return Err(ParseError::UnclosedToken),
                Some(b) if b != expected => return Err(ParseError::not_well_formed(pos)),
                Some(_) => self.scanner.advance(1),
            }
        }

        let start = self.scanner.position();
        let end = self.scanner.find_seq(b"]]>").ok_or(ParseError::UnclosedToken)?;
        let payload = self.scanner.slice(start, end);
        self.scanner.seek(end + 3);
        self.push_text(payload);
        Ok(())
    }

    /// Bare character data up to the next `<`
    fn scan_text(&mut self) -> Result<(), ParseError> {
        let start = self.scanner.position();
        let end = self.scanner.find_byte_or_end(b'<');
        let run = self.scanner.slice(start, end);

        if let Some(offset) = run
            .bytes()
            .position(|b| matches!(b, b'&' | b'>' | b'"' | b'\''))
        {
            return Err(ParseError::not_well_formed(start + offset));
        }

        self.scanner.seek(end);
        self.push_text(run);
        Ok(())
    }

    /// Attach a text run to the innermost open container
    ///
    /// Appends to the container's existing text node if it has one. Otherwise
    /// a new node is emitted, unless the run is empty or all whitespace.
    fn push_text(&mut self, run: &'a str) {
        let parent = self.ancestors.last().copied().unwrap_or(ROOT_ID);

        if let Some(&index) = self.text_nodes.get(&parent) {
            if let Some(Node::Text(text)) = self.nodes.get_mut(index) {
                text.to_mut().push_str(run);
            }
            return;
        }

        if run.bytes().all(is_space) {
            return;
        }
        self.text_nodes.insert(parent, self.nodes.len());
        self.emit(Node::Text(Cow::Borrowed(run)));
    }
}
