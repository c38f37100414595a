//! Attribute scanning inside an open tag
//!
//! Runs after the element name, starting on the whitespace byte that ended
//! it, and stops once the tag is closed by `>` or `/>`.

use super::error::ParseError;
use super::node::Attribute;
use super::scanner::{is_name_char, is_name_start_char, is_space, Scanner};

/// How an open tag ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEnd {
    /// `>`: the element stays open
    Open,
    /// `/>`
    SelfClosing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrState {
    /// Right after a name or a closing quote; whitespace required
    Space,
    /// Between attributes
    Start,
    Name,
    /// Whitespace after the key, before `=`
    AfterName,
    /// After `=`, waiting for the opening quote
    AfterEquals,
    /// Inside a value delimited by this quote byte
    Value(u8),
}

impl AttrState {
    /// `>` is only acceptable while no attribute is half-written
    fn is_past_start(self) -> bool {
        !matches!(self, AttrState::Space | AttrState::Start)
    }
}

/// Scan attributes into `attributes` until the tag ends
pub fn scan_attributes<'a>(
    scanner: &mut Scanner<'a>,
    attributes: &mut Vec<Attribute<'a>>,
) -> Result<TagEnd, ParseError> {
    let mut state = AttrState::Space;
    let mut key_start = 0;
    let mut key_end = 0;
    let mut value_start = 0;

    loop {
        let pos = scanner.position();
        let b = scanner.peek().ok_or(ParseError::UnclosedToken)?;

        if b == b'>' {
            if state.is_past_start() {
                return Err(ParseError::not_well_formed(pos));
            }
            scanner.advance(1);
            return Ok(TagEnd::Open);
        }

        match state {
            AttrState::Space | AttrState::Start
                if b == b'/' && scanner.peek_at(1) == Some(b'>') =>
            {
                scanner.advance(2);
                return Ok(TagEnd::SelfClosing);
            }
            AttrState::Space => {
                if !is_space(b) {
                    return Err(ParseError::not_well_formed(pos));
                }
                state = AttrState::Start;
            }
            AttrState::Start => {
                if is_name_start_char(b) {
                    key_start = pos;
                    state = AttrState::Name;
                } else if !is_space(b) {
                    return Err(ParseError::not_well_formed(pos));
                }
            }
            AttrState::Name => {
                if b == b'=' {
                    key_end = pos;
                    state = AttrState::AfterEquals;
                } else if is_space(b) {
                    key_end = pos;
                    state = AttrState::AfterName;
                } else if !is_name_char(b) {
                    return Err(ParseError::not_well_formed(pos));
                }
            }
            AttrState::AfterName => {
                if b == b'=' {
                    state = AttrState::AfterEquals;
                } else if !is_space(b) {
                    return Err(ParseError::not_well_formed(pos));
                }
            }
            AttrState::AfterEquals => {
                if b == b'"' || b == b'\'' {
                    value_start = pos + 1;
                    state = AttrState::Value(b);
                } else if !is_space(b) {
                    return Err(ParseError::not_well_formed(pos));
                }
            }
            AttrState::Value(quote) => {
                if b == quote {
                    attributes.push(Attribute {
                        key: scanner.slice(key_start, key_end),
                        value: scanner.slice(value_start, pos),
                    });
                    state = AttrState::Space;
                } else {
                    // Jump to the closing quote, or to a `>` that will reject the tag
                    let next = scanner.find_byte2_or_end(quote, b'>');
                    scanner.seek(next);
                    continue;
                }
            }
        }
        scanner.advance(1);
    }
}
