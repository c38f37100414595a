//! Folder - rebuild nesting from the node sequence into a [`Value`]
//!
//! Each open element gets a frame on an explicit stack; the frame owns the
//! element's map until the matching close tag, when the map is collapsed (if
//! it only holds text) and placed into its parent. Where it goes in the
//! parent (new key, appended to a list, or promoted to a list) is decided at
//! open time, which is when later siblings and the pass-wide flag observe it.

use std::mem;

use super::options::ListMode;
use super::value::{Map, Value};
use crate::syntax::error::ParseError;
use crate::syntax::node::{Attribute, Node};
use crate::syntax::scanner::is_space;

/// Reserved key for element text content
pub const TEXT_KEY: &str = "#text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// First child with this name
    Insert,
    /// Push onto the list already stored under the name
    Append,
    /// Replace the stored value with `[old, new]`
    Promote,
}

struct Frame<'a> {
    name: &'a str,
    map: Map,
    placement: Placement,
}

/// Fold scanned nodes into the document value
pub fn fold<'a, I>(nodes: I, attr_prefix: &str, list_mode: ListMode) -> Result<Value, ParseError>
where
    I: IntoIterator<Item = Node<'a>>,
{
    let mut folder = Folder {
        attr_prefix,
        list_mode,
        root: Map::new(),
        frames: Vec::new(),
        list_flag: false,
    };
    for node in nodes {
        folder.step(node)?;
    }
    folder.finish()
}

struct Folder<'a, 'p> {
    attr_prefix: &'p str,
    list_mode: ListMode,
    root: Map,
    /// Open elements; the document root is kept apart in `root`
    frames: Vec<Frame<'a>>,
    /// Whether the last insertion made or extended a list
    list_flag: bool,
}

impl<'a, 'p> Folder<'a, 'p> {
    fn current(&self) -> &Map {
        self.frames.last().map_or(&self.root, |f| &f.map)
    }

    fn current_mut(&mut self) -> &mut Map {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.map,
            None => &mut self.root,
        }
    }

    fn step(&mut self, node: Node<'a>) -> Result<(), ParseError> {
        match node {
            Node::Text(text) => {
                let trimmed = text.trim_matches(|c: char| c.is_ascii() && is_space(c as u8));
                if !trimmed.is_empty() {
                    let value = Value::Scalar(trimmed.to_owned());
                    self.current_mut().insert(TEXT_KEY.to_owned(), value);
                }
            }
            Node::Primitive { name, attributes } => {
                let map = self.attribute_map(&attributes);
                let placement = self.placement(name);
                place(self.current_mut(), name, Value::Map(map), placement);
            }
            Node::ContainerOpen { name, attributes } => {
                let map = self.attribute_map(&attributes);
                let placement = self.placement(name);
                log::trace!(target: "xmldict.fold", "push <{}> depth={}", name, self.frames.len() + 1);
                self.frames.push(Frame {
                    name,
                    map,
                    placement,
                });
            }
            Node::ContainerClose { name } => {
                let frame = match self.frames.pop() {
                    Some(frame) if frame.name == name => frame,
                    _ => {
                        return Err(ParseError::TagMismatch {
                            name: name.to_owned(),
                        })
                    }
                };
                log::trace!(target: "xmldict.fold", "pop </{}> depth={}", name, self.frames.len());
                let value = collapse(frame.map);
                place(self.current_mut(), frame.name, value, frame.placement);
            }
            Node::Comment => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<Value, ParseError> {
        if !self.frames.is_empty() {
            return Err(ParseError::UnclosedTags {
                count: self.frames.len(),
            });
        }
        Ok(Value::Map(self.root))
    }

    fn attribute_map(&self, attributes: &[Attribute<'_>]) -> Map {
        attributes
            .iter()
            .map(|a| {
                let mut key = String::with_capacity(self.attr_prefix.len() + a.key.len());
                key.push_str(self.attr_prefix);
                key.push_str(a.key);
                (key, Value::Scalar(a.value.to_owned()))
            })
            .collect()
    }

    /// Decide where a new child called `name` goes in the current map
    fn placement(&mut self, name: &str) -> Placement {
        let append = match self.current().get(name) {
            None => {
                self.list_flag = false;
                return Placement::Insert;
            }
            Some(existing) => {
                let is_list = matches!(existing, Value::List(_));
                match self.list_mode {
                    ListMode::Scoped => is_list,
                    ListMode::PassWide => self.list_flag && is_list,
                }
            }
        };
        if append {
            Placement::Append
        } else {
            self.list_flag = true;
            Placement::Promote
        }
    }
}

fn place(map: &mut Map, name: &str, value: Value, placement: Placement) {
    if !map.contains_key(name) {
        map.insert(name.to_owned(), value);
        return;
    }
    match map.get_mut(name) {
        Some(Value::List(items)) if placement == Placement::Append => items.push(value),
        Some(slot) => {
            let old = mem::take(slot);
            *slot = Value::List(vec![old, value]);
        }
        None => {}
    }
}

/// A map holding nothing but text becomes that text
fn collapse(mut map: Map) -> Value {
    if map.len() == 1 {
        if let Some(text) = map.shift_remove(TEXT_KEY) {
            return text;
        }
    }
    Value::Map(map)
}
