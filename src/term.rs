//! Elixir Term Conversion Utilities
//!
//! Converts folded values and lexer nodes to Elixir terms.

use rustler::{Encoder, Env, NewBinary, NifResult, Term};

use crate::syntax::error::ParseError;
use crate::syntax::node::{Attribute, Node};
use crate::tree::Value;

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    ok,
    error,
    done,
    open,
    close,
    primitive,
    text,
    comment,
}

/// Convert a folded value: scalars to binaries, maps to maps with binary
/// keys, lists to lists
pub fn value_to_term<'a>(env: Env<'a>, value: &Value) -> NifResult<Term<'a>> {
    match value {
        Value::Scalar(s) => Ok(str_to_binary(env, s)),
        Value::List(items) => {
            let mut list = Term::list_new_empty(env);
            for item in items.iter().rev() {
                list = list.list_prepend(value_to_term(env, item)?);
            }
            Ok(list)
        }
        Value::Map(map) => {
            let pairs = map
                .iter()
                .map(|(k, v)| Ok((str_to_binary(env, k), value_to_term(env, v)?)))
                .collect::<NifResult<Vec<_>>>()?;
            Term::map_from_pairs(env, &pairs)
        }
    }
}

/// `{:ok, value}` or `{:error, message}`
pub fn result_to_term<'a>(env: Env<'a>, result: Result<Value, ParseError>) -> NifResult<Term<'a>> {
    match result {
        Ok(value) => Ok((ok(), value_to_term(env, &value)?).encode(env)),
        Err(e) => Ok(error_to_term(env, &e)),
    }
}

pub fn error_to_term<'a>(env: Env<'a>, e: &ParseError) -> Term<'a> {
    (error(), str_to_binary(env, &e.to_string())).encode(env)
}

/// Convert lexer output to tagged tuples
pub fn nodes_to_term<'a>(env: Env<'a>, nodes: &[Node<'_>]) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for node in nodes.iter().rev() {
        list = list.list_prepend(node_to_term(env, node));
    }
    list
}

fn node_to_term<'a>(env: Env<'a>, node: &Node<'_>) -> Term<'a> {
    match node {
        Node::ContainerOpen { name, attributes } => {
            (open(), str_to_binary(env, name), attributes_to_term(env, attributes)).encode(env)
        }
        Node::Primitive { name, attributes } => {
            (primitive(), str_to_binary(env, name), attributes_to_term(env, attributes)).encode(env)
        }
        Node::ContainerClose { name } => (close(), str_to_binary(env, name)).encode(env),
        Node::Text(t) => (text(), str_to_binary(env, t)).encode(env),
        Node::Comment => comment().encode(env),
    }
}

fn attributes_to_term<'a>(env: Env<'a>, attributes: &[Attribute<'_>]) -> Term<'a> {
    let mut attrs = Term::list_new_empty(env);
    for attr in attributes.iter().rev() {
        let tuple = (str_to_binary(env, attr.key), str_to_binary(env, attr.value));
        attrs = attrs.list_prepend(tuple.encode(env));
    }
    attrs
}

/// Convert a string to a binary term (more efficient than .encode())
#[inline]
fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
