//! Core XML lexing primitives
//!
//! This module contains the building blocks of the first parse stage:
//! - Scanner: byte cursor with memchr-accelerated delimiter search
//! - Lexer: single-pass state machine from text to a flat node sequence
//! - Attributes: the attribute state machine inside open tags
//! - Node: the lexical units handed to the folder
//! - Error: the error type shared by every stage

pub mod attributes;
pub mod error;
pub mod lexer;
pub mod node;
pub mod scanner;
