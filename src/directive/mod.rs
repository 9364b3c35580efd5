//! Decoder for the inline directive syntax
//!
//! A directive is the text between `{{` and `}}`:
//!
//! ```text
//! {{ type=term src=greeting lang=fi }}
//! {{ type=fragment src="partials/header.html" }}
//! ```

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::{decode, parse_pairs};

/// Opening delimiter of a directive
pub const OPEN: &str = "{{";

/// Closing delimiter of a directive
pub const CLOSE: &str = "}}";
