//! Expression reader
//!
//! This module turns source text into an expression tree:
//! - [`lexer`]: Tokenization (source text → symbols)
//! - [`stream`]: Pull-based symbol stream with undo, inline or pipelined
//! - [`ops`]: Binding levels and the operator table
//! - [`parse`]: Precedence climbing (symbols → tree)
//! - [`ast`]: Tree node definitions
//! - [`diagnostics`]: Non-fatal problem reports
//!
//! # Supported Syntax
//!
//! The symbol set is Go's: identifiers, integer/float/imaginary/rune/string
//! literals, the 25 keywords and the full operator set. Only expressions are
//! read. Which operators exist, and how tightly they bind, is decided
//! entirely by the [`ops::OperatorTable`] handed to the parser.
//!
//! # Parser Implementation
//!
//! Pratt parsing over binding levels. Precedence and associativity are
//! encoded in the table, so the climber is a single recursive function.

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod ops;
pub mod parse;
pub mod stream;
pub mod symbol;

pub use ast::{Node, Rule};
pub use diagnostics::{Diagnostic, Diagnostics, SourceLocation};
pub use ops::{Assoc, BindingLevel, Operator, OperatorTable, Role};
pub use parse::{parse, parse_expression, ParseError, ParseOptions, Parsed, Parser};
pub use stream::{Scheduling, SymbolStream};
pub use symbol::{Symbol, SymbolKind};
