//! # Introduction
//!
//! bases reads an expression as you type it, shows the tree a precedence
//! climber builds from it, and lists every integer literal in hex, octal,
//! binary and decimal. The terminal UI is built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → SymbolStream → Parser → Node (+ Diagnostics) → TUI / printer
//! ```
//!
//! 1. [`parser`]: scans symbols (inline or on a producer thread), climbs
//!    binding levels from an [`parser::OperatorTable`] and builds a
//!    [`parser::Node`] tree. Malformed input degrades the tree and records
//!    [`parser::Diagnostics`]; it never fails the parse.
//! 2. [`num`]: decodes integer literals and formats them per [`num::Base`].
//! 3. [`batch`]: prints trees, diagnostics and literals for scripted use.
//! 4. [`ui`]: ratatui-based TUI; not part of the stable library API.
//! 5. [`cli`], [`log`], [`error`]: arguments, tracing setup, error type.
//!
//! ## Example
//!
//! ```
//! let parsed = bases::parser::parse_expression("1 + 2 * 3");
//! assert_eq!(parsed.render(), "(+ 1 (* 2 3))");
//! assert!(parsed.is_clean());
//! ```

pub mod batch;
pub mod cli;
pub mod error;
pub mod log;
pub mod num;
pub mod parser;
pub mod ui;

pub use error::{BasesError, BasesResult};
