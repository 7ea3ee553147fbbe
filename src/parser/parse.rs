//! Precedence climber
//!
//! This module provides the [`Parser`] struct, which reads one expression
//! from a [`SymbolStream`] using binding levels from an [`OperatorTable`],
//! plus the [`parse`] entry point that wires a source, a table and
//! [`ParseOptions`] together.
//!
//! # Error recovery
//!
//! Malformed input never aborts a parse. The climber records a diagnostic,
//! leaves a [`Node::Stop`] where reading broke off and lets the enclosing
//! calls keep whatever they had already built.

use super::ast::Node;
use super::diagnostics::{Diagnostic, Diagnostics, SourceLocation};
use super::lexer::Lexer;
use super::ops::{BindingLevel, OperatorTable};
use super::stream::{Pipeline, Scheduling, SymbolSource, SymbolStream};
use super::symbol::SymbolKind;
use std::panic;
use std::thread;
use thiserror::Error;

/// Default limit on nested climbs.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Native stack reserved per nested climb on the climbing thread.
const STACK_PER_LEVEL: usize = 16 * 1024;
const MIN_CLIMB_STACK: usize = 2 * 1024 * 1024;

/// Parser error type
///
/// Built from a parse that recorded diagnostics. Displays the first one;
/// the rest are kept in `diagnostics`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {message}")]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
    pub diagnostics: Vec<Diagnostic>,
}

/// How a parse is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub scheduling: Scheduling,
    /// Maximum number of nested climbs before the parser gives up on a
    /// subexpression.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            scheduling: Scheduling::Inline,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Result of reading one expression: always a tree, plus whatever went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub root: Node,
    pub diagnostics: Diagnostics,
    source: String,
}

impl Parsed {
    /// True if nothing was recorded. The tree may still be a bare `Stop`
    /// (empty input) or `Control` (lone keyword).
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn render(&self) -> String {
        self.root.render()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn locate(&self, diagnostic: &Diagnostic) -> SourceLocation {
        diagnostic.location(&self.source)
    }

    /// The error a parse with diagnostics reports, leaving the parse intact.
    pub fn error(&self) -> Option<ParseError> {
        let first = self.diagnostics.first()?;
        Some(ParseError {
            message: first.message.clone(),
            location: first.location(&self.source),
            diagnostics: self.diagnostics.iter().cloned().collect(),
        })
    }

    /// The tree if the parse was clean, otherwise every diagnostic.
    pub fn into_result(self) -> Result<Node, ParseError> {
        let Some(first) = self.diagnostics.first() else {
            return Ok(self.root);
        };
        Err(ParseError {
            message: first.message.clone(),
            location: first.location(&self.source),
            diagnostics: self.diagnostics.into_vec(),
        })
    }
}

/// Pratt parser over a symbol stream
pub struct Parser<'t, S> {
    stream: SymbolStream<S>,
    table: &'t OperatorTable,
    depth: usize,
    max_depth: usize,
}

impl<'t, S: SymbolSource> Parser<'t, S> {
    pub fn new(source: S, table: &'t OperatorTable, max_depth: usize) -> Self {
        Self {
            stream: SymbolStream::new(source),
            table,
            depth: 0,
            max_depth,
        }
    }

    /// Read a whole expression and complain about anything left after it.
    pub fn parse_expression(&mut self) -> Node {
        let root = self.climb(BindingLevel::Unbound);

        let rest = self.stream.next();
        if !rest.is_eof() && !rest.is_illegal() {
            self.stream
                .diagnostics_mut()
                .report(rest.offset, format!("unexpected {} after expression", rest));
        }
        root
    }

    /// Parse an expression whose operators all bind at least as tightly as
    /// `min`, leaving the first weaker operator unread.
    pub fn climb(&mut self, min: BindingLevel) -> Node {
        self.depth += 1;
        let node = if self.depth > self.max_depth {
            let symbol = self.stream.next();
            self.stream
                .diagnostics_mut()
                .report(symbol.offset, "expression nested too deeply");
            Node::Stop(symbol)
        } else {
            self.climb_within_depth(min)
        };
        self.depth -= 1;
        node
    }

    fn climb_within_depth(&mut self, min: BindingLevel) -> Node {
        let symbol = self.stream.next();
        tracing::trace!(depth = self.depth, %min, symbol = %symbol.spelling(), "climb");

        if symbol.is_eof() || symbol.is_illegal() {
            return Node::Stop(symbol);
        }
        if symbol.is_keyword() {
            return Node::Control(symbol);
        }

        let mut node = if symbol.is_identifier() || symbol.is_literal() {
            Node::Terminal(symbol)
        } else {
            match self.table.prefix(symbol.kind) {
                None => {
                    self.stream
                        .diagnostics_mut()
                        .report(symbol.offset, format!("unexpected {}", symbol));
                    return Node::Stop(symbol);
                }
                Some(_) if symbol.kind == SymbolKind::LParen => self.group(),
                Some(op) => {
                    let operand = self.climb(op.right);
                    Node::unary(op, symbol, operand)
                }
            }
        };

        loop {
            let ahead = self.stream.peek();
            if ahead.is_eof() {
                break;
            }

            if let Some(op) = self.table.postfix(ahead.kind).filter(|op| op.left >= min) {
                let symbol = self.stream.next();
                node = Node::unary(op, symbol, node);
                continue;
            }

            if let Some(op) = self.table.infix(ahead.kind).filter(|op| op.left >= min) {
                let symbol = self.stream.next();
                let rhs = self.climb(op.right);
                node = Node::binary(op, symbol, node, rhs);
                continue;
            }

            break;
        }

        node
    }

    /// Parenthesised subexpression; the opening paren is already consumed.
    fn group(&mut self) -> Node {
        let inner = self.climb(BindingLevel::Unbound);

        let close = self.stream.next();
        if close.kind != SymbolKind::RParen {
            self.stream.diagnostics_mut().report(
                close.offset,
                format!("unmatched delimiter: expected ')', found {}", close),
            );
            self.stream.undo(close);
        }
        inner
    }

    /// Diagnostics in offset order.
    pub fn finish(self) -> Diagnostics {
        let mut diagnostics = self.stream.into_diagnostics();
        diagnostics.sort();
        diagnostics
    }
}

/// Parse one expression from `source`.
///
/// The climb runs on its own thread with a stack sized for
/// `options.max_depth` nested climbs. A pipelined parse whose producer
/// thread cannot be started falls back to scanning inline; the result is the
/// same either way.
pub fn parse(source: &str, table: &OperatorTable, options: &ParseOptions) -> Parsed {
    let stack_size = options
        .max_depth
        .saturating_mul(STACK_PER_LEVEL)
        .max(MIN_CLIMB_STACK);

    let climbed = thread::scope(|scope| {
        thread::Builder::new()
            .name("expression-climber".to_string())
            .stack_size(stack_size)
            .spawn_scoped(scope, || read(source, table, options))
            .map(|handle| handle.join())
    });

    match climbed {
        Ok(Ok(parsed)) => parsed,
        Ok(Err(payload)) => panic::resume_unwind(payload),
        Err(err) => {
            tracing::warn!(%err, "could not start climbing thread, parsing on this one");
            read(source, table, options)
        }
    }
}

fn read(source: &str, table: &OperatorTable, options: &ParseOptions) -> Parsed {
    match options.scheduling {
        Scheduling::Inline => run(Lexer::new(source), source, table, options),
        Scheduling::Pipelined { capacity } => match Pipeline::spawn(source, capacity) {
            Ok(pipeline) => run(pipeline, source, table, options),
            Err(err) => {
                tracing::warn!(%err, "could not start symbol producer, scanning inline");
                run(Lexer::new(source), source, table, options)
            }
        },
    }
}

/// Parse with the seeded operator table and default options.
pub fn parse_expression(source: &str) -> Parsed {
    parse(source, &OperatorTable::seeded(), &ParseOptions::default())
}

fn run<S: SymbolSource>(
    symbols: S,
    source: &str,
    table: &OperatorTable,
    options: &ParseOptions,
) -> Parsed {
    let mut parser = Parser::new(symbols, table, options.max_depth);
    let root = parser.parse_expression();
    let diagnostics = parser.finish();
    tracing::debug!(
        diagnostics = diagnostics.len(),
        depth = root.depth(),
        "parsed expression"
    );
    Parsed {
        root,
        diagnostics,
        source: source.to_string(),
    }
}
