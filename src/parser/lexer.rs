//! Lexer (tokenizer) for C-like expression text
//!
//! Converts raw source text into [`Symbol`]s one at a time. The lexer never
//! fails: malformed input comes out as an [`SymbolKind::Illegal`] symbol
//! paired with a [`LexError`] explaining why, so the parser can react to it
//! deterministically.

use super::symbol::{Symbol, SymbolKind};
use rustc_hash::FxHashMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Why a stretch of input could not be turned into a well-formed symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lexical error at offset {offset}: {message}")]
pub struct LexError {
    pub offset: usize,
    pub message: String,
}

/// One step of the lexer: the symbol read, plus the error that made it
/// illegal, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanned {
    pub symbol: Symbol,
    pub error: Option<LexError>,
}

impl Scanned {
    fn ok(symbol: Symbol) -> Self {
        Self {
            symbol,
            error: None,
        }
    }
}

fn keywords() -> &'static FxHashMap<&'static str, SymbolKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, SymbolKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        SymbolKind::ALL
            .iter()
            .copied()
            .filter(|kind| kind.is_keyword())
            .map(|kind| (kind.name(), kind))
            .collect()
    })
}

fn base_name(base: u32) -> &'static str {
    match base {
        2 => "binary",
        8 => "octal",
        16 => "hexadecimal",
        _ => "decimal",
    }
}

/// Lexer over a complete, owned input buffer.
pub struct Lexer {
    source: String,
    position: usize,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_owned(),
            position: 0,
            finished: false,
        }
    }

    /// Scan the next symbol. Once the input is exhausted every call returns
    /// the end-of-input symbol.
    pub fn scan_symbol(&mut self) -> Scanned {
        let scanned = self.next_symbol();
        tracing::trace!(
            kind = %scanned.symbol.kind,
            offset = scanned.symbol.offset,
            lexeme = %scanned.symbol.lexeme,
            "scanned"
        );
        scanned
    }

    fn next_symbol(&mut self) -> Scanned {
        if let Some(unterminated) = self.skip_whitespace_and_comments() {
            return unterminated;
        }

        let start = self.position;
        let Some(ch) = self.advance() else {
            return Scanned::ok(Symbol::eof(self.source.len()));
        };

        match ch {
            '"' => self.string_literal(start),
            '`' => self.raw_string_literal(start),
            '\'' => self.char_literal(start),
            '0'..='9' => self.number_literal(start, ch),
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.number_literal(start, ch)
                } else if self.peek() == Some('.') && self.peek_ahead(1) == Some('.') {
                    self.advance();
                    self.advance();
                    self.bare(SymbolKind::Ellipsis, start)
                } else {
                    self.bare(SymbolKind::Period, start)
                }
            }
            c if c.is_alphabetic() || c == '_' => self.identifier_or_keyword(start),

            '+' => {
                let kind = if self.eat('+') {
                    SymbolKind::Inc
                } else if self.eat('=') {
                    SymbolKind::AddAssign
                } else {
                    SymbolKind::Add
                };
                self.bare(kind, start)
            }
            '-' => {
                let kind = if self.eat('-') {
                    SymbolKind::Dec
                } else if self.eat('=') {
                    SymbolKind::SubAssign
                } else {
                    SymbolKind::Sub
                };
                self.bare(kind, start)
            }
            '*' => self.with_assign(start, SymbolKind::Mul, SymbolKind::MulAssign),
            '/' => self.with_assign(start, SymbolKind::Quo, SymbolKind::QuoAssign),
            '%' => self.with_assign(start, SymbolKind::Rem, SymbolKind::RemAssign),
            '^' => self.with_assign(start, SymbolKind::Xor, SymbolKind::XorAssign),
            '=' => self.with_assign(start, SymbolKind::Assign, SymbolKind::Eql),
            '!' => self.with_assign(start, SymbolKind::Not, SymbolKind::Neq),
            ':' => self.with_assign(start, SymbolKind::Colon, SymbolKind::Define),
            '&' => {
                let kind = if self.eat('^') {
                    if self.eat('=') {
                        SymbolKind::AndNotAssign
                    } else {
                        SymbolKind::AndNot
                    }
                } else if self.eat('&') {
                    SymbolKind::LAnd
                } else if self.eat('=') {
                    SymbolKind::AndAssign
                } else {
                    SymbolKind::And
                };
                self.bare(kind, start)
            }
            '|' => {
                let kind = if self.eat('|') {
                    SymbolKind::LOr
                } else if self.eat('=') {
                    SymbolKind::OrAssign
                } else {
                    SymbolKind::Or
                };
                self.bare(kind, start)
            }
            '<' => {
                let kind = if self.eat('-') {
                    SymbolKind::Arrow
                } else if self.eat('<') {
                    if self.eat('=') {
                        SymbolKind::ShlAssign
                    } else {
                        SymbolKind::Shl
                    }
                } else if self.eat('=') {
                    SymbolKind::Leq
                } else {
                    SymbolKind::Lss
                };
                self.bare(kind, start)
            }
            '>' => {
                let kind = if self.eat('>') {
                    if self.eat('=') {
                        SymbolKind::ShrAssign
                    } else {
                        SymbolKind::Shr
                    }
                } else if self.eat('=') {
                    SymbolKind::Geq
                } else {
                    SymbolKind::Gtr
                };
                self.bare(kind, start)
            }
            '~' => self.bare(SymbolKind::Tilde, start),
            '(' => self.bare(SymbolKind::LParen, start),
            ')' => self.bare(SymbolKind::RParen, start),
            '[' => self.bare(SymbolKind::LBrack, start),
            ']' => self.bare(SymbolKind::RBrack, start),
            '{' => self.bare(SymbolKind::LBrace, start),
            '}' => self.bare(SymbolKind::RBrace, start),
            ',' => self.bare(SymbolKind::Comma, start),
            ';' => self.bare(SymbolKind::Semicolon, start),

            _ => self.illegal(
                start,
                format!("illegal character U+{:04X} '{}'", ch as u32, ch.escape_debug()),
            ),
        }
    }

    /// `plain` unless the next character is `=`, in which case `assign`.
    fn with_assign(&mut self, start: usize, plain: SymbolKind, assign: SymbolKind) -> Scanned {
        let kind = if self.eat('=') { assign } else { plain };
        self.bare(kind, start)
    }

    fn bare(&self, kind: SymbolKind, start: usize) -> Scanned {
        Scanned::ok(Symbol::bare(kind, start))
    }

    fn spelled(&self, kind: SymbolKind, start: usize) -> Scanned {
        Scanned::ok(Symbol::new(kind, &self.source[start..self.position], start))
    }

    fn illegal(&self, start: usize, message: String) -> Scanned {
        Scanned {
            symbol: Symbol::new(SymbolKind::Illegal, &self.source[start..self.position], start),
            error: Some(LexError {
                offset: start,
                message,
            }),
        }
    }

    /// Finish a literal: well-formed if no error was found while reading it.
    fn literal(&self, kind: SymbolKind, start: usize, error: Option<String>) -> Scanned {
        match error {
            None => self.spelled(kind, start),
            Some(message) => self.illegal(start, message),
        }
    }

    /// Parse string literal (opening quote already consumed)
    fn string_literal(&mut self, start: usize) -> Scanned {
        let mut error = None;
        loop {
            match self.peek() {
                None | Some('\n') => {
                    error.get_or_insert_with(|| "string literal not terminated".to_string());
                    break;
                }
                Some(ch) => {
                    self.advance();
                    if ch == '"' {
                        break;
                    }
                    if ch == '\\' {
                        if let Err(message) = self.escape('"') {
                            error.get_or_insert(message);
                        }
                    }
                }
            }
        }
        self.literal(SymbolKind::String, start, error)
    }

    /// Parse raw string literal (opening backquote already consumed)
    fn raw_string_literal(&mut self, start: usize) -> Scanned {
        loop {
            match self.advance() {
                None => {
                    return self.illegal(start, "raw string literal not terminated".to_string());
                }
                Some('`') => return self.spelled(SymbolKind::String, start),
                Some(_) => {}
            }
        }
    }

    /// Parse character literal (opening quote already consumed)
    fn char_literal(&mut self, start: usize) -> Scanned {
        let mut error = None;
        let mut count = 0;
        loop {
            match self.peek() {
                None | Some('\n') => {
                    error.get_or_insert_with(|| "rune literal not terminated".to_string());
                    break;
                }
                Some(ch) => {
                    self.advance();
                    if ch == '\'' {
                        break;
                    }
                    count += 1;
                    if ch == '\\' {
                        if let Err(message) = self.escape('\'') {
                            error.get_or_insert(message);
                        }
                    }
                }
            }
        }
        if error.is_none() && count != 1 {
            error = Some(if count == 0 {
                "empty rune literal or unescaped ' in rune literal".to_string()
            } else {
                "more than one character in rune literal".to_string()
            });
        }
        self.literal(SymbolKind::Char, start, error)
    }

    /// Validate one escape sequence (backslash already consumed).
    fn escape(&mut self, quote: char) -> Result<(), String> {
        let Some(ch) = self.peek() else {
            return Err("escape sequence not terminated".to_string());
        };
        let (count, radix, max) = match ch {
            'a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\' => {
                self.advance();
                return Ok(());
            }
            c if c == quote => {
                self.advance();
                return Ok(());
            }
            '0'..='7' => (3, 8, 255),
            'x' => {
                self.advance();
                (2, 16, 255)
            }
            'u' => {
                self.advance();
                (4, 16, char::MAX as u32)
            }
            'U' => {
                self.advance();
                (8, 16, char::MAX as u32)
            }
            _ => {
                if ch != '\n' {
                    self.advance();
                }
                return Err("unknown escape sequence".to_string());
            }
        };

        let mut value: u32 = 0;
        for _ in 0..count {
            match self.peek() {
                None => return Err("escape sequence not terminated".to_string()),
                Some(c) => match c.to_digit(radix) {
                    Some(digit) => {
                        self.advance();
                        value = value * radix + digit;
                    }
                    None => {
                        return Err(format!(
                            "illegal character U+{:04X} '{}' in escape sequence",
                            c as u32,
                            c.escape_debug()
                        ));
                    }
                },
            }
        }

        if value > max || (max == char::MAX as u32 && char::from_u32(value).is_none()) {
            return Err("escape sequence is invalid Unicode code point".to_string());
        }
        Ok(())
    }

    /// Parse numeric literal: integer, floating-point or imaginary.
    fn number_literal(&mut self, start: usize, first: char) -> Scanned {
        let mut kind = SymbolKind::Int;
        let mut base = 10;
        let mut invalid = None;
        let mut error = None;
        let mut legacy_octal = false;

        if first == '.' {
            kind = SymbolKind::Float;
            self.digits(10, &mut invalid);
        } else {
            if first == '0' {
                let prefixed = match self.peek() {
                    Some('x' | 'X') => Some(16),
                    Some('b' | 'B') => Some(2),
                    Some('o' | 'O') => Some(8),
                    _ => None,
                };
                match prefixed {
                    Some(radix) => {
                        self.advance();
                        base = radix;
                        if self.digits(base, &mut invalid) == 0 {
                            error = Some(format!("{} literal has no digits", base_name(base)));
                        }
                    }
                    None => {
                        legacy_octal = true;
                        self.digits(10, &mut invalid);
                    }
                }
            } else {
                self.digits(10, &mut invalid);
            }

            if base == 10 && self.peek() == Some('.') {
                self.advance();
                kind = SymbolKind::Float;
                self.digits(10, &mut invalid);
            }
        }

        if base == 10 && matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            kind = SymbolKind::Float;
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            if self.digits(10, &mut invalid) == 0 {
                error.get_or_insert_with(|| "exponent has no digits".to_string());
            }
        }

        if self.eat('i') {
            kind = SymbolKind::Imag;
        }

        if kind == SymbolKind::Int && legacy_octal {
            let text = &self.source[start..self.position];
            if let Some(digit) = text.chars().find(|c| matches!(c, '8' | '9')) {
                invalid = Some(digit);
                base = 8;
            }
        }

        if let Some(digit) = invalid {
            error.get_or_insert_with(|| {
                format!("invalid digit '{}' in {} literal", digit, base_name(base))
            });
        }

        self.literal(kind, start, error)
    }

    /// Consume a run of digits (and `_` separators). Decimal digits beyond the
    /// base are consumed too, and the first of them is remembered in `invalid`.
    fn digits(&mut self, base: u32, invalid: &mut Option<char>) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek() {
            if ch == '_' {
                self.advance();
                continue;
            }
            let digit = if base == 16 {
                ch.to_digit(16)
            } else {
                ch.to_digit(10)
            };
            match digit {
                Some(value) => {
                    if value >= base && invalid.is_none() {
                        *invalid = Some(ch);
                    }
                    self.advance();
                    count += 1;
                }
                None => break,
            }
        }
        count
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, start: usize) -> Scanned {
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.source[start..self.position];
        match keywords().get(text) {
            Some(&kind) => self.bare(kind, start),
            None => self.spelled(SymbolKind::Ident, start),
        }
    }

    /// Skip whitespace and comments. An unterminated block comment is
    /// reported as an illegal symbol spanning the rest of the input.
    fn skip_whitespace_and_comments(&mut self) -> Option<Scanned> {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') => match self.peek_ahead(1) {
                    Some('/') => self.skip_line_comment(),
                    Some('*') => {
                        let start = self.position;
                        if !self.skip_block_comment() {
                            return Some(self.illegal(start, "comment not terminated".to_string()));
                        }
                    }
                    _ => return None,
                },
                _ => return None,
            }
        }
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */); false if it never closes.
    fn skip_block_comment(&mut self) -> bool {
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return true;
            }
            self.advance();
        }
        false
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.source[self.position..].chars().nth(n)
    }

    /// Consume the current character if it is `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }
}

/// Yields every symbol up to and including the first end-of-input symbol.
impl Iterator for Lexer {
    type Item = Scanned;

    fn next(&mut self) -> Option<Scanned> {
        if self.finished {
            return None;
        }
        let scanned = self.scan_symbol();
        self.finished = scanned.symbol.is_eof();
        Some(scanned)
    }
}
