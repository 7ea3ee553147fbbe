//! Lexical symbols
//!
//! A [`Symbol`] is one lexical unit: its source spelling, its [`SymbolKind`]
//! and the byte offset where it starts. Punctuation and keywords carry an
//! empty lexeme; their spelling comes from the kind itself.

use std::fmt;

/// Every kind of symbol the lexer can produce.
///
/// The discriminants are dense and start at zero so that operator tables can
/// be plain arrays indexed by [`SymbolKind::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SymbolKind {
    // Special
    Illegal,
    Eof,

    // Identifiers and basic literals
    Ident,
    Int,   // 12345
    Float, // 123.45
    Imag,  // 123.45i
    Char,  // 'a'
    String, // "abc"

    // Operators and delimiters
    Add, // +
    Sub, // -
    Mul, // *
    Quo, // /
    Rem, // %

    And,    // &
    Or,     // |
    Xor,    // ^
    Shl,    // <<
    Shr,    // >>
    AndNot, // &^

    AddAssign, // +=
    SubAssign, // -=
    MulAssign, // *=
    QuoAssign, // /=
    RemAssign, // %=

    AndAssign,    // &=
    OrAssign,     // |=
    XorAssign,    // ^=
    ShlAssign,    // <<=
    ShrAssign,    // >>=
    AndNotAssign, // &^=

    LAnd,  // &&
    LOr,   // ||
    Arrow, // <-
    Inc,   // ++
    Dec,   // --

    Eql,    // ==
    Lss,    // <
    Gtr,    // >
    Assign, // =
    Not,    // !
    Tilde,  // ~

    Neq,      // !=
    Leq,      // <=
    Geq,      // >=
    Define,   // :=
    Ellipsis, // ...

    LParen, // (
    LBrack, // [
    LBrace, // {
    Comma,  // ,
    Period, // .

    RParen,    // )
    RBrack,    // ]
    RBrace,    // }
    Semicolon, // ;
    Colon,     // :

    // Keywords
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

impl SymbolKind {
    /// Number of distinct kinds; the length of every operator table.
    pub const COUNT: usize = SymbolKind::Var as usize + 1;

    /// All kinds in discriminant order.
    pub const ALL: [SymbolKind; SymbolKind::COUNT] = {
        use SymbolKind::*;
        [
            Illegal, Eof, Ident, Int, Float, Imag, Char, String, Add, Sub, Mul, Quo, Rem, And,
            Or, Xor, Shl, Shr, AndNot, AddAssign, SubAssign, MulAssign, QuoAssign, RemAssign,
            AndAssign, OrAssign, XorAssign, ShlAssign, ShrAssign, AndNotAssign, LAnd, LOr,
            Arrow, Inc, Dec, Eql, Lss, Gtr, Assign, Not, Tilde, Neq, Leq, Geq, Define, Ellipsis,
            LParen, LBrack, LBrace, Comma, Period, RParen, RBrack, RBrace, Semicolon, Colon,
            Break, Case, Chan, Const, Continue, Default, Defer, Else, Fallthrough, For, Func,
            Go, Goto, If, Import, Interface, Map, Package, Range, Return, Select, Struct,
            Switch, Type, Var,
        ]
    };

    /// Position of this kind in [`SymbolKind::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical spelling: the source text for operators and keywords, an
    /// upper-case class name for everything else.
    pub fn name(self) -> &'static str {
        use SymbolKind::*;
        match self {
            Illegal => "ILLEGAL",
            Eof => "EOF",
            Ident => "IDENT",
            Int => "INT",
            Float => "FLOAT",
            Imag => "IMAG",
            Char => "CHAR",
            String => "STRING",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Quo => "/",
            Rem => "%",
            And => "&",
            Or => "|",
            Xor => "^",
            Shl => "<<",
            Shr => ">>",
            AndNot => "&^",
            AddAssign => "+=",
            SubAssign => "-=",
            MulAssign => "*=",
            QuoAssign => "/=",
            RemAssign => "%=",
            AndAssign => "&=",
            OrAssign => "|=",
            XorAssign => "^=",
            ShlAssign => "<<=",
            ShrAssign => ">>=",
            AndNotAssign => "&^=",
            LAnd => "&&",
            LOr => "||",
            Arrow => "<-",
            Inc => "++",
            Dec => "--",
            Eql => "==",
            Lss => "<",
            Gtr => ">",
            Assign => "=",
            Not => "!",
            Tilde => "~",
            Neq => "!=",
            Leq => "<=",
            Geq => ">=",
            Define => ":=",
            Ellipsis => "...",
            LParen => "(",
            LBrack => "[",
            LBrace => "{",
            Comma => ",",
            Period => ".",
            RParen => ")",
            RBrack => "]",
            RBrace => "}",
            Semicolon => ";",
            Colon => ":",
            Break => "break",
            Case => "case",
            Chan => "chan",
            Const => "const",
            Continue => "continue",
            Default => "default",
            Defer => "defer",
            Else => "else",
            Fallthrough => "fallthrough",
            For => "for",
            Func => "func",
            Go => "go",
            Goto => "goto",
            If => "if",
            Import => "import",
            Interface => "interface",
            Map => "map",
            Package => "package",
            Range => "range",
            Return => "return",
            Select => "select",
            Struct => "struct",
            Switch => "switch",
            Type => "type",
            Var => "var",
        }
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SymbolKind::Int
                | SymbolKind::Float
                | SymbolKind::Imag
                | SymbolKind::Char
                | SymbolKind::String
        )
    }

    pub fn is_keyword(self) -> bool {
        self >= SymbolKind::Break
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub lexeme: String,
    pub kind: SymbolKind,
    pub offset: usize,
}

impl Symbol {
    pub fn new(kind: SymbolKind, lexeme: impl Into<String>, offset: usize) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind,
            offset,
        }
    }

    /// A punctuation or keyword symbol; these never carry a lexeme.
    pub fn bare(kind: SymbolKind, offset: usize) -> Self {
        Self::new(kind, String::new(), offset)
    }

    pub fn eof(offset: usize) -> Self {
        Self::bare(SymbolKind::Eof, offset)
    }

    /// The text this symbol stands for: its lexeme, or the kind's canonical
    /// name when the lexeme is empty.
    pub fn spelling(&self) -> &str {
        if self.lexeme.is_empty() {
            self.kind.name()
        } else {
            &self.lexeme
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == SymbolKind::Eof
    }

    pub fn is_illegal(&self) -> bool {
        self.kind == SymbolKind::Illegal
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == SymbolKind::Ident
    }

    pub fn is_literal(&self) -> bool {
        self.kind.is_literal()
    }

    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SymbolKind::Eof => write!(f, "end of input"),
            SymbolKind::Ident => write!(f, "identifier '{}'", self.lexeme),
            SymbolKind::Illegal => write!(f, "illegal token '{}'", self.lexeme),
            kind if kind.is_literal() => write!(f, "literal {}", self.lexeme),
            kind if kind.is_keyword() => write!(f, "keyword '{}'", kind.name()),
            kind => write!(f, "'{}'", kind.name()),
        }
    }
}
