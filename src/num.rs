//! Number bases
//!
//! Decoding of integer-literal lexemes and formatting of their values in the
//! bases the literal table shows. This is literal decoding only; expressions
//! are never evaluated.

use crate::parser::ast::Node;
use crate::parser::symbol::{Symbol, SymbolKind};
use std::fmt;
use thiserror::Error;

/// Width of every decoded value.
pub const MAX_BITS: u32 = u64::BITS;

/// A number base, or `Auto` for "whatever the literal was written in".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Base {
    #[default]
    Auto,
    Bin,
    Oct,
    Dec,
    Hex,
}

impl Base {
    pub const ALL: [Base; 5] = [Base::Auto, Base::Bin, Base::Oct, Base::Dec, Base::Hex];

    pub fn id(self) -> &'static str {
        match self {
            Base::Auto => "auto",
            Base::Bin => "bin",
            Base::Oct => "oct",
            Base::Dec => "dec",
            Base::Hex => "hex",
        }
    }

    /// Radix of the base; 0 for `Auto`.
    pub fn radix(self) -> u32 {
        match self {
            Base::Auto => 0,
            Base::Bin => 2,
            Base::Oct => 8,
            Base::Dec => 10,
            Base::Hex => 16,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Base::Bin => "0b",
            Base::Oct => "0o",
            Base::Hex => "0x",
            Base::Auto | Base::Dec => "",
        }
    }

    /// The following base, wrapping from `Hex` back to `Auto`.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&b| b == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|&b| b == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Why a lexeme is not a usable integer literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumError {
    #[error("integer literal has no digits")]
    Empty,

    #[error("invalid digit '{digit}' in {base} literal")]
    InvalidDigit { digit: char, base: Base },

    #[error("integer literal overflows {} bits", MAX_BITS)]
    Overflow,
}

/// A decoded integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntLiteral {
    pub value: u64,
    /// The base it was written in; never `Auto`.
    pub base: Base,
}

impl IntLiteral {
    /// Decode an integer lexeme: `0x`/`0b`/`0o` prefixes (either case),
    /// legacy leading-zero octal and `_` separators.
    pub fn parse(lexeme: &str) -> Result<Self, NumError> {
        let (base, digits) = match lexeme.as_bytes() {
            [b'0', b'x' | b'X', ..] => (Base::Hex, &lexeme[2..]),
            [b'0', b'b' | b'B', ..] => (Base::Bin, &lexeme[2..]),
            [b'0', b'o' | b'O', ..] => (Base::Oct, &lexeme[2..]),
            [b'0', _, ..] => (Base::Oct, &lexeme[1..]),
            _ => (Base::Dec, lexeme),
        };

        let mut value: u64 = 0;
        let mut seen = false;
        for ch in digits.chars() {
            if ch == '_' {
                continue;
            }
            let digit = ch
                .to_digit(base.radix())
                .ok_or(NumError::InvalidDigit { digit: ch, base })?;
            value = value
                .checked_mul(u64::from(base.radix()))
                .and_then(|v| v.checked_add(u64::from(digit)))
                .ok_or(NumError::Overflow)?;
            seen = true;
        }

        if !seen {
            return Err(NumError::Empty);
        }
        Ok(Self { value, base })
    }

    /// The value in `base`, with `Auto` meaning the literal's own base.
    pub fn format(&self, base: Base) -> String {
        match base {
            Base::Auto => format_value(self.value, self.base),
            base => format_value(self.value, base),
        }
    }
}

/// `value` with its base prefix. `Auto` formats as decimal.
pub fn format_value(value: u64, base: Base) -> String {
    format!("{}{}", base.prefix(), format_digits(value, base))
}

/// `value` in `base` without a prefix.
pub fn format_digits(value: u64, base: Base) -> String {
    match base {
        Base::Bin => format!("{:b}", value),
        Base::Oct => format!("{:o}", value),
        Base::Hex => format!("{:X}", value),
        Base::Auto | Base::Dec => value.to_string(),
    }
}

/// Bits shown per row of the literal table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowBits {
    Byte = 8,
    Word = 16,
    #[default]
    Long = 32,
}

impl RowBits {
    pub fn bits(self) -> u32 {
        self as u32
    }

    pub fn rows(self) -> u32 {
        MAX_BITS / self.bits()
    }

    pub fn next(self) -> Self {
        match self {
            RowBits::Byte => RowBits::Word,
            RowBits::Word => RowBits::Long,
            RowBits::Long => RowBits::Byte,
        }
    }
}

/// Split `value` into rows of `bits` bits, lowest first, each paired with its
/// bit offset.
pub fn chunks(value: u64, bits: RowBits) -> Vec<(u32, u64)> {
    let width = bits.bits();
    let mask = (1u64 << width) - 1;
    (0..bits.rows())
        .map(|row| {
            let offset = row * width;
            (offset, (value >> offset) & mask)
        })
        .collect()
}

/// An integer literal found in a tree, with its decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundLiteral<'a> {
    pub symbol: &'a Symbol,
    pub value: Result<IntLiteral, NumError>,
}

/// Every integer literal terminal under `root`, in source order.
pub fn collect_int_literals(root: &Node) -> Vec<FoundLiteral<'_>> {
    let mut found = Vec::new();
    root.walk(&mut |node| {
        if let Node::Terminal(symbol) = node {
            if symbol.kind == SymbolKind::Int {
                found.push(FoundLiteral {
                    symbol,
                    value: IntLiteral::parse(&symbol.lexeme),
                });
            }
        }
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    #[test]
    fn test_base_ids_and_radixes() {
        let ids: Vec<_> = Base::ALL.iter().map(|b| b.id()).collect();
        assert_eq!(ids, ["auto", "bin", "oct", "dec", "hex"]);
        let radixes: Vec<_> = Base::ALL.iter().map(|b| b.radix()).collect();
        assert_eq!(radixes, [0, 2, 8, 10, 16]);
    }

    #[test]
    fn test_base_cycles() {
        assert_eq!(Base::Auto.next(), Base::Bin);
        assert_eq!(Base::Hex.next(), Base::Auto);
        assert_eq!(Base::Auto.prev(), Base::Hex);
        for base in Base::ALL {
            assert_eq!(base.next().prev(), base);
        }
    }

    #[test]
    fn test_parse_literals() {
        let cases = [
            ("42", 42, Base::Dec),
            ("0", 0, Base::Dec),
            ("0x1F", 31, Base::Hex),
            ("0XfF", 255, Base::Hex),
            ("0b1010", 10, Base::Bin),
            ("0o17", 15, Base::Oct),
            ("017", 15, Base::Oct),
            ("1_000_000", 1_000_000, Base::Dec),
            ("0x_dead_beef", 0xdead_beef, Base::Hex),
            ("18446744073709551615", u64::MAX, Base::Dec),
        ];
        for (lexeme, value, base) in cases {
            assert_eq!(
                IntLiteral::parse(lexeme),
                Ok(IntLiteral { value, base }),
                "{}",
                lexeme
            );
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(IntLiteral::parse("18446744073709551616"), Err(NumError::Overflow));
        assert_eq!(IntLiteral::parse("0x"), Err(NumError::Empty));
        assert_eq!(
            IntLiteral::parse("0b102"),
            Err(NumError::InvalidDigit {
                digit: '2',
                base: Base::Bin
            })
        );
        assert_eq!(
            NumError::InvalidDigit {
                digit: '9',
                base: Base::Oct
            }
            .to_string(),
            "invalid digit '9' in oct literal"
        );
    }

    #[test]
    fn test_format() {
        assert_eq!(format_value(255, Base::Hex), "0xFF");
        assert_eq!(format_value(5, Base::Bin), "0b101");
        assert_eq!(format_value(8, Base::Oct), "0o10");
        assert_eq!(format_value(8, Base::Dec), "8");
        assert_eq!(format_value(8, Base::Auto), "8");

        let lit = IntLiteral::parse("0x10").unwrap();
        assert_eq!(lit.format(Base::Auto), "0x10");
        assert_eq!(lit.format(Base::Dec), "16");
    }

    #[test]
    fn test_chunks() {
        let rows = chunks(0x0102_0304_0506_0708, RowBits::Byte);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], (0, 0x08));
        assert_eq!(rows[7], (56, 0x01));

        assert_eq!(
            chunks(u64::MAX, RowBits::Long),
            [(0, 0xFFFF_FFFF), (32, 0xFFFF_FFFF)]
        );
        assert_eq!(RowBits::Word.rows(), 4);
    }

    #[test]
    fn test_collect_in_source_order() {
        let parsed = parse_expression("0x10 + x * (2 - 'c') + 3.5 + 010");
        let found = collect_int_literals(&parsed.root);
        let lexemes: Vec<_> = found.iter().map(|f| f.symbol.lexeme.as_str()).collect();
        assert_eq!(lexemes, ["0x10", "2", "010"]);
        assert_eq!(found[2].value.as_ref().map(|l| l.value), Ok(8));
    }
}
