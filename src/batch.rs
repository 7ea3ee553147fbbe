//! Non-interactive printing
//!
//! Each expression is reported as its rendering, then one `line:col:
//! message` line per diagnostic, then every integer literal in the chosen
//! base.

use crate::error::BasesResult;
use crate::num::{collect_int_literals, Base};
use crate::parser::{parse, OperatorTable, ParseOptions, Parsed};
use std::io::{self, BufRead, Write};

/// Settings shared by every expression in one batch run.
pub struct Batch {
    pub table: OperatorTable,
    pub options: ParseOptions,
    pub base: Base,
    /// Fail on the first expression with diagnostics instead of reporting it
    pub check: bool,
}

impl Batch {
    pub fn new(options: ParseOptions, base: Base, check: bool) -> Self {
        Self {
            table: OperatorTable::seeded(),
            options,
            base,
            check,
        }
    }

    /// Parse and report one expression. Returns whether it parsed cleanly.
    pub fn print<W: Write>(&self, out: &mut W, source: &str) -> BasesResult<bool> {
        let parsed = parse(source, &self.table, &self.options);
        if self.check {
            if let Some(err) = parsed.error() {
                return Err(err.into());
            }
        }
        write_report(out, &parsed, self.base)?;
        Ok(parsed.is_clean())
    }

    /// Report every expression in order. Returns whether all were clean.
    pub fn print_all<W, I, S>(&self, out: &mut W, sources: I) -> BasesResult<bool>
    where
        W: Write,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut clean = true;
        for source in sources {
            clean &= self.print(out, source.as_ref())?;
        }
        Ok(clean)
    }

    /// Report each non-blank line of `input`.
    pub fn print_lines<W: Write, R: BufRead>(&self, out: &mut W, input: R) -> BasesResult<bool> {
        let mut clean = true;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            clean &= self.print(out, &line)?;
        }
        Ok(clean)
    }
}

/// Write the report for one parse.
pub fn write_report<W: Write>(out: &mut W, parsed: &Parsed, base: Base) -> io::Result<()> {
    writeln!(out, "{}", parsed.render())?;
    for diagnostic in &parsed.diagnostics {
        writeln!(out, "{}: {}", parsed.locate(diagnostic), diagnostic.message)?;
    }
    for found in collect_int_literals(&parsed.root) {
        match found.value {
            Ok(literal) => writeln!(out, "  {} = {}", found.symbol.lexeme, literal.format(base))?,
            Err(err) => writeln!(out, "  {}: {}", found.symbol.lexeme, err)?,
        }
    }
    Ok(())
}
