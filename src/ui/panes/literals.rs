//! Literal table pane: each integer literal split into fixed-width rows and
//! shown in every base

use crate::num::{chunks, format_digits, Base, FoundLiteral, RowBits};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Column order of the table body.
pub const COLUMNS: [Base; 4] = [Base::Hex, Base::Oct, Base::Bin, Base::Dec];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralRow {
    /// First row of a literal: its lexeme and value in the selected base.
    Heading { lexeme: String, value: String },
    /// One chunk of the value.
    Chunk { offset: u32, cells: [String; 4] },
    /// A literal that could not be decoded.
    Invalid { lexeme: String, message: String },
}

/// Table rows for `literals`, values shown in `base`, split every `bits`.
pub fn literal_rows(literals: &[FoundLiteral<'_>], base: Base, bits: RowBits) -> Vec<LiteralRow> {
    let mut rows = Vec::new();
    for found in literals {
        let lexeme = found.symbol.lexeme.clone();
        match &found.value {
            Ok(literal) => {
                rows.push(LiteralRow::Heading {
                    lexeme,
                    value: literal.format(base),
                });
                rows.extend(chunks(literal.value, bits).into_iter().map(|(offset, chunk)| {
                    LiteralRow::Chunk {
                        offset,
                        cells: COLUMNS.map(|column| format_digits(chunk, column)),
                    }
                }));
            }
            Err(err) => rows.push(LiteralRow::Invalid {
                lexeme,
                message: err.to_string(),
            }),
        }
    }
    rows
}

fn to_table_row(row: LiteralRow) -> Row<'static> {
    match row {
        LiteralRow::Heading { lexeme, value } => Row::new(vec![
            Cell::from(lexeme).style(
                Style::default()
                    .fg(DEFAULT_THEME.number)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::from(format!("= {}", value)).style(Style::default().fg(DEFAULT_THEME.fg)),
        ]),
        LiteralRow::Chunk { offset, cells } => {
            let mut row = vec![Cell::from(format!("+{}", offset))
                .style(Style::default().fg(DEFAULT_THEME.secondary))];
            row.extend(
                cells
                    .into_iter()
                    .map(|text| Cell::from(text).style(Style::default().fg(DEFAULT_THEME.fg))),
            );
            Row::new(row)
        }
        LiteralRow::Invalid { lexeme, message } => Row::new(vec![
            Cell::from(lexeme).style(Style::default().fg(DEFAULT_THEME.number)),
            Cell::from(message).style(Style::default().fg(DEFAULT_THEME.error)),
        ]),
    }
}

/// Render the literal table pane
pub fn render_literal_pane(
    frame: &mut Frame,
    area: Rect,
    literals: &[FoundLiteral<'_>],
    base: Base,
    bits: RowBits,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Literals ({}-bit rows) ", bits.bits()))
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    if literals.is_empty() {
        let paragraph = Paragraph::new("(no integer literals)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let all_rows = literal_rows(literals, base, bits);
    let total_rows = all_rows.len();
    let visible_height = area.height.saturating_sub(3).max(1) as usize; // Borders and header
    super::clamp_scroll(scroll_offset, total_rows, visible_height);

    let rows: Vec<Row> = all_rows
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(to_table_row)
        .collect();

    let header_style = Style::default()
        .fg(DEFAULT_THEME.success)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(COLUMNS.iter().map(|base| Cell::from(base.id())))
            .collect::<Vec<_>>(),
    )
    .style(header_style);

    let widths = [
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(13),
        Constraint::Min(34),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::collect_int_literals;
    use crate::parser::parse_expression;

    #[test]
    fn test_rows_per_literal() {
        let parsed = parse_expression("0x1FF + 99999999999999999999");
        let found = collect_int_literals(&parsed.root);
        let rows = literal_rows(&found, Base::Auto, RowBits::Long);

        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            LiteralRow::Heading {
                lexeme: "0x1FF".to_string(),
                value: "0x1FF".to_string()
            }
        );
        assert_eq!(
            rows[1],
            LiteralRow::Chunk {
                offset: 0,
                cells: [
                    "1FF".to_string(),
                    "777".to_string(),
                    "111111111".to_string(),
                    "511".to_string()
                ]
            }
        );
        assert!(matches!(rows[2], LiteralRow::Chunk { offset: 32, .. }));
        assert!(matches!(rows[3], LiteralRow::Invalid { .. }));
    }

    #[test]
    fn test_byte_rows() {
        let parsed = parse_expression("256");
        let found = collect_int_literals(&parsed.root);
        let rows = literal_rows(&found, Base::Hex, RowBits::Byte);
        assert_eq!(rows.len(), 9);
        assert!(matches!(&rows[0], LiteralRow::Heading { value, .. } if value == "0x100"));
        assert!(matches!(&rows[2], LiteralRow::Chunk { offset: 8, cells } if cells[3] == "1"));
    }
}
