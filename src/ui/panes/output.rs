//! Output pane rendering: the parsed tree and its diagnostics

use crate::parser::{Node, Parsed, SymbolKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// One line of the tree outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub depth: usize,
    pub label: String,
    pub style: Style,
}

/// The tree as an indented outline, one node per row, in pre-order.
pub fn outline(root: &Node) -> Vec<OutlineRow> {
    let mut rows = Vec::new();
    push_outline(root, 0, &mut rows);
    rows
}

fn push_outline(node: &Node, depth: usize, rows: &mut Vec<OutlineRow>) {
    let symbol = node.symbol();
    let (label, style) = match node {
        Node::Terminal(_) if symbol.is_identifier() => {
            (symbol.lexeme.clone(), Style::default().fg(DEFAULT_THEME.fg))
        }
        Node::Terminal(_) => {
            let color = match symbol.kind {
                SymbolKind::String | SymbolKind::Char => DEFAULT_THEME.string,
                _ => DEFAULT_THEME.number,
            };
            (symbol.lexeme.clone(), Style::default().fg(color))
        }
        Node::Control(_) => (
            format!("{} (keyword)", symbol.spelling()),
            Style::default().fg(DEFAULT_THEME.keyword),
        ),
        Node::Stop(_) => (
            format!("{} (stop)", symbol.spelling()),
            Style::default().fg(DEFAULT_THEME.error),
        ),
        Node::Rule(rule) => (
            format!(
                "{}  [{:?} {}]",
                symbol.spelling(),
                rule.operator().assoc,
                rule.operator().precedence
            ),
            Style::default()
                .fg(DEFAULT_THEME.operator)
                .add_modifier(Modifier::BOLD),
        ),
    };
    rows.push(OutlineRow {
        depth,
        label,
        style,
    });
    for child in node.children() {
        push_outline(child, depth + 1, rows);
    }
}

/// Render the output pane
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    parsed: &Parsed,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Expression ")
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    if parsed.source().trim().is_empty() {
        let paragraph = Paragraph::new("(type an expression)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));

    let mut all_items = vec![
        ListItem::new(parsed.render()).style(Style::default().fg(DEFAULT_THEME.fg)),
        ListItem::new(""),
    ];
    all_items.extend(outline(&parsed.root).into_iter().map(|row| {
        ListItem::new(Line::from(vec![
            Span::raw("  ".repeat(row.depth)),
            Span::styled(row.label, row.style),
        ]))
    }));

    if !parsed.diagnostics.is_empty() {
        all_items.push(ListItem::new(""));
        all_items.extend(parsed.diagnostics.iter().map(|diagnostic| {
            ListItem::new(format!(
                "{}: {}",
                parsed.locate(diagnostic),
                diagnostic.message
            ))
            .style(Style::default().fg(DEFAULT_THEME.error))
        }));
    }

    let total_items = all_items.len();
    // Borders take two rows
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    super::clamp_scroll(scroll_offset, total_items, visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
