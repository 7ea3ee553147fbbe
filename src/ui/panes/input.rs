//! Input line rendering

use crate::num::Base;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PROMPT: &str = "> ";

/// Render the prompt, the expression being edited and the selected base.
/// `cursor` counts characters from the start of `text`.
pub fn render_input_line(
    frame: &mut Frame,
    area: Rect,
    text: &str,
    cursor: usize,
    base: Base,
    is_clean: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(super::border_style(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(7)])
        .split(inner);

    // Keep the cursor visible on long input.
    let width = columns[0].width.saturating_sub(PROMPT.len() as u16 + 1) as usize;
    let skip = cursor.saturating_sub(width);
    let visible: String = text.chars().skip(skip).collect();

    let prompt_color = if is_clean {
        DEFAULT_THEME.success
    } else {
        DEFAULT_THEME.error
    };
    let line = Line::from(vec![
        Span::styled(
            PROMPT,
            Style::default()
                .fg(prompt_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(visible, Style::default().fg(DEFAULT_THEME.fg)),
    ]);
    frame.render_widget(Paragraph::new(line), columns[0]);

    let base_label = Paragraph::new(Span::styled(
        format!(" {} ", base.id()),
        Style::default()
            .bg(DEFAULT_THEME.primary)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(base_label, columns[1]);

    let x = columns[0].x + (PROMPT.len() + cursor - skip) as u16;
    frame.set_cursor_position(Position::new(x, columns[0].y));
}
