//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`output`]: Rendered tree, an indented outline of it, and diagnostics
//! - [`literals`]: Every integer literal in hex, octal, binary and decimal,
//!   split into rows of a chosen bit width
//! - [`input`]: The expression being edited and the current base
//! - [`status`]: Status bar with keybindings and parse state
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*` function. Panes only read
//! application state, except for clamping the scroll offset they are given.

pub mod input;
pub mod literals;
pub mod output;
pub mod status;

pub use input::render_input_line;
pub use literals::render_literal_pane;
pub use output::render_output_pane;
pub use status::render_status_bar;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Clamp `scroll_offset` so the last page stays full.
pub(crate) fn clamp_scroll(scroll_offset: &mut usize, total_items: usize, visible_height: usize) {
    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }
}
