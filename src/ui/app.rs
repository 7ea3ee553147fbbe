//! Main TUI application state and logic

use crate::num::{collect_int_literals, Base, RowBits};
use crate::parser::{parse, OperatorTable, ParseOptions, Parsed};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane the arrow keys scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Output,
    Literals,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Output => FocusedPane::Literals,
            FocusedPane::Literals => FocusedPane::Output,
        }
    }
}

/// The main application state
pub struct App {
    pub table: OperatorTable,
    pub options: ParseOptions,

    /// The expression being edited
    pub input: String,

    /// Cursor position in characters
    pub cursor: usize,

    /// Result of parsing `input`, refreshed on every edit
    pub parsed: Parsed,

    /// Base used for literal values
    pub base: Base,
    pub row_bits: RowBits,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub output_scroll: usize,
    pub literal_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(options: ParseOptions, base: Base) -> Self {
        let table = OperatorTable::seeded();
        let parsed = parse("", &table, &options);
        App {
            table,
            options,
            input: String::new(),
            cursor: 0,
            parsed,
            base,
            row_bits: RowBits::default(),
            focused_pane: FocusedPane::Output,
            output_scroll: 0,
            literal_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes, input line, status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[0]);

        let literals = collect_int_literals(&self.parsed.root);

        super::panes::render_output_pane(
            frame,
            columns[0],
            &self.parsed,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        super::panes::render_literal_pane(
            frame,
            columns[1],
            &literals,
            self.base,
            self.row_bits,
            self.focused_pane == FocusedPane::Literals,
            &mut self.literal_scroll,
        );

        super::panes::render_input_line(
            frame,
            main_chunks[1],
            &self.input,
            self.cursor,
            self.base,
            self.parsed.is_clean(),
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[2],
            &self.status_message,
            self.parsed.diagnostics.len(),
            literals.len(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('b') if ctrl => {
                self.row_bits = self.row_bits.next();
                self.literal_scroll = 0;
                self.status_message = format!("{}-bit rows", self.row_bits.bits());
            }
            KeyCode::Char('o') if ctrl => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Char(c) if !ctrl => {
                let at = self.byte_index();
                self.input.insert(at, c);
                self.cursor += 1;
                self.reparse();
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.input.remove(at);
                    self.reparse();
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.input.chars().count() {
                    let at = self.byte_index();
                    self.input.remove(at);
                    self.reparse();
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.input.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input.chars().count(),
            KeyCode::Tab => {
                self.base = self.base.next();
                self.status_message = format!("Base: {}", self.base);
            }
            KeyCode::BackTab => {
                self.base = self.base.prev();
                self.status_message = format!("Base: {}", self.base);
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(10);
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Output => &mut self.output_scroll,
            FocusedPane::Literals => &mut self.literal_scroll,
        }
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map_or(self.input.len(), |(i, _)| i)
    }

    /// Parse the current input again
    fn reparse(&mut self) {
        self.parsed = parse(&self.input, &self.table, &self.options);
        self.output_scroll = 0;
        self.literal_scroll = 0;
        self.status_message = match self.parsed.diagnostics.first() {
            None => "Parsed".to_string(),
            Some(first) => format!("{}: {}", self.parsed.locate(first), first.message),
        };
        tracing::debug!(input = %self.input, tree = %self.parsed.root, "reparsed");
    }
}
