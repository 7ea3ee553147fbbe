// bases: expression reader with a number-base literal table

use std::io;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use bases::batch::Batch;
use bases::cli::{Args, Mode};
use bases::ui::App;
use bases::BasesResult;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = bases::log::init(&args.log_target()) {
        eprintln!("Error: {}", err);
        return ExitCode::FAILURE;
    }
    tracing::debug!(?args, "starting");

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every expression parsed cleanly.
fn run(args: &Args) -> BasesResult<bool> {
    let batch = || Batch::new(args.parse_options(), args.base, args.check);
    match args.mode() {
        Mode::Batch(exprs) => batch().print_all(&mut io::stdout().lock(), exprs),
        Mode::Stdin => batch().print_lines(&mut io::stdout().lock(), io::stdin().lock()),
        Mode::Interactive => {
            run_tui(App::new(args.parse_options(), args.base))?;
            Ok(true)
        }
    }
}

fn run_tui(mut app: App) -> io::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
