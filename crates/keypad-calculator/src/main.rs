//! keypad-calc: interactive keypad calculator
//!
//! ## Usage
//!
//! ```bash
//! keypad-calc                   # Terminal keypad
//! keypad-calc eval '5*-2='      # Print formula line and display
//! keypad-calc eval --json '1/3='
//! ```

use clap::Parser;
use keypad_calculator::commands::{Cli, Commands};
use keypad_calculator::config::AppConfig;
use keypad_calculator::error::AppResult;
use keypad_calculator::logging::{self, LogTarget};
use keypad_calculator::output;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = cli.config();
    config.validate()?;

    match cli.command {
        Some(Commands::Eval(args)) => {
            logging::init(&config.logging, LogTarget::Stderr)?;
            run_eval(&config, &args.keys)
        }
        #[cfg(feature = "tui")]
        Some(Commands::Tui) | None => {
            logging::init(&config.logging, LogTarget::Discard)?;
            tui::run(&config)
        }
        #[cfg(not(feature = "tui"))]
        None => Err(keypad_calculator::error::AppError::config(
            "built without the terminal UI; use `keypad-calc eval <KEYS>`",
        )),
    }
}

fn run_eval(config: &AppConfig, keys: &str) -> AppResult<()> {
    let report = output::replay(keys, config);
    println!("{}", output::render(&report, config.output)?);
    Ok(())
}

#[cfg(feature = "tui")]
mod tui {
    use std::io;

    use crossterm::{
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind,
        },
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use keypad_calculator::config::AppConfig;
    use keypad_calculator::error::{AppError, AppResult};
    use keypad_calculator::tui::{render, CalculatorApp, InputHandler, UiLayout};
    use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
    use tracing::info;

    pub fn run(config: &AppConfig) -> AppResult<()> {
        enable_raw_mode()?;
        restoring(|| session(config), restore_terminal)
    }

    /// Runs `body`, then `restore` whatever `body` returned
    ///
    /// The first error wins.
    pub(crate) fn restoring(
        body: impl FnOnce() -> AppResult<()>,
        restore: impl FnOnce() -> AppResult<()>,
    ) -> AppResult<()> {
        let result = body();
        let restored = restore();
        result.and(restored)
    }

    fn session(config: &AppConfig) -> AppResult<()> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let mut app = CalculatorApp::with_history(config.history());
        info!("terminal keypad started");
        let result = event_loop(&mut terminal, &mut app);
        let cursor = terminal.show_cursor().map_err(AppError::from);
        info!(evaluations = app.history().len(), "terminal keypad stopped");

        result.and(cursor)
    }

    fn restore_terminal() -> AppResult<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }

    fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> AppResult<()> {
        let input = InputHandler::new();

        while !app.should_quit() {
            let mut keypad_area = None;
            terminal.draw(|frame| {
                keypad_area = Some(UiLayout::new(frame.area()).keypad);
                render(app, frame);
            })?;

            match event::read()? {
                Event::Key(key) => app.apply(input.handle_key(key)),
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(area) = keypad_area {
                        app.click(area, mouse.column, mouse.row);
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}
