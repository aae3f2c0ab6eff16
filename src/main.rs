//! xrforge - WebXR Catalog Editor
//!
//! A terminal-based editor for a catalog of AR, MR, and VR experiences.
//! Built with Rust and ratatui for a fast, efficient, and beautiful terminal
//! experience.
//!
//! xrforge lets content authors:
//! - Manage experiences across the three WebXR categories
//! - Persist the catalog locally and move it around as JSON
//! - Stamp out a standalone single-file WebXR app (Three.js runtime included)

use crate::app::App;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event},
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use std::error::Error;
use std::io::{self};
use std::time::Duration;

mod app;
mod cli;
mod generator;
mod handlers;
mod models;
mod ui;

/// Application entry point and initialization
/// With arguments the process runs in headless CLI mode; without, it
/// initializes the terminal, sets up event handling, and runs the main
/// application loop.
fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return cli::execute_cli(&args);
    }

    color_eyre::install()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let mut should_quit = false;

    while !should_quit {
        if app.needs_redraw {
            force_redraw(&mut terminal, &app)?;
            app.needs_redraw = false;
        } else {
            terminal.draw(|frame| app.render(frame))?;
        }
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                should_quit = handlers::keys::handle_key_events(key, &mut app);
                if app.needs_redraw {
                    force_redraw(&mut terminal, &app)?;
                    app.needs_redraw = false;
                }
            }
        }
        app.tick();
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

/// Forces a complete redraw of the terminal UI
fn force_redraw<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &App,
) -> Result<(), Box<dyn Error>> {
    terminal.clear()?;
    use ratatui::crossterm::{
        execute,
        terminal::{Clear, ClearType},
    };
    use std::io::stdout;

    execute!(stdout(), Clear(ClearType::All))?;
    terminal.draw(|frame| app.render(frame))?;

    Ok(())
}
