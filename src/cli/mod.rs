//! CLI Module for xrforge
//! This module provides command-line interface functionality for xrforge,
//! allowing users to inspect the catalog, move JSON in and out, and stamp
//! out the standalone WebXR app without launching the full TUI.

pub mod commands;

use colored::Colorize;
use std::error::Error;

/// Executes CLI commands based on the provided arguments
pub fn execute_cli(args: &[String]) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        print_help();
        return Ok(());
    }

    match args[0].as_str() {
        "list" | "ls" => {
            let category = args.get(1).map(|s| s.as_str());
            commands::list_catalog(category)?;
        }
        "show" | "view" => {
            if args.len() < 2 {
                println!(
                    "{}  Error: Missing experience title or ID",
                    "┃".bright_magenta()
                );
                println!(
                    "{}  Usage: xrforge show <TITLE_OR_ID>",
                    "┃".bright_magenta()
                );
                return Ok(());
            }

            commands::show_experience(&args[1])?;
        }
        "export" => {
            commands::export_catalog(args.get(1).map(|s| s.as_str()))?;
        }
        "import" => {
            if args.len() < 2 {
                println!("{}  Error: Missing input file", "┃".bright_magenta());
                println!("{}  Usage: xrforge import <FILE>", "┃".bright_magenta());
                return Ok(());
            }

            commands::import_catalog(&args[1])?;
        }
        "generate" | "gen" => {
            if args.len() < 2 {
                println!("{}  Error: Missing output path", "┃".bright_magenta());
                println!(
                    "{}  Usage: xrforge generate <OUTPUT.html> [OPTIONS]",
                    "┃".bright_magenta()
                );
                return Ok(());
            }

            commands::generate_app(&args[1], &args[2..])?;
        }
        "help" => {
            print_help();
        }
        _ => {
            println!("{}  Unknown command: {}", "┃".bright_magenta(), args[0]);

            print_help();
        }
    }

    Ok(())
}

/// Prints the help message with available commands
fn print_help() {
    println!(
        "{}  {}",
        "┃".bright_magenta(),
        "XRFORGE CLI - WEBXR CATALOG EDITOR".bold()
    );

    println!("{}  {}", "┃".bright_magenta(), "USAGE:".bright_yellow());
    println!("{}  xrforge [COMMAND] [ARGS]", "┃".bright_magenta());
    println!("{}  {}", "┃".bright_magenta(), "COMMANDS:".bright_yellow());
    println!(
        "{}  {:<30} {}",
        "┃".bright_magenta(),
        "list, ls [CATEGORY]".bright_white(),
        "List experiences, optionally for one category (ar, mr, vr)"
    );
    println!(
        "{}  {:<30} {}",
        "┃".bright_magenta(),
        "show, view <TITLE_OR_ID>".bright_white(),
        "Display an experience (partial title works)"
    );
    println!(
        "{}  {:<30} {}",
        "┃".bright_magenta(),
        "export [PATH]".bright_white(),
        "Export the catalog as JSON (default: webxr-content.json)"
    );
    println!(
        "{}  {:<30} {}",
        "┃".bright_magenta(),
        "import <FILE>".bright_white(),
        "Replace the catalog with a JSON file (previous is backed up)"
    );
    println!(
        "{}  {:<30} {}",
        "┃".bright_magenta(),
        "generate <OUTPUT.html>".bright_white(),
        "Generate the standalone WebXR app"
    );
    println!(
        "{}  {:<30} {}",
        "┃".bright_magenta(),
        "".bright_white(),
        "Options: --title T, --description D, --color #HEX,"
    );
    println!(
        "{}  {:<30} {}",
        "┃".bright_magenta(),
        "".bright_white(),
        "--lang es|en, --style grid|list|carousel, --no-loading, --data-dir DIR"
    );
    println!(
        "{}  {:<30} {}",
        "┃".bright_magenta(),
        "help".bright_white(),
        "Display this help message"
    );

    println!("{}  {}", "┃".bright_magenta(), "TIP:".bright_green());
    println!(
        "{}  Run with no arguments to launch the full TUI (Terminal User Interface) mode",
        "┃".bright_magenta()
    );
}
