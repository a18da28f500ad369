//! genui-tui - A terminal previewer for generated UI component code
//!
//! This is the main entry point for the genui-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod model;
mod preview;
mod services;
mod tui;

use crate::action::Action;
use crate::app::{App, PendingEdit};
use crate::component::Component;
use crate::config::Config;
use crate::preview::{extract_code_blocks, Pipeline};
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::fs::{self, OpenOptions};
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Preview React/MUI components from generated chat text
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Read the text from a file instead of generating it
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Generator command; `{prompt}` is replaced by the quoted prompt
    #[arg(short, long)]
    command: Option<String>,

    /// Print normalized scripts and results to stdout instead of starting the UI
    #[arg(long)]
    print: bool,

    /// Keep `...Icon` suffixes on imported icons
    #[arg(long)]
    no_icon_rewrite: bool,

    /// Event polling interval in milliseconds
    #[arg(long)]
    tick_rate: Option<u64>,

    /// Config file to use instead of ~/.genui-tui/config.json
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective config back to the config file
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.print);

    let config = resolve_config(&args)?;

    if args.print {
        let text = read_input(args.file.as_deref())?;
        let pipeline = Pipeline::new(&config);
        let all_ok = print_blocks(&text, &pipeline, &mut io::stdout().lock())?;
        if !all_ok {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Piped text is read before the terminal is taken over
    let initial_text = match &args.file {
        Some(_) => Some(read_input(args.file.as_deref())?),
        None if !io::stdin().is_terminal() => Some(read_input(None)?),
        None => None,
    };

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(config.tick_rate_ms.max(10)));
    tui.enter()?;

    // Create app state
    let mut app = App::new(config);
    if let Some(text) = initial_text {
        app.load_text(text);
    }

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("Fatal error: {:?}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr in print mode, otherwise to a file under the config dir
fn init_tracing(print_mode: bool) {
    let filter =
        EnvFilter::try_from_env("GENUI_LOG").unwrap_or_else(|_| EnvFilter::new("genui_tui=info"));

    if print_mode {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return;
    }

    // The terminal belongs to the UI; without a log file we stay silent
    let Some(dir) = Config::config_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("genui-tui.log"))
    else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

/// Load the config file and apply command line overrides
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => match Config::load_from(path) {
            Some(config) => config,
            None if args.save_config => Config::default(),
            None => anyhow::bail!("Failed to load config from {}", path.display()),
        },
        None => Config::load().unwrap_or_default(),
    };

    if let Some(command) = &args.command {
        config.generator_command = command.clone();
    }
    if args.no_icon_rewrite {
        config.strip_icon_suffix = false;
    }
    if let Some(tick_rate) = args.tick_rate {
        config.tick_rate_ms = tick_rate;
    }

    if args.save_config {
        let saved = match &args.config {
            Some(path) => config.save_to(path),
            None => config.save(),
        };
        match saved {
            Ok(()) => tracing::info!("Saved config"),
            Err(e) => tracing::warn!("Failed to save config: {:#}", e),
        }
    }

    Ok(config)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Write every block's script and result; returns false if any block failed
fn print_blocks(text: &str, pipeline: &Pipeline, out: &mut impl Write) -> Result<bool> {
    let mut all_ok = true;

    for block in extract_code_blocks(text) {
        let (script, outcome) = pipeline.run(&block.code);
        writeln!(out, "// ── {} ──", block.title)?;
        if !script.is_empty() {
            writeln!(out, "{}", script.trim_end())?;
        }
        match outcome {
            Some(Ok(rendered)) => writeln!(out, "// ok: {}", rendered.entry)?,
            Some(Err(e)) => {
                tracing::warn!("{} failed: {}", block.title, e);
                all_ok = false;
                writeln!(out, "// error: {}", e)?;
            }
            None => writeln!(out, "// empty")?,
        }
        writeln!(out)?;
    }

    Ok(all_ok)
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!("Draw error: {}", e);
            }
        })?;

        // Check for pending external editor
        if let Some(edit) = app.pending_edit.take() {
            launch_external_editor(tui, app, edit)?;
            continue; // Redraw after editor closes
        }

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Paste(text) => app.handle_paste(&text)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Process the action
            if let Some(action) = action {
                // Action might produce a follow-up action
                let mut current_action = Some(action);
                while let Some(a) = current_action {
                    tracing::debug!("Action: {}", a);
                    current_action = app.update(a)?;
                }
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}

/// Open a block in the external editor and splice the result back
fn launch_external_editor(tui: &mut Tui, app: &mut App, edit: PendingEdit) -> Result<()> {
    // Determine the editor to use: $VISUAL, $EDITOR, or fallback
    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vim".to_string());

    // Suspend the TUI
    tui.suspend()?;

    // Launch the editor
    let status = Command::new(&editor).arg(&edit.path).status();

    // Resume the TUI
    tui.resume()?;

    // Handle result
    match status {
        Ok(exit_status) if exit_status.success() => {
            if let Err(e) = app.finish_edit(edit) {
                app.error = Some(format!("{:#}", e));
            }
        }
        Ok(exit_status) => {
            app.error = Some(format!("Editor exited with status: {}", exit_status));
            let _ = fs::remove_file(&edit.path);
        }
        Err(e) => {
            app.error = Some(format!("Failed to launch editor '{}': {}", editor, e));
            let _ = fs::remove_file(&edit.path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print(text: &str) -> (String, bool) {
        let pipeline = Pipeline::new(&Config::default());
        let mut out = Vec::new();
        let ok = print_blocks(text, &pipeline, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), ok)
    }

    #[test]
    fn test_print_reports_each_block() {
        let text = "```tsx\nimport { Button } from '@mui/material';\nconst Save = () => <Button>Save</Button>;\n```\n";
        let (out, ok) = print(text);

        assert!(ok);
        assert!(out.starts_with("// ── Save ──\n"));
        assert!(!out.contains("import"));
        assert!(out.contains("render(<Save />);"));
        assert!(out.contains("// ok: Save"));
    }

    #[test]
    fn test_print_flags_failures() {
        let text = "```tsx\nconst A = () => <Missing />;\n```\n";
        let (out, ok) = print(text);

        assert!(!ok);
        assert!(out.contains("// error: ReferenceError: Missing is not defined"));
    }

    #[test]
    fn test_print_without_blocks_is_ok() {
        let (out, ok) = print("Just prose.");
        assert!(ok);
        assert!(out.is_empty());
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from([
            "genui-tui",
            "--command",
            "llm {prompt}",
            "--no-icon-rewrite",
            "--tick-rate",
            "50",
            "--config",
            "/nonexistent/genui-config.json",
        ]);
        assert!(resolve_config(&args).is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config::default().save_to(&path).unwrap();
        let args = Args::parse_from([
            "genui-tui",
            "--command",
            "llm {prompt}",
            "--no-icon-rewrite",
            "--tick-rate",
            "50",
            "--config",
            path.to_str().unwrap(),
        ]);

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.generator_command, "llm {prompt}");
        assert!(!config.strip_icon_suffix);
        assert_eq!(config.tick_rate_ms, 50);
    }
}
