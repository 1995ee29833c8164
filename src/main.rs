//! Terminal 2048 runner (default binary).
//!
//! Reads configuration from the environment, optionally resumes a saved game, and
//! plays until the player quits. The board engine is driven synchronously: one key
//! press, one move, one redraw.

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tui_2048::config::AppConfig;
use tui_2048::core::BoardEngine;
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_2048::types::GameAction;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;

    let mut engine = build_engine(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(path) = &config.state_path {
        save_state(&engine, path)?;
    }
    result
}

/// Logs go to a file: the terminal belongs to the game while it runs.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn build_engine(config: &AppConfig) -> Result<BoardEngine> {
    let mut engine = BoardEngine::new(config.engine_config())
        .context("invalid game configuration")?;

    if let Some(path) = config.state_path.as_deref().filter(|p| p.exists()) {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading saved game {}", path.display()))?;
        engine
            .import_json(&json)
            .with_context(|| format!("loading saved game {}", path.display()))?;
        info!("resumed game from {}", path.display());
    }

    Ok(engine)
}

fn save_state(engine: &BoardEngine, path: &Path) -> Result<()> {
    let json = engine.export_json()?;
    fs::write(path, json).with_context(|| format!("saving game to {}", path.display()))?;
    info!("saved game to {}", path.display());
    Ok(())
}

fn run(term: &mut TerminalRenderer, engine: &mut BoardEngine) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut report = engine.start_game();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&report.snapshot, engine.presentation(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }

                match handle_key_event(key) {
                    Some(GameAction::Move(direction)) => {
                        if report.outcome.is_terminal() {
                            // Terminal outcomes do not lock the engine; the front-end stops here.
                            continue;
                        }
                        report = engine.apply(direction)?;
                    }
                    Some(GameAction::Restart) => {
                        report = engine.restart();
                    }
                    None => {}
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
