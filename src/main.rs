//! Terminal runner (default binary).
//!
//! Reads `TETRIS_*` configuration, enters the alternate screen and drives the
//! engine: one `frame` per 16ms tick while a session runs, key presses applied
//! as they arrive. Set `TETRIS_LOG_PATH` (and optionally `RUST_LOG`) to capture
//! logs in a file.

use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{debug, error, info};

use tui_blockfall::core::{EngineConfig, GameEngine, ScoreObserver};
use tui_blockfall::input::{map_key, KeyCommand};
use tui_blockfall::term::{GameView, TermCanvas, TerminalRenderer, Viewport};
use tui_blockfall::types::FRAME_MS;

const ENV_LOG_PATH: &str = "TETRIS_LOG_PATH";

fn main() -> Result<()> {
    init_logging()?;

    let config = EngineConfig::from_env().context("invalid TETRIS_* configuration")?;
    let canvas = TermCanvas::new(config.tile_size);
    let mut engine = GameEngine::new(config, canvas, |score: u32| debug!("score {}", score))
        .context("failed to create game engine")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!("{:#}", err);
    }
    result
}

/// Logs go to `TETRIS_LOG_PATH` when set. Without it they are only emitted if
/// `RUST_LOG` asks for them, since stderr shares the game's screen.
fn init_logging() -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    let log_path = std::env::var(ENV_LOG_PATH)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match log_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("cannot open log file {}", path))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if std::env::var_os("RUST_LOG").is_none() => {
            builder.filter_level(log::LevelFilter::Off);
        }
        None => {}
    }

    builder.init();
    Ok(())
}

fn run<O: ScoreObserver>(
    term: &mut TerminalRenderer,
    engine: &mut GameEngine<TermCanvas, O>,
) -> Result<()> {
    let view = GameView::default();
    let clock = Instant::now();
    let frame_duration = Duration::from_millis(u64::from(FRAME_MS));
    let mut last_frame = Instant::now();

    engine.start();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let layout = view.begin_frame(&engine.snapshot(), viewport, engine.surface_mut());

        if engine.is_running() && last_frame.elapsed() >= frame_duration {
            last_frame = Instant::now();
            engine.frame(clock.elapsed().as_secs_f64() * 1000.0);
        } else {
            // Between ticks, and after the session ends, repaint the board as is.
            engine.draw();
        }

        if let Some(over) = engine.take_game_over() {
            info!("game over: final score {}", over.score);
        }

        let snap = engine.snapshot();
        view.finish_frame(&snap, layout, engine.surface_mut());
        term.present(engine.surface_mut().fb_mut())?;

        // Input with timeout until next tick.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match map_key(key) {
                    Some(KeyCommand::Quit) => return Ok(()),
                    Some(KeyCommand::Action(action)) => {
                        debug!("key {:?} -> {}", key.code, action.as_str());
                        engine.apply(action);
                    }
                    None => {}
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
    }
}
