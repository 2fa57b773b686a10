//! BLOCKFALL terminal front end

use anyhow::Context;
use blockfall::input::InputHandler;
use blockfall::settings::Settings;
use blockfall::{spawn_gravity, ui, Action, Control, Game, SharedGame};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::Duration,
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn log_dir() -> anyhow::Result<PathBuf> {
    let dir = std::env::temp_dir().join("blockfall");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    Ok(dir)
}

fn main() -> anyhow::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    // Setup tracing to log file
    let log_dir = log_dir()?;
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blockfall=debug".parse()?),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    let game = match settings.gameplay.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };
    let shared = SharedGame::new(game);
    if settings.gameplay.autostart {
        shared.apply(Action::Start);
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to create async runtime")?;
    let gravity = spawn_gravity(runtime.handle(), shared.clone(), settings.gameplay.gravity());

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout());
    let result = Terminal::new(backend)
        .context("failed to create terminal")
        .and_then(|mut terminal| {
            terminal.clear()?;
            run_app(&mut terminal, &shared, &settings)
        });

    gravity.abort();

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    // Write the settings file so it can be edited by hand
    if Settings::settings_path().is_some_and(|path| !path.exists()) {
        if let Err(e) = settings.save() {
            eprintln!("Warning: Could not save settings: {}", e);
        }
    }

    let score = shared.with(|game| game.score());
    println!("\nFinal Score: {} | Lines: {}", score.points, score.lines);
    tracing::info!(points = score.points, lines = score.lines, "shutting down");

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    shared: &SharedGame,
    settings: &Settings,
) -> anyhow::Result<()> {
    let input = InputHandler::from_settings(settings);

    loop {
        // Render a consistent copy; gravity may tick while we draw
        let snapshot = shared.snapshot();
        terminal.draw(|frame| ui::render_game(frame, &snapshot, settings))?;

        if !event::poll(FRAME_DURATION)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if let Some(action) = input.key_down(key) {
            if shared.apply(action) == Control::Quit {
                tracing::info!("quit requested");
                return Ok(());
            }
        }
    }
}
