use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four::config::{AppConfig, LoggingConfig};
use connect_four::configuration::{ConfigurationSource, JsonFileSource, StaticSource};
use connect_four::game::{
    CounterState, GameEngine, MoveOutcome, PresentationPosition, MAX_COLUMNS, MAX_ROWS,
};
use connect_four::presentation::{EventLog, SinkEvent};
use connect_four::ui::{App, ScreenState};

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect_four", about = "Two-player Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// JSON player configuration file (overrides players.source)
    #[arg(long)]
    players: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,

    /// Play a scripted game without the terminal UI
    #[arg(long)]
    headless: bool,

    /// Comma-separated columns (1-7) for headless mode, e.g. "4,4,3"
    #[arg(long, value_delimiter = ',', requires = "headless")]
    moves: Vec<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(players) = &cli.players {
        config.players.source = Some(players.clone());
    }

    init_logging(&config.logging, cli.headless)?;

    match &config.players.source {
        Some(path) => run(JsonFileSource::new(path), &cli, &config),
        None => run(StaticSource::new(config.players.fallback_players()), &cli, &config),
    }
}

fn init_logging(logging: &LoggingConfig, headless: bool) -> Result<()> {
    let level = logging.level()?;
    match &logging.file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // The terminal UI owns stdout/stderr; without a file it stays quiet.
        None if headless => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn run<C: ConfigurationSource>(source: C, cli: &Cli, config: &AppConfig) -> Result<()> {
    if cli.headless {
        run_headless(source, &cli.moves)
    } else {
        run_tui(source, Duration::from_millis(config.ui.tick_ms))
    }
}

fn run_tui<C: ConfigurationSource>(source: C, tick: Duration) -> Result<()> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let mut app = App::new(source, tick);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running terminal UI")
}

fn run_headless<C: ConfigurationSource>(source: C, moves: &[usize]) -> Result<()> {
    let mut engine = GameEngine::new((EventLog::new(), ScreenState::new()), source);
    engine.start_game();

    let deadline = Instant::now() + Duration::from_secs(5);
    while engine.is_fetching() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
        engine.poll_configuration();
    }
    print_events(engine.sink_mut().0.drain());

    for &column in moves {
        if !(1..=MAX_COLUMNS).contains(&column) {
            bail!("column {column} is out of range (expected 1-{MAX_COLUMNS})");
        }
        let outcome = engine
            .make_move(column - 1)
            .with_context(|| format!("playing column {column}"))?;
        print_events(engine.sink_mut().0.drain());
        if matches!(outcome, MoveOutcome::Win { .. } | MoveOutcome::Draw) {
            break;
        }
    }

    print!("{}", board_text(&engine.sink().1));
    Ok(())
}

fn print_events(events: Vec<SinkEvent>) {
    for event in events {
        match event {
            SinkEvent::StatusMessage(text) => println!("{text}"),
            SinkEvent::PlayersReady { player_a, player_b } => println!(
                "Players: {} ({}) vs {} ({})",
                player_a.name, player_a.color_hex, player_b.name, player_b.color_hex
            ),
            SinkEvent::ConfigurationError(error) => eprintln!("Warning: {error}"),
            SinkEvent::GameOver => println!("Game over"),
            SinkEvent::BoardReset | SinkEvent::CellChanged { .. } => {}
        }
    }
}

fn board_text(screen: &ScreenState) -> String {
    let mut out = String::new();
    for row in 0..MAX_ROWS {
        for column in 0..MAX_COLUMNS {
            out.push(match screen.cell(PresentationPosition::new(row, column)) {
                CounterState::Empty => '.',
                CounterState::PlayerA => 'X',
                CounterState::PlayerB => 'O',
                CounterState::Winning => '*',
            });
        }
        out.push('\n');
    }
    out
}
