use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use connect_x::config::AppConfig;
use connect_x::game::Session;
use connect_x::ui::{headless, App};

/// Play Connect-X: drop tokens, line up `num_to_win` in a row.
#[derive(Parser)]
#[command(name = "connect-x", about = "Play an N-player game of Connect-X")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-x.toml")]
    config: PathBuf,

    /// Override number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override number of columns
    #[arg(long)]
    columns: Option<usize>,

    /// Override how many tokens in a row win
    #[arg(long)]
    num_to_win: Option<usize>,

    /// Override number of players
    #[arg(long)]
    players: Option<usize>,

    /// Play on stdin/stdout instead of the terminal UI
    #[arg(long)]
    headless: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let loaded = AppConfig::load_optional(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let config_missing = loaded.is_none();
    let mut config = loaded.unwrap_or_default();

    // Apply CLI overrides
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(columns) = cli.columns {
        config.board.columns = columns;
    }
    if let Some(num_to_win) = cli.num_to_win {
        config.board.num_to_win = num_to_win;
    }
    if let Some(players) = cli.players {
        config.players.count = players;
        config.players.tokens = None;
    }
    if let Some(log_file) = cli.log_file {
        config.logging.file = Some(log_file);
    }
    config.validate().context("invalid configuration")?;

    init_tracing(
        config.logging.directive(cli.headless),
        config.logging.file.as_deref(),
    )?;
    if config_missing {
        warn!(path = %cli.config.display(), "config file not found, using defaults");
    }

    let players = config.players.build()?;
    let mut session =
        Session::new(config.board.settings(), players).context("creating game session")?;

    if cli.headless {
        let stdin = io::stdin();
        headless::run(&mut session, stdin.lock(), io::stdout().lock())?;
        return Ok(());
    }

    run_tui(session).context("running terminal UI")
}

/// Install the subscriber for `directive`, writing to `file` or else stderr.
/// No directive means no logging.
fn init_tracing(directive: Option<&str>, file: Option<&Path>) -> Result<()> {
    let Some(directive) = directive else {
        return Ok(());
    };
    let filter = EnvFilter::try_new(directive).context("parsing logging.filter")?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn run_tui(session: Session) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal even if the app failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
