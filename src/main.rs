use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mazewalk::{util, Algorithm, App, Config, HttpSolverClient};

/// Replay grid search algorithms in the terminal
#[derive(Parser)]
#[command(name = "mazewalk")]
#[command(version)]
struct Cli {
    /// Data directory for config and logs (default: ~/.mazewalk)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Solver service base URL, overrides the config file
    #[arg(long)]
    solver_url: Option<String>,

    /// Start replaying this algorithm on launch (bfs, dfs, a_star)
    #[arg(long)]
    algorithm: Option<Algorithm>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the configured maze and exit
    Maze,
    /// Print the config file path and exit
    ConfigPath,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir);

    // Initialize logging to file (<data_dir>/logs/mazewalk.log)
    fs::create_dir_all(util::logs_dir())
        .with_context(|| format!("creating {}", util::logs_dir().display()))?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false) // Disable ANSI colors in log file
        .init();

    if let Some(Commands::ConfigPath) = cli.command {
        println!("{}", util::config_path().display());
        return Ok(());
    }

    let mut config = Config::load();
    if let Some(url) = cli.solver_url {
        config = config.with_solver_url(url);
    }
    let grid = config.grid().context("invalid [maze] in config file")?;

    if let Some(Commands::Maze) = cli.command {
        print!("{}", grid);
        return Ok(());
    }

    let solver = HttpSolverClient::new(&config.solver.base_url, config.solver.request_timeout())
        .context("building solver client")?;

    mazewalk::ui::install_panic_hook();
    let mut app = App::new(grid, config.timing, Arc::new(solver));
    app.run(cli.algorithm).await
}
