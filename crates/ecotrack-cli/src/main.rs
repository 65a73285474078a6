mod cmd;
mod output;
mod root;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ecotrack_core::config::Config;
use ecotrack_core::store::JsonFileStore;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "ecotrack",
    about = "Track sustainability actions and the points they earn",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: nearest directory with ecotrack.yaml, else cwd)
    #[arg(long, global = true, env = "ECOTRACK_ROOT")]
    root: Option<PathBuf>,

    /// JSON file holding the actions (overrides `data_file` in ecotrack.yaml)
    #[arg(long, global = true, env = "ECOTRACK_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on, 0 = OS-assigned (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List all recorded actions
    List,

    /// Show a single action
    Show { id: u64 },

    /// Record a new action
    Add {
        /// What was done, e.g. "Recycling"
        #[arg(long)]
        action: String,
        /// Date in YYYY-MM-DD form
        #[arg(long)]
        date: String,
        #[arg(long, allow_negative_numbers = true)]
        points: i64,
    },

    /// Change some fields of an action
    Update {
        id: u64,
        #[arg(long)]
        action: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        points: Option<i64>,
    },

    /// Delete an action
    Remove { id: u64 },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    if let Err(e) = run(&root, cli) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(root: &Path, cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(root).context("failed to read ecotrack.yaml")?;
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    let data_path = config.data_path(root);
    let store = JsonFileStore::new(&data_path);

    match cli.command {
        Commands::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd::serve::run(&data_path, &config.server)
        }
        Commands::List => cmd::action::list(&store, cli.json),
        Commands::Show { id } => cmd::action::show(&store, id, cli.json),
        Commands::Add {
            action,
            date,
            points,
        } => cmd::action::add(&store, &action, &date, points, cli.json),
        Commands::Update {
            id,
            action,
            date,
            points,
        } => cmd::action::update(
            &store,
            id,
            action.as_deref(),
            date.as_deref(),
            points,
            cli.json,
        ),
        Commands::Remove { id } => cmd::action::remove(&store, id, cli.json),
    }
}
