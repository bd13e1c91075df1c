use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use mergify::{cli, config, error, spotify::MAX_BATCH_SIZE};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Obtain a Spotify token through the local OAuth helper
    Auth,

    /// Create a new playlist from the tracks of several playlists
    Create(CreateOptions),

    /// List your playlists
    Playlists(PlaylistsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CreateOptions {
    /// Bearer token, overrides the token in config.json
    #[clap(long)]
    pub token: Option<String>,

    /// Playlist to merge; can be repeated, overrides the list in config.json
    #[clap(long = "playlist", num_args = 1)]
    pub playlists: Vec<String>,

    /// Number of tracks added per request
    #[clap(long, default_value_t = MAX_BATCH_SIZE)]
    pub batch_size: usize,

    /// Path to the config file (default: ~/.mergify/config.json)
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Fetch the token from a running `mergify auth` helper
    #[clap(long, conflicts_with = "token")]
    pub from_helper: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    #[clap(long)]
    token: Option<String>,
    #[clap(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Create(opt) => {
            cli::create(cli::CreateOptions {
                token: opt.token,
                playlists: opt.playlists,
                batch_size: opt.batch_size,
                config: opt.config,
                from_helper: opt.from_helper,
            })
            .await
        }
        Command::Playlists(opt) => cli::list_playlists(opt.token, opt.config).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
