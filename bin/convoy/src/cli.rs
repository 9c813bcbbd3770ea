use clap::Parser;
use tracing::level_filters::LevelFilter;

/// The network label a run targets.
///
/// Steps may be restricted to specific labels; everything else about the
/// environment (accounts, primitives) comes from the environment file or the
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Network {
    Development,
    Live,
    #[strum(default)]
    Custom(String),
}

#[derive(Parser)]
#[command(name = "convoy")]
#[command(
    author,
    version,
    about = "Deploy the contract suite in order onto a target environment"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "CONVOY_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    /// The network label steps are filtered against.
    ///
    /// If not provided, the label from the environment file is used
    /// (defaulting to `development`).
    #[arg(short, long, env = "CONVOY_NETWORK")]
    pub network: Option<Network>,

    /// Path to a Convoy.toml environment file (or a directory containing
    /// one).
    #[arg(short, long, env = "CONVOY_CONFIG")]
    pub config: Option<String>,

    /// Skip the post-deployment wiring call.
    ///
    /// Use this when the issuer prefers to call `connector()` manually after
    /// the migration.
    #[arg(long, env = "CONVOY_SKIP_WIRING")]
    pub skip_wiring: bool,

    /// Write a default environment file to the given path and exit.
    #[arg(long, value_name = "PATH")]
    pub write_env: Option<String>,
}
