use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "falcon-lookup",
    version,
    about = "Email OSINT lookup: identity, platforms, breaches, risk score"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file (TOML). Default: config/falcon-lookup.toml
    #[arg(long, global = true, env = "FALCON_CONFIG")]
    pub config: Option<String>,

    /// Comma-separated provider names to enable (case-insensitive)
    #[arg(long, global = true, value_delimiter = ',')]
    pub providers: Option<Vec<String>>,

    /// Increase verbosity (info, debug, trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Optional log file path (appended, rotated past 1 MB)
    #[arg(long, global = true)]
    pub log_file: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve GET /lookup over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080", env = "FALCON_BIND")]
        bind: String,
    },
    /// Run a single lookup and print the JSON report to stdout
    Lookup {
        /// Email address to look up
        email: String,
        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}
