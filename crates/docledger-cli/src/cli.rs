use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docledger",
    about = "Invoke document asset ledger operations against a local world state",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// World state snapshot file (overrides the config file)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Pretty-print JSON results
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Invoke a contract operation by name
    Invoke(InvokeArgs),
    /// List the operations the contract serves
    List(ListArgs),
    /// Print the BLAKE3 digest of the world state
    Digest(DigestArgs),
}

#[derive(Args)]
pub struct InvokeArgs {
    /// Operation name, e.g. CreateAsset
    pub operation: String,
    /// Positional operation arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct DigestArgs {}
