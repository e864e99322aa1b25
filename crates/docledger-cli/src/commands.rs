use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use tracing::info;

use docledger_contract::{ContractError, ContractRouter, TransactionContext};
use docledger_state::{state_digest, FileWorldState};

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli, config: &CliConfig) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Invoke(args) => cmd_invoke(args, config),
        Command::List(_) => cmd_list(),
        Command::Digest(_) => cmd_digest(config),
    }
}

fn cmd_invoke(args: InvokeArgs, config: &CliConfig) -> anyhow::Result<ExitCode> {
    match invoke(&config.state_file, &args.operation, &args.args)? {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", render(&output, config.pretty));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{} {}", "✗".red().bold(), err.to_string().red());
            if let Some(code) = err.code() {
                eprintln!("  payload: {}", code.as_str().yellow());
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn cmd_list() -> anyhow::Result<ExitCode> {
    let router = ContractRouter::new()?;
    for name in router.operations() {
        println!("{name}");
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_digest(config: &CliConfig) -> anyhow::Result<ExitCode> {
    let state = open_state(&config.state_file)?;
    let digest = state_digest(&state)?;
    println!("{digest}");
    Ok(ExitCode::SUCCESS)
}

/// Run one invocation against the snapshot at `state_file`.
///
/// The outer error covers setup (opening the state, building the router);
/// the inner result is the contract's own outcome.
pub fn invoke(
    state_file: &Path,
    operation: &str,
    args: &[String],
) -> anyhow::Result<Result<String, ContractError>> {
    let state = open_state(state_file)?;
    let router = ContractRouter::new()?;
    let tx_id = uuid::Uuid::now_v7().to_string();
    let ctx = TransactionContext::new(&state, &tx_id);

    info!(tx_id = %tx_id, operation, "invocation started");
    Ok(router.invoke(&ctx, operation, args))
}

fn open_state(path: &Path) -> anyhow::Result<FileWorldState> {
    FileWorldState::open(path).with_context(|| format!("opening world state {}", path.display()))
}

/// Pretty-print JSON output when asked; anything else passes through.
fn render(output: &str, pretty: bool) -> String {
    if !pretty {
        return output.to_string();
    }
    match serde_json::from_str::<serde_json::Value>(output) {
        Ok(value @ (serde_json::Value::Object(_) | serde_json::Value::Array(_))) => {
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| output.to_string())
        }
        _ => output.to_string(),
    }
}
