use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// xcalc climate index calculator.
#[derive(Parser)]
#[command(
    name = "xcalc",
    version,
    about = "Compute climate indices from index codes"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// List the indicator catalogue.
    List(ListArgs),
    /// Resolve an index code and show the bound parameters.
    Resolve(ResolveArgs),
    /// Compute an index on inline daily series.
    Compute(ComputeArgs),
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
pub struct ListArgs {
    /// Show inputs and parameters of each indicator function.
    #[arg(short, long)]
    pub long: bool,
}

/// Arguments for the `resolve` subcommand.
#[derive(clap::Args)]
pub struct ResolveArgs {
    /// Index code, e.g. `RX5day` or `R95p`.
    pub code: String,

    /// Parameter override `name=value`; `name.key=value` sets a map entry.
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `compute` subcommand.
#[derive(clap::Args)]
pub struct ComputeArgs {
    /// Index code, e.g. `RX5day` or `R95p`.
    pub code: String,

    /// TOML file holding the daily input series.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Print the bound parameters before the result.
    #[arg(long)]
    pub show_params: bool,

    /// Parameter override `name=value`; `name.key=value` sets a map entry.
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{s}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("thresh=25 degC").unwrap(),
            ("thresh".to_string(), "25 degC".to_string())
        );
        assert_eq!(
            parse_assignment("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
    }

    #[test]
    fn assignment_rejects_missing_parts() {
        assert!(parse_assignment("thresh").is_err());
        assert!(parse_assignment("=3").is_err());
    }

    #[test]
    fn compute_command_parses() {
        let cli = Cli::try_parse_from([
            "xcalc", "-vv", "compute", "RX5day", "--input", "week.toml", "--set", "window=3",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Compute(args) => {
                assert_eq!(args.code, "RX5day");
                assert_eq!(args.set, [("window".to_string(), "3".to_string())]);
                assert!(args.config.is_none());
            }
            _ => panic!("expected compute"),
        }
    }
}
