//! debtpace: payoff forecasts and habit analytics from local CSV/JSON files
//!
//! Usage:
//!   debtpace debts --file debts.csv
//!   debtpace project --file debts.csv --extra 100 --surplus 400
//!   debtpace habits --check-ins check_ins.csv --week 12

mod commands;
mod config;
mod report;
mod state;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use debtpace_core::PayoffStrategy;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("DEBTPACE_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "debtpace", version = VERSION, about = "Debt payoff projections and habit insights")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging (DEBTPACE_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.debtpace/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Per-debt payoff months and interest, plus portfolio totals
    Debts {
        /// Debts file (.csv or .json)
        #[arg(long)]
        file: PathBuf,
    },

    /// Month-by-month amortization rows for one debt
    Schedule {
        #[arg(long)]
        file: PathBuf,

        /// Debt id
        #[arg(long)]
        id: String,
    },

    /// Current pace vs extra payments vs best case
    Project {
        #[arg(long)]
        file: PathBuf,

        /// Habitual extra paid each month
        #[arg(long, default_value_t = 0.0)]
        extra: f64,

        /// Total monthly surplus available for debt
        #[arg(long, default_value_t = 0.0)]
        surplus: f64,
    },

    /// Simulate avalanche or snowball payoff with a monthly extra
    Strategy {
        #[arg(long)]
        file: PathBuf,

        #[arg(long, default_value_t = 0.0)]
        extra: f64,

        #[arg(long, value_enum, default_value_t = Method::Avalanche)]
        method: Method,
    },

    /// Payment velocity, consistency and insights from weekly check-ins
    Habits {
        /// Check-ins CSV
        #[arg(long)]
        check_ins: PathBuf,

        /// Challenges CSV
        #[arg(long)]
        challenges: Option<PathBuf>,

        /// Current week number (default: latest week on file)
        #[arg(long)]
        week: Option<u32>,

        /// Debts file, to relate extra payments to the monthly total
        #[arg(long)]
        debts: Option<PathBuf>,
    },

    /// Manage ~/.debtpace/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file if none exists
    Init,
    /// Print the effective configuration
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Method {
    Avalanche,
    Snowball,
}

impl From<Method> for PayoffStrategy {
    fn from(m: Method) -> Self {
        match m {
            Method::Avalanche => PayoffStrategy::Avalanche,
            Method::Snowball => PayoffStrategy::Snowball,
        }
    }
}

fn init_logging(verbose: bool) {
    // DEBTPACE_LOG > --verbose > warn
    let filter = if std::env::var("DEBTPACE_LOG").is_ok() {
        EnvFilter::from_env("DEBTPACE_LOG")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    if let Command::Config {
        command: ConfigCommand::Init,
    } = cli.command
    {
        return config::init_config(config_path);
    }

    let cfg = config::load_config(config_path)?;
    let json = cli.json;

    match cli.command {
        Command::Debts { file } => commands::cmd_debts(&file, &cfg, json),
        Command::Schedule { file, id } => commands::cmd_schedule(&file, &id, &cfg, json),
        Command::Project {
            file,
            extra,
            surplus,
        } => commands::cmd_project(&file, extra, surplus, &cfg, json),
        Command::Strategy {
            file,
            extra,
            method,
        } => commands::cmd_strategy(&file, extra, method.into(), &cfg, json),
        Command::Habits {
            check_ins,
            challenges,
            week,
            debts,
        } => commands::cmd_habits(
            commands::HabitsArgs {
                check_ins: &check_ins,
                challenges: challenges.as_deref(),
                week,
                debts: debts.as_deref(),
            },
            &cfg,
            json,
        ),
        Command::Config { command } => match command {
            ConfigCommand::Show => commands::cmd_config_show(&cfg, json),
            ConfigCommand::Init => config::init_config(config_path),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_strategy_flags() {
        let cli = Cli::try_parse_from([
            "debtpace", "strategy", "--file", "d.csv", "--extra", "150", "--method", "snowball",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Strategy { extra, method, .. } => {
                assert_eq!(extra, 150.0);
                assert_eq!(PayoffStrategy::from(method), PayoffStrategy::Snowball);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_habits_week_is_optional() {
        let cli = Cli::try_parse_from(["debtpace", "habits", "--check-ins", "c.csv"]).unwrap();
        match cli.command {
            Command::Habits { week, challenges, .. } => {
                assert_eq!(week, None);
                assert_eq!(challenges, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
