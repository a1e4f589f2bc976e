use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::path::PathBuf;

use ipexpr::address::{format_for_display, split_address_list, truncate_for_display, validate_address, validate_assignment};
use ipexpr::config::Config;
use ipexpr::config_loader;
use ipexpr::filter::{AdvancedSearch, ComplianceFilter, FilterExpression, FilterInput, RecordFilters};
use ipexpr::IpError;

/// IP address classification, assignment validation and record filter expressions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to an optional YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a single address as IPv4, IPv6 or invalid
    Classify {
        token: String,
    },
    /// Validate a comma/semicolon separated assignment list
    Validate {
        text: String,
    },
    /// Build record filter query parameters from advanced search controls
    Build {
        #[arg(long, default_value = "")]
        range_start: String,
        #[arg(long, default_value = "")]
        range_end: String,
        #[arg(long, default_value = "")]
        subnet: String,
        /// Common choice: a preset label, `unknown`, a prefix or an address
        #[arg(long)]
        common: Option<String>,
        /// compliant, non-compliant or no-assignment
        #[arg(long)]
        compliance: Option<String>,
    },
    /// Check whether an observed address passes a filter expression
    Match {
        expression: String,
        /// Observed address; omit for a record without a captured address
        observed: Option<String>,
    },
    /// Format an address list for display
    Display {
        text: String,
    },
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = config_loader::load_or_default(args.config.as_deref())?;

    run(&args.command, &config)
}

fn run(command: &Command, config: &Config) -> Result<()> {
    match command {
        Command::Classify { token } => match validate_address(token) {
            Ok(kind) => println!("{}", kind),
            Err(e) => {
                warn!("{}", e);
                println!("Invalid");
            }
        },
        Command::Validate { text } => {
            for line in validation_report(&validate_assignment(text, &config.assignment)) {
                println!("{}", line);
            }
        }
        Command::Build { range_start, range_end, subnet, common, compliance } => {
            let compliance = compliance
                .as_deref()
                .map(str::parse::<ComplianceFilter>)
                .transpose()
                .wrap_err("Invalid --compliance value")?;
            let search = AdvancedSearch {
                ip: FilterInput {
                    range_start: range_start.clone(),
                    range_end: range_end.clone(),
                    subnet: subnet.clone(),
                    common_ips_choice: common.as_deref().map(|choice| config.resolve_common_choice(choice)),
                },
                compliance,
            };

            let mut filters = RecordFilters::default();
            filters.apply_advanced_search(&search);
            let pairs = filters.query_pairs();
            if pairs.is_empty() {
                info!("No filter selected");
            }
            for (name, value) in pairs {
                println!("{}={}", name, value);
            }
        }
        Command::Match { expression, observed } => {
            let expression: FilterExpression = expression
                .parse()
                .wrap_err_with(|| format!("Cannot interpret filter '{}'", expression))?;
            println!("{}", expression.matches(observed.as_deref()));
        }
        Command::Display { text } => {
            let formatted: Vec<String> = split_address_list(text).map(format_for_display).collect();
            println!("{}", truncate_for_display(&formatted.join(", "), config.display.max_length));
        }
    }
    Ok(())
}

/// Lines printed for an assignment check, one per offending token on failure
fn validation_report(result: &std::result::Result<Vec<String>, IpError>) -> Vec<String> {
    match result {
        Ok(addresses) if addresses.is_empty() => vec!["valid: no addresses assigned".to_string()],
        Ok(addresses) => vec![format!("valid: {}", addresses.join(", "))],
        Err(e) => std::iter::once(format!("invalid: {}", e))
            .chain(e.offending_tokens().into_iter().map(|token| format!("  - {}", token)))
            .collect(),
    }
}
