mod commands;
mod config;

use anyhow::Result;
use clap::{ArgAction, Parser};
use colored::Colorize;
use commands::{generate, list, GenerateArgs};
use middlegen_generator::CustomizerRegistry;
use middlegen_plugins::register_builtin;
use tracing_subscriber::EnvFilter;

/// Middlegen - generate middleware decorators for Go interfaces
#[derive(Parser, Debug)]
#[command(name = "middlegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    generate: GenerateArgs,

    /// List the available customizers and exit
    #[arg(long)]
    list: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let registry = CustomizerRegistry::new();
    register_builtin(&registry)?;

    if cli.list {
        list(&registry);
        return Ok(());
    }

    let cwd = std::env::current_dir()?;
    generate(cli.generate, &registry, &cwd)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
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
    fn test_three_positionals() {
        let cli = Cli::try_parse_from(["middlegen", "Service", "SvcMiddleware", "tracer", "-vv"])
            .unwrap();
        assert_eq!(cli.generate.type_name.as_deref(), Some("Service"));
        assert_eq!(cli.generate.middleware.as_deref(), Some("SvcMiddleware"));
        assert_eq!(cli.generate.customizer.as_deref(), Some("tracer"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_wrong_positional_count_is_rejected() {
        assert!(Cli::try_parse_from(["middlegen", "Service", "SvcMiddleware"]).is_err());
        assert!(Cli::try_parse_from(["middlegen", "Service", "SvcMiddleware", "tracer", "extra"]).is_err());
    }

    #[test]
    fn test_list_needs_no_positionals() {
        let cli = Cli::try_parse_from(["middlegen", "--list"]).unwrap();
        assert!(cli.list);
    }
}
