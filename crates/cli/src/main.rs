//! typegap - project host type catalogs into TypeScript type expressions.
//!
//! Loads a JSON type catalog, projects every root reference and prints the
//! resulting TypeScript text, along with the complex types that need their own
//! declaration.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod cli;

#[derive(Parser, Debug)]
#[command(
    name = "typegap",
    version,
    about = "Project host runtime types into TypeScript type expressions"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Project the types of a catalog
    Project(cli::project::ProjectArgs),
    /// List the builtin type mappings
    Builtins(cli::builtins::BuiltinsArgs),
}

fn main() {
    init_tracing();
    let code = run_cli(std::env::args().collect());
    std::process::exit(code);
}

fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Project(args)) => cli::project::run(args),
            Some(Commands::Builtins(args)) => cli::builtins::run(&args),
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

fn init_tracing() {
    let crate_root = module_path!();

    // TYPEGAP_LOG controls log level: "trace", "debug", "info", "warn", "error"
    // or a full tracing filter spec like "typegap_core=debug"
    let filter = match std::env::var("TYPEGAP_LOG") {
        Ok(level) if is_plain_level(&level) => {
            format!("{crate_root}={level},typegap_core={level}")
        }
        Ok(spec) => spec,
        Err(_) => format!("{crate_root}=info,typegap_core=info"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_plain_level() {
        assert!(is_plain_level("debug"));
        assert!(is_plain_level("WARN"));
        assert!(!is_plain_level("typegap_core=debug"));
    }

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        let code = run_cli(vec!["typegap".into(), "frobnicate".into()]);
        assert_eq!(code, 2);
    }
}
