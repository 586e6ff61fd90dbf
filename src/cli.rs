/// CLI argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::app_config::Overrides;

// Build timestamp injected at compile time
pub const VERSION_WITH_BUILD: &str = concat!(env!("CARGO_PKG_VERSION"), " (built: ", env!("BUILD_TIMESTAMP"), ")");

#[derive(Parser)]
#[command(name = "heapdash")]
#[command(author, version = VERSION_WITH_BUILD, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Base URL of the metrics server (the widget requests <URL>/api/metrics)
    #[arg(long, global = true, env = "HEAPDASH_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Poll period in milliseconds
    #[arg(long, global = true, env = "HEAPDASH_INTERVAL_MS")]
    pub interval_ms: Option<u64>,

    /// Config file to use instead of ~/.config/heapdash/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Append log output to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl GlobalArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            interval_ms: self.interval_ms,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Live dashboard (default)
    Watch,

    /// Poll once and print what the dashboard would show
    Once {
        /// Print the element values as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["heapdash"]).unwrap();
        assert_eq!(cli.command, None);
        assert!(!cli.global.quiet);
    }

    #[test]
    fn test_once_with_global_flags() {
        let cli = Cli::try_parse_from([
            "heapdash",
            "once",
            "--json",
            "--endpoint",
            "http://localhost:9000",
            "--interval-ms",
            "500",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Commands::Once { json: true }));

        let overrides = cli.global.overrides();
        assert_eq!(overrides.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(overrides.interval_ms, Some(500));
    }

    #[test]
    fn test_rejects_bad_interval() {
        assert!(Cli::try_parse_from(["heapdash", "--interval-ms", "soon"]).is_err());
    }
}
