// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shelf - a small item catalogue served over HTTP.
//!
//! This is the binary entry point.

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shelf_config::ShelfConfig;

/// Shelf - a small item catalogue served over HTTP.
#[derive(Parser, Debug)]
#[command(name = "shelf", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, short, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Start the HTTP server (default).
    Serve,
    /// Print the resolved configuration as TOML.
    Config,
}

fn load_config(path: Option<&PathBuf>) -> ShelfConfig {
    let loaded = match path {
        Some(path) => shelf_config::load_and_validate_path(path),
        None => shelf_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            shelf_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                tracing::error!(error = %e, "shelf exited with an error");
                eprintln!("shelf: {e}");
                std::process::exit(1);
            }
        }
        Commands::Config => match toml::to_string_pretty(&config) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("shelf: failed to render configuration: {e}");
                std::process::exit(1);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["shelf"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["shelf", "config", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Config));
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));

        let cli = Cli::try_parse_from(["shelf", "-c", "alt.toml", "serve"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Serve));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["shelf", "shell"]).is_err());
    }

    #[test]
    fn default_config_renders_as_toml() {
        let rendered = toml::to_string_pretty(&ShelfConfig::default()).unwrap();
        assert!(rendered.contains("[storage]"));
        assert!(rendered.contains("database_file"));
    }
}
