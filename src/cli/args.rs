//! Command-line argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

/// Duplicate bill detector.
#[derive(Parser, Debug)]
#[command(
    name = "bill-dedup",
    version,
    about = "Detect duplicate bill uploads by content hash",
    long_about = "Accepts bill files with an amount and date, hashes their content and reports \
                  whether the same file was already submitted.\n\n\
                  Runs either as a web upload server or as an interactive form."
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml", env = "BILL_DEDUP_CONFIG")]
    pub config: PathBuf,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Front end to run.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web upload server (default).
    Serve(ServeArgs),
    /// Run the interactive bill form.
    Form(FormArgs),
}

/// Options for the web server.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to listen on, e.g. 127.0.0.1:5000.
    #[arg(short, long, env = "BILL_DEDUP_BIND")]
    pub bind: Option<String>,

    /// Directory uploaded bills are stored in.
    #[arg(short, long = "upload-dir")]
    pub upload_dir: Option<PathBuf>,

    /// Directory containing index.html.
    #[arg(short, long = "static-dir")]
    pub static_dir: Option<PathBuf>,
}

/// Options for the interactive form.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// Number of lines kept in the log panel.
    #[arg(long)]
    pub log_lines: Option<usize>,
}

impl Args {
    /// The selected front end, defaulting to the web server.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        match self.command() {
            Command::Serve(serve) => {
                if let Some(bind) = serve.bind {
                    config.server.bind_address = bind;
                }

                if let Some(dir) = serve.upload_dir {
                    config.storage.upload_dir = dir;
                }

                if let Some(dir) = serve.static_dir {
                    config.server.static_dir = dir;
                }
            }
            Command::Form(form) => {
                if let Some(lines) = form.log_lines {
                    config.form.log_capacity = lines;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let args = Args::parse_from(["bill-dedup"]);
        assert!(matches!(args.command(), Command::Serve(_)));
        assert_eq!(args.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn test_serve_overrides() {
        let args = Args::parse_from([
            "bill-dedup",
            "serve",
            "--bind",
            "0.0.0.0:8000",
            "--upload-dir",
            "/tmp/bills",
        ]);
        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.server.bind_address, "0.0.0.0:8000");
        assert_eq!(config.storage.upload_dir, PathBuf::from("/tmp/bills"));
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn test_form_overrides() {
        let args = Args::parse_from(["bill-dedup", "--debug", "form", "--log-lines", "5"]);
        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert!(args.debug);
        assert_eq!(config.form.log_capacity, 5);
    }
}
