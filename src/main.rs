//! Bill Dedup - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use bill_dedup::{
    cli::{Args, Command},
    config::{validate_config, Config},
    dedup::DuplicateRegistry,
    desktop,
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_config_summary, print_error, print_info, print_registry_summary,
        print_warning,
    },
    web,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Io(_) => ExitCode::from(exit_codes::SERVER_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration, then let CLI flags override it
    if !args.config.exists() {
        print_warning(&format!(
            "Configuration file not found: {}",
            args.config.display()
        ));
        print_info("Using default configuration with CLI arguments");
    }
    let mut config = Config::load_or_default(&args.config)?;
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    // One registry for the whole process, handed to the chosen front end
    let registry = Arc::new(DuplicateRegistry::new());

    match args.command() {
        Command::Serve(_) => {
            print_config_summary(
                "web",
                &config.storage.upload_dir.display().to_string(),
                &format!("Listening: http://{}", config.server.bind_address),
            );
            print_info("Press Ctrl-C to stop the server");
            web::serve(&config, Arc::clone(&registry)).await?;
            print_registry_summary(&registry.stats());
        }
        Command::Form(_) => {
            let form_config = config.clone();
            let form_registry = Arc::clone(&registry);
            tokio::task::spawn_blocking(move || desktop::run(&form_config, form_registry))
                .await
                .map_err(|e| Error::Io(std::io::Error::other(e)))??;
        }
    }

    Ok(())
}
