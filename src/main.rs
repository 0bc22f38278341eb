//! WooCommerce Endpoint Tester - Main CLI Application
//!
//! Calls the subscriptions, orders and per-subscription orders endpoints in
//! sequence, prints their timings and saves the responses as JSON files.

use clap::Parser;
use std::{error::Error, process};
use woo_endpoint_tester::{
    cli::Cli,
    client::ApiClient,
    config::{display_config_summary, load_config, validate_config, EnvManager},
    error::{AppError, Result},
    runner::Runner,
    PKG_NAME, VERSION,
};

#[tokio::main]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();

    if let Err(e) = run_application(cli).await {
        eprintln!("Error: {}", e);

        if let Some(source) = e.source() {
            eprintln!("Caused by: {}", source);
        }

        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    if cli.is_info_only() {
        if cli.env_help {
            println!("{}", EnvManager::display_env_help());
        }
        if let Some(ref path) = cli.write_env_example {
            EnvManager::save_example_env_file(path)?;
            println!("Example configuration written to {}", path.display());
        }
        return Ok(());
    }

    if cli.debug {
        println!("{} v{}", PKG_NAME, VERSION);
        if let Some(commit) = option_env!("GIT_COMMIT") {
            println!("Commit: {}", commit);
        }
        if let Some(built) = option_env!("BUILD_TIME") {
            println!("Built: {}", built);
        }
        println!("Debug mode enabled");
        for warning in EnvManager::validate_current_env() {
            println!("{}", warning);
        }
        println!();
    }

    let config = load_config(cli)?;
    let warnings = validate_config(&config)?;

    if config.debug {
        println!("Configuration loaded successfully:");
        println!("{}", display_config_summary(&config));
        println!();
    }

    if !warnings.is_empty() {
        eprintln!("Configuration Warnings:");
        for warning in &warnings {
            eprintln!("  {}", warning.format(config.enable_color));
        }
        eprintln!();
    }

    let client = ApiClient::from_config(&config)?;
    let strict = config.strict;
    let mut runner = Runner::new(config, client);
    let report = runner.run().await?;

    let results = report.results();
    let failed = results.failed_count();
    if strict && failed > 0 {
        return Err(AppError::RunFailures {
            failed,
            total: results.request_count(),
        });
    }

    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - The API key must start with 'ahc_live_sk_'");
            eprintln!("  - The base URL must start with http:// or https://");
            eprintln!("  - Run with --env-help to list the supported environment variables");
        }
        AppError::Io(_) | AppError::Serialization(_) => {
            eprintln!();
            eprintln!("Output help:");
            eprintln!("  - Check that the output directory is writable");
            eprintln!("  - Choose another directory with --output-dir");
        }
        AppError::RunFailures { .. } => {
            eprintln!();
            eprintln!("Some requests failed:");
            eprintln!("  - The saved *_response.json files contain the error payloads");
            eprintln!("  - Status 0 means no response arrived (timeout or connection error)");
        }
        _ => {}
    }
}
