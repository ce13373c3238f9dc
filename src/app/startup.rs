//! Application startup
//!
//! Parses arguments, merges the config file, starts logging, then runs a
//! single scan with the spinner attached and prints the report.

use super::cli::args::Args;
use super::cli::config::{load_file_config, resolve, AppConfig};
use super::cli::display::{print_report, render_json};
use super::spinner::run_spinner;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::github::api::{GithubApi, GithubClient};
use crate::scanner::api::{ScanReport, ScanRequest, ScannerManager};
use std::io::IsTerminal;
use std::sync::Arc;

/// Exit code used when the scan is interrupted with Ctrl-C
const EXIT_INTERRUPTED: i32 = 130;

/// Run the application and return the process exit code
pub async fn startup() -> i32 {
    let argv: Vec<String> = std::env::args().collect();
    let stdout_tty = std::io::stdout().is_terminal();

    let args = match Args::try_parse_styled(&argv, Args::color_hint(&argv).unwrap_or(stdout_tty)) {
        Ok(args) => args,
        Err(e) => {
            // --help and --version end up here too
            let _ = e.print();
            return e.exit_code();
        }
    };

    let file = load_file_config(args.config_file.as_deref()).await;
    let config = match file.and_then(|file| resolve(&args, file, stdout_tty)) {
        Ok(config) => config,
        Err(e) => {
            let _ = init_logging(
                args.log_level.as_deref(),
                args.log_format.as_deref(),
                None,
                args.color_choice().unwrap_or(false),
            );
            eprintln!("{}", log_error_with_context(&e, "Failed to load configuration"));
            return 1;
        }
    };

    if let Err(e) = init_logging(
        config.log_level.as_deref(),
        config.log_format.as_deref(),
        config.log_file.as_deref(),
        config.color && std::io::stderr().is_terminal(),
    ) {
        eprintln!("Failed to initialise logging: {e}");
        return 1;
    }

    log::info!(
        "envscan {} starting (batch size {}, API {})",
        env!("CARGO_PKG_VERSION"),
        config.scan.batch_size,
        config.client.api_url
    );

    let client = match GithubClient::new(&config.client) {
        Ok(client) => client,
        Err(e) => {
            log::debug!("Client setup failed: {:?}", e);
            eprintln!("{e}");
            return 1;
        }
    };

    match run(Arc::new(client), &config).await {
        Some(report) => finish(&report, &config),
        None => {
            eprintln!("Interrupted");
            EXIT_INTERRUPTED
        }
    }
}

/// Run one scan; `None` if it was interrupted
async fn run(api: Arc<dyn GithubApi>, config: &AppConfig) -> Option<ScanReport> {
    let manager = ScannerManager::new(api, config.scan);
    let request = ScanRequest {
        username: config.username.clone(),
    };

    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);
    let spinner = if config.json {
        None
    } else {
        let events = manager.subscribe("progress-spinner", "cli").await;
        Some(tokio::spawn(run_spinner(events, shutdown_rx)))
    };

    let report = tokio::select! {
        report = manager.start_scan(&request.username) => Some(report),
        _ = tokio::signal::ctrl_c() => {
            log::info!("Scan of {} interrupted", request.username);
            None
        }
    };

    let _ = shutdown_tx.send(());
    if let Some(handle) = spinner {
        match handle.await {
            Ok(Err(e)) => log::debug!("Spinner stopped: {}", e),
            Err(e) => log::debug!("Spinner task failed: {}", e),
            Ok(Ok(())) => {}
        }
    }

    report
}

fn finish(report: &ScanReport, config: &AppConfig) -> i32 {
    let printed = if config.json {
        render_json(report)
            .map(|json| println!("{json}"))
            .map_err(|e| e.to_string())
    } else {
        print_report(report, config.color).map_err(|e| e.to_string())
    };

    if let Err(e) = printed {
        log::error!("Failed to write report: {}", e);
        return 1;
    }

    if report.is_success() {
        0
    } else {
        1
    }
}
