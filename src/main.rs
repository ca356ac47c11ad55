// Argus - PII Data Store Scanner
// Copyright (c) 2025 Argus Contributors
// Licensed under the MIT License

use argus::cli::Cli;
use argus::detector::MatchConfig;
use argus::domain::ScanOptions;
use argus::format::{formatter_for, Formatter};
use clap::{CommandFactory, Parser};
use std::io::IsTerminal;
use std::process;
use std::sync::Arc;

fn main() {
    // Load environment variables from .env if present; connection URIs and
    // object-store credentials commonly arrive this way
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("warn");
    if let Err(e) = argus::logging::init_logging(log_level) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let Some(url) = cli.url.clone() else {
        let _ = Cli::command().print_help();
        process::exit(1);
    };

    let match_config =
        match MatchConfig::build(&cli.only, &cli.except, &cli.pattern, cli.min_count as usize) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        };

    let color = std::io::stdout().is_terminal();
    let formatter = formatter_for(cli.format, Box::new(std::io::stdout()), color);

    let options = ScanOptions {
        url,
        show_data: cli.show_data,
        show_all: cli.show_all,
        sample_size: cli.sample_size as usize,
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(cli.processes as usize)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            process::exit(1);
        }
    };

    let exit_code = runtime.block_on(run(options, match_config, formatter));
    process::exit(exit_code);
}

/// Race the scan against ctrl-c; dropping the scan future cancels every
/// in-flight adapter operation
async fn run(options: ScanOptions, config: MatchConfig, formatter: Arc<dyn Formatter>) -> i32 {
    tokio::select! {
        result = argus::scanner::scan(options, config, formatter) => {
            match result {
                Ok(_) => 0,
                Err(e) => {
                    eprintln!("Error: {e}");
                    1
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nScan interrupted");
            130
        }
    }
}
