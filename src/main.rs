// src/main.rs
use clap::Parser;
use crossterm::style::Stylize;
use tagmarks::cli::args::Cli;
use tagmarks::config::{load_settings, Settings};
use tagmarks::exitcode;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug, cli.no_color);

    let settings = if cli.generate_config {
        Settings::default()
    } else {
        match load_settings(cli.config.as_deref()) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("{}: {}", "Failed to load settings".red(), e);
                std::process::exit(exitcode::USAGE);
            }
        }
    };
    debug!("Settings: {:?}", settings);

    if let Err(e) = tagmarks::cli::execute_command(cli, &settings) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(e.exit_code());
    }
    std::process::exit(exitcode::SUCCESS);
}

fn setup_logging(verbosity: u8, no_color: bool) {
    debug!("INIT: Attempting logger init from main.rs");

    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    let noisy_modules = ["diesel", "r2d2"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Human output on stderr keeps stdout parseable
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_cli_command_when_verify_then_debug_asserts_pass() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }
}
