mod config;
mod http;
mod reporting;

use crate::config::Config;
use crate::http::{run_trial, Sampler};
use anyhow::Error;
use clap::{value_t, App, Arg};
use slog::{o, Drain, Level};
use tokio::runtime::Runtime;

fn root_logger(level: Level) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().stdout().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let async_drain = slog_async::Async::new(drain).build().fuse();
    let level_filter = slog::LevelFilter(async_drain, level).fuse();
    slog::Logger::root(level_filter, o!())
}

fn run_trials(logger: slog::Logger, config: Config) -> Result<(), Error> {
    let mut rt = Runtime::new()?;
    rt.block_on(async move {
        let sampler = Sampler::new(logger);
        for target in &config.targets {
            println!("Testing Server-Timing headers for: {}\n", target.url);
            let report = run_trial(&sampler, target, config.trials, config.delay).await;
            println!("{}", report);
        }
    });
    Ok(())
}

fn main() {
    let matches = App::new("Stprobe")
        .version("1.0")
        .author("Benn Sundsrud <benn.sundsrud@gmail.com>")
        .about("Probe web endpoints and report Server-Timing metrics")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("Path to config file (built-in endpoints when omitted)")
                .required(false)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("n")
                .short("n")
                .takes_value(true)
                .help("Requests per endpoint")
                .required(false),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets verbosity level"),
        )
        .get_matches();
    let mut config = match matches.value_of("config") {
        Some(path) => match Config::load(&path) {
            Ok(conf) => conf,
            Err(e) => {
                eprintln!("Could not load config: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::builtin(),
    };
    if matches.is_present("n") {
        let count = value_t!(matches, "n", usize).unwrap_or_else(|e| e.exit());
        config.trials = count;
    }
    let level = match matches.occurrences_of("v") {
        0 => Level::Warning,
        1 => Level::Info,
        2 => Level::Debug,
        3 => Level::Trace,
        _ => {
            eprintln!("WARNING: more than -vvv is ignored");
            Level::Trace
        }
    };
    let logger = root_logger(level);
    match run_trials(logger, config) {
        Err(e) => {
            eprintln!("Error running trials: {}", e);
            std::process::exit(1);
        }
        _ => {}
    }
}
