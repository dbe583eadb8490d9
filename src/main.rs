use spin_pool::{ArgumentParser, Config, IdleStrategy, ThreadPool};
use std::{process::ExitCode, time::Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: spin_pool [-t|--threads N] [-n|--tasks N] [-p|--park] [-h|--help]";

fn parse_count(parser: &ArgumentParser, prefix: &str, default: usize) -> Result<usize, String> {
    if !parser.is_present(prefix) {
        return Ok(default);
    }
    let values = parser.values_for(prefix).map_err(|e| e.to_string())?;
    // the last occurrence wins
    let raw = values.last().map(String::as_str).unwrap_or_default();
    raw.parse()
        .map_err(|_| format!("`{raw}` is not a valid count for {prefix}"))
}

fn run() -> Result<(), String> {
    let mut parser = ArgumentParser::new();
    parser
        .register(&["-t", "--threads"], 1)
        .and_then(|p| p.register(&["-n", "--tasks"], 1))
        .and_then(|p| p.register(&["-p", "--park"], 0))
        .and_then(|p| p.register(&["-h", "--help"], 0))
        .map_err(|e| e.to_string())?;
    parser
        .parse(std::env::args().skip(1))
        .map_err(|e| format!("{e}\n{USAGE}"))?;

    if parser.is_present("-h") {
        println!("{USAGE}");
        return Ok(());
    }

    let tasks = parse_count(&parser, "-n", 100_000)?;
    let config = Config {
        num_threads: if parser.is_present("-t") {
            Some(parse_count(&parser, "-t", 0)?)
        } else {
            None
        },
        idle: if parser.is_present("-p") { IdleStrategy::Park } else { IdleStrategy::Yield },
        ..Default::default()
    };

    let now = Instant::now();
    let pool = ThreadPool::with_config(config).map_err(|e| e.to_string())?;
    let handles: Vec<_> = (0..tasks)
        .map(|i| pool.submit_with(|i: u64| i.wrapping_mul(i), i as u64))
        .collect();

    let mut sum = 0u64;
    for handle in handles {
        sum = sum.wrapping_add(handle.await_result().map_err(|e| e.to_string())?);
    }

    let metrics = pool.metrics();
    let discarded = pool.shutdown();
    info!(
        workers = metrics.workers,
        completed = metrics.completed_tasks,
        discarded,
        checksum = sum,
        elapsed = ?now.elapsed(),
        "workload finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
