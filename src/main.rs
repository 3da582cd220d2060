#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::io::Write;
use std::process::ExitCode;
use std::time::Instant;
use torus_life::toruslife::{TorusLife, TorusLifeConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Side of the simulated torus.
const GRID_SIDE: usize = 10_000;

struct MainArgs {
    steps: u64,
}

/// Parse `argv` (program name first). `Err` carries the usage line.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<MainArgs, String> {
    let args: Vec<String> = args.into_iter().collect();
    let program = args.first().map(String::as_str).unwrap_or("torus-life");
    let usage = format!("Usage: {program} steps");
    if args.len() != 2 {
        return Err(usage);
    }
    let steps = args[1].trim().parse::<u64>().map_err(|_| usage)?;
    Ok(MainArgs { steps })
}

fn format_info(side: usize, steps: u64) -> String {
    format!("Life Information: Grid Size: {side} * {side}, Steps: {steps}")
}

fn format_elapsed(seconds: f64) -> String {
    format!("> timeTaken = {seconds:7.3}")
}

/// Fatal errors go to `out` unconditionally; the log filter may drop the
/// `error!` event.
fn report_fatal<W: Write>(out: &mut W, message: &str) -> ExitCode {
    error!("{message}");
    let _ = writeln!(out, "{message}");
    ExitCode::FAILURE
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let start = Instant::now();
    init_logging();

    let args = match parse_args(std::env::args()) {
        Ok(args) => args,
        Err(usage) => {
            println!("{usage}");
            return ExitCode::FAILURE;
        }
    };

    let config = match TorusLifeConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            let message = format!("invalid configuration: {err}");
            return report_fatal(&mut std::io::stderr(), &message);
        }
    };

    let mut life = match TorusLife::with_config(GRID_SIDE, config) {
        Ok(life) => life,
        Err(err) => return report_fatal(&mut std::io::stderr(), &err.to_string()),
    };

    println!("{}", format_info(GRID_SIDE, args.steps));

    life.randomize();
    life.step_n(args.steps);
    let population = life.population();
    info!(
        generation = life.generation(),
        population,
        threads = life.thread_count(),
        kernel = life.backend().name(),
        "run complete"
    );
    drop(life);

    let time_taken = start.elapsed().as_secs_f64();
    println!("{}", format_elapsed(time_taken));
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use torus_life::toruslife::{ConfigError, ENV_KERNEL};

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn wrong_argument_count_is_a_usage_error() {
        assert_eq!(parse_args(argv(&[])).err().as_deref(), Some("Usage: torus-life steps"));
        assert_eq!(parse_args(argv(&["p"])).err().as_deref(), Some("Usage: p steps"));
        assert_eq!(parse_args(argv(&["p", "1", "2"])).err().as_deref(), Some("Usage: p steps"));
    }

    #[test]
    fn bad_step_counts_are_usage_errors() {
        for bad in ["-1", "abc", "", "1.5"] {
            assert_eq!(
                parse_args(argv(&["p", bad])).err().as_deref(),
                Some("Usage: p steps"),
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn step_count_is_parsed() {
        assert_eq!(parse_args(argv(&["p", " 3"])).map(|a| a.steps), Ok(3));
        assert_eq!(parse_args(argv(&["p", "0"])).map(|a| a.steps), Ok(0));
    }

    #[test]
    fn output_lines_match_reference_format() {
        assert_eq!(
            format_info(10_000, 7),
            "Life Information: Grid Size: 10000 * 10000, Steps: 7"
        );
        assert_eq!(format_elapsed(1.5), "> timeTaken =   1.500");
        assert_eq!(format_elapsed(1234.56789), "> timeTaken = 1234.568");
    }

    #[test]
    fn fatal_errors_are_written_without_a_subscriber() {
        let err =
            TorusLifeConfig::from_lookup(|var| (var == ENV_KERNEL).then(|| "bogus".to_string()))
                .unwrap_err();
        assert_eq!(err, ConfigError::UnknownKernel("bogus".to_string()));

        let mut out = Vec::new();
        let _ = report_fatal(&mut out, &format!("invalid configuration: {err}"));
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "invalid configuration: unknown kernel backend: bogus (expected modulo or wrapped)\n"
        );
    }
}
