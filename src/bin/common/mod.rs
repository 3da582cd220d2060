//! Flag parsing shared by the benchmark binaries.

use std::str::FromStr;

use torus_life::toruslife::parse_seed;

#[derive(Clone, Debug)]
pub struct BenchArgs {
    pub size: usize,
    pub density: f64,
    pub warmup: u64,
    pub iters: u64,
    pub seed: u64,
    pub threads: Option<usize>,
    pub json: bool,
}

impl BenchArgs {
    pub fn with_defaults(size: usize, iters: u64, seed: u64) -> Self {
        Self {
            size,
            density: 0.5,
            warmup: 3,
            iters,
            seed,
            threads: None,
            json: false,
        }
    }

    /// Apply `--flag value` pairs (and the bare `--json`) over `self`.
    pub fn parse(mut self, args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            if flag == "--json" {
                self.json = true;
                continue;
            }
            let value = args
                .next()
                .ok_or_else(|| format!("{flag} requires a value"))?;
            match flag.as_str() {
                "--size" => self.size = number(&flag, &value)?,
                "--density" => self.density = number(&flag, &value)?,
                "--warmup" => self.warmup = number(&flag, &value)?,
                "--iters" => self.iters = number(&flag, &value)?,
                "--threads" => self.threads = Some(number(&flag, &value)?),
                "--seed" => {
                    self.seed = parse_seed(&value)
                        .ok_or_else(|| format!("{flag} expects u64 or 0x hex, got {value:?}"))?
                }
                _ => return Err(format!("unknown arg: {flag}")),
            }
        }
        Ok(self)
    }

    /// Parse the process arguments, exiting with a message on bad input.
    pub fn from_env_or_exit(self) -> Self {
        match self.parse(std::env::args().skip(1)) {
            Ok(args) => args,
            Err(message) => {
                eprintln!("{message}");
                std::process::exit(2);
            }
        }
    }
}

fn number<T: FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{flag}: cannot parse {value:?}"))
}
