//! Engine configuration.

use std::sync::OnceLock;

use super::error::ConfigError;
use super::kernel::KernelBackend;
use super::seed::Density;

pub const ENV_THREADS: &str = "TORUSLIFE_THREADS";
pub const ENV_MAX_THREADS: &str = "TORUSLIFE_MAX_THREADS";
pub const ENV_KERNEL: &str = "TORUSLIFE_KERNEL";
pub const ENV_SEED: &str = "TORUSLIFE_SEED";
pub const ENV_DENSITY: &str = "TORUSLIFE_DENSITY";

/// Configuration for a TorusLife engine instance.
///
/// Use `TorusLifeConfig::default()` for auto-detected defaults, or set
/// individual knobs via the builder methods or [`TorusLifeConfig::from_env`].
#[derive(Clone, Debug, Default)]
pub struct TorusLifeConfig {
    /// Number of threads for the compute pool.
    /// `None` means one per physical core.
    pub thread_count: Option<usize>,
    /// Hard upper bound on threads regardless of auto-detection.
    pub max_threads: Option<usize>,
    /// `None` means [`KernelBackend::default`].
    pub kernel: Option<KernelBackend>,
    /// Seed for `randomize`. `None` draws a fresh one each call.
    pub seed: Option<u64>,
    pub density: Density,
}

impl TorusLifeConfig {
    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    pub fn max_threads(mut self, n: usize) -> Self {
        self.max_threads = Some(n.max(1));
        self
    }

    pub fn kernel(mut self, backend: KernelBackend) -> Self {
        self.kernel = Some(backend);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    /// Read `TORUSLIFE_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable lookup. Unset or empty
    /// variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let get = |var: &'static str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = get(ENV_THREADS) {
            config = config.thread_count(parse_count(ENV_THREADS, &v)?);
        }
        if let Some(v) = get(ENV_MAX_THREADS) {
            config = config.max_threads(parse_count(ENV_MAX_THREADS, &v)?);
        }
        if let Some(v) = get(ENV_KERNEL) {
            let backend = KernelBackend::parse(v.trim())
                .ok_or_else(|| ConfigError::UnknownKernel(v.clone()))?;
            config = config.kernel(backend);
        }
        if let Some(v) = get(ENV_SEED) {
            let seed = parse_seed(&v).ok_or_else(|| ConfigError::InvalidVar {
                var: ENV_SEED,
                value: v.clone(),
            })?;
            config = config.seed(seed);
        }
        if let Some(v) = get(ENV_DENSITY) {
            let value: f64 = v.trim().parse().map_err(|_| ConfigError::InvalidVar {
                var: ENV_DENSITY,
                value: v.clone(),
            })?;
            config = config.density(Density::new(value)?);
        }
        Ok(config)
    }

    pub(crate) fn resolve_thread_count(&self) -> usize {
        let mut threads = self.thread_count.unwrap_or_else(physical_core_count);
        if let Some(cap) = self.max_threads {
            threads = threads.min(cap);
        }
        threads.max(1)
    }

    pub(crate) fn resolve_kernel(&self) -> KernelBackend {
        self.kernel.unwrap_or_default()
    }
}

static PHYSICAL_CORES: OnceLock<usize> = OnceLock::new();

#[inline]
fn physical_core_count() -> usize {
    *PHYSICAL_CORES.get_or_init(|| num_cpus::get_physical().max(1))
}

fn parse_count(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidVar {
            var,
            value: value.to_string(),
        }),
    }
}

/// Decimal or `0x`-prefixed hex.
pub fn parse_seed(value: &str) -> Option<u64> {
    let value = value.trim();
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16).ok(),
        None => value.parse().ok(),
    }
}
