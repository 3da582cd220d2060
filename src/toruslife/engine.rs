//! TorusLife engine: owns the generation pair and the worker pool.

use rayon::prelude::*;
use tracing::{debug, info, trace};

use super::buffers::GenerationPair;
use super::config::TorusLifeConfig;
use super::error::LifeError;
use super::grid::Grid;
use super::kernel::{self, KernelBackend, RowStats};
use super::seed::{self, Density};

pub struct TorusLife {
    buffers: GenerationPair,
    generation: u64,
    population_cache: Option<u64>,
    last_step_changed: bool,
    pool: rayon::ThreadPool,
    backend: KernelBackend,
    seed: Option<u64>,
    density: Density,
}

impl TorusLife {
    pub fn new(side: usize) -> Result<Self, LifeError> {
        Self::with_config(side, TorusLifeConfig::default())
    }

    /// Create an all-dead `side` x `side` torus with explicit configuration.
    pub fn with_config(side: usize, config: TorusLifeConfig) -> Result<Self, LifeError> {
        let buffers = GenerationPair::new(side)?;
        Self::build(buffers, config, Some(0))
    }

    /// Adopt `grid` as generation 0.
    pub fn from_grid(grid: Grid, config: TorusLifeConfig) -> Result<Self, LifeError> {
        let buffers = GenerationPair::from_grid(grid)?;
        Self::build(buffers, config, None)
    }

    fn build(
        buffers: GenerationPair,
        config: TorusLifeConfig,
        population: Option<u64>,
    ) -> Result<Self, LifeError> {
        let threads = config.resolve_thread_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("toruslife-{i}"))
            .build()?;
        let backend = config.resolve_kernel();
        debug!(
            side = buffers.side(),
            threads,
            kernel = backend.name(),
            "allocated generation buffers"
        );

        Ok(Self {
            buffers,
            generation: 0,
            population_cache: population,
            last_step_changed: false,
            pool,
            backend,
            seed: config.seed,
            density: config.density,
        })
    }

    /// Fill the current generation with random cells and return the seed used.
    pub fn randomize(&mut self) -> u64 {
        let seed = self.seed.unwrap_or_else(seed::entropy_seed);
        let density = self.density;
        let grid = self.buffers.current_mut();
        self.pool.install(|| seed::randomize(grid, seed, density));
        self.population_cache = None;
        info!(seed, density = density.value(), "seeded initial state");
        seed
    }

    pub fn step(&mut self) {
        self.step_n(1);
    }

    pub fn step_n(&mut self, n: u64) {
        let backend = self.backend;
        for _ in 0..n {
            let (current, scratch) = self.buffers.split();
            let side = current.side();
            // Each worker owns whole output rows; the reduce joins every row
            // before the phase flips.
            let stats = self.pool.install(|| {
                scratch
                    .cells_mut()
                    .par_chunks_mut(side)
                    .enumerate()
                    .map(|(row, out)| kernel::advance_row(backend, current, row, out))
                    .reduce(RowStats::default, RowStats::merge)
            });
            self.buffers.flip();
            self.generation += 1;
            self.population_cache = Some(stats.live);
            self.last_step_changed = stats.changed;
            trace!(
                generation = self.generation,
                population = stats.live,
                changed = stats.changed,
                "step"
            );
        }
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.buffers.side()
    }

    /// Which of the two buffers holds the current generation.
    #[inline]
    pub fn phase(&self) -> usize {
        self.buffers.phase()
    }

    #[inline]
    pub fn backend(&self) -> KernelBackend {
        self.backend
    }

    #[inline]
    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Whether the most recent step altered any cell. `false` before the
    /// first step.
    #[inline]
    pub fn last_step_changed(&self) -> bool {
        self.last_step_changed
    }

    pub fn population(&mut self) -> u64 {
        if let Some(cached) = self.population_cache {
            return cached;
        }
        let grid = self.buffers.current();
        let pop = self.pool.install(|| {
            grid.cells()
                .par_chunks(grid.side())
                .map(|row| row.iter().map(|&c| c as u64).sum::<u64>())
                .sum::<u64>()
        });
        self.population_cache = Some(pop);
        pop
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        self.buffers.current()
    }

    pub fn into_grid(self) -> Grid {
        self.buffers.into_current()
    }

    pub fn get_cell(&self, row: usize, col: usize) -> bool {
        self.buffers.current().get(row, col)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<(), LifeError> {
        let grid = self.buffers.current_mut();
        let was_alive = grid.get(row, col);
        grid.set(row, col, alive)?;
        if was_alive != alive {
            if let Some(pop) = self.population_cache.as_mut() {
                if alive {
                    *pop += 1;
                } else {
                    *pop -= 1;
                }
            }
        }
        Ok(())
    }

    pub fn for_each_live<F: FnMut(usize, usize)>(&self, f: F) {
        self.buffers.current().for_each_live(f);
    }
}

impl std::fmt::Debug for TorusLife {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TorusLife")
            .field("side", &self.side())
            .field("generation", &self.generation)
            .field("phase", &self.phase())
            .field("backend", &self.backend)
            .field("threads", &self.thread_count())
            .finish()
    }
}
