mod common;

use common::BenchArgs;
use std::time::Instant;
use torus_life::toruslife::{Density, KernelBackend, TorusLife, TorusLifeConfig};

#[derive(Clone, Copy, Debug)]
struct RunResult {
    total_ms: f64,
    avg_ms: f64,
    population: u64,
}

fn run_backend(cfg: &BenchArgs, backend: KernelBackend) -> RunResult {
    let density = Density::new(cfg.density).expect("--density must be in 0.0..=1.0");
    let mut config = TorusLifeConfig::default()
        .kernel(backend)
        .seed(cfg.seed)
        .density(density);
    if let Some(t) = cfg.threads {
        config = config.thread_count(t);
    }
    let mut engine = TorusLife::with_config(cfg.size, config).expect("allocate torus");
    engine.randomize();

    if cfg.warmup > 0 {
        engine.step_n(cfg.warmup);
    }

    let start = Instant::now();
    engine.step_n(cfg.iters);
    let elapsed = start.elapsed();
    let total_ms = elapsed.as_secs_f64() * 1000.0;
    let avg_ms = total_ms / cfg.iters.max(1) as f64;
    let population = engine.population();

    RunResult {
        total_ms,
        avg_ms,
        population,
    }
}

fn main() {
    let cfg = BenchArgs::with_defaults(2048, 30, 0xA5A5_5EED_7788_1122).from_env_or_exit();
    let modulo = run_backend(&cfg, KernelBackend::Modulo);
    let wrapped = run_backend(&cfg, KernelBackend::Wrapped);
    let speedup = modulo.avg_ms / wrapped.avg_ms;

    if cfg.json {
        println!(
            "{{\"size\":{},\"density\":{},\"warmup\":{},\"iters\":{},\"seed\":{},\"threads\":{},\"modulo\":{{\"total_ms\":{:.6},\"avg_ms\":{:.6},\"population\":{}}},\"wrapped\":{{\"total_ms\":{:.6},\"avg_ms\":{:.6},\"population\":{}}},\"speedup\":{:.6}}}",
            cfg.size,
            cfg.density,
            cfg.warmup,
            cfg.iters,
            cfg.seed,
            cfg.threads.unwrap_or(0),
            modulo.total_ms,
            modulo.avg_ms,
            modulo.population,
            wrapped.total_ms,
            wrapped.avg_ms,
            wrapped.population,
            speedup,
        );
    } else {
        println!(
            "modulo: total_ms={:.6}, avg_ms={:.6}, population={}",
            modulo.total_ms, modulo.avg_ms, modulo.population
        );
        println!(
            "wrapped: total_ms={:.6}, avg_ms={:.6}, population={}, speedup={:.3}x",
            wrapped.total_ms, wrapped.avg_ms, wrapped.population, speedup,
        );
        if modulo.population != wrapped.population {
            println!("WARNING: backends disagree on population");
        }
    }
}
