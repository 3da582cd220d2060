#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod common;

use common::BenchArgs;
use std::time::Instant;
use torus_life::toruslife::{Density, TorusLife, TorusLifeConfig};

fn main() {
    let cfg = BenchArgs::with_defaults(4096, 50, 0x5EED_1234_ABCD_EF01).from_env_or_exit();

    let density = Density::new(cfg.density).expect("--density must be in 0.0..=1.0");
    let mut config = TorusLifeConfig::default().seed(cfg.seed).density(density);
    if let Some(t) = cfg.threads {
        config = config.thread_count(t);
    }
    let mut engine = TorusLife::with_config(cfg.size, config).expect("allocate torus");

    let seed_start = Instant::now();
    engine.randomize();
    let seed_ms = seed_start.elapsed().as_secs_f64() * 1000.0;

    if cfg.warmup > 0 {
        engine.step_n(cfg.warmup);
    }

    let start = Instant::now();
    engine.step_n(cfg.iters);
    let elapsed = start.elapsed();
    let total_ms = elapsed.as_secs_f64() * 1000.0;
    let avg_ms = total_ms / cfg.iters.max(1) as f64;
    let population = engine.population();
    let threads = engine.thread_count();

    if cfg.json {
        println!(
            "{{\"size\":{},\"density\":{},\"warmup\":{},\"iters\":{},\"seed\":{},\"threads\":{},\"seed_ms\":{:.6},\"total_ms\":{:.6},\"avg_ms\":{:.6},\"population\":{}}}",
            cfg.size, cfg.density, cfg.warmup, cfg.iters, cfg.seed, threads, seed_ms, total_ms, avg_ms, population,
        );
    } else {
        println!(
            "size={},density={},warmup={},iters={},seed={},threads={},seed_ms={:.6},total_ms={:.6},avg_ms={:.6},population={}",
            cfg.size, cfg.density, cfg.warmup, cfg.iters, cfg.seed, threads, seed_ms, total_ms, avg_ms, population,
        );
    }
}
