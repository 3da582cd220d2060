use std::time::Instant;
use torus_life::toruslife::{TorusLife, TorusLifeConfig};

fn bench_torus(side: usize, iterations: u64) -> (f64, u64) {
    let config = TorusLifeConfig::default().seed(0x5EED_1234_ABCD_EF01);
    let mut life = TorusLife::with_config(side, config).expect("allocate torus");
    life.randomize();

    let start = Instant::now();
    life.step_n(iterations);
    let duration = start.elapsed();

    let total_ms = duration.as_secs_f64() * 1000.0;
    let pop = life.population();
    (total_ms, pop)
}

fn main() {
    let scales: &[(usize, u64)] = &[
        (512, 200),
        (1024, 200),
        (2048, 100),
        (4096, 50),
        (8192, 20),
        (10_000, 10), // the CLI's torus
    ];

    println!(
        "{:<12} {:>12} {:>8} {:>12} {:>10} {:>12}",
        "Grid", "Cells", "Iters", "Total(ms)", "Avg(ms)", "Mcells/s"
    );
    println!("{}", "-".repeat(72));

    for &(side, iters) in scales {
        let cells = (side * side) as u64;
        let (total_ms, _pop) = bench_torus(side, iters);
        let avg_ms = total_ms / iters as f64;
        let throughput = cells as f64 * iters as f64 / (total_ms * 1000.0);
        println!(
            "{:<12} {:>12} {:>8} {:>12.1} {:>10.4} {:>12.1}",
            format!("{}x{}", side, side),
            cells,
            iters,
            total_ms,
            avg_ms,
            throughput
        );
    }
}
