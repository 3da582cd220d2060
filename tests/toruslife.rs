use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;
use torus_life::toruslife::{Grid, KernelBackend, TorusLife, TorusLifeConfig, neighbor_sum};

fn engine(side: usize, cells: &[(usize, usize)]) -> TorusLife {
    let grid = Grid::from_live(side, cells).expect("valid pattern");
    TorusLife::from_grid(grid, TorusLifeConfig::default()).expect("engine")
}

fn collect_live(engine: &TorusLife) -> HashSet<(usize, usize)> {
    let mut out = HashSet::new();
    engine.for_each_live(|r, c| {
        out.insert((r, c));
    });
    out
}

fn assert_alive(engine: &TorusLife, cells: &[(usize, usize)]) {
    for &(r, c) in cells {
        assert!(engine.get_cell(r, c), "expected alive at ({r},{c})");
    }
}

fn assert_dead(engine: &TorusLife, cells: &[(usize, usize)]) {
    for &(r, c) in cells {
        assert!(!engine.get_cell(r, c), "expected dead at ({r},{c})");
    }
}

fn shifted(cells: &[(usize, usize)], dr: usize, dc: usize, side: usize) -> HashSet<(usize, usize)> {
    cells
        .iter()
        .map(|&(r, c)| ((r + dr) % side, (c + dc) % side))
        .collect()
}

fn random_grid(side: usize, density: f64, seed: u64) -> Grid {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut live = Vec::new();
    for r in 0..side {
        for c in 0..side {
            if rng.random::<f64>() < density {
                live.push((r, c));
            }
        }
    }
    Grid::from_live(side, &live).expect("valid grid")
}

#[test]
fn block_is_stable() {
    let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
    let mut life = engine(5, &block);

    for _ in 0..10 {
        life.step();
        assert_eq!(collect_live(&life), block.iter().copied().collect());
    }
}

#[test]
fn block_straddling_the_seam_is_stable() {
    let side = 7;
    let block = [(0, 0), (0, side - 1), (side - 1, 0), (side - 1, side - 1)];
    let mut life = engine(side, &block);

    life.step_n(6);

    assert_alive(&life, &block);
    assert_eq!(life.population(), 4);
}

#[test]
fn blinker_oscillates() {
    let mut life = engine(6, &[(2, 1), (2, 2), (2, 3)]);

    life.step();
    assert_alive(&life, &[(1, 2), (2, 2), (3, 2)]);
    assert_dead(&life, &[(2, 1), (2, 3)]);

    life.step();
    assert_alive(&life, &[(2, 1), (2, 2), (2, 3)]);
    assert_dead(&life, &[(1, 2), (3, 2)]);
}

#[test]
fn blinker_across_the_edge_oscillates() {
    let side = 6;
    let horizontal = [(0, side - 1), (0, 0), (0, 1)];
    let mut life = engine(side, &horizontal);

    life.step();
    assert_eq!(
        collect_live(&life),
        [(side - 1, 0), (0, 0), (1, 0)].into_iter().collect()
    );

    life.step();
    assert_eq!(collect_live(&life), horizontal.iter().copied().collect());
}

#[test]
fn glider_moves_down_right_every_four_steps() {
    let side = 10;
    let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
    let mut life = engine(side, &glider);

    life.step_n(4);
    assert_eq!(collect_live(&life), shifted(&glider, 1, 1, side));
}

#[test]
fn glider_wraps_back_to_start() {
    let side = 10;
    let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
    let mut life = engine(side, &glider);

    life.step_n(4 * side as u64);
    assert_eq!(collect_live(&life), glider.iter().copied().collect());
    assert_eq!(life.generation(), 40);
}

#[test]
fn zero_iterations_is_identity() {
    let grid = random_grid(24, 0.4, 0xA5A5);
    let mut life = TorusLife::from_grid(grid.clone(), TorusLifeConfig::default()).unwrap();
    life.step_n(0);
    assert_eq!(life.grid(), &grid);
    assert_eq!(life.into_grid(), grid);
}

#[test]
fn single_cell_dies() {
    let mut life = engine(5, &[(0, 0)]);
    life.step();
    assert_eq!(life.population(), 0);
    life.step_n(3);
    assert_eq!(life.population(), 0);
    assert!(!life.last_step_changed());
}

#[test]
fn full_torus_dies_in_one_step() {
    let grid = Grid::from_cells(6, vec![1; 36]).unwrap();
    let mut life = TorusLife::from_grid(grid, TorusLifeConfig::default()).unwrap();
    life.step();
    assert_eq!(life.population(), 0);
}

#[test]
fn cells_stay_binary_and_sums_stay_bounded() {
    let grid = random_grid(32, 0.45, 0x0B1A);
    let mut life = TorusLife::from_grid(grid, TorusLifeConfig::default()).unwrap();

    for _ in 0..12 {
        let current = life.grid();
        assert!(current.cells().iter().all(|&c| c == 0 || c == 1));
        for r in 0..current.side() {
            for c in 0..current.side() {
                assert!(neighbor_sum(current, r, c) <= 8);
            }
        }
        life.step();
    }
}

#[test]
fn one_step_is_deterministic() {
    let grid = random_grid(40, 0.35, 0xDE7E);
    let run = || {
        let mut life = TorusLife::from_grid(grid.clone(), TorusLifeConfig::default()).unwrap();
        life.step();
        life.into_grid()
    };
    assert_eq!(run(), run());
}

#[test]
fn deterministic_across_thread_counts_and_backends() {
    let grid = random_grid(57, 0.3, 0xD37E_A515);

    let run = |threads: usize, backend: KernelBackend| {
        let config = TorusLifeConfig::default()
            .thread_count(threads)
            .kernel(backend);
        let mut life = TorusLife::from_grid(grid.clone(), config).unwrap();
        life.step_n(15);
        let pop = life.population();
        (pop, life.into_grid())
    };

    let (pop1, grid1) = run(1, KernelBackend::Wrapped);
    let (pop4, grid4) = run(4, KernelBackend::Wrapped);
    let (popm, gridm) = run(3, KernelBackend::Modulo);

    assert_eq!(pop1, pop4);
    assert_eq!(grid1, grid4);
    assert_eq!(pop1, popm);
    assert_eq!(grid1, gridm);
}

#[test]
fn randomize_then_evolve_with_fixed_seed_replays() {
    let config = TorusLifeConfig::default().seed(0x5EED_1234_ABCD_EF01);
    let run = |threads: usize| {
        let mut life = TorusLife::with_config(128, config.clone().thread_count(threads)).unwrap();
        let seed = life.randomize();
        life.step_n(5);
        (seed, life.population(), life.into_grid())
    };
    let a = run(1);
    let b = run(6);
    assert_eq!(a.0, 0x5EED_1234_ABCD_EF01);
    assert_eq!(a, b);
}
