use crate::config::{ChainConfig, InitMode, Observable, ScanConfig};
use crate::geometry::Lattice;
use crate::mcmc::{
    metropolis_chain, ChainSeries, FrameCapture, FrameRecorder, SeriesRecorder,
};
use crate::spins::{total_energy, SpinGrid};
use crate::statistics::{magnetization, susceptibility, ScanTable};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rayon::prelude::*;
use validator::Validate;

/// Output of one full chain: observable time series plus the final grid.
pub struct ChainRun {
    pub series: ChainSeries,
    pub final_grid: SpinGrid,
}

fn initial_grid(config: &ChainConfig, rng: &mut Xoshiro256StarStar) -> SpinGrid {
    match config.init {
        InitMode::Ordered => SpinGrid::ordered(config.side),
        InitMode::Random => SpinGrid::random(config.side, rng),
    }
}

/// Run one Metropolis chain, recording total spin and energy per sweep.
///
/// Builds a fresh lattice and grid, computes the full-energy baseline
/// once, then advances the chain with incremental updates only.
pub fn run_chain(config: &ChainConfig) -> Result<ChainRun, String> {
    config.validate().map_err(|e| format!("{e}"))?;

    let lattice = Lattice::square(config.side)?;
    let mut rng = Xoshiro256StarStar::seed_from_u64(config.seed);
    let grid = initial_grid(config, &mut rng);
    let energy = total_energy(&lattice, &grid, config.coupling);

    let mut recorder = SeriesRecorder::new(config.n_sweeps);
    let final_grid = metropolis_chain(
        &lattice,
        &grid,
        config.n_sweeps,
        config.beta,
        config.coupling,
        energy,
        &mut rng,
        &mut recorder,
    )?;

    Ok(ChainRun {
        series: recorder.finish(),
        final_grid,
    })
}

/// Run one chain with the full-grid tap: a snapshot per sweep, labeled
/// with its sweep index, for downstream frame rendering.
pub fn capture_frames(config: &ChainConfig) -> Result<FrameCapture, String> {
    config.validate().map_err(|e| format!("{e}"))?;

    let lattice = Lattice::square(config.side)?;
    let mut rng = Xoshiro256StarStar::seed_from_u64(config.seed);
    let grid = initial_grid(config, &mut rng);
    let energy = total_energy(&lattice, &grid, config.coupling);

    let mut recorder = FrameRecorder::new(config.side, config.n_sweeps);
    metropolis_chain(
        &lattice,
        &grid,
        config.n_sweeps,
        config.beta,
        config.coupling,
        energy,
        &mut rng,
        &mut recorder,
    )?;

    Ok(recorder.finish())
}

fn evaluate(
    observable: Observable,
    series: &ChainSeries,
    side: usize,
    beta: f64,
    tail_len: usize,
) -> Result<f64, String> {
    match observable {
        Observable::Magnetization => magnetization(&series.spins, side, tail_len),
        Observable::Susceptibility => {
            susceptibility(&series.spins, &series.spins_sq, side, beta, tail_len)
        }
    }
}

/// One chain's full pass over the (size, beta) cross product.
///
/// The grid and energy baseline are rebuilt per lattice size; every beta
/// starts the kernel from that same initial state (the kernel copies).
fn scan_worker(config: &ScanConfig, chain_idx: usize) -> Result<ScanTable, String> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(config.base_seed + chain_idx as u64);
    let mut values = Vec::with_capacity(config.sizes.len());

    for (i, &side) in config.sizes.iter().enumerate() {
        let n_sweeps = config.sweeps_per_size[i];
        let tail_len = config.tail_per_size[i];

        let lattice = Lattice::square(side)?;
        let grid = match config.init {
            InitMode::Ordered => SpinGrid::ordered(side),
            InitMode::Random => SpinGrid::random(side, &mut rng),
        };
        let energy = total_energy(&lattice, &grid, config.coupling);

        let mut row = Vec::with_capacity(config.betas.len());
        for &beta in &config.betas {
            let mut recorder = SeriesRecorder::new(n_sweeps);
            metropolis_chain(
                &lattice,
                &grid,
                n_sweeps,
                beta,
                config.coupling,
                energy,
                &mut rng,
                &mut recorder,
            )?;
            let series = recorder.finish();
            row.push(evaluate(config.observable, &series, side, beta, tail_len)?);
        }
        values.push(row);
    }

    Ok(ScanTable {
        sizes: config.sizes.clone(),
        betas: config.betas.clone(),
        values,
    })
}

/// Run `n_chains` independent chains over the (size, beta) grid in
/// parallel and average their observables.
///
/// Chains share nothing: each gets its own PRNG stream seeded
/// `base_seed + chain_index`, so a fixed `base_seed` makes the whole scan
/// deterministic regardless of thread scheduling. `on_chain` is invoked
/// once per completed chain (useful for progress bars). Any chain failure
/// aborts the scan with that chain's error.
pub fn run_scan(config: &ScanConfig, on_chain: &(dyn Fn() + Sync)) -> Result<ScanTable, String> {
    config.validate().map_err(|e| format!("{e}"))?;

    if config.n_chains == 1 {
        let table = scan_worker(config, 0)?;
        on_chain();
        return Ok(table);
    }

    let tables: Vec<Result<ScanTable, String>> = (0..config.n_chains)
        .into_par_iter()
        .map(|chain_idx| {
            let table = scan_worker(config, chain_idx);
            on_chain();
            table
        })
        .collect();

    let tables: Vec<ScanTable> = tables.into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(ScanTable::aggregate(&tables))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_config() -> ChainConfig {
        ChainConfig {
            side: 6,
            n_sweeps: 30,
            beta: 0.8,
            coupling: 1.0,
            init: InitMode::Ordered,
            seed: 9,
        }
    }

    #[test]
    fn test_run_chain_series_lengths() {
        let run = run_chain(&chain_config()).unwrap();
        assert_eq!(run.series.spins.len(), 30);
        assert_eq!(run.series.energies.len(), 30);
        assert_eq!(run.series.spins_sq.len(), 30);
        assert_eq!(run.final_grid.side(), 6);
    }

    #[test]
    fn test_run_chain_random_init_deterministic() {
        let mut cfg = chain_config();
        cfg.init = InitMode::Random;
        let a = run_chain(&cfg).unwrap();
        let b = run_chain(&cfg).unwrap();
        assert_eq!(a.series.spins, b.series.spins);
        assert_eq!(a.final_grid.cells(), b.final_grid.cells());
    }

    #[test]
    fn test_capture_frames_one_per_sweep() {
        let mut cfg = chain_config();
        cfg.n_sweeps = 12;
        let capture = capture_frames(&cfg).unwrap();
        assert_eq!(capture.len(), 12);
        let labels: Vec<usize> = capture.iter().map(|(s, _)| s).collect();
        assert_eq!(labels, (0..12).collect::<Vec<_>>());
        assert!(capture
            .iter()
            .all(|(_, cells)| cells.iter().all(|&s| s == 1 || s == -1)));
    }

    #[test]
    fn test_frames_match_series_tap() {
        // Same seed, same parameters: the frame tap's total spins must
        // reproduce the scalar tap's series.
        let cfg = chain_config();
        let run = run_chain(&cfg).unwrap();
        let capture = capture_frames(&cfg).unwrap();
        let frame_spins: Vec<f64> = capture
            .iter()
            .map(|(_, cells)| cells.iter().map(|&s| s as i64).sum::<i64>() as f64)
            .collect();
        assert_eq!(frame_spins, run.series.spins);
    }

    fn scan_config() -> ScanConfig {
        ScanConfig {
            sizes: vec![4, 6],
            betas: vec![0.1, 2.0],
            sweeps_per_size: vec![60, 60],
            tail_per_size: vec![20, 20],
            n_chains: 3,
            init: InitMode::Ordered,
            coupling: 1.0,
            observable: Observable::Magnetization,
            base_seed: 1234,
        }
    }

    #[test]
    fn test_run_scan_table_shape_and_order() {
        let table = run_scan(&scan_config(), &|| {}).unwrap();
        assert_eq!(table.sizes, vec![4, 6]);
        assert_eq!(table.betas, vec![0.1, 2.0]);
        assert_eq!(table.values.len(), 2);
        assert!(table.values.iter().all(|row| row.len() == 2));
    }

    #[test]
    fn test_run_scan_deep_in_ordered_phase() {
        // beta = 2.0 is far above the critical point; from the ordered
        // start the magnetization stays close to 1.
        let table = run_scan(&scan_config(), &|| {}).unwrap();
        assert!(table.get(0, 1) > 0.8);
        assert!(table.get(1, 1) > 0.8);
        // And every entry is a valid per-spin magnetization.
        for row in &table.values {
            for &m in row {
                assert!((-1.0..=1.0).contains(&m));
            }
        }
    }

    #[test]
    fn test_run_scan_deterministic_across_calls() {
        let a = run_scan(&scan_config(), &|| {}).unwrap();
        let b = run_scan(&scan_config(), &|| {}).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_scan_susceptibility_nonnegative() {
        let mut cfg = scan_config();
        cfg.observable = Observable::Susceptibility;
        let table = run_scan(&cfg, &|| {}).unwrap();
        for row in &table.values {
            for &chi in row {
                assert!(chi >= 0.0);
            }
        }
    }

    #[test]
    fn test_run_scan_reports_progress() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let done = AtomicUsize::new(0);
        let cfg = scan_config();
        run_scan(&cfg, &|| {
            done.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
        assert_eq!(done.load(Ordering::Relaxed), cfg.n_chains);
    }

    #[test]
    fn test_run_scan_invalid_config_fails_fast() {
        let mut cfg = scan_config();
        cfg.tail_per_size = vec![100, 20];
        assert!(run_scan(&cfg, &|| {}).is_err());
    }
}
