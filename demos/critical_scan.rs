use indicatif::{ProgressBar, ProgressStyle};
use ising2d::{run_scan, InitMode, Observable, ScanConfig};

const SIZES: [usize; 2] = [16, 32];
const N_BETAS: usize = 12;
const N_CHAINS: usize = 8;

fn main() {
    // Inverse temperatures straddling the critical point (~0.44).
    let betas: Vec<f64> = (0..N_BETAS)
        .map(|i| 0.1 + 0.7 * i as f64 / (N_BETAS - 1) as f64)
        .collect();

    let config = ScanConfig {
        sizes: SIZES.to_vec(),
        betas: betas.clone(),
        sweeps_per_size: vec![400, 800],
        tail_per_size: vec![100, 200],
        n_chains: N_CHAINS,
        init: InitMode::Ordered,
        coupling: 1.0,
        observable: Observable::Magnetization,
        base_seed: 42,
    };

    println!(
        "Sizes: {:?}  |  Betas: {}  |  Chains: {}",
        SIZES, N_BETAS, N_CHAINS
    );

    let bar = ProgressBar::new(N_CHAINS as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} chains ({elapsed})").unwrap(),
    );

    let mags = run_scan(&config, &|| bar.inc(1)).unwrap();
    bar.finish();

    let chi_config = ScanConfig {
        observable: Observable::Susceptibility,
        ..config
    };
    let chis = run_scan(&chi_config, &|| {}).unwrap();

    println!("{:>8} {:>10} {:>12} {:>14}", "N", "beta", "<m>", "chi");
    for (i, &n) in mags.sizes.iter().enumerate() {
        for (k, &beta) in mags.betas.iter().enumerate() {
            println!(
                "{:>8} {:>10.4} {:>12.6} {:>14.6}",
                n,
                beta,
                mags.get(i, k),
                chis.get(i, k)
            );
        }
    }
}
