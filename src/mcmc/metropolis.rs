use crate::geometry::lattice::N_NEIGHBORS;
use crate::geometry::Lattice;
use crate::mcmc::Recorder;
use crate::spins::SpinGrid;
use rand::Rng;
use rand_xoshiro::Xoshiro256StarStar;

/// Sum of the four periodic neighbor spins of `site`.
#[inline]
fn neighbor_field(lattice: &Lattice, cells: &[i8], site: usize) -> f64 {
    let mut field = 0i32;
    for d in 0..N_NEIGHBORS {
        field += cells[lattice.neighbor(site, d)] as i32;
    }
    field as f64
}

/// Single-spin-flip Metropolis chain over a private copy of `grid`.
///
/// Performs `n_sweeps * N^2 - 1` attempted flips. Each attempt picks a
/// site uniformly (with replacement), computes the one-sided energy
/// difference `dE` of flipping it against its four neighbors, and
/// accepts unconditionally when `dE <= 0` or with probability
/// `exp(-beta * dE)` otherwise. Accepted flips advance the running
/// energy by `2 * dE`: the doubled pair-counting convention of
/// [`total_energy`](crate::spins::total_energy) sees the flipped site's
/// own terms plus their mirrors in each neighbor's field. The energy is
/// never recomputed from scratch mid-chain.
///
/// `recorder.record` fires once per sweep boundary (attempt index
/// divisible by N^2) with the sweep index, current grid, and running
/// energy. The caller's grid is left untouched; the mutated copy is
/// returned.
#[allow(clippy::too_many_arguments)]
pub fn metropolis_chain<R: Recorder>(
    lattice: &Lattice,
    grid: &SpinGrid,
    n_sweeps: usize,
    beta: f64,
    coupling: f64,
    initial_energy: f64,
    rng: &mut Xoshiro256StarStar,
    recorder: &mut R,
) -> Result<SpinGrid, String> {
    if n_sweeps == 0 {
        return Err("n_sweeps must be >= 1".to_string());
    }
    if grid.side() != lattice.side {
        return Err(format!(
            "grid side {} does not match lattice side {}",
            grid.side(),
            lattice.side
        ));
    }

    let side = lattice.side;
    let n_spins = lattice.n_spins;
    let times = n_sweeps * n_spins;

    let mut grid = grid.clone();
    let mut energy = initial_energy;

    // Degenerate 1x1 torus: the spin couples only to itself, so a flip
    // costs nothing (dE = 0) and is always accepted while the energy
    // stays fixed. Every attempt is also a sweep boundary, and the last
    // boundary coincides with the excluded final attempt, so it is
    // recorded after the loop.
    if n_spins == 1 {
        for t in 0..times - 1 {
            let cells = grid.cells_mut();
            cells[0] = -cells[0];
            recorder.record(t, &grid, energy);
        }
        recorder.record(n_sweeps - 1, &grid, energy);
        return Ok(grid);
    }

    for t in 0..times - 1 {
        let x = rng.gen_range(0..side);
        let y = rng.gen_range(0..side);
        let site = lattice.site(x, y);

        let spin_t = grid.spin(site) as f64;
        let spin_prime = -spin_t;

        let field = neighbor_field(lattice, grid.cells(), site);
        let e_t = -coupling * spin_t * field;
        let e_prime = -coupling * spin_prime * field;
        let d_e = e_prime - e_t;

        let accept = if d_e > 0.0 {
            rng.gen::<f64>() <= (-beta * d_e).exp()
        } else {
            true
        };

        if accept {
            let cells = grid.cells_mut();
            cells[site] = -cells[site];
            // d_e covers the flipped site's own rows; the doubled
            // convention also counts the mirror term in each neighbor's
            // field, so the total changes by twice that.
            energy += 2.0 * d_e;
        }

        if t % n_spins == 0 {
            recorder.record(t / n_spins, &grid, energy);
        }
    }

    Ok(grid)
}
