use crate::geometry::lattice::N_NEIGHBORS;
use crate::geometry::Lattice;
use crate::spins::SpinGrid;

/// Full-grid interaction energy `sum_i sum_nb -J * s_i * s_nb`.
///
/// Every site contributes a term for each of its four periodic neighbors,
/// so each unordered pair is counted twice and the total is NOT halved.
/// The Metropolis kernel advances its running energy by twice its
/// one-sided flip difference to stay on this convention, which keeps the
/// running energy and a from-scratch recompute in exact agreement. Treat
/// the value as internal bookkeeping, not a physical energy.
pub fn total_energy(lattice: &Lattice, grid: &SpinGrid, coupling: f64) -> f64 {
    let cells = grid.cells();
    let mut total = 0.0f64;

    for site in 0..lattice.n_spins {
        let mut field = 0i32;
        for d in 0..N_NEIGHBORS {
            field += cells[lattice.neighbor(site, d)] as i32;
        }
        total += -coupling * cells[site] as f64 * field as f64;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_grid_energy() {
        // All aligned: each of the N^2 sites contributes -J from each of
        // its 4 neighbors under the doubled convention.
        let lat = Lattice::square(3).unwrap();
        let grid = SpinGrid::ordered(3);
        assert_eq!(total_energy(&lat, &grid, 1.0), -36.0);
    }

    #[test]
    fn test_checkerboard_energy() {
        let lat = Lattice::square(2).unwrap();
        let mut grid = SpinGrid::ordered(2);
        // (0,1) and (1,0) down
        grid.cells_mut()[1] = -1;
        grid.cells_mut()[2] = -1;
        // Every neighbor pair is anti-aligned: +J per term, 16 terms.
        assert_eq!(total_energy(&lat, &grid, 1.0), 16.0);
    }

    #[test]
    fn test_coupling_sign_flips_energy() {
        let lat = Lattice::square(4).unwrap();
        let grid = SpinGrid::ordered(4);
        let ferro = total_energy(&lat, &grid, 1.0);
        let antiferro = total_energy(&lat, &grid, -1.0);
        assert_eq!(ferro, -antiferro);
    }
}
