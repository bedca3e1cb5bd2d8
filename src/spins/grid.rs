use rand::Rng;
use rand_xoshiro::Xoshiro256StarStar;

/// N x N grid of spins, stored flat in row-major order (+1/-1).
#[derive(Clone, PartialEq, Eq)]
pub struct SpinGrid {
    side: usize,
    cells: Vec<i8>,
}

impl SpinGrid {
    /// All-up grid (every spin +1).
    pub fn ordered(side: usize) -> Self {
        Self {
            side,
            cells: vec![1i8; side * side],
        }
    }

    /// Grid with each spin independently +1 or -1 with probability 1/2.
    pub fn random(side: usize, rng: &mut Xoshiro256StarStar) -> Self {
        let cells = (0..side * side)
            .map(|_| if rng.gen::<f64>() < 0.5 { -1 } else { 1 })
            .collect();
        Self { side, cells }
    }

    /// Edge length N.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Flat view of the cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [i8] {
        &mut self.cells
    }

    /// Spin at flat index `site`.
    #[inline]
    pub fn spin(&self, site: usize) -> i8 {
        self.cells[site]
    }

    /// Sum of all spins.
    pub fn total_spin(&self) -> f64 {
        let sum: i64 = self.cells.iter().map(|&s| s as i64).sum();
        sum as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_ordered_is_all_up() {
        let grid = SpinGrid::ordered(5);
        assert_eq!(grid.side(), 5);
        assert!(grid.cells().iter().all(|&s| s == 1));
        assert_eq!(grid.total_spin(), 25.0);
    }

    #[test]
    fn test_random_values_are_unit_spins() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        let grid = SpinGrid::random(16, &mut rng);
        assert_eq!(grid.cells().len(), 256);
        assert!(grid.cells().iter().all(|&s| s == 1 || s == -1));

        // Both signs should show up on 256 draws.
        assert!(grid.cells().iter().any(|&s| s == 1));
        assert!(grid.cells().iter().any(|&s| s == -1));
    }

    #[test]
    fn test_total_spin_counts_signs() {
        let mut grid = SpinGrid::ordered(2);
        grid.cells_mut()[0] = -1;
        assert_eq!(grid.total_spin(), 2.0);
    }
}
