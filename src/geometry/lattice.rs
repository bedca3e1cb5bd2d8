/// Periodic square lattice with a precomputed neighbor table.
///
/// Sites are indexed in row-major order: site `(x, y)` lives at
/// `x * side + y`. The neighbor table stores, for each site, its four
/// periodic neighbors in the order left, right, up, down.
pub struct Lattice {
    /// Edge length N.
    pub side: usize,
    /// Total number of sites (`side * side`).
    pub n_spins: usize,
    /// Flat neighbor table, length `n_spins * 4`.
    neighbors: Vec<u32>,
}

/// Neighbor directions per site on the square torus.
pub const N_NEIGHBORS: usize = 4;

impl Lattice {
    /// Build an N x N toroidal lattice. Fails for `side == 0`.
    pub fn square(side: usize) -> Result<Self, String> {
        if side == 0 {
            return Err("lattice side must be >= 1".to_string());
        }
        let n_spins = side * side;
        let mut neighbors = vec![0u32; n_spins * N_NEIGHBORS];

        for x in 0..side {
            let x_prev = if x == 0 { side - 1 } else { x - 1 };
            let x_next = if x + 1 == side { 0 } else { x + 1 };
            for y in 0..side {
                let y_prev = if y == 0 { side - 1 } else { y - 1 };
                let y_next = if y + 1 == side { 0 } else { y + 1 };

                let base = (x * side + y) * N_NEIGHBORS;
                neighbors[base] = (x_prev * side + y) as u32;
                neighbors[base + 1] = (x_next * side + y) as u32;
                neighbors[base + 2] = (x * side + y_prev) as u32;
                neighbors[base + 3] = (x * side + y_next) as u32;
            }
        }

        Ok(Self {
            side,
            n_spins,
            neighbors,
        })
    }

    /// Flat index of `(x, y)`.
    #[inline]
    pub fn site(&self, x: usize, y: usize) -> usize {
        x * self.side + y
    }

    /// Neighbor of `site` in direction `d` (0 = left, 1 = right, 2 = up, 3 = down).
    #[inline]
    pub fn neighbor(&self, site: usize, d: usize) -> usize {
        self.neighbors[site * N_NEIGHBORS + d] as usize
    }
}
