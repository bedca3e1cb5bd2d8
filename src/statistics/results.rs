/// Observable values on the (lattice size, beta) grid.
///
/// `values[i][k]` is the observable for `sizes[i]` at `betas[k]`,
/// size-major to match the order scan work is submitted in.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanTable {
    pub sizes: Vec<usize>,
    pub betas: Vec<f64>,
    pub values: Vec<Vec<f64>>,
}

impl ScanTable {
    /// Observable for size index `i` at beta index `k`.
    pub fn get(&self, i: usize, k: usize) -> f64 {
        self.values[i][k]
    }

    /// Average tables element-wise across independent chains.
    ///
    /// All tables must share the same shape; sizes and betas are taken
    /// from the first.
    ///
    /// # Panics
    ///
    /// Panics if `tables` is empty. Scan callers never hit this: the
    /// scan config requires at least one chain.
    pub fn aggregate(tables: &[Self]) -> Self {
        assert!(!tables.is_empty(), "aggregate requires at least one table");
        let n = tables.len() as f64;
        let first = &tables[0];

        let mut values: Vec<Vec<f64>> = first
            .values
            .iter()
            .map(|row| vec![0.0; row.len()])
            .collect();

        for table in tables {
            for (acc_row, row) in values.iter_mut().zip(table.values.iter()) {
                for (acc, &v) in acc_row.iter_mut().zip(row.iter()) {
                    *acc += v;
                }
            }
        }

        for row in values.iter_mut() {
            for v in row.iter_mut() {
                *v /= n;
            }
        }

        Self {
            sizes: first.sizes.clone(),
            betas: first.betas.clone(),
            values,
        }
    }
}
