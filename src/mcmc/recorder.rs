use crate::spins::SpinGrid;

/// Per-sweep capture tap for the Metropolis chain.
///
/// The kernel calls `record` exactly once per sweep boundary, with the
/// sweep index, the current grid, and the running energy. The two
/// implementations below are the "record totals" and "record full grid"
/// policies; the chain logic itself is shared.
pub trait Recorder {
    fn record(&mut self, sweep: usize, grid: &SpinGrid, energy: f64);
}

/// Total-spin and energy time series of one chain.
pub struct ChainSeries {
    /// Sum of all spins at each sweep boundary.
    pub spins: Vec<f64>,
    /// Running energy at each sweep boundary (doubled convention).
    pub energies: Vec<f64>,
    /// Element-wise square of `spins`.
    pub spins_sq: Vec<f64>,
}

/// Records scalar observables (total spin + energy) once per sweep.
pub struct SeriesRecorder {
    spins: Vec<f64>,
    energies: Vec<f64>,
}

impl SeriesRecorder {
    pub fn new(n_sweeps: usize) -> Self {
        Self {
            spins: vec![0.0; n_sweeps],
            energies: vec![0.0; n_sweeps],
        }
    }

    pub fn finish(self) -> ChainSeries {
        let spins_sq = self.spins.iter().map(|&s| s * s).collect();
        ChainSeries {
            spins: self.spins,
            energies: self.energies,
            spins_sq,
        }
    }
}

impl Recorder for SeriesRecorder {
    fn record(&mut self, sweep: usize, grid: &SpinGrid, energy: f64) {
        self.spins[sweep] = grid.total_spin();
        self.energies[sweep] = energy;
    }
}

/// Ordered grid snapshots with matching sweep-index labels.
///
/// This is the entire interface handed to external frame renderers: a
/// plain sequence of flat +1/-1 arrays plus the sweep each one belongs to.
pub struct FrameCapture {
    side: usize,
    frames: Vec<Vec<i8>>,
    sweeps: Vec<usize>,
}

impl FrameCapture {
    /// Edge length of every frame.
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate `(sweep_index, row-major cells)` in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[i8])> {
        self.sweeps
            .iter()
            .copied()
            .zip(self.frames.iter().map(|f| f.as_slice()))
    }
}

/// Records a full grid snapshot once per sweep.
pub struct FrameRecorder {
    side: usize,
    frames: Vec<Vec<i8>>,
    sweeps: Vec<usize>,
}

impl FrameRecorder {
    pub fn new(side: usize, n_sweeps: usize) -> Self {
        Self {
            side,
            frames: Vec::with_capacity(n_sweeps),
            sweeps: Vec::with_capacity(n_sweeps),
        }
    }

    pub fn finish(self) -> FrameCapture {
        FrameCapture {
            side: self.side,
            frames: self.frames,
            sweeps: self.sweeps,
        }
    }
}

impl Recorder for FrameRecorder {
    fn record(&mut self, sweep: usize, grid: &SpinGrid, _energy: f64) {
        self.frames.push(grid.cells().to_vec());
        self.sweeps.push(sweep);
    }
}
