pub mod config;
pub mod geometry;
pub mod mcmc;
pub mod simulation;
pub mod spins;
pub mod statistics;

pub use config::{ChainConfig, InitMode, Observable, ScanConfig};
pub use geometry::Lattice;
pub use mcmc::{metropolis_chain, ChainSeries, FrameCapture, Recorder};
pub use simulation::{capture_frames, run_chain, run_scan, ChainRun};
pub use spins::{total_energy, SpinGrid};
pub use statistics::{magnetization, susceptibility, ScanTable};
