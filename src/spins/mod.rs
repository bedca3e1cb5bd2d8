pub mod energy;
pub mod grid;

pub use energy::total_energy;
pub use grid::SpinGrid;
