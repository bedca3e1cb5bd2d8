pub mod observables;
pub mod results;

pub use observables::{magnetization, susceptibility};
pub use results::ScanTable;
