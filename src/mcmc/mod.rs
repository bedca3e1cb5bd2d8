pub mod metropolis;
pub mod recorder;

pub use metropolis::metropolis_chain;
pub use recorder::{ChainSeries, FrameCapture, FrameRecorder, Recorder, SeriesRecorder};
