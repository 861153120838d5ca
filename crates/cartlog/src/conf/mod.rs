//! Conf module: configuration model and loading from file and environment.

pub mod model;
pub mod load;

pub use model::{CartlogConfig, OutputConfig, ScanConfig};
