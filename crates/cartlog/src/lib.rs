// Module structure for the CaRT log decoder.

// Core
pub mod error;
pub mod parser;
pub mod source;

// Configuration and command line support
pub mod conf;
pub mod runtime;

pub use error::LogError;
pub use parser::{Level, ParentShape, RawRecord, Record, StructuredRecord};
pub use source::{IterOptions, LogIter, LogSource, PidRegistry, ScanSummary, Strategy};
