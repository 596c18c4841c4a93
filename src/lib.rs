pub mod error;
pub mod grading;
pub mod ingest;
pub mod output;
pub mod registry;
pub mod report;

pub use error::{Result, TrackerError};
pub use registry::{RecapRow, Registry};
