//! Error types for postharvest.
//!
//! This module defines the crate-level error type returned by scan and
//! output operations. Driver-boundary failures have their own type,
//! [`crate::driver::DriverError`], so callers can tell a recoverable UI
//! hiccup from a fatal run error.

use crate::driver::DriverError;

/// Error type for scan and output operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page driver failed in a way the scan loop does not recover from.
    #[error("page driver failure: {0}")]
    Driver(#[from] DriverError),

    /// Writing a row to the output sink failed.
    #[error("output write failed: {0}")]
    Csv(#[from] csv::Error),

    /// Creating or flushing an output file failed.
    #[error("output file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scan and output operations.
pub type Result<T> = std::result::Result<T, Error>;
