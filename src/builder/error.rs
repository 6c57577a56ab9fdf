//! Build errors for the machine builder.

use thiserror::Error;

/// Errors that can occur when building a machine.
///
/// Registration itself never fails (missing states are created on first
/// reference); only the builder's own required fields can be absent.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(key) before .build()")]
    MissingInitialState,
}
