//! Engine error types.

use std::fmt::Debug;
use thiserror::Error;

/// Errors surfaced by the machine's lifecycle operations.
///
/// Registration has no error conditions (missing states are created on
/// first reference), and an illegal nested `tick` is a contract violation
/// that panics rather than returning an error.
#[derive(Debug, Error)]
pub enum FsmError<K: Debug> {
    #[error("unknown state {0:?}; register it before calling start()")]
    UnknownState(K),
}
