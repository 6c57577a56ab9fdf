//! Builder API for ergonomic machine construction.
//!
//! [`FsmBuilder`] offers a fluent path from declaration to a started
//! machine; the [`state_key!`](crate::state_key) macro cuts the derive
//! boilerplate for key enums. Everything here is sugar over the
//! registration surface in [`core`](crate::core).

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::FsmBuilder;
