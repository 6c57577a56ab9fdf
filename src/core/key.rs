//! Opaque state identity.
//!
//! States are keyed by a caller-chosen value rather than by a name the
//! engine interprets. Identity comparison is the only operation the engine
//! performs on a key; no ordering is required.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Marker trait for state keys.
///
/// Any small copyable value with equality works as a key: plain integers,
/// or an enum declared with [`state_key!`](crate::state_key). The blanket
/// impl below means you never implement this trait by hand.
///
/// # Required Traits
///
/// - `Copy` + `Eq`: keys are passed by value and compared for identity
/// - `Debug`: keys appear in log events and error messages
/// - `Serialize` + `Deserialize`: keys appear in exported tick traces
///
/// # Example
///
/// ```rust
/// use clockstep::core::{Fsm, StateKey};
///
/// fn accepts_key<K: StateKey>(_key: K) {}
///
/// accepts_key(7_i32);
///
/// let fsm: Fsm<u8> = Fsm::new();
/// fsm.state(1);
/// assert!(fsm.has_state(1));
/// ```
pub trait StateKey:
    Copy + Eq + Debug + Serialize + for<'de> Deserialize<'de> + 'static
{
}

impl<T> StateKey for T where
    T: Copy + Eq + Debug + Serialize + for<'de> Deserialize<'de> + 'static
{
}
