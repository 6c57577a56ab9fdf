//! Clockstep: a reentrancy-safe, tick-driven finite state machine engine
//!
//! Clockstep holds named states with enter/update/exit callback sequences
//! and guarded transitions between them, and is driven once per discrete
//! time step ("tick") by an external scheduler such as a game loop. At most
//! one state change executes per tick; transition requests raised while a
//! tick is in progress — including requests issued by callbacks invoked
//! during that tick — queue in FIFO order and drain as their own ticks.
//!
//! # Core Concepts
//!
//! - **State key**: opaque identity via the [`StateKey`] trait (integers
//!   and small enums qualify automatically)
//! - **Callbacks**: ordered enter/update/exit sequences per state
//! - **Guards**: predicates deciding whether a transition may fire
//! - **Auto-detect transitions**: edges scanned opportunistically every
//!   tick instead of waiting for an explicit request
//! - **Tick protocol**: the reentrancy flag and FIFO queue that make
//!   requesting a transition from inside a callback safe
//!
//! # Example
//!
//! ```rust
//! use clockstep::core::Fsm;
//!
//! const IDLE: i32 = 0;
//! const WALKING: i32 = 1;
//! const RUNNING: i32 = 2;
//!
//! let fsm: Fsm<i32> = Fsm::new();
//!
//! fsm.state(IDLE).add_enter(|last, _| {
//!     println!("idle (came from {last:?})");
//! });
//! fsm.edge(IDLE, WALKING).guard(|_| true, false);
//! fsm.edge(WALKING, RUNNING);
//!
//! fsm.start(IDLE).unwrap();
//! fsm.transition(WALKING);
//! fsm.transition(RUNNING);
//!
//! // Drive once per time step from the host loop:
//! fsm.tick(true);
//!
//! assert_eq!(fsm.current(), Some(RUNNING));
//! ```

pub mod builder;
pub mod core;

// Re-export commonly used types
pub use builder::{BuildError, FsmBuilder};
pub use core::{Fsm, FsmError, StateKey, TickEvent, TickTrace};
