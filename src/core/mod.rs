//! Core engine: state registry, tick scheduler and reentrancy control.
//!
//! Layered bottom-up:
//! - `key` / `hooks` / `registry`: pure data plus lookup — states, their
//!   callback sequences and outgoing transitions
//! - `machine`: the tick protocol — request evaluation, the reentrancy
//!   flag and the FIFO drain loop
//! - `history`: the in-memory trace of executed state changes
//! - `error`: recoverable error types

mod error;
mod history;
mod hooks;
mod key;
mod machine;
mod registry;

pub use error::FsmError;
pub use history::{TickEvent, TickTrace};
pub use hooks::{EnterFn, ExitFn, GuardFn, UpdateFn};
pub use key::StateKey;
pub use machine::{EdgeHandle, Fsm, StateHandle, WeakFsm};
