//! Builder for constructing and starting machines.

use crate::builder::error::BuildError;
use crate::core::{Fsm, StateHandle, StateKey};

/// Builder for constructing machines with a fluent API.
///
/// `build()` starts the machine at the declared initial state, so the
/// returned [`Fsm`] is ready to tick.
pub struct FsmBuilder<K: StateKey, A = ()> {
    fsm: Fsm<K, A>,
    initial: Option<K>,
}

impl<K: StateKey, A: 'static> FsmBuilder<K, A> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            fsm: Fsm::new(),
            initial: None,
        }
    }

    /// Set the initial state (required), registering it if absent.
    pub fn initial(mut self, key: K) -> Self {
        self.fsm.state(key);
        self.initial = Some(key);
        self
    }

    /// Register a state and configure its callbacks.
    pub fn state<F>(self, key: K, configure: F) -> Self
    where
        F: FnOnce(&StateHandle<K, A>),
    {
        configure(&self.fsm.state(key));
        self
    }

    /// Add an unguarded transition (always satisfied when requested).
    pub fn edge(self, src: K, dst: K) -> Self {
        self.fsm.edge(src, dst);
        self
    }

    /// Add a guarded transition taken only on explicit request.
    pub fn guarded_edge<F>(self, src: K, dst: K, guard: F) -> Self
    where
        F: Fn(Option<&A>) -> bool + 'static,
    {
        self.fsm.edge(src, dst).guard(guard, false);
        self
    }

    /// Add a guarded transition scanned opportunistically every tick.
    pub fn auto_edge<F>(self, src: K, dst: K, guard: F) -> Self
    where
        F: Fn(Option<&A>) -> bool + 'static,
    {
        self.fsm.edge(src, dst).guard(guard, true);
        self
    }

    /// Build and start the machine.
    /// Returns an error if no initial state was declared.
    pub fn build(self) -> Result<Fsm<K, A>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        self.fsm
            .start(initial)
            .expect("initial state is registered by initial()");
        Ok(self.fsm)
    }
}

impl<K: StateKey, A: 'static> Default for FsmBuilder<K, A> {
    fn default() -> Self {
        Self::new()
    }
}
