//! State and transition storage.
//!
//! Pure data plus lookup. States are created on first reference and never
//! removed, so indices into the state list stay valid for the lifetime of
//! the machine. Lookups preserve insertion order: when duplicate edges
//! exist for a (src, dst) pair, the first one registered wins.

use super::hooks::{GuardFn, Hooks};
use super::key::StateKey;

/// One registered state: its key, callback sequences and outgoing edges.
pub(crate) struct StateRecord<K, A> {
    pub(crate) key: K,
    pub(crate) hooks: Hooks<K, A>,
    pub(crate) edges: Vec<EdgeRecord<A>>,
}

/// One directed edge. `dst` indexes into the owning registry's state list.
/// A fresh edge has no guard and is not auto-detected; an unset guard is
/// treated as always satisfied by the scheduler.
pub(crate) struct EdgeRecord<A> {
    pub(crate) dst: usize,
    pub(crate) guard: Option<GuardFn<A>>,
    pub(crate) auto_detect: bool,
}

pub(crate) struct Registry<K, A> {
    pub(crate) states: Vec<StateRecord<K, A>>,
}

impl<K: StateKey, A> Registry<K, A> {
    pub(crate) fn new() -> Self {
        Self { states: Vec::new() }
    }

    pub(crate) fn index_of(&self, key: K) -> Option<usize> {
        self.states.iter().position(|s| s.key == key)
    }

    /// Return the index for `key`, creating an empty state if absent.
    /// Idempotent: re-ensuring never clears previously registered
    /// callbacks or edges.
    pub(crate) fn ensure_state(&mut self, key: K) -> usize {
        if let Some(index) = self.index_of(key) {
            return index;
        }
        self.states.push(StateRecord {
            key,
            hooks: Hooks::default(),
            edges: Vec::new(),
        });
        self.states.len() - 1
    }

    /// Return `(state index, edge index)` for the src→dst edge, creating
    /// missing endpoints and the edge itself as needed.
    pub(crate) fn ensure_edge(&mut self, src: K, dst: K) -> (usize, usize) {
        let src_index = self.ensure_state(src);
        let dst_index = self.ensure_state(dst);

        if let Some(edge_index) = self.states[src_index]
            .edges
            .iter()
            .position(|e| e.dst == dst_index)
        {
            return (src_index, edge_index);
        }

        self.states[src_index].edges.push(EdgeRecord {
            dst: dst_index,
            guard: None,
            auto_detect: false,
        });
        (src_index, self.states[src_index].edges.len() - 1)
    }

    /// First src→dst edge in insertion order, if any. No side effects.
    pub(crate) fn find_edge(&self, src: K, dst: K) -> Option<(usize, usize)> {
        let src_index = self.index_of(src)?;
        let edge_index = self.states[src_index]
            .edges
            .iter()
            .position(|e| self.states[e.dst].key == dst)?;
        Some((src_index, edge_index))
    }

    pub(crate) fn has_state(&self, key: K) -> bool {
        self.index_of(key).is_some()
    }

    pub(crate) fn has_edge(&self, src: K, dst: K) -> bool {
        self.find_edge(src, dst).is_some()
    }
}
