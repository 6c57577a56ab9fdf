//! Per-state callback sequences.
//!
//! Each state carries three ordered sequences of callbacks: enter, update
//! and exit. The engine stores shared handles to the closures, never owning
//! the data they capture; the embedding application's objects must outlive
//! the machine instance.

use std::cell::RefCell;
use std::rc::Rc;

/// Enter callback: receives the key of the state being left (`None` when
/// the machine is started) and the request argument, if any.
pub type EnterFn<K, A> = Rc<RefCell<dyn FnMut(Option<K>, Option<&A>)>>;

/// Update callback: fired once per frame-stepping tick.
pub type UpdateFn = Rc<RefCell<dyn FnMut()>>;

/// Exit callback: receives the key of the state being entered.
pub type ExitFn<K> = Rc<RefCell<dyn FnMut(K)>>;

/// Guard predicate: decides whether a transition may fire, given the
/// request argument.
pub type GuardFn<A> = Rc<dyn Fn(Option<&A>) -> bool>;

/// Ordered callback sequences for one state.
///
/// Callbacks fire in registration order. `add_*` appends; `set_*` replaces
/// the whole sequence with a single callback. The engine snapshots a
/// sequence before invoking it, so callbacks registered mid-tick take
/// effect from the next invocation onward.
pub(crate) struct Hooks<K, A> {
    pub(crate) enter: Vec<EnterFn<K, A>>,
    pub(crate) update: Vec<UpdateFn>,
    pub(crate) exit: Vec<ExitFn<K>>,
}

impl<K, A> Default for Hooks<K, A> {
    fn default() -> Self {
        Self {
            enter: Vec::new(),
            update: Vec::new(),
            exit: Vec::new(),
        }
    }
}

impl<K, A> Hooks<K, A> {
    pub(crate) fn add_enter<F>(&mut self, hook: F)
    where
        F: FnMut(Option<K>, Option<&A>) + 'static,
    {
        self.enter.push(Rc::new(RefCell::new(hook)));
    }

    pub(crate) fn set_enter<F>(&mut self, hook: F)
    where
        F: FnMut(Option<K>, Option<&A>) + 'static,
    {
        self.enter.clear();
        self.add_enter(hook);
    }

    pub(crate) fn add_update<F>(&mut self, hook: F)
    where
        F: FnMut() + 'static,
    {
        self.update.push(Rc::new(RefCell::new(hook)));
    }

    pub(crate) fn set_update<F>(&mut self, hook: F)
    where
        F: FnMut() + 'static,
    {
        self.update.clear();
        self.add_update(hook);
    }

    pub(crate) fn add_exit<F>(&mut self, hook: F)
    where
        F: FnMut(K) + 'static,
    {
        self.exit.push(Rc::new(RefCell::new(hook)));
    }

    pub(crate) fn set_exit<F>(&mut self, hook: F)
    where
        F: FnMut(K) + 'static,
    {
        self.exit.clear();
        self.add_exit(hook);
    }
}
