//! The tick-driven machine: scheduling, reentrancy guarding and queuing.
//!
//! A [`Fsm`] is a cheap-to-clone handle over shared machine internals, so
//! callbacks can capture a clone and request transitions from inside a
//! tick. One tick processes at most one state change; requests raised while
//! a tick is in progress queue in FIFO order and drain as their own ticks
//! once the active tick returns control.
//!
//! Execution is single-threaded and cooperative. The handle is neither
//! `Send` nor `Sync`; exposing a machine to multiple threads requires
//! external mutual exclusion and is out of scope.
//!
//! Note that a callback capturing a clone of its own machine's handle forms
//! a reference cycle; use [`Fsm::downgrade`] where the machine must be
//! droppable while such callbacks are registered.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use chrono::Utc;
use tracing::{debug, trace, warn};

use super::error::FsmError;
use super::history::{TickEvent, TickTrace};
use super::hooks::UpdateFn;
use super::key::StateKey;
use super::registry::Registry;

/// A transition request: the edge to take plus the argument supplied at
/// request time. Indices stay valid because states and edges are never
/// removed.
struct Request<A> {
    src: usize,
    edge: usize,
    arg: Option<A>,
}

struct Inner<K: StateKey, A> {
    registry: Registry<K, A>,
    current: Option<usize>,
    ticking: bool,
    pending: Option<Request<A>>,
    queue: VecDeque<Request<A>>,
    ticks: u64,
    trace: TickTrace<K>,
}

/// A reentrancy-safe finite state machine driven once per time step.
///
/// `K` is the opaque state key type, `A` the argument type carried by
/// transition requests (defaults to `()` when requests carry no data).
///
/// # Example
///
/// ```rust
/// use clockstep::core::Fsm;
///
/// const IDLE: i32 = 0;
/// const RUNNING: i32 = 1;
///
/// let fsm: Fsm<i32> = Fsm::new();
/// fsm.state(IDLE);
/// fsm.edge(IDLE, RUNNING).guard(|_| true, false);
///
/// fsm.start(IDLE).unwrap();
/// fsm.transition(RUNNING);
///
/// assert_eq!(fsm.current(), Some(RUNNING));
/// ```
pub struct Fsm<K: StateKey, A = ()> {
    inner: Rc<RefCell<Inner<K, A>>>,
}

impl<K: StateKey, A> Clone for Fsm<K, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K: StateKey, A: 'static> Default for Fsm<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey, A: 'static> Fsm<K, A> {
    /// Create an empty machine with no states and no current state.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                registry: Registry::new(),
                current: None,
                ticking: false,
                pending: None,
                queue: VecDeque::new(),
                ticks: 0,
                trace: TickTrace::new(),
            })),
        }
    }

    /// Downgrade to a handle that does not keep the machine alive.
    pub fn downgrade(&self) -> WeakFsm<K, A> {
        WeakFsm {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Handle to the state for `key`, creating an empty one if absent.
    /// Idempotent: re-ensuring never clears registered callbacks.
    pub fn state(&self, key: K) -> StateHandle<K, A> {
        let index = self.inner.borrow_mut().registry.ensure_state(key);
        StateHandle {
            inner: Rc::clone(&self.inner),
            index,
        }
    }

    /// Handle to the src→dst transition, creating it (and any missing
    /// endpoint state) if absent. A fresh edge has no guard, which the
    /// scheduler treats as always satisfied.
    pub fn edge(&self, src: K, dst: K) -> EdgeHandle<K, A> {
        let (state, edge) = self.inner.borrow_mut().registry.ensure_edge(src, dst);
        EdgeHandle {
            inner: Rc::clone(&self.inner),
            state,
            edge,
        }
    }

    /// First src→dst transition in insertion order, without creating one.
    pub fn find_edge(&self, src: K, dst: K) -> Option<EdgeHandle<K, A>> {
        let (state, edge) = self.inner.borrow().registry.find_edge(src, dst)?;
        Some(EdgeHandle {
            inner: Rc::clone(&self.inner),
            state,
            edge,
        })
    }

    pub fn has_state(&self, key: K) -> bool {
        self.inner.borrow().registry.has_state(key)
    }

    pub fn has_transition(&self, src: K, dst: K) -> bool {
        self.inner.borrow().registry.has_edge(src, dst)
    }

    /// Key of the current state, or `None` before [`start`](Self::start).
    pub fn current(&self) -> Option<K> {
        let inner = self.inner.borrow();
        inner.current.map(|i| inner.registry.states[i].key)
    }

    /// Snapshot of the trace of executed state changes.
    pub fn trace(&self) -> TickTrace<K> {
        self.inner.borrow().trace.clone()
    }

    /// Set the current state and fire its enter callbacks with
    /// `(last = None, arg = None)` in registration order.
    ///
    /// Fails without side effect if `key` names no registered state.
    pub fn start(&self, key: K) -> Result<(), FsmError<K>> {
        let (index, enters) = {
            let inner = self.inner.borrow();
            let index = inner
                .registry
                .index_of(key)
                .ok_or(FsmError::UnknownState(key))?;
            (index, inner.registry.states[index].hooks.enter.clone())
        };

        {
            let mut inner = self.inner.borrow_mut();
            inner.current = Some(index);
            let event = TickEvent {
                from: None,
                to: key,
                tick: inner.ticks,
                timestamp: Utc::now(),
            };
            inner.trace = inner.trace.record(event);
        }
        debug!(state = ?key, "fsm started");

        for hook in enters {
            (hook.borrow_mut())(None, None);
        }
        Ok(())
    }

    /// Request a move to `dst`, processing it synchronously when no tick is
    /// in progress. Equivalent to `transition_with(dst, None, true)`.
    pub fn transition(&self, dst: K) {
        self.transition_with(dst, None, true);
    }

    /// Request a move from the current state to `dst`, carrying `arg` to
    /// the guard and the destination's enter callbacks.
    ///
    /// While a tick is in progress (the usual case when called from a
    /// callback) the request joins the FIFO queue and is processed by the
    /// active tick's drain loop after the current state change has fully
    /// completed. Otherwise it becomes the pending request, and if
    /// `immediate` is set a non-frame-stepping tick runs right away;
    /// with `immediate` unset it waits for the next external tick.
    ///
    /// A request naming a destination with no edge from the current state,
    /// or issued before `start`, is ignored.
    pub fn transition_with(&self, dst: K, arg: Option<A>, immediate: bool) {
        let request = {
            let inner = self.inner.borrow();
            let Some(index) = inner.current else {
                warn!(to = ?dst, "transition requested before start; ignoring");
                return;
            };
            let src_key = inner.registry.states[index].key;
            match inner.registry.find_edge(src_key, dst) {
                Some((src, edge)) => Request { src, edge, arg },
                None => {
                    warn!(from = ?src_key, to = ?dst, "no transition from current state; ignoring");
                    return;
                }
            }
        };
        self.submit(request, immediate);
    }

    /// Run one tick.
    ///
    /// At most one state change executes: the pending request if one
    /// exists, otherwise the current state's auto-detect edges are
    /// submitted as queued requests. If `frame_step` is set, the (possibly
    /// just-changed) current state's update callbacks fire afterwards.
    /// Finally the FIFO queue drains, each drained request running the full
    /// protocol as its own tick with frame stepping off.
    ///
    /// # Panics
    ///
    /// Panics if called while a tick is already in progress on this
    /// machine (e.g. from inside a callback). Two concurrent logical ticks
    /// would corrupt the single pending-request slot.
    pub fn tick(&self, frame_step: bool) {
        self.run_protocol(frame_step);

        // Drain with an explicit work-list loop rather than recursion, so
        // pathological self-requeuing callbacks cannot grow the call
        // stack. Observable FIFO ordering is unchanged.
        loop {
            let next = self.inner.borrow_mut().queue.pop_front();
            let Some(request) = next else { break };
            self.inner.borrow_mut().pending = Some(request);
            self.run_protocol(false);
        }
    }

    /// Install `request` as pending, or queue it when a tick is in
    /// progress. With `immediate` set, runs a tick right away unless one
    /// is already running (whose drain loop will reach the request).
    fn submit(&self, request: Request<A>, immediate: bool) {
        let ticking = {
            let mut inner = self.inner.borrow_mut();
            if inner.ticking {
                inner.queue.push_back(request);
            } else {
                inner.pending = Some(request);
            }
            inner.ticking
        };
        if immediate && !ticking {
            self.tick(false);
        }
    }

    /// One pass of the tick protocol, without the drain loop.
    fn run_protocol(&self, frame_step: bool) {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            assert!(
                !inner.ticking,
                "illegal nested tick: tick() called while a tick is in progress"
            );
            inner.ticking = true;
            inner.ticks += 1;
            inner.pending.take()
        };
        trace!(frame_step, "tick");

        match pending {
            Some(request) => self.execute(request),
            None => {
                let detected: Vec<Request<A>> = {
                    let inner = self.inner.borrow();
                    match inner.current {
                        Some(index) => inner.registry.states[index]
                            .edges
                            .iter()
                            .enumerate()
                            .filter(|(_, e)| e.auto_detect)
                            .map(|(edge, _)| Request {
                                src: index,
                                edge,
                                arg: None,
                            })
                            .collect(),
                        None => Vec::new(),
                    }
                };
                // The flag is set, so every detected edge queues; each one
                // drains as its own tick and is evaluated on its own turn.
                for request in detected {
                    self.submit(request, false);
                }
            }
        }

        if frame_step {
            let updates: Vec<UpdateFn> = {
                let inner = self.inner.borrow();
                match inner.current {
                    Some(index) => inner.registry.states[index].hooks.update.clone(),
                    None => Vec::new(),
                }
            };
            for hook in updates {
                (hook.borrow_mut())();
            }
        }

        self.inner.borrow_mut().ticking = false;
    }

    /// Evaluate and, if the guard allows, execute one request: source exit
    /// callbacks, destination enter callbacks, then the current-state swap.
    /// A refused request is discarded, not retried.
    fn execute(&self, request: Request<A>) {
        let (guard, exits, enters, src_key, dst_key, dst) = {
            let inner = self.inner.borrow();
            let state = &inner.registry.states[request.src];
            let edge = &state.edges[request.edge];
            let destination = &inner.registry.states[edge.dst];
            (
                edge.guard.clone(),
                state.hooks.exit.clone(),
                destination.hooks.enter.clone(),
                state.key,
                destination.key,
                edge.dst,
            )
        };

        // An unset guard is always satisfied.
        let satisfied = guard.map_or(true, |g| g(request.arg.as_ref()));
        if !satisfied {
            debug!(from = ?src_key, to = ?dst_key, "guard refused transition");
            return;
        }

        for hook in exits {
            (hook.borrow_mut())(dst_key);
        }
        for hook in enters {
            (hook.borrow_mut())(Some(src_key), request.arg.as_ref());
        }

        {
            let mut inner = self.inner.borrow_mut();
            inner.current = Some(dst);
            let event = TickEvent {
                from: Some(src_key),
                to: dst_key,
                tick: inner.ticks,
                timestamp: Utc::now(),
            };
            inner.trace = inner.trace.record(event);
        }
        debug!(from = ?src_key, to = ?dst_key, "transition");
    }
}

/// Weak counterpart of [`Fsm`]; breaks the reference cycle formed when a
/// callback captures its own machine's handle.
pub struct WeakFsm<K: StateKey, A = ()> {
    inner: Weak<RefCell<Inner<K, A>>>,
}

impl<K: StateKey, A> Clone for WeakFsm<K, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<K: StateKey, A> WeakFsm<K, A> {
    /// Recover a strong handle if the machine is still alive.
    pub fn upgrade(&self) -> Option<Fsm<K, A>> {
        self.inner.upgrade().map(|inner| Fsm { inner })
    }
}

/// Configuration handle for one registered state.
///
/// Obtained from [`Fsm::state`]. `add_*` appends a callback to the
/// corresponding sequence; `set_*` replaces the sequence wholesale.
/// Methods chain: `fsm.state(k).add_enter(..).add_exit(..)`.
pub struct StateHandle<K: StateKey, A = ()> {
    inner: Rc<RefCell<Inner<K, A>>>,
    index: usize,
}

impl<K: StateKey, A: 'static> StateHandle<K, A> {
    pub fn key(&self) -> K {
        self.inner.borrow().registry.states[self.index].key
    }

    pub fn add_enter<F>(&self, hook: F) -> &Self
    where
        F: FnMut(Option<K>, Option<&A>) + 'static,
    {
        self.inner.borrow_mut().registry.states[self.index]
            .hooks
            .add_enter(hook);
        self
    }

    pub fn set_enter<F>(&self, hook: F) -> &Self
    where
        F: FnMut(Option<K>, Option<&A>) + 'static,
    {
        self.inner.borrow_mut().registry.states[self.index]
            .hooks
            .set_enter(hook);
        self
    }

    pub fn add_update<F>(&self, hook: F) -> &Self
    where
        F: FnMut() + 'static,
    {
        self.inner.borrow_mut().registry.states[self.index]
            .hooks
            .add_update(hook);
        self
    }

    pub fn set_update<F>(&self, hook: F) -> &Self
    where
        F: FnMut() + 'static,
    {
        self.inner.borrow_mut().registry.states[self.index]
            .hooks
            .set_update(hook);
        self
    }

    pub fn add_exit<F>(&self, hook: F) -> &Self
    where
        F: FnMut(K) + 'static,
    {
        self.inner.borrow_mut().registry.states[self.index]
            .hooks
            .add_exit(hook);
        self
    }

    pub fn set_exit<F>(&self, hook: F) -> &Self
    where
        F: FnMut(K) + 'static,
    {
        self.inner.borrow_mut().registry.states[self.index]
            .hooks
            .set_exit(hook);
        self
    }
}

/// Configuration handle for one transition.
///
/// Obtained from [`Fsm::edge`] or [`Fsm::find_edge`].
pub struct EdgeHandle<K: StateKey, A = ()> {
    inner: Rc<RefCell<Inner<K, A>>>,
    state: usize,
    edge: usize,
}

impl<K: StateKey, A: 'static> EdgeHandle<K, A> {
    /// `(source, destination)` keys of this edge.
    pub fn endpoints(&self) -> (K, K) {
        let inner = self.inner.borrow();
        let record = &inner.registry.states[self.state];
        (record.key, inner.registry.states[record.edges[self.edge].dst].key)
    }

    pub fn is_auto_detect(&self) -> bool {
        self.inner.borrow().registry.states[self.state].edges[self.edge].auto_detect
    }

    /// Bind the guard predicate and the auto-detect flag. The two are set
    /// together; an edge never carries one without a decision on the
    /// other.
    pub fn guard<F>(&self, predicate: F, auto_detect: bool) -> &Self
    where
        F: Fn(Option<&A>) -> bool + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let record = &mut inner.registry.states[self.state].edges[self.edge];
        record.guard = Some(Rc::new(predicate));
        record.auto_detect = auto_detect;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: i32 = 1;
    const B: i32 = 2;
    const C: i32 = 3;

    type Log = Rc<RefCell<Vec<String>>>;

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn push(log: &Log, entry: impl Into<String>) {
        log.borrow_mut().push(entry.into());
    }

    /// States A, B, C with every callback logging what fired.
    fn instrumented(fsm: &Fsm<i32>, log: &Log) {
        for key in [A, B, C] {
            let state = fsm.state(key);
            let enter_log = Rc::clone(log);
            state.add_enter(move |last, _| {
                push(&enter_log, format!("enter {key} <- {last:?}"));
            });
            let update_log = Rc::clone(log);
            state.add_update(move || push(&update_log, format!("update {key}")));
            let exit_log = Rc::clone(log);
            state.add_exit(move |next| push(&exit_log, format!("exit {key} -> {next}")));
        }
    }

    #[test]
    fn start_on_unknown_state_fails_without_side_effect() {
        let fsm: Fsm<i32> = Fsm::new();
        fsm.state(A);

        let result = fsm.start(9);

        assert!(matches!(result, Err(FsmError::UnknownState(9))));
        assert_eq!(fsm.current(), None);
        assert!(fsm.trace().events().is_empty());
    }

    #[test]
    fn start_fires_enter_callbacks_once_with_no_last_state() {
        let fsm: Fsm<i32> = Fsm::new();
        let events = log();
        instrumented(&fsm, &events);

        fsm.start(A).unwrap();

        assert_eq!(fsm.current(), Some(A));
        assert_eq!(*events.borrow(), vec!["enter 1 <- None"]);
    }

    #[test]
    fn immediate_transition_runs_exit_then_enter_then_swap() {
        let fsm: Fsm<i32> = Fsm::new();
        let events = log();
        instrumented(&fsm, &events);
        fsm.edge(A, B).guard(|_| true, false);

        fsm.start(A).unwrap();
        events.borrow_mut().clear();
        fsm.transition(B);

        assert_eq!(fsm.current(), Some(B));
        assert_eq!(*events.borrow(), vec!["exit 1 -> 2", "enter 2 <- Some(1)"]);
    }

    #[test]
    fn false_guard_discards_request_and_fires_nothing() {
        let fsm: Fsm<i32> = Fsm::new();
        let events = log();
        instrumented(&fsm, &events);
        fsm.edge(A, B).guard(|_| false, false);

        fsm.start(A).unwrap();
        events.borrow_mut().clear();
        fsm.transition(B);

        assert_eq!(fsm.current(), Some(A));
        assert!(events.borrow().is_empty());

        // Discarded, not requeued: the next tick changes nothing either.
        fsm.tick(false);
        assert_eq!(fsm.current(), Some(A));
    }

    #[test]
    fn unset_guard_is_always_satisfied() {
        let fsm: Fsm<i32> = Fsm::new();
        fsm.state(A);
        fsm.edge(A, B);

        fsm.start(A).unwrap();
        fsm.transition(B);

        assert_eq!(fsm.current(), Some(B));
    }

    #[test]
    fn unreachable_destination_is_ignored() {
        let fsm: Fsm<i32> = Fsm::new();
        let events = log();
        instrumented(&fsm, &events);

        fsm.start(A).unwrap();
        events.borrow_mut().clear();
        fsm.transition(C);

        assert_eq!(fsm.current(), Some(A));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn transition_before_start_is_ignored() {
        let fsm: Fsm<i32> = Fsm::new();
        fsm.edge(A, B);

        fsm.transition(B);

        assert_eq!(fsm.current(), None);
    }

    #[test]
    fn tick_before_start_is_a_noop() {
        let fsm: Fsm<i32> = Fsm::new();
        fsm.state(A);

        fsm.tick(true);

        assert_eq!(fsm.current(), None);
    }

    #[test]
    fn deferred_request_waits_for_the_next_tick() {
        let fsm: Fsm<i32> = Fsm::new();
        fsm.edge(A, B);

        fsm.start(A).unwrap();
        fsm.transition_with(B, None, false);
        assert_eq!(fsm.current(), Some(A));

        fsm.tick(false);
        assert_eq!(fsm.current(), Some(B));
    }

    #[test]
    fn guard_and_enter_receive_the_request_argument() {
        let fsm: Fsm<i32, u32> = Fsm::new();
        let seen = Rc::new(RefCell::new(None));
        {
            let seen = Rc::clone(&seen);
            fsm.state(B).add_enter(move |last, arg| {
                *seen.borrow_mut() = Some((last, arg.copied()));
            });
        }
        fsm.state(A);
        fsm.edge(A, B).guard(|arg| arg.copied() == Some(7), false);

        fsm.start(A).unwrap();
        fsm.transition_with(B, Some(3), true);
        assert_eq!(fsm.current(), Some(A));

        fsm.transition_with(B, Some(7), true);
        assert_eq!(fsm.current(), Some(B));
        assert_eq!(*seen.borrow(), Some((Some(A), Some(7))));
    }

    #[test]
    fn update_callbacks_fire_on_the_just_changed_state() {
        let fsm: Fsm<i32> = Fsm::new();
        let events = log();
        instrumented(&fsm, &events);
        fsm.edge(A, B);

        fsm.start(A).unwrap();
        fsm.transition_with(B, None, false);
        events.borrow_mut().clear();

        fsm.tick(true);

        assert_eq!(
            *events.borrow(),
            vec!["exit 1 -> 2", "enter 2 <- Some(1)", "update 2"]
        );
    }

    #[test]
    fn requests_from_update_callbacks_drain_fifo() {
        let fsm: Fsm<i32> = Fsm::new();
        let events = log();
        instrumented(&fsm, &events);
        fsm.edge(A, B);
        fsm.edge(A, C);

        {
            let handle = fsm.clone();
            fsm.state(A).add_update(move || {
                handle.transition(B);
                handle.transition(C);
            });
        }

        fsm.start(A).unwrap();
        events.borrow_mut().clear();
        fsm.tick(true);

        // B's change fully completes before C's begins; final state is C.
        assert_eq!(fsm.current(), Some(C));
        assert_eq!(
            *events.borrow(),
            vec![
                "update 1",
                "exit 1 -> 2",
                "enter 2 <- Some(1)",
                "exit 1 -> 3",
                "enter 3 <- Some(1)",
            ]
        );
    }

    #[test]
    #[should_panic(expected = "illegal nested tick")]
    fn nested_tick_from_a_callback_panics() {
        let fsm: Fsm<i32> = Fsm::new();
        {
            let handle = fsm.clone();
            fsm.state(A).add_update(move || handle.tick(true));
        }

        fsm.start(A).unwrap();
        fsm.tick(true);
    }

    #[test]
    fn auto_detect_edges_queue_and_drain_in_registration_order() {
        let fsm: Fsm<i32> = Fsm::new();
        let events = log();
        instrumented(&fsm, &events);
        fsm.edge(A, B).guard(|_| true, true);
        fsm.edge(A, C).guard(|_| true, true);

        fsm.start(A).unwrap();
        events.borrow_mut().clear();
        fsm.tick(false);

        // Both edges were detected in one scan; each was evaluated on its
        // own drained tick, so the second destination wins.
        assert_eq!(fsm.current(), Some(C));
        assert_eq!(
            *events.borrow(),
            vec![
                "exit 1 -> 2",
                "enter 2 <- Some(1)",
                "exit 1 -> 3",
                "enter 3 <- Some(1)",
            ]
        );
    }

    #[test]
    fn auto_detect_scan_skips_unsatisfied_guards_at_evaluation_time() {
        let fsm: Fsm<i32> = Fsm::new();
        fsm.state(A);
        fsm.edge(A, B).guard(|_| false, true);
        fsm.edge(A, C).guard(|_| true, true);

        fsm.start(A).unwrap();
        fsm.tick(false);

        assert_eq!(fsm.current(), Some(C));
    }

    #[test]
    fn pending_request_suppresses_the_auto_detect_scan() {
        let fsm: Fsm<i32> = Fsm::new();
        fsm.state(A);
        fsm.edge(A, B).guard(|_| true, true);
        fsm.edge(A, C);

        fsm.start(A).unwrap();
        fsm.transition_with(C, None, false);
        fsm.tick(false);

        // The manual request to C won the tick; the auto edge to B was
        // never scanned because a pending request existed at entry.
        assert_eq!(fsm.current(), Some(C));
    }

    #[test]
    fn enter_callbacks_may_request_transitions_during_start() {
        let fsm: Fsm<i32> = Fsm::new();
        {
            let handle = fsm.clone();
            fsm.state(A).add_enter(move |_, _| handle.transition(B));
        }
        fsm.state(B);
        fsm.edge(A, B);

        fsm.start(A).unwrap();

        assert_eq!(fsm.current(), Some(B));
    }

    #[test]
    fn trace_records_the_visited_path() {
        let fsm: Fsm<i32> = Fsm::new();
        fsm.state(A);
        fsm.edge(A, B);
        fsm.edge(B, C);

        fsm.start(A).unwrap();
        fsm.transition(B);
        fsm.transition(C);

        let trace = fsm.trace();
        assert_eq!(trace.path(), vec![A, B, C]);
        assert_eq!(trace.events()[0].from, None);
        assert_eq!(trace.events()[2].from, Some(B));
    }

    #[test]
    fn registry_reflects_implicitly_created_states() {
        let fsm: Fsm<i32> = Fsm::new();
        fsm.edge(A, B);

        assert!(fsm.has_state(A));
        assert!(fsm.has_state(B));
        assert!(fsm.has_transition(A, B));
        assert!(!fsm.has_transition(B, A));
        assert!(fsm.find_edge(A, B).is_some());
        assert!(fsm.find_edge(B, A).is_none());
    }

    #[test]
    fn ensure_state_twice_keeps_callbacks() {
        let fsm: Fsm<i32> = Fsm::new();
        let events = log();
        {
            let events = Rc::clone(&events);
            fsm.state(A).add_enter(move |_, _| push(&events, "kept"));
        }
        fsm.state(A);

        fsm.start(A).unwrap();

        assert_eq!(*events.borrow(), vec!["kept"]);
    }

    #[test]
    fn set_enter_replaces_earlier_registrations() {
        let fsm: Fsm<i32> = Fsm::new();
        let events = log();
        {
            let events = Rc::clone(&events);
            fsm.state(A).add_enter(move |_, _| push(&events, "stale"));
        }
        {
            let events = Rc::clone(&events);
            fsm.state(A).set_enter(move |_, _| push(&events, "fresh"));
        }

        fsm.start(A).unwrap();

        assert_eq!(*events.borrow(), vec!["fresh"]);
    }

    #[test]
    fn edge_handle_reports_endpoints_and_auto_detect() {
        let fsm: Fsm<i32> = Fsm::new();
        let edge = fsm.edge(A, B);

        assert_eq!(edge.endpoints(), (A, B));
        assert!(!edge.is_auto_detect());

        edge.guard(|_| true, true);
        assert!(edge.is_auto_detect());
    }

    #[test]
    fn weak_handle_does_not_keep_the_machine_alive() {
        let weak = {
            let fsm: Fsm<i32> = Fsm::new();
            fsm.state(A);
            fsm.downgrade()
        };
        assert!(weak.upgrade().is_none());
    }
}
