//! Higher-order logging reducer.
//!
//! [`logging`] wraps a reducer so that every completed transition is reported
//! to a [`TransitionSink`]. The wrapped reducer always runs to completion
//! first, so the sink observes the post-transition state, and the state is
//! returned to the caller untouched.
//!
//! When wrappers nest, each one reports after its inner reducer returns: the
//! innermost wrapper's sink fires first and the outermost fires last.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::Serialize;

use super::reducer::Reducer;

/// Destination for transition records: the action and the state it produced.
///
/// Sinks observe; they cannot change the state handed back to the store.
pub trait TransitionSink<S, A> {
    fn record(&self, action: &A, state: &S);
}

impl<S, A, F> TransitionSink<S, A> for F
where
    F: Fn(&A, &S),
{
    fn record(&self, action: &A, state: &S) {
        self(action, state)
    }
}

/// Reducer wrapper built by [`logging`].
pub struct Logging<R, K> {
    reducer: R,
    sink: K,
}

impl<R, K> Logging<R, K> {
    pub fn new(reducer: R, sink: K) -> Self {
        Self { reducer, sink }
    }

    /// The wrapped reducer.
    pub fn inner(&self) -> &R {
        &self.reducer
    }

    pub fn into_parts(self) -> (R, K) {
        (self.reducer, self.sink)
    }
}

impl<R, K> Reducer for Logging<R, K>
where
    R: Reducer,
    K: TransitionSink<R::State, R::Action>,
{
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: Self::State, action: &Self::Action) -> Self::State {
        let next = self.reducer.reduce(state, action);
        self.sink.record(action, &next);
        next
    }
}

impl<R: fmt::Debug, K> fmt::Debug for Logging<R, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logging")
            .field("reducer", &self.reducer)
            .finish_non_exhaustive()
    }
}

/// Wrap `reducer` so each transition is reported to `sink`.
pub fn logging<R, K>(reducer: R, sink: K) -> Logging<R, K>
where
    R: Reducer,
    K: TransitionSink<R::State, R::Action>,
{
    Logging::new(reducer, sink)
}

/// Emits each transition as a `tracing` event with debug-formatted fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl<S: fmt::Debug, A: fmt::Debug> TransitionSink<S, A> for TracingSink {
    fn record(&self, action: &A, state: &S) {
        tracing::info!(
            target: "primetime::transition",
            action = ?action,
            state = ?state,
            "transition"
        );
    }
}

/// Writes one JSON object per transition to `W`:
/// `{"seq": n, "action": ..., "state": ...}`.
///
/// Write failures are logged and otherwise ignored.
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
    seq: AtomicU64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            seq: AtomicU64::new(0),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W, S, A> TransitionSink<S, A> for JsonLinesSink<W>
where
    W: Write,
    S: Serialize,
    A: Serialize,
{
    fn record(&self, action: &A, state: &S) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let record = Record { seq, action, state };
        let mut writer = self.writer.lock();
        if let Err(err) = write_line(&mut *writer, &record) {
            tracing::warn!(seq, error = %err, "failed to write transition record");
        }
    }
}

#[derive(Serialize)]
struct Record<'a, S, A> {
    seq: u64,
    action: &'a A,
    state: &'a S,
}

fn write_line<W: Write, T: Serialize>(writer: &mut W, line: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, line)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

impl<W> fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonLinesSink")
            .field("seq", &self.seq.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
