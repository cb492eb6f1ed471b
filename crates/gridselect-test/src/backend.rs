//! Backend test doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use gridselect_core::{BackendOutput, RelaxationBackend, RelaxationProgram, SolverStatus};

/// Returns the same output for every program.
#[derive(Clone, Debug)]
pub struct ScriptedBackend {
    output: BackendOutput,
}

impl ScriptedBackend {
    pub fn new(output: BackendOutput) -> Self {
        Self { output }
    }

    /// Reports `status` without a matrix.
    pub fn failing(status: SolverStatus) -> Self {
        Self::new(BackendOutput::without_solution(status, "scripted failure"))
    }
}

impl RelaxationBackend for ScriptedBackend {
    fn solve(&self, _program: &RelaxationProgram) -> BackendOutput {
        self.output.clone()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Counts calls before delegating to an inner backend.
///
/// # Example
///
/// ```
/// use gridselect_core::{RelaxationBackend, RelaxationProgram, SolverStatus};
/// use gridselect_test::{CountingBackend, ScriptedBackend};
///
/// let backend = CountingBackend::new(ScriptedBackend::failing(SolverStatus::Error));
/// assert_eq!(backend.calls(), 0);
/// backend.solve(&RelaxationProgram::maximize(1));
/// assert_eq!(backend.calls(), 1);
/// ```
#[derive(Debug)]
pub struct CountingBackend<B> {
    inner: B,
    calls: AtomicUsize,
}

impl<B: RelaxationBackend> CountingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `solve` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<B: RelaxationBackend> RelaxationBackend for CountingBackend<B> {
    fn solve(&self, program: &RelaxationProgram) -> BackendOutput {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.solve(program)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Sleeps before reporting an error, to exercise time limits.
#[derive(Clone, Copy, Debug)]
pub struct StallingBackend {
    delay: Duration,
}

impl StallingBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl RelaxationBackend for StallingBackend {
    fn solve(&self, _program: &RelaxationProgram) -> BackendOutput {
        thread::sleep(self.delay);
        BackendOutput::without_solution(SolverStatus::Error, "stalled")
    }

    fn name(&self) -> &str {
        "stalling"
    }
}
