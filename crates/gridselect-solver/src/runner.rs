//! Backend invocation, optionally bounded by a wall-clock limit.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use gridselect_core::{BackendOutput, RelaxationBackend, RelaxationProgram, SolverStatus};
use tracing::{debug, warn};

/// Runs `backend` on `program`.
///
/// Without a limit the backend runs on the calling thread. With a limit it
/// runs on a dedicated worker thread and the caller waits at most `limit`;
/// on expiry the result is [`SolverStatus::TimedOut`].
///
/// A timed-out worker is detached, not cancelled: it keeps its CPU and
/// memory until the backend returns on its own, and its late result is
/// dropped. Repeated solves with a limit far below the backend's running
/// time therefore accumulate live worker threads.
pub fn run_backend(
    backend: &Arc<dyn RelaxationBackend>,
    program: RelaxationProgram,
    limit: Option<Duration>,
) -> BackendOutput {
    let Some(limit) = limit else {
        return backend.solve(&program);
    };

    let (tx, rx) = mpsc::channel();
    let worker_backend = Arc::clone(backend);
    let spawned = thread::Builder::new()
        .name("gridselect-backend".to_string())
        .spawn(move || {
            let output = worker_backend.solve(&program);
            // Receiver is gone once the caller timed out.
            let _ = tx.send(output);
        });

    if let Err(err) = spawned {
        warn!(event = "worker_spawn_failed", error = %err);
        return BackendOutput::without_solution(
            SolverStatus::Error,
            format!("failed to spawn backend worker: {err}"),
        );
    }

    match rx.recv_timeout(limit) {
        Ok(output) => output,
        Err(RecvTimeoutError::Timeout) => {
            debug!(event = "backend_abandoned", limit_ms = limit.as_millis() as u64);
            BackendOutput::without_solution(
                SolverStatus::TimedOut,
                format!("backend did not finish within {limit:?}"),
            )
        }
        Err(RecvTimeoutError::Disconnected) => BackendOutput::without_solution(
            SolverStatus::Error,
            "backend worker exited without a result",
        ),
    }
}
