use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinError;

use crate::error::ExecutionError;
use crate::task::Job;

/// Run one job execution under a hard deadline.
///
/// The job body goes to a blocking worker thread and the caller races its
/// join handle against the deadline. If the deadline wins, the call returns
/// [`ExecutionError::TimedOut`] promptly and the in-flight work is NOT
/// cancelled: the handle is dropped, the work runs detached to completion
/// and its outcome is discarded. A panic inside the body is caught at the
/// blocking task's boundary and surfaces as [`ExecutionError::Panicked`]
/// instead of unwinding into the caller.
pub(crate) async fn run_with_deadline(
    job: Arc<dyn Job>,
    deadline: Duration,
) -> Result<(), ExecutionError> {
    let work = tokio::task::spawn_blocking(move || job.run());

    match tokio::time::timeout(deadline, work).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(join_err)) => Err(ExecutionError::Panicked(panic_message(join_err))),
        Err(_elapsed) => Err(ExecutionError::TimedOut),
    }
}

/// Extract a printable message from a panicked blocking task.
fn panic_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => {
            if let Some(msg) = payload.downcast_ref::<&str>() {
                (*msg).to_string()
            } else if let Some(msg) = payload.downcast_ref::<String>() {
                msg.clone()
            } else {
                "non-string panic payload".to_string()
            }
        }
        // Blocking tasks are never aborted here, but JoinError is not
        // guaranteed to be a panic by its type.
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    #[tokio::test]
    async fn completes_within_deadline() {
        let counter = Arc::new(AtomicU32::new(0));
        let observed = Arc::clone(&counter);
        let job: Arc<dyn Job> = Arc::new(move || {
            observed.fetch_add(1, Ordering::SeqCst);
        });

        let result = run_with_deadline(job, Duration::from_secs(1)).await;

        assert!(result.is_ok());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn returns_promptly_at_the_deadline() {
        let job: Arc<dyn Job> = Arc::new(|| {
            std::thread::sleep(Duration::from_millis(400));
        });

        let start = Instant::now();
        let result = run_with_deadline(job, Duration::from_millis(50)).await;
        let elapsed = start.elapsed();

        assert!(matches!(result, Err(ExecutionError::TimedOut)));
        // The call must return at the deadline boundary, not after the
        // abandoned work finally finishes.
        assert!(
            elapsed < Duration::from_millis(300),
            "timed-out call took {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn abandoned_work_still_runs_to_completion() {
        let counter = Arc::new(AtomicU32::new(0));
        let observed = Arc::clone(&counter);
        let job: Arc<dyn Job> = Arc::new(move || {
            std::thread::sleep(Duration::from_millis(100));
            observed.fetch_add(1, Ordering::SeqCst);
        });

        let result = run_with_deadline(job, Duration::from_millis(10)).await;
        assert!(matches!(result, Err(ExecutionError::TimedOut)));
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        // The orphan keeps running unobserved and eventually finishes.
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn panic_is_caught_and_reported() {
        let job: Arc<dyn Job> = Arc::new(|| panic!("boom"));

        let result = run_with_deadline(job, Duration::from_secs(1)).await;

        match result {
            Err(ExecutionError::Panicked(msg)) => assert!(msg.contains("boom")),
            other => panic!("expected Panicked, got {other:?}"),
        }
    }
}
