use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::executor;
use crate::task::JobRecord;

/// Drive one job's periodic loop until its running flag is cleared.
///
/// The flag is observed only between iterations: an in-flight execution,
/// including its compensated pause, always completes before a stop takes
/// effect. The spawned task finishing is the loop's completion signal.
///
/// Failures are absorbed per iteration. A timeout or a panic inside the job
/// is logged and the schedule continues: one bad execution never ends the
/// loop, and it never reaches the scheduler or the process. The failure path
/// still pauses for the compensated remainder of the period so a job that
/// fails instantly cannot spin faster than its schedule.
pub(crate) async fn run_loop(record: JobRecord, running: Arc<AtomicBool>) {
    while running.load(Ordering::Acquire) {
        info!(id = record.id, "job started");

        let start = Instant::now();
        if let Err(err) = executor::execute_timed(&record).await {
            error!(id = record.id, kind = err.kind(), "job execution failed: {err}");
            warn!(id = record.id, "iteration abandoned");

            let pause = record.period.saturating_sub(start.elapsed());
            tokio::time::sleep(pause).await;
        }
    }

    info!(id = record.id, "job loop exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Job;
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    #[tokio::test]
    async fn loop_exits_when_flag_clears() {
        let counter = Arc::new(AtomicU32::new(0));
        let observed = Arc::clone(&counter);
        let job: Arc<dyn Job> = Arc::new(move || {
            observed.fetch_add(1, Ordering::SeqCst);
        });
        let record = JobRecord::new(
            7,
            job,
            Duration::from_secs(1),
            Duration::from_millis(20),
        );

        let running = Arc::new(AtomicBool::new(true));
        let handle = tokio::spawn(run_loop(record, Arc::clone(&running)));

        tokio::time::sleep(Duration::from_millis(70)).await;
        running.store(false, Ordering::Release);

        // The stop is cooperative; the task must still finish on its own.
        tokio::time::timeout(Duration::from_millis(500), handle)
            .await
            .expect("loop did not exit after stop")
            .unwrap();
        assert!(counter.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn failing_job_keeps_its_schedule() {
        let attempts = Arc::new(AtomicU32::new(0));
        let observed = Arc::clone(&attempts);
        let job: Arc<dyn Job> = Arc::new(move || {
            observed.fetch_add(1, Ordering::SeqCst);
            panic!("always fails");
        });
        let record = JobRecord::new(
            8,
            job,
            Duration::from_secs(1),
            Duration::from_millis(50),
        );

        let running = Arc::new(AtomicBool::new(true));
        let handle = tokio::spawn(run_loop(record, Arc::clone(&running)));

        tokio::time::sleep(Duration::from_millis(240)).await;
        running.store(false, Ordering::Release);
        let _ = tokio::time::timeout(Duration::from_millis(500), handle).await;

        let n = attempts.load(Ordering::SeqCst);
        // The loop retried on the period grid: not once (terminal), not
        // dozens of times (hot loop).
        assert!((2..=7).contains(&n), "attempts = {n}");
    }

    #[tokio::test]
    async fn stop_waits_for_the_iteration_in_flight() {
        let job: Arc<dyn Job> = Arc::new(|| {
            std::thread::sleep(Duration::from_millis(100));
        });
        let record = JobRecord::new(
            9,
            job,
            Duration::from_secs(1),
            Duration::from_millis(150),
        );

        let running = Arc::new(AtomicBool::new(true));
        let handle = tokio::spawn(run_loop(record, Arc::clone(&running)));

        // Clear the flag mid-execution: the iteration (run + pause) finishes
        // before the loop observes the stop.
        tokio::time::sleep(Duration::from_millis(30)).await;
        running.store(false, Ordering::Release);

        let start = Instant::now();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("loop did not exit")
            .unwrap();
        let waited = start.elapsed();

        assert!(waited >= Duration::from_millis(80), "{waited:?}");
    }
}
