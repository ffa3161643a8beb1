use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::error::ExecutionError;
use crate::task::JobRecord;
use crate::timeout;

/// Run one timed pass of a job: execute under the timeout budget, then pause
/// for whatever remains of the period.
///
/// The pause is drift-compensated: a run that took 30ms of a 100ms period
/// sleeps 70ms, and a run that overran its period sleeps zero (the next
/// iteration starts immediately). Lost time is never made up by running the
/// job twice.
///
/// A failed execution (timeout or panic) is raised to the caller without
/// sleeping here; the loop owns the failure-path pause.
pub(crate) async fn execute_timed(record: &JobRecord) -> Result<(), ExecutionError> {
    let start = Instant::now();

    timeout::run_with_deadline(Arc::clone(&record.job), record.timeout).await?;

    let actual = start.elapsed();
    let pause = record.period.saturating_sub(actual);

    info!(
        id = record.id,
        expected = ?record.timeout,
        actual = ?actual,
        "job finished"
    );

    tokio::time::sleep(pause).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Job;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn record_of(job: Arc<dyn Job>, timeout: Duration, period: Duration) -> JobRecord {
        JobRecord::new(1, job, timeout, period)
    }

    #[tokio::test]
    async fn pause_absorbs_execution_time() {
        let job: Arc<dyn Job> = Arc::new(|| {
            std::thread::sleep(Duration::from_millis(60));
        });
        let record = record_of(job, Duration::from_secs(1), Duration::from_millis(100));

        let start = Instant::now();
        execute_timed(&record).await.unwrap();
        let elapsed = start.elapsed();

        // One pass is execution plus the compensated remainder: about one
        // period, not execution + period.
        assert!(elapsed >= Duration::from_millis(95), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(160), "{elapsed:?}");
    }

    #[tokio::test]
    async fn overrun_yields_zero_pause() {
        let job: Arc<dyn Job> = Arc::new(|| {
            std::thread::sleep(Duration::from_millis(80));
        });
        // Period shorter than the execution: the next iteration is due
        // immediately after the run.
        let record = record_of(job, Duration::from_secs(1), Duration::from_millis(10));

        let start = Instant::now();
        execute_timed(&record).await.unwrap();
        let elapsed = start.elapsed();

        assert!(elapsed < Duration::from_millis(160), "{elapsed:?}");
    }

    #[tokio::test]
    async fn zero_period_runs_back_to_back() {
        let counter = Arc::new(AtomicU32::new(0));
        let observed = Arc::clone(&counter);
        let job: Arc<dyn Job> = Arc::new(move || {
            observed.fetch_add(1, Ordering::SeqCst);
        });
        let record = record_of(job, Duration::from_secs(1), Duration::ZERO);

        execute_timed(&record).await.unwrap();
        execute_timed(&record).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failure_skips_the_success_pause() {
        let job: Arc<dyn Job> = Arc::new(|| panic!("broken"));
        let record = record_of(job, Duration::from_secs(1), Duration::from_millis(500));

        let start = Instant::now();
        let result = execute_timed(&record).await;
        let elapsed = start.elapsed();

        assert!(result.is_err());
        assert!(elapsed < Duration::from_millis(400), "{elapsed:?}");
    }
}
