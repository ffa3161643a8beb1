use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ostinato::Scheduler;

static STARTED: AtomicU64 = AtomicU64::new(0);
static FINISHED: AtomicU64 = AtomicU64::new(0);

/// A job that blows through its 100ms timeout budget on every run. Each
/// execution is abandoned at the deadline and the schedule moves on; the
/// abandoned work still finishes in the background.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = Scheduler::new();

    scheduler.add_job(
        Duration::from_millis(100),
        Duration::from_millis(500),
        || {
            STARTED.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(250));
            FINISHED.fetch_add(1, Ordering::SeqCst);
        },
        1,
    );

    scheduler.run_job(1);

    tokio::time::sleep(Duration::from_secs(3)).await;
    scheduler.shutdown().await;

    // Give stragglers a moment to drain before reading the counters.
    tokio::time::sleep(Duration::from_millis(500)).await;

    println!("\nexecutions started:  {}", STARTED.load(Ordering::SeqCst));
    println!("executions finished: {}", FINISHED.load(Ordering::SeqCst));
    println!("every start was reported as a timeout, yet the work completed unobserved");

    Ok(())
}
