use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ostinato::Scheduler;

static HEALTHY: AtomicU64 = AtomicU64::new(0);
static FAULTY: AtomicU64 = AtomicU64::new(0);

/// A job that panics on every execution, scheduled next to a healthy one.
/// The healthy schedule keeps its pace and the faulty one keeps retrying on
/// its own period; the process never dies.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing at WARN level so only the fault lines show up;
    // the scheduler keeps this subscriber instead of installing its own.
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_target(false)
        .init();

    let scheduler = Scheduler::new();

    scheduler.add_job(
        Duration::from_secs(1),
        Duration::from_millis(300),
        || {
            HEALTHY.fetch_add(1, Ordering::SeqCst);
        },
        1,
    );

    scheduler.add_job(
        Duration::from_secs(1),
        Duration::from_millis(500),
        || {
            FAULTY.fetch_add(1, Ordering::SeqCst);
            let divisor = std::hint::black_box(0u64);
            let _ = 1 / divisor;
        },
        2,
    );

    scheduler.run_all();

    tokio::time::sleep(Duration::from_secs(5)).await;
    scheduler.shutdown().await;

    println!("\nhealthy executions: {}", HEALTHY.load(Ordering::SeqCst));
    println!("faulty attempts:    {}", FAULTY.load(Ordering::SeqCst));
    println!("both schedules survived every fault");

    Ok(())
}
