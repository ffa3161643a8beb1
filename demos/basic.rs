use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ostinato::Scheduler;

static FAST: AtomicU64 = AtomicU64::new(0);
static SLOW: AtomicU64 = AtomicU64::new(0);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🚀 Two jobs on different periods...\n");
    println!("📊 Job 1: every 500ms");
    println!("📊 Job 2: every 2s\n");

    let scheduler = Scheduler::new();

    scheduler.add_job(
        Duration::from_secs(1),
        Duration::from_millis(500),
        || {
            let n = FAST.fetch_add(1, Ordering::SeqCst) + 1;
            println!("[FAST] execution #{} at {}", n, chrono::Local::now().format("%H:%M:%S%.3f"));
        },
        1,
    );

    scheduler.add_job(
        Duration::from_secs(1),
        Duration::from_secs(2),
        || {
            SLOW.fetch_add(1, Ordering::SeqCst);
            println!("[SLOW] every 2 seconds");
        },
        2,
    );

    scheduler.run_all();

    // Run for 10 seconds to see the pattern
    tokio::time::sleep(Duration::from_secs(10)).await;
    scheduler.shutdown().await;

    println!("\n📈 RESULTS after 10 seconds:");
    println!("   500ms job: {} executions (expected ~20)", FAST.load(Ordering::SeqCst));
    println!("   2s job:    {} executions (expected ~5)", SLOW.load(Ordering::SeqCst));

    Ok(())
}
