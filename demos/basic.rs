use cadence_framework::{Frequency, Scheduler, StartOf, TaskOptions};
use chrono::Local;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()),
        )
        .init();

    let scheduler: Scheduler<&str> = Scheduler::new("demo");

    // One-shot task that also fires immediately at registration.
    scheduler
        .schedule(
            TaskOptions::new()
                .name("reminder")
                .frequency(Frequency::Deciminute)
                .once(true)
                .immediate(true)
                .callback(|ctx: &str| async move {
                    let now = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    println!("[{}] [REMINDER] context={}", now, ctx);
                }),
        )
        .await?;

    // A repeating task re-arms from its original anchor every cycle, so once
    // that anchor's next fire is in the past it refires as soon as possible.
    // This heartbeat stops itself after three fires.
    let beats = Arc::new(AtomicU32::new(0));
    let beats_in_task = beats.clone();
    let scheduler_in_task = scheduler.clone();
    scheduler
        .schedule(
            TaskOptions::new()
                .name("heartbeat")
                .frequency(Frequency::Deciminute)
                .callback(move |_ctx| {
                    let beats = beats_in_task.clone();
                    let scheduler = scheduler_in_task.clone();
                    async move {
                        let count = beats.fetch_add(1, Ordering::SeqCst) + 1;
                        println!("[HEARTBEAT] fire #{}", count);
                        if count >= 3 {
                            scheduler.unschedule("heartbeat");
                            println!("[HEARTBEAT] unscheduled after {} fires", count);
                        }
                    }
                }),
        )
        .await?;

    // Rounded fire times: daily frequency snapped to the start of the hour.
    scheduler
        .schedule(
            TaskOptions::new()
                .name("daily-report")
                .frequency(Frequency::Daily)
                .start_of(StartOf::Hour)
                .once(true)
                .callback(|_ctx| async {
                    println!("[DAILY-REPORT] fired");
                }),
        )
        .await?;
    println!(
        "daily-report next fires at {:?}",
        scheduler.next_fire_time("daily-report")
    );

    tokio::time::sleep(std::time::Duration::from_secs(15)).await;
    println!("tasks still registered: {}", scheduler.task_count());
    Ok(())
}
