//! Cadence Scheduler - Recurring task scheduling engine
//!
//! This crate owns named, periodic tasks: it computes each task's next fire
//! time from a calendar-style frequency, keeps exactly one pending timer
//! armed per task, and re-arms after every fire unless the task is one-shot.
//!
//! Two components:
//!
//! - [`TimerQueue`]: arms single-shot delayed invocations and computes
//!   millisecond delays from absolute target timestamps. Owns no task
//!   semantics.
//! - [`Scheduler`]: owns the registry of named task definitions and drives
//!   the arm/fire/re-arm cycle on top of the timer queue.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use cadence_scheduler::{Frequency, Scheduler, TaskOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scheduler = Scheduler::new(());
//!
//!     scheduler
//!         .schedule(
//!             TaskOptions::new()
//!                 .name("heartbeat")
//!                 .frequency(Frequency::Minute)
//!                 .callback(|_ctx| async {
//!                     println!("still alive");
//!                 }),
//!         )
//!         .await?;
//!
//!     tokio::signal::ctrl_c().await?;
//!     Ok(())
//! }
//! ```

mod error;
mod frequency;
mod queue;
mod scheduler;
mod task;

// Re-export public API
pub use error::SchedulerError;
pub use frequency::{Frequency, StartOf};
pub use queue::{parse_timestamp, TimerHandle, TimerQueue};
pub use scheduler::Scheduler;
pub use task::{TaskCallback, TaskDefinition, TaskOptions};
