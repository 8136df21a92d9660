//! # taskhub-worker
//!
//! Scheduled background jobs for TaskHub. The only job in the core is
//! the invite expiry sweep, run on a cron schedule independent of any
//! request.

pub mod jobs;
pub mod scheduler;

pub use scheduler::WorkerScheduler;
