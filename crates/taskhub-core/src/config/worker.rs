//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background job worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron schedule for the invite expiry sweep (six-field cron syntax).
    #[serde(default = "default_invite_sweep_schedule")]
    pub invite_sweep_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            invite_sweep_schedule: default_invite_sweep_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_invite_sweep_schedule() -> String {
    // Hourly, at the top of the hour.
    "0 0 * * * *".to_string()
}
