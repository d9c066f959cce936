use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Signal;

/// Ranked output of one complete generation cycle. Replaced wholesale
/// when the next cycle finishes; consumers never observe a half-updated
/// list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResult {
    pub signals: Vec<Signal>,
    /// Single advisory set when at least one symbol failed this cycle.
    pub notice: Option<String>,
    /// `None` until the first cycle has completed.
    pub completed_at: Option<DateTime<Utc>>,
}
