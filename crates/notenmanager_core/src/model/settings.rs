//! Application settings passed explicitly into core calls.
//!
//! # Invariants
//! - Missing fields in persisted settings fall back to `Default`.
//! - `target_average` is raw user text and may be unparsable while typing.

use crate::model::scale::GradingScale;
use crate::stats::averages::TargetComparison;
use serde::{Deserialize, Serialize};

/// Default target average text for fresh installs.
pub const DEFAULT_TARGET_AVERAGE: &str = "3.0";

/// User-facing configuration of the grade tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub user_name: String,
    pub class_name: String,
    pub is_dark_mode: bool,
    pub show_notifications: bool,
    pub show_weekly_summary: bool,
    /// Free-text target average as typed by the user.
    pub target_average: String,
    /// Active grading scale. Every stored grade lies on this scale.
    pub scale: GradingScale,
    /// Pins the target comparison direction. `None` derives it from the
    /// scale orientation.
    pub target_comparison: Option<TargetComparison>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            class_name: String::new(),
            is_dark_mode: false,
            show_notifications: false,
            show_weekly_summary: false,
            target_average: DEFAULT_TARGET_AVERAGE.to_string(),
            scale: GradingScale::default(),
            target_comparison: None,
        }
    }
}

impl AppSettings {
    /// Comparison used for the target-reached flag.
    pub fn effective_target_comparison(&self) -> TargetComparison {
        self.target_comparison
            .unwrap_or_else(|| TargetComparison::for_scale(&self.scale))
    }
}
