//! Text formatting for rival projections
//!
//! Rendering is left to the consumer; these helpers produce the strings an overlay
//! typically shows so every front end agrees on rounding and wording.

use crate::types::{CatchOutlook, RivalProjection};

/// Laps-to-catch with `precision` decimal places.
pub fn format_laps(laps: f64, precision: usize) -> String {
    format!("{:.*}", precision, laps)
}

/// Catch line for a rival, e.g. "Catch in: 4.53 laps" or "Won't catch".
pub fn catch_text(projection: &RivalProjection, precision: usize) -> String {
    match projection.outlook() {
        CatchOutlook::Closing { laps } if projection.is_ahead => {
            format!("Catch in: {} laps", format_laps(laps, precision))
        }
        CatchOutlook::Closing { laps } => {
            format!("Catches in: {} laps", format_laps(laps, precision))
        }
        CatchOutlook::WontCatch => "Won't catch".to_string(),
        CatchOutlook::Undetermined => "N/A".to_string(),
    }
}

/// Signed pace advantage in seconds per lap, e.g. "+1.000s/lap".
pub fn pace_text(pace_advantage: f64) -> String {
    let magnitude = pace_advantage.abs();
    if pace_advantage > 0.0 {
        format!("+{:.3}s/lap", magnitude)
    } else if pace_advantage < 0.0 {
        format!("-{:.3}s/lap", magnitude)
    } else {
        "±0.000s/lap".to_string()
    }
}

/// Time gap, e.g. "Gap: 4.53s". Unknown gaps render as "Gap: -".
pub fn gap_text(time_delta: Option<f64>) -> String {
    match time_delta {
        Some(seconds) => format!("Gap: {:.2}s", seconds),
        None => "Gap: -".to_string(),
    }
}
