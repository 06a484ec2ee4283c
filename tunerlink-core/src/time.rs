//! Time display extraction and clock-text utilities.

use crate::dom::{Document, Element};
use crate::model::TimeSnapshot;
use std::time::Duration;

/// Read the `elapsed <separator> total` display at `selector`.
///
/// The display is only trusted when it has exactly three child nodes; any
/// other shape means the layout is still rendering and the time is treated
/// as unavailable for this tick.
pub fn extract_time<D: Document + ?Sized>(document: &D, selector: &str) -> Option<TimeSnapshot> {
    let display = document.query_selector(selector)?;
    let children = display.child_nodes();
    let [elapsed, _, total] = children.as_slice() else {
        return None;
    };
    Some(TimeSnapshot {
        elapsed: elapsed.text_content().unwrap_or_default().trim().to_string(),
        total: total.text_content().unwrap_or_default().trim().to_string(),
    })
}

/// Parse clock text like `3:05` or `1:02:03` into a duration.
#[must_use]
pub fn parse_clock(text: &str) -> Option<Duration> {
    let text = text.trim().trim_start_matches('-');
    if text.is_empty() {
        return None;
    }
    let mut parts = text.split(':').rev();
    let seconds: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next().map_or(Some(0), |m| m.parse().ok())?;
    let hours: u64 = parts.next().map_or(Some(0), |h| h.parse().ok())?;
    if parts.next().is_some() || (seconds >= 60 && (minutes > 0 || hours > 0)) {
        return None;
    }
    let total = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;
    Some(Duration::from_secs(total))
}

/// Extension trait for safe Duration conversions.
pub trait DurationExt {
    /// Convert duration to milliseconds as u64, saturating at `u64::MAX`.
    fn as_millis_u64(&self) -> u64;
}

impl DurationExt for Duration {
    fn as_millis_u64(&self) -> u64 {
        u64::try_from(self.as_millis()).unwrap_or(u64::MAX)
    }
}
