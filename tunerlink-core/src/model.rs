use crate::action::ExtraAction;
use crate::time::{parse_clock, DurationExt};
use serde::Serialize;
use std::time::Duration;

/// Playback state as inferred from the visible transport control.
///
/// The page shows the action that is *available*: a play button means
/// playback is paused, a pause button means it is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Unknown,
    Paused,
    Playing,
}

impl PlaybackState {
    /// Derive the state from which of the toggle's two faces is usable.
    #[must_use]
    pub const fn from_controls(has_play: bool, has_pause: bool) -> Self {
        if has_play {
            Self::Paused
        } else if has_pause {
            Self::Playing
        } else {
            Self::Unknown
        }
    }

    /// Numeric code used by the host's player-state object.
    #[must_use]
    pub const fn wire_code(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::Paused => 1,
            Self::Playing => 2,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Paused => "paused",
            Self::Playing => "playing",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata of the current track, as published to the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Never scraped; always absent.
    pub art_location: Option<String>,
    /// Never scraped; always absent.
    pub rating: Option<f64>,
    /// Total duration text, e.g. `"3:41"`.
    pub length: Option<String>,
}

/// Elapsed and total time text read from the duration display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSnapshot {
    pub elapsed: String,
    pub total: String,
}

impl TimeSnapshot {
    #[must_use]
    pub fn elapsed_duration(&self) -> Option<Duration> {
        parse_clock(&self.elapsed)
    }

    #[must_use]
    pub fn total_duration(&self) -> Option<Duration> {
        parse_clock(&self.total)
    }
}

/// Transport capability flags derived from control presence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub can_go_prev: bool,
    pub can_go_next: bool,
    pub can_play: bool,
    pub can_pause: bool,
    /// The page offers no seeking; always `false`.
    pub can_seek: bool,
    pub can_change_volume: bool,
}

/// Enabled/checked flags of an extra action for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionAvailability {
    /// The control is present and usable.
    pub enabled: bool,
    /// The control reports `aria-checked="true"`.
    pub active: bool,
}

/// Everything published to the host in one poll tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub track: Track,
    pub state: PlaybackState,
    pub capabilities: Capabilities,
    /// One entry per [`ExtraAction::ALL`], in that order.
    pub extra_actions: Vec<(ExtraAction, ActionAvailability)>,
    pub time: Option<TimeSnapshot>,
    /// Volume as a `0.0..=1.0` fraction.
    pub volume: Option<f64>,
}

impl Snapshot {
    /// Elapsed time text, `None` when unavailable or empty.
    #[must_use]
    pub fn position(&self) -> Option<&str> {
        self.time
            .as_ref()
            .map(|time| time.elapsed.as_str())
            .filter(|text| !text.is_empty())
    }

    /// Elapsed time in milliseconds, for logging.
    #[must_use]
    pub fn position_ms(&self) -> Option<u64> {
        self.time
            .as_ref()
            .and_then(TimeSnapshot::elapsed_duration)
            .map(|elapsed| elapsed.as_millis_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_state_from_controls() {
        assert_eq!(PlaybackState::from_controls(true, false), PlaybackState::Paused);
        assert_eq!(PlaybackState::from_controls(false, true), PlaybackState::Playing);
        assert_eq!(PlaybackState::from_controls(false, false), PlaybackState::Unknown);
    }

    #[test]
    fn test_playback_state_default() {
        assert_eq!(PlaybackState::default(), PlaybackState::Unknown);
        assert_eq!(PlaybackState::Playing.to_string(), "playing");
    }

    #[test]
    fn test_playback_state_wire_codes() {
        assert_eq!(PlaybackState::Unknown.wire_code(), 0);
        assert_eq!(PlaybackState::Paused.wire_code(), 1);
        assert_eq!(PlaybackState::Playing.wire_code(), 2);
    }

    #[test]
    fn test_track_serializes_camel_case_with_nulls() {
        let track = Track {
            title: Some("Song".to_string()),
            length: Some("3:41".to_string()),
            ..Track::default()
        };
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["title"], "Song");
        assert_eq!(json["length"], "3:41");
        assert!(json["artLocation"].is_null());
        assert!(json["rating"].is_null());
        assert!(json["album"].is_null());
    }

    #[test]
    fn test_time_snapshot_durations() {
        let time = TimeSnapshot {
            elapsed: "1:05".to_string(),
            total: "1:02:03".to_string(),
        };
        assert_eq!(time.elapsed_duration(), Some(Duration::from_secs(65)));
        assert_eq!(time.total_duration(), Some(Duration::from_secs(3723)));
    }

    #[test]
    fn test_snapshot_position() {
        let mut snapshot = Snapshot::default();
        assert_eq!(snapshot.position(), None);

        snapshot.time = Some(TimeSnapshot {
            elapsed: String::new(),
            total: "3:00".to_string(),
        });
        assert_eq!(snapshot.position(), None);

        snapshot.time = Some(TimeSnapshot {
            elapsed: "0:42".to_string(),
            total: "3:00".to_string(),
        });
        assert_eq!(snapshot.position(), Some("0:42"));
        assert_eq!(snapshot.position_ms(), Some(42_000));
    }
}
