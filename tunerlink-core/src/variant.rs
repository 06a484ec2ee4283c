//! UI variant identification and per-variant selector tables.
//!
//! The service ships two skins of the same player: the current
//! "now playing" layout and the legacy "Tuner" layout. Controls are resolved
//! through a [`SelectorTable`] picked for the detected (or configured)
//! variant. Track metadata uses fixed fallback chains across both skins.

use crate::dom::Document;
use serde::{Deserialize, Serialize};

/// Root of the current layout's track info panel.
pub const NOW_PLAYING_MARKER: &str = ".nowPlayingTopInfo__current";

/// Root of the legacy Tuner layout.
pub const TUNER_MARKER: &str = ".Tuner";

/// Attribute inspected to tell a play button rendered as pause.
pub const PAUSE_MARKER_ATTRIBUTE: &str = "data-qa";

/// Value of [`PAUSE_MARKER_ATTRIBUTE`] marking the toggle as a pause button.
pub const PAUSE_MARKER_VALUE: &str = "pause_button";

/// Identifies which skin of the player is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiVariant {
    /// Current layout, with rating controls.
    NowPlaying,
    /// Legacy Tuner layout.
    Tuner,
}

impl UiVariant {
    /// Stable identifier used in config and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NowPlaying => "now_playing",
            Self::Tuner => "tuner",
        }
    }

    /// Selector table for this variant.
    #[must_use]
    pub const fn selectors(self) -> &'static SelectorTable {
        match self {
            Self::NowPlaying => &NOW_PLAYING_SELECTORS,
            Self::Tuner => &TUNER_SELECTORS,
        }
    }

    /// Detect the rendered variant from variant-specific markup.
    ///
    /// The current layout wins when both markers are present, and is also the
    /// fallback when neither is.
    pub fn detect<D: Document + ?Sized>(document: &D) -> Self {
        if document.query_selector(NOW_PLAYING_MARKER).is_some() {
            Self::NowPlaying
        } else if document.query_selector(TUNER_MARKER).is_some() {
            Self::Tuner
        } else {
            Self::NowPlaying
        }
    }
}

impl std::fmt::Display for UiVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the Locator picks its selector table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantSetting {
    /// Detect on every resolution.
    #[default]
    Auto,
    NowPlaying,
    Tuner,
}

impl VariantSetting {
    /// Resolve to a concrete variant, running detection for `Auto`.
    pub fn resolve<D: Document + ?Sized>(self, document: &D) -> UiVariant {
        match self {
            Self::Auto => UiVariant::detect(document),
            Self::NowPlaying => UiVariant::NowPlaying,
            Self::Tuner => UiVariant::Tuner,
        }
    }
}

/// Selectors for the transport, rating and volume controls of one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorTable {
    /// Play/pause toggle. Rendered as pause when the pause marker is set.
    pub play: &'static str,
    pub skip: &'static str,
    pub replay: &'static str,
    /// Thumbs-up control, `None` where the skin has no rating controls.
    pub like: Option<&'static str>,
    /// Thumbs-down control, `None` where the skin has no rating controls.
    pub dislike: Option<&'static str>,
    /// Elapsed/total time display, also shifted aside to reveal the slider.
    pub duration: &'static str,
    pub volume_slider: &'static str,
    pub volume_click_target: &'static str,
    /// Slider handle carrying `aria-valuenow` (0-100).
    pub volume_handle: &'static str,
}

pub const NOW_PLAYING_SELECTORS: SelectorTable = SelectorTable {
    play: ".PlayButton",
    skip: ".SkipButton",
    replay: ".ReplayButton",
    like: Some(".ThumbUpButton"),
    dislike: Some(".ThumbDownButton"),
    duration: ".VolumeDurationControl .Duration",
    volume_slider: ".VolumeDurationControl .VolumeSlider",
    volume_click_target: ".VolumeDurationControl .VolumeSlider__ClickTracker",
    volume_handle: ".VolumeDurationControl .VolumeSlider__Handle__HitBox",
};

pub const TUNER_SELECTORS: SelectorTable = SelectorTable {
    play: ".PlayButton",
    skip: ".SkipButton",
    replay: ".ReplayButton",
    like: None,
    dislike: None,
    duration: ".VolumeDurationControl .Duration",
    volume_slider: ".VolumeDurationControl .VolumeSlider",
    volume_click_target: ".VolumeDurationControl .VolumeSlider__ClickTracker",
    volume_handle: ".VolumeDurationControl .VolumeSlider__Handle__HitBox",
};

/// Track metadata fallback chains, tried in order; first non-empty text wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSelectors {
    pub title: &'static [&'static str],
    pub artist: &'static [&'static str],
    pub album: &'static [&'static str],
}

pub const TRACK_SELECTORS: TrackSelectors = TrackSelectors {
    title: &[
        ".nowPlayingTopInfo__current .Marquee__wrapper__content",
        ".Tuner .Tuner__Audio__TrackDetail__title",
    ],
    artist: &[
        ".nowPlayingTopInfo__current .nowPlayingTopInfo__current__artistName",
        ".Tuner .Tuner__Audio__TrackDetail__artist",
    ],
    album: &[".nowPlayingTopInfo__current .nowPlayingTopInfo__current__albumName"],
};
