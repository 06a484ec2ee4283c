//! Shared fixtures for unit tests: a player page built on the in-memory DOM
//! and a host that records every port call.

use crate::action::{ActionEvent, ActionSpec};
use crate::dom::{MemoryDocument, MemoryElement};
use crate::error::{CoreError, Result};
use crate::model::{PlaybackState, Track};
use crate::port::{ActionHandler, ActionRegistry, PlayerStateSink};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// A player page with handles to every node the adapter reads or clicks.
pub(crate) struct PlayerPage {
    pub document: MemoryDocument,
    pub title: MemoryElement,
    pub artist: MemoryElement,
    pub album: Option<MemoryElement>,
    pub play: MemoryElement,
    pub skip: MemoryElement,
    pub replay: MemoryElement,
    pub like: MemoryElement,
    pub dislike: MemoryElement,
    pub duration: MemoryElement,
    pub volume_slider: MemoryElement,
    pub volume_click_target: MemoryElement,
    pub volume_handle: MemoryElement,
}

fn button(class: &str) -> MemoryElement {
    MemoryElement::new("button").with_class(class)
}

impl PlayerPage {
    /// Current layout: paused, with rating controls and volume at 40.
    pub fn build() -> Self {
        let document = MemoryDocument::new();
        let info = document
            .root()
            .append(MemoryElement::new("div").with_class("nowPlayingTopInfo__current"));
        let title = info
            .append(MemoryElement::new("div").with_class("Marquee__wrapper__content"))
            .append(MemoryElement::new("span").with_text("Little Wing"));
        let artist = info.append(
            MemoryElement::new("a")
                .with_class("nowPlayingTopInfo__current__artistName")
                .with_text("Jimi Hendrix"),
        );
        let album = info.append(
            MemoryElement::new("a")
                .with_class("nowPlayingTopInfo__current__albumName")
                .with_text("Axis: Bold as Love"),
        );
        Self::with_controls(document, title, artist, Some(album))
    }

    /// Legacy Tuner layout, which has no album line.
    pub fn build_tuner() -> Self {
        let document = MemoryDocument::new();
        let tuner = document
            .root()
            .append(MemoryElement::new("div").with_class("Tuner"));
        let title = tuner.append(
            MemoryElement::new("div")
                .with_class("Tuner__Audio__TrackDetail__title")
                .with_text("Castles Made of Sand"),
        );
        let artist = tuner.append(
            MemoryElement::new("div")
                .with_class("Tuner__Audio__TrackDetail__artist")
                .with_text("Jimi Hendrix"),
        );
        Self::with_controls(document, title, artist, None)
    }

    fn with_controls(
        document: MemoryDocument,
        title: MemoryElement,
        artist: MemoryElement,
        album: Option<MemoryElement>,
    ) -> Self {
        let root = document.root();
        let play = root.append(button("PlayButton").with_attribute("data-qa", "play_button"));
        let skip = root.append(button("SkipButton"));
        let replay = root.append(button("ReplayButton"));
        let like = root.append(button("ThumbUpButton").with_attribute("aria-checked", "false"));
        let dislike =
            root.append(button("ThumbDownButton").with_attribute("aria-checked", "false"));

        let control = root.append(MemoryElement::new("div").with_class("VolumeDurationControl"));
        let duration = control.append(MemoryElement::new("div").with_class("Duration"));
        duration.append(MemoryElement::text("1:02"));
        duration.append(MemoryElement::new("span").with_text("|"));
        duration.append(MemoryElement::text("2:25"));
        let volume_slider = control.append(MemoryElement::new("div").with_class("VolumeSlider"));
        let volume_click_target = volume_slider
            .append(MemoryElement::new("div").with_class("VolumeSlider__ClickTracker"));
        let volume_handle = volume_slider.append(
            MemoryElement::new("div")
                .with_class("VolumeSlider__Handle__HitBox")
                .with_attribute("aria-valuenow", "40"),
        );

        Self {
            document,
            title,
            artist,
            album,
            play,
            skip,
            replay,
            like,
            dislike,
            duration,
            volume_slider,
            volume_click_target,
            volume_handle,
        }
    }

    /// Flip the toggle to its pause face.
    pub fn show_pause(&self) {
        self.play.set_attribute("data-qa", "pause_button");
    }
}

/// One recorded call on the host ports.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HostCall {
    SetTrack(Track),
    SetPlaybackState(PlaybackState),
    SetCanGoPrev(bool),
    SetCanGoNext(bool),
    SetCanPlay(bool),
    SetCanPause(bool),
    SetCanSeek(bool),
    SetCanChangeVolume(bool),
    UpdateVolume(Option<f64>),
    SetTrackPosition(Option<String>),
    AddExtraActions(Vec<String>),
    AddAction(ActionSpec),
    Connect(String),
    UpdateEnabledFlags(BTreeMap<String, bool>),
    UpdateStates(BTreeMap<String, bool>),
}

/// Player-state sink and action registry that log calls in order.
#[derive(Clone, Default)]
pub(crate) struct RecordingHost {
    calls: Arc<Mutex<Vec<HostCall>>>,
    fail_on: Arc<Mutex<Option<&'static str>>>,
    handlers: Arc<Mutex<Vec<ActionHandler>>>,
}

impl fmt::Debug for RecordingHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingHost")
            .field("calls", &self.calls)
            .field("fail_on", &self.fail_on)
            .finish_non_exhaustive()
    }
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn take_calls(&self) -> Vec<HostCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    pub fn count(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    /// Deliver an activation to every connected handler, as the host would.
    pub fn emit(&self, event: &ActionEvent) {
        for handler in self.handlers.lock().unwrap().iter() {
            handler(event.clone());
        }
    }

    /// Make every call to `operation` fail until cleared with `None`.
    pub fn fail_on(&self, operation: Option<&'static str>) {
        *self.fail_on.lock().unwrap() = operation;
    }

    fn record(&self, operation: &'static str, call: HostCall) -> Result<()> {
        if *self.fail_on.lock().unwrap() == Some(operation) {
            return Err(CoreError::host(operation, "injected failure"));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl PlayerStateSink for RecordingHost {
    fn set_track(&self, track: &Track) -> Result<()> {
        self.record("set_track", HostCall::SetTrack(track.clone()))
    }

    fn set_playback_state(&self, state: PlaybackState) -> Result<()> {
        self.record("set_playback_state", HostCall::SetPlaybackState(state))
    }

    fn set_can_go_prev(&self, can: bool) -> Result<()> {
        self.record("set_can_go_prev", HostCall::SetCanGoPrev(can))
    }

    fn set_can_go_next(&self, can: bool) -> Result<()> {
        self.record("set_can_go_next", HostCall::SetCanGoNext(can))
    }

    fn set_can_play(&self, can: bool) -> Result<()> {
        self.record("set_can_play", HostCall::SetCanPlay(can))
    }

    fn set_can_pause(&self, can: bool) -> Result<()> {
        self.record("set_can_pause", HostCall::SetCanPause(can))
    }

    fn set_can_seek(&self, can: bool) -> Result<()> {
        self.record("set_can_seek", HostCall::SetCanSeek(can))
    }

    fn set_can_change_volume(&self, can: bool) -> Result<()> {
        self.record("set_can_change_volume", HostCall::SetCanChangeVolume(can))
    }

    fn update_volume(&self, volume: Option<f64>) -> Result<()> {
        self.record("update_volume", HostCall::UpdateVolume(volume))
    }

    fn set_track_position(&self, position: Option<&str>) -> Result<()> {
        self.record(
            "set_track_position",
            HostCall::SetTrackPosition(position.map(str::to_string)),
        )
    }

    fn add_extra_actions(&self, ids: &[&str]) -> Result<()> {
        self.record(
            "add_extra_actions",
            HostCall::AddExtraActions(ids.iter().map(ToString::to_string).collect()),
        )
    }
}

impl ActionRegistry for RecordingHost {
    fn add_action(&self, spec: &ActionSpec) -> Result<()> {
        self.record("add_action", HostCall::AddAction(*spec))
    }

    fn connect(&self, event: &str, handler: ActionHandler) -> Result<()> {
        self.record("connect", HostCall::Connect(event.to_string()))?;
        self.handlers.lock().unwrap().push(handler);
        Ok(())
    }

    fn update_enabled_flags(&self, flags: &BTreeMap<String, bool>) -> Result<()> {
        self.record("update_enabled_flags", HostCall::UpdateEnabledFlags(flags.clone()))
    }

    fn update_states(&self, states: &BTreeMap<String, bool>) -> Result<()> {
        self.record("update_states", HostCall::UpdateStates(states.clone()))
    }
}
