//! Ports to the host application.
//!
//! The host owns the player-state object and the action registry; the adapter
//! only sees them through these traits. Every call may fail, since the host
//! side can throw.

use crate::action::{ActionEvent, ActionSpec};
use crate::error::Result;
use crate::model::{PlaybackState, Track};
use std::collections::BTreeMap;

/// Host-side media player state the snapshot is published into.
///
/// Implementations must tolerate redundant identical updates; the adapter
/// publishes every tick without diffing.
pub trait PlayerStateSink {
    fn set_track(&self, track: &Track) -> Result<()>;
    fn set_playback_state(&self, state: PlaybackState) -> Result<()>;
    fn set_can_go_prev(&self, can: bool) -> Result<()>;
    fn set_can_go_next(&self, can: bool) -> Result<()>;
    fn set_can_play(&self, can: bool) -> Result<()>;
    fn set_can_pause(&self, can: bool) -> Result<()>;
    fn set_can_seek(&self, can: bool) -> Result<()>;
    fn set_can_change_volume(&self, can: bool) -> Result<()>;
    /// Volume as a `0.0..=1.0` fraction, `None` when unavailable.
    fn update_volume(&self, volume: Option<f64>) -> Result<()>;
    fn set_track_position(&self, position: Option<&str>) -> Result<()>;
    /// Expose extra actions (by id) in the host's player controls.
    fn add_extra_actions(&self, ids: &[&str]) -> Result<()>;
}

/// Callback the host invokes for every action activation.
pub type ActionHandler = Box<dyn Fn(ActionEvent)>;

/// Host-side registry of named actions.
pub trait ActionRegistry {
    fn add_action(&self, spec: &ActionSpec) -> Result<()>;
    /// Subscribe `handler` to the registry's `event` signal.
    fn connect(&self, event: &str, handler: ActionHandler) -> Result<()>;
    fn update_enabled_flags(&self, flags: &BTreeMap<String, bool>) -> Result<()>;
    fn update_states(&self, states: &BTreeMap<String, bool>) -> Result<()>;
}
