use crate::action::{ExtraAction, ACTION_ACTIVATED};
use crate::dom::{query_attribute, query_text_chain, Document, Element};
use crate::error::Result;
use crate::locator::{ElementSet, Locator};
use crate::model::{ActionAvailability, Capabilities, Snapshot, Track};
use crate::port::{ActionHandler, ActionRegistry, PlayerStateSink};
use crate::time::extract_time;
use crate::variant::{TrackSelectors, TRACK_SELECTORS};
use std::collections::BTreeMap;
use tracing::debug;

const LOG_TARGET_SYNC: &str = "tunerlink::sync";

/// Projects the page into a [`Snapshot`] and publishes it to the host.
///
/// Holds no playback state of its own: every capture starts from a fresh
/// query of the page.
pub struct Synchronizer<D, S, R> {
    document: D,
    sink: S,
    registry: R,
    locator: Locator,
    track_selectors: TrackSelectors,
}

impl<D, S, R> Synchronizer<D, S, R>
where
    D: Document,
    S: PlayerStateSink,
    R: ActionRegistry,
{
    #[must_use]
    pub const fn new(document: D, sink: S, registry: R, locator: Locator) -> Self {
        Self {
            document,
            sink,
            registry,
            locator,
            track_selectors: TRACK_SELECTORS,
        }
    }

    #[must_use]
    pub const fn document(&self) -> &D {
        &self.document
    }

    /// Declare the extra actions with the registry, initially disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry rejects a declaration.
    pub fn declare_extra_actions(&self) -> Result<()> {
        for action in ExtraAction::ALL {
            self.registry.add_action(&action.spec())?;
        }
        Ok(())
    }

    /// Surface the extra actions in the host's player controls.
    ///
    /// # Errors
    ///
    /// Returns an error if the host call fails.
    pub fn register_extra_actions(&self) -> Result<()> {
        let ids = ExtraAction::ALL.map(|action| action.id());
        self.sink.add_extra_actions(&ids)
    }

    /// Subscribe `handler` to action activations from the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry rejects the subscription.
    pub fn subscribe_actions(&self, handler: ActionHandler) -> Result<()> {
        self.registry.connect(ACTION_ACTIVATED, handler)
    }

    /// Capture a snapshot of the page. Pure; never fails.
    #[must_use]
    pub fn capture(&self) -> Snapshot {
        let document = &self.document;
        let selectors = self.track_selectors;
        let elements = self.locator.resolve(document);
        let table = elements.variant.selectors();
        let time = extract_time(document, table.duration);

        let track = Track {
            title: query_text_chain(document, selectors.title),
            artist: query_text_chain(document, selectors.artist),
            album: query_text_chain(document, selectors.album),
            art_location: None,
            rating: None,
            length: time
                .as_ref()
                .map(|time| time.total.clone())
                .filter(|total| !total.is_empty()),
        };

        let volume = query_attribute(document, table.volume_handle, "aria-valuenow", |raw| {
            raw.trim().parse::<f64>().ok()
        })
        .filter(|value| value.is_finite())
        .map(|value| (value / 100.0).clamp(0.0, 1.0));

        Snapshot {
            track,
            state: elements.state,
            capabilities: capabilities(&elements),
            extra_actions: extra_actions(&elements),
            time,
            volume,
        }
    }

    /// Push `snapshot` to the host.
    ///
    /// Order: track, playback state, capability flags, extra-action flags,
    /// track position, volume.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failing host call.
    pub fn publish(&self, snapshot: &Snapshot) -> Result<()> {
        let sink = &self.sink;
        let caps = snapshot.capabilities;

        sink.set_track(&snapshot.track)?;
        sink.set_playback_state(snapshot.state)?;
        sink.set_can_go_prev(caps.can_go_prev)?;
        sink.set_can_go_next(caps.can_go_next)?;
        sink.set_can_play(caps.can_play)?;
        sink.set_can_pause(caps.can_pause)?;
        sink.set_can_seek(caps.can_seek)?;
        sink.set_can_change_volume(caps.can_change_volume)?;

        let mut enabled = BTreeMap::new();
        let mut states = BTreeMap::new();
        for (action, availability) in &snapshot.extra_actions {
            enabled.insert(action.id().to_string(), availability.enabled);
            states.insert(action.id().to_string(), availability.active);
        }
        self.registry.update_enabled_flags(&enabled)?;
        self.registry.update_states(&states)?;

        sink.set_track_position(snapshot.position())?;
        sink.update_volume(snapshot.volume)?;
        Ok(())
    }

    /// Capture and publish one snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if publishing fails.
    pub fn tick(&self) -> Result<Snapshot> {
        let snapshot = self.capture();
        debug!(
            target: LOG_TARGET_SYNC,
            "Snapshot: state={}, title={:?}, position_ms={:?}, volume={:?}",
            snapshot.state,
            snapshot.track.title,
            snapshot.position_ms(),
            snapshot.volume
        );
        self.publish(&snapshot)?;
        Ok(snapshot)
    }
}

fn capabilities<E>(elements: &ElementSet<E>) -> Capabilities {
    Capabilities {
        can_go_prev: elements.replay.is_some(),
        can_go_next: elements.skip.is_some(),
        can_play: elements.play.is_some(),
        can_pause: elements.pause.is_some(),
        can_seek: false,
        can_change_volume: elements.volume.click_target.is_some(),
    }
}

fn extra_actions<E: Element>(elements: &ElementSet<E>) -> Vec<(ExtraAction, ActionAvailability)> {
    ExtraAction::ALL
        .into_iter()
        .map(|action| {
            let control = match action {
                ExtraAction::ThumbsUp => elements.like.as_ref(),
                ExtraAction::ThumbsDown => elements.dislike.as_ref(),
            };
            let availability = ActionAvailability {
                enabled: control.is_some(),
                active: control
                    .and_then(|control| control.attribute("aria-checked"))
                    .is_some_and(|checked| checked == "true"),
            };
            (action, availability)
        })
        .collect()
}
