//! Translation of host commands into clicks on the page.

use crate::action::{ActionEvent, ExtraAction, PlayerAction};
use crate::dom::{ClickPosition, Document, Element};
use crate::error::Result;
use crate::locator::Locator;
use tracing::debug;

const LOG_TARGET_COMMAND: &str = "tunerlink::command";

/// Class shifting the time display aside so the volume slider can show.
pub const DURATION_SHIFT_CLASS: &str = "VolumeDurationControl__Duration--leftShift";

/// Class making the volume slider visible.
pub const SLIDER_VISIBLE_CLASS: &str = "VolumeDurationControl__VolumeSlider--visible";

/// Page control a command ends up clicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Play,
    Pause,
    Skip,
    Replay,
    Like,
    Dislike,
    VolumeSlider,
}

impl Control {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Skip => "skip",
            Self::Replay => "replay",
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::VolumeSlider => "volume slider",
        }
    }
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Clicked the control, at `position` when given.
    Clicked {
        control: Control,
        position: Option<ClickPosition>,
    },
    /// Recognized, but the control it needs is absent or disabled.
    NoTarget(PlayerAction),
    /// Not an action this adapter handles.
    Ignored,
}

/// Performs at most one click per command against a freshly resolved page.
pub struct CommandHandler<D> {
    document: D,
    locator: Locator,
    volume_click_y: f64,
}

impl<D: Document> CommandHandler<D> {
    #[must_use]
    pub const fn new(document: D, locator: Locator, volume_click_y: f64) -> Self {
        Self {
            document,
            locator,
            volume_click_y,
        }
    }

    /// Handle one command activation.
    ///
    /// Unknown actions and missing controls are not errors.
    ///
    /// # Errors
    ///
    /// Returns an error only if the click itself could not be dispatched.
    pub fn handle(&self, event: &ActionEvent) -> Result<Outcome> {
        let Some(action) = event.action() else {
            debug!(target: LOG_TARGET_COMMAND, "Ignoring unknown action {:?}", event.name);
            return Ok(Outcome::Ignored);
        };

        let elements = self.locator.resolve(&self.document);
        let (control, target) = match action {
            PlayerAction::TogglePlay => match (elements.play, elements.pause) {
                (Some(play), _) => (Control::Play, Some(play)),
                (None, pause) => (Control::Pause, pause),
            },
            PlayerAction::Play => (Control::Play, elements.play),
            PlayerAction::Pause | PlayerAction::Stop => (Control::Pause, elements.pause),
            PlayerAction::PrevSong => (Control::Replay, elements.replay),
            PlayerAction::NextSong => (Control::Skip, elements.skip),
            PlayerAction::Extra(ExtraAction::ThumbsUp) => (Control::Like, elements.like),
            PlayerAction::Extra(ExtraAction::ThumbsDown) => (Control::Dislike, elements.dislike),
            PlayerAction::ChangeVolume => {
                let Some(volume) = event.param.filter(|v| v.is_finite()) else {
                    debug!(target: LOG_TARGET_COMMAND, "change-volume without a volume parameter");
                    return Ok(Outcome::NoTarget(action));
                };
                let slots = elements.volume;
                if let Some(duration) = &slots.duration {
                    duration.add_class(DURATION_SHIFT_CLASS);
                }
                if let Some(slider) = &slots.slider {
                    slider.add_class(SLIDER_VISIBLE_CLASS);
                }
                let position = ClickPosition::new(volume, self.volume_click_y);
                return self.click(action, Control::VolumeSlider, slots.click_target, Some(position));
            }
        };
        self.click(action, control, target, None)
    }

    fn click(
        &self,
        action: PlayerAction,
        control: Control,
        target: Option<D::Element>,
        position: Option<ClickPosition>,
    ) -> Result<Outcome> {
        let Some(target) = target else {
            debug!(target: LOG_TARGET_COMMAND, "{} has no usable {} control", action, control);
            return Ok(Outcome::NoTarget(action));
        };
        self.document.click(&target, position)?;
        debug!(target: LOG_TARGET_COMMAND, "{} clicked {}", action, control);
        Ok(Outcome::Clicked { control, position })
    }
}
