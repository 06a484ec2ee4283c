//! Command identifiers exchanged with the host's action registry.

/// Action group extra actions are declared in.
pub const ACTION_GROUP: &str = "playback";

/// Scope extra actions are declared in.
pub const ACTION_SCOPE: &str = "win";

/// Registry signal carrying action activations.
pub const ACTION_ACTIVATED: &str = "ActionActivated";

/// Abstract playback command raised by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    TogglePlay,
    Play,
    Pause,
    Stop,
    PrevSong,
    NextSong,
    ChangeVolume,
    Extra(ExtraAction),
}

impl PlayerAction {
    /// Parse an action name. Unknown names are `None` and get ignored.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let action = match name {
            "toggle-play" => Self::TogglePlay,
            "play" => Self::Play,
            "pause" => Self::Pause,
            "stop" => Self::Stop,
            "prev-song" => Self::PrevSong,
            "next-song" => Self::NextSong,
            "change-volume" => Self::ChangeVolume,
            other => Self::Extra(ExtraAction::parse(other)?),
        };
        Some(action)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TogglePlay => "toggle-play",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::PrevSong => "prev-song",
            Self::NextSong => "next-song",
            Self::ChangeVolume => "change-volume",
            Self::Extra(extra) => extra.id(),
        }
    }
}

impl std::fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-transport actions surfaced only when the page exposes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtraAction {
    ThumbsUp,
    ThumbsDown,
}

impl ExtraAction {
    pub const ALL: [Self; 2] = [Self::ThumbsUp, Self::ThumbsDown];

    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }

    /// Action identifier used by the host registry.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::ThumbsUp => "thumbs-up",
            Self::ThumbsDown => "thumbs-down",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ThumbsUp => "Thumbs up",
            Self::ThumbsDown => "Thumbs down",
        }
    }

    /// Declaration passed to the registry at startup. Starts disabled.
    #[must_use]
    pub const fn spec(&self) -> ActionSpec {
        ActionSpec {
            group: ACTION_GROUP,
            scope: ACTION_SCOPE,
            id: self.id(),
            label: self.label(),
            icon: None,
            mnemonic: None,
            shortcut: None,
            enabled: false,
        }
    }
}

/// Arguments of the registry's add-action call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub group: &'static str,
    pub scope: &'static str,
    pub id: &'static str,
    pub label: &'static str,
    pub icon: Option<&'static str>,
    pub mnemonic: Option<&'static str>,
    pub shortcut: Option<&'static str>,
    pub enabled: bool,
}

/// A command activation as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionEvent {
    pub name: String,
    /// Action parameter; the requested volume fraction for `change-volume`.
    pub param: Option<f64>,
}

impl ActionEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param: None,
        }
    }

    #[must_use]
    pub const fn with_param(mut self, param: f64) -> Self {
        self.param = Some(param);
        self
    }

    /// Parsed action, `None` for names this adapter does not handle.
    #[must_use]
    pub fn action(&self) -> Option<PlayerAction> {
        PlayerAction::parse(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transport_actions() {
        assert_eq!(PlayerAction::parse("toggle-play"), Some(PlayerAction::TogglePlay));
        assert_eq!(PlayerAction::parse("stop"), Some(PlayerAction::Stop));
        assert_eq!(PlayerAction::parse("prev-song"), Some(PlayerAction::PrevSong));
        assert_eq!(PlayerAction::parse("change-volume"), Some(PlayerAction::ChangeVolume));
    }

    #[test]
    fn test_parse_extra_actions() {
        assert_eq!(
            PlayerAction::parse("thumbs-up"),
            Some(PlayerAction::Extra(ExtraAction::ThumbsUp))
        );
        assert_eq!(
            PlayerAction::parse("thumbs-down"),
            Some(PlayerAction::Extra(ExtraAction::ThumbsDown))
        );
    }

    #[test]
    fn test_parse_unknown_action() {
        assert_eq!(PlayerAction::parse("repeat"), None);
        assert_eq!(PlayerAction::parse(""), None);
        assert_eq!(ActionEvent::new("shuffle").action(), None);
    }

    #[test]
    fn test_extra_action_spec_starts_disabled() {
        let spec = ExtraAction::ThumbsUp.spec();
        assert_eq!(spec.group, "playback");
        assert_eq!(spec.scope, "win");
        assert_eq!(spec.id, "thumbs-up");
        assert_eq!(spec.label, "Thumbs up");
        assert!(spec.icon.is_none());
        assert!(!spec.enabled);
    }

    #[test]
    fn test_action_event_param() {
        let event = ActionEvent::new("change-volume").with_param(0.3);
        assert_eq!(event.param, Some(0.3));
        assert_eq!(event.action(), Some(PlayerAction::ChangeVolume));
    }
}
