pub mod action;
pub mod command;
pub mod config;
pub mod dom;
pub mod error;
pub mod locator;
pub mod model;
pub mod poller;
pub mod port;
pub mod sync;
pub mod time;
pub mod variant;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{
    ActionEvent, ActionSpec, ExtraAction, PlayerAction, ACTION_ACTIVATED, ACTION_GROUP, ACTION_SCOPE,
};
pub use command::{CommandHandler, Control, Outcome};
pub use config::{Config, PageConfig, PollingConfig, TickErrorPolicy, CONFIG_TEMPLATE};
pub use dom::{ClickPosition, Document, Element, MemoryDocument, MemoryElement, ReadyState};
pub use error::{CoreError, Result};
pub use locator::{ElementSet, Locator, VolumeElements};
pub use model::{ActionAvailability, Capabilities, PlaybackState, Snapshot, TimeSnapshot, Track};
pub use poller::{PagePoller, PollerHandle, Scheduler, TokioScheduler};
pub use port::{ActionHandler, ActionRegistry, PlayerStateSink};
pub use sync::Synchronizer;
pub use time::{parse_clock, DurationExt};
pub use variant::{SelectorTable, UiVariant, VariantSetting};

/// Re-export toml error type for config parsing error handling
pub use toml::de::Error as TomlParseError;
