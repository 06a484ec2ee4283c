//! Browser binding for `tunerlink-core`: the live DOM, the host's JavaScript
//! objects and a `setTimeout` scheduler.

pub mod geometry;

#[cfg(target_arch = "wasm32")]
pub mod bootstrap;
#[cfg(target_arch = "wasm32")]
pub mod document;
#[cfg(target_arch = "wasm32")]
pub mod host;
#[cfg(target_arch = "wasm32")]
pub mod timer;

#[cfg(target_arch = "wasm32")]
pub use bootstrap::Integration;
#[cfg(target_arch = "wasm32")]
pub use document::{WebDocument, WebElement};
#[cfg(target_arch = "wasm32")]
pub use host::{HostActions, HostPlayer, JsActions, JsMediaPlayer};
#[cfg(target_arch = "wasm32")]
pub use timer::GlooScheduler;
