//! JavaScript entry point wiring the poller to the live page.

use crate::document::WebDocument;
use crate::host::{HostActions, HostPlayer, JsActions, JsMediaPlayer};
use crate::timer::GlooScheduler;
use tracing::{error, info};
use tunerlink_core::{ActionEvent, Config, PagePoller, PollerHandle};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

const LOG_TARGET_BOOTSTRAP: &str = "tunerlink::web";

/// A running integration. Dropping it does not stop polling; call `stop`.
#[wasm_bindgen]
pub struct Integration {
    handle: PollerHandle,
}

#[wasm_bindgen]
impl Integration {
    /// Start polling the current page.
    ///
    /// `config_toml` overrides the defaults when given.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid or there is no document to attach to.
    #[allow(clippy::needless_pass_by_value)]
    pub fn start(
        player: JsMediaPlayer,
        actions: JsActions,
        config_toml: Option<String>,
    ) -> Result<Integration, JsError> {
        let config = match config_toml.as_deref() {
            Some(content) => Config::from_toml_str(content)?,
            None => Config::default(),
        };
        let document = WebDocument::from_window().ok_or_else(|| JsError::new("no document"))?;

        let (poller, handle) = PagePoller::new(
            document.clone(),
            HostPlayer::new(player),
            HostActions::new(actions),
            GlooScheduler,
            &config,
        );

        let ready = handle.clone();
        let on_loaded = Closure::wrap(Box::new(move || ready.mark_ready()) as Box<dyn FnMut()>);
        document
            .inner()
            .add_event_listener_with_callback("DOMContentLoaded", on_loaded.as_ref().unchecked_ref())
            .map_err(|e| JsError::new(&format!("{e:?}")))?;
        on_loaded.forget();

        spawn_local(async move {
            match poller.run().await {
                Ok(()) => info!(target: LOG_TARGET_BOOTSTRAP, "Integration stopped"),
                Err(e) => error!(target: LOG_TARGET_BOOTSTRAP, "Integration failed: {}", e),
            }
        });

        Ok(Self { handle })
    }

    /// Forward a host action activation.
    ///
    /// # Errors
    ///
    /// Fails if the poller has already exited.
    #[allow(clippy::needless_pass_by_value)]
    pub fn activate(&self, name: String, param: Option<f64>) -> Result<(), JsError> {
        let mut event = ActionEvent::new(name);
        if let Some(param) = param {
            event = event.with_param(param);
        }
        self.handle.activate(event)?;
        Ok(())
    }

    pub fn stop(&self) {
        self.handle.stop();
    }
}
