//! Bindings to the host's player-state object and action registry.

use js_sys::{Array, Function, Object, Reflect, JSON};
use std::collections::BTreeMap;
use tunerlink_core::{
    ActionEvent, ActionHandler, ActionRegistry, ActionSpec, CoreError, PlaybackState,
    PlayerStateSink, Result, Track,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// Host media-player state object.
    #[derive(Debug, Clone)]
    pub type JsMediaPlayer;

    #[wasm_bindgen(method, catch, js_name = setTrack)]
    fn set_track(this: &JsMediaPlayer, track: &JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setPlaybackState)]
    fn set_playback_state(this: &JsMediaPlayer, state: u32) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setCanGoPrev)]
    fn set_can_go_prev(this: &JsMediaPlayer, can: bool) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setCanGoNext)]
    fn set_can_go_next(this: &JsMediaPlayer, can: bool) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setCanPlay)]
    fn set_can_play(this: &JsMediaPlayer, can: bool) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setCanPause)]
    fn set_can_pause(this: &JsMediaPlayer, can: bool) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setCanSeek)]
    fn set_can_seek(this: &JsMediaPlayer, can: bool) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setCanChangeVolume)]
    fn set_can_change_volume(this: &JsMediaPlayer, can: bool) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = updateVolume)]
    fn update_volume(this: &JsMediaPlayer, volume: &JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setTrackPosition)]
    fn set_track_position(this: &JsMediaPlayer, position: &JsValue)
        -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addExtraActions)]
    fn add_extra_actions(this: &JsMediaPlayer, ids: &Array) -> std::result::Result<(), JsValue>;

    /// Host action registry.
    #[derive(Debug, Clone)]
    pub type JsActions;

    #[wasm_bindgen(method, catch, js_name = addAction)]
    #[allow(clippy::too_many_arguments)]
    fn add_action(
        this: &JsActions,
        group: &str,
        scope: &str,
        id: &str,
        label: &str,
        icon: &JsValue,
        mnemonic: &JsValue,
        shortcut: &JsValue,
        enabled: bool,
    ) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn connect(this: &JsActions, event: &str, handler: &Function) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = updateEnabledFlags)]
    fn update_enabled_flags(this: &JsActions, flags: &Object) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = updateStates)]
    fn update_states(this: &JsActions, states: &Object) -> std::result::Result<(), JsValue>;
}

fn host_error(operation: &'static str, error: &JsValue) -> CoreError {
    CoreError::host(operation, format!("{error:?}"))
}

fn optional_str(value: Option<&str>) -> JsValue {
    value.map_or(JsValue::NULL, JsValue::from_str)
}

fn flag_object(operation: &'static str, flags: &BTreeMap<String, bool>) -> Result<Object> {
    let object = Object::new();
    for (key, value) in flags {
        Reflect::set(&object, &JsValue::from_str(key), &JsValue::from_bool(*value))
            .map_err(|e| host_error(operation, &e))?;
    }
    Ok(object)
}

/// [`PlayerStateSink`] over the host's media-player object.
#[derive(Debug, Clone)]
pub struct HostPlayer {
    inner: JsMediaPlayer,
}

impl HostPlayer {
    #[must_use]
    pub const fn new(inner: JsMediaPlayer) -> Self {
        Self { inner }
    }
}

impl PlayerStateSink for HostPlayer {
    fn set_track(&self, track: &Track) -> Result<()> {
        let json = serde_json::to_string(track).map_err(|e| CoreError::host("set_track", e))?;
        let value = JSON::parse(&json).map_err(|e| host_error("set_track", &e))?;
        self.inner
            .set_track(&value)
            .map_err(|e| host_error("set_track", &e))
    }

    fn set_playback_state(&self, state: PlaybackState) -> Result<()> {
        self.inner
            .set_playback_state(state.wire_code())
            .map_err(|e| host_error("set_playback_state", &e))
    }

    fn set_can_go_prev(&self, can: bool) -> Result<()> {
        self.inner
            .set_can_go_prev(can)
            .map_err(|e| host_error("set_can_go_prev", &e))
    }

    fn set_can_go_next(&self, can: bool) -> Result<()> {
        self.inner
            .set_can_go_next(can)
            .map_err(|e| host_error("set_can_go_next", &e))
    }

    fn set_can_play(&self, can: bool) -> Result<()> {
        self.inner
            .set_can_play(can)
            .map_err(|e| host_error("set_can_play", &e))
    }

    fn set_can_pause(&self, can: bool) -> Result<()> {
        self.inner
            .set_can_pause(can)
            .map_err(|e| host_error("set_can_pause", &e))
    }

    fn set_can_seek(&self, can: bool) -> Result<()> {
        self.inner
            .set_can_seek(can)
            .map_err(|e| host_error("set_can_seek", &e))
    }

    fn set_can_change_volume(&self, can: bool) -> Result<()> {
        self.inner
            .set_can_change_volume(can)
            .map_err(|e| host_error("set_can_change_volume", &e))
    }

    fn update_volume(&self, volume: Option<f64>) -> Result<()> {
        let value = volume.map_or(JsValue::NULL, JsValue::from_f64);
        self.inner
            .update_volume(&value)
            .map_err(|e| host_error("update_volume", &e))
    }

    fn set_track_position(&self, position: Option<&str>) -> Result<()> {
        self.inner
            .set_track_position(&optional_str(position))
            .map_err(|e| host_error("set_track_position", &e))
    }

    fn add_extra_actions(&self, ids: &[&str]) -> Result<()> {
        let array: Array = ids.iter().map(|id| JsValue::from_str(id)).collect();
        self.inner
            .add_extra_actions(&array)
            .map_err(|e| host_error("add_extra_actions", &e))
    }
}

/// [`ActionRegistry`] over the host's action registry.
#[derive(Debug, Clone)]
pub struct HostActions {
    inner: JsActions,
}

impl HostActions {
    #[must_use]
    pub const fn new(inner: JsActions) -> Self {
        Self { inner }
    }
}

impl ActionRegistry for HostActions {
    fn add_action(&self, spec: &ActionSpec) -> Result<()> {
        self.inner
            .add_action(
                spec.group,
                spec.scope,
                spec.id,
                spec.label,
                &optional_str(spec.icon),
                &optional_str(spec.mnemonic),
                &optional_str(spec.shortcut),
                spec.enabled,
            )
            .map_err(|e| host_error("add_action", &e))
    }

    fn connect(&self, event: &str, handler: ActionHandler) -> Result<()> {
        // Signal arguments: (emitter, action name, parameter).
        let callback = Closure::wrap(Box::new(move |_emitter: JsValue, name: JsValue, param: JsValue| {
            let Some(name) = name.as_string() else {
                return;
            };
            let event = match param.as_f64() {
                Some(param) => ActionEvent::new(name).with_param(param),
                None => ActionEvent::new(name),
            };
            handler(event);
        }) as Box<dyn FnMut(JsValue, JsValue, JsValue)>);
        self.inner
            .connect(event, callback.as_ref().unchecked_ref())
            .map_err(|e| host_error("connect", &e))?;
        callback.forget();
        Ok(())
    }

    fn update_enabled_flags(&self, flags: &BTreeMap<String, bool>) -> Result<()> {
        let object = flag_object("update_enabled_flags", flags)?;
        self.inner
            .update_enabled_flags(&object)
            .map_err(|e| host_error("update_enabled_flags", &e))
    }

    fn update_states(&self, states: &BTreeMap<String, bool>) -> Result<()> {
        let object = flag_object("update_states", states)?;
        self.inner
            .update_states(&object)
            .map_err(|e| host_error("update_states", &e))
    }
}
