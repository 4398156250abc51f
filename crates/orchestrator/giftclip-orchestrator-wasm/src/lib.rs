use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use giftclip_orchestrator::{ClipConfig, ClipController, Intent, MediaSignal};

#[wasm_bindgen]
pub struct GiftClip {
    core: ClipController,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Plain JS objects instead of `Map`s for the analytics property maps.
fn to_js<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

#[wasm_bindgen]
impl GiftClip {
    /// Create a controller. Pass a ClipConfig object or undefined/null for defaults.
    /// Example:
    ///   new GiftClip({ reveal: { strategy: "fling" } })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<GiftClip, JsError> {
        console_error_panic_hook::set_once();

        let cfg: ClipConfig = if jsvalue_is_undefined_or_null(&config) {
            ClipConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let core = ClipController::new(cfg).map_err(|e| JsError::new(&format!("{e:#}")))?;
        Ok(GiftClip { core })
    }

    /// Apply a user intent, e.g. `{ type: "pointer_sample", x, y, width, height }`.
    #[wasm_bindgen]
    pub fn dispatch(&mut self, intent: JsValue) -> Result<(), JsError> {
        let intent: Intent =
            swb::from_value(intent).map_err(|e| JsError::new(&format!("intent error: {e}")))?;
        self.core
            .dispatch(intent)
            .map_err(|e| JsError::new(&format!("{e:#}")))
    }

    /// Apply a media backend callback, e.g. `{ type: "ready", session: 1 }`.
    #[wasm_bindgen]
    pub fn signal(&mut self, signal: JsValue) -> Result<(), JsError> {
        let signal: MediaSignal =
            swb::from_value(signal).map_err(|e| JsError::new(&format!("signal error: {e}")))?;
        self.core
            .signal(signal)
            .map_err(|e| JsError::new(&format!("{e:#}")))
    }

    /// Advance timers by dt (seconds). Returns `{ commands, events, analytics }`.
    #[wasm_bindgen]
    pub fn update(&mut self, dt: f32) -> Result<JsValue, JsError> {
        let out = self.core.update(dt);
        to_js(out, "outputs")
    }

    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        to_js(&self.core.snapshot(), "snapshot")
    }

    #[wasm_bindgen(js_name = track_funnel)]
    pub fn track_funnel(&mut self, step: String) {
        self.core.track_funnel(&step);
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
