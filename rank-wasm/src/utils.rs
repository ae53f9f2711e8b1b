use rank_core::{RankError, SortableOptions};
use wasm_bindgen::JsValue;
use web_sys::Window;

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

pub fn warn(s: &str) {
    web_sys::console::warn_1(&JsValue::from_str(s));
}

pub fn error(s: &str) {
    web_sys::console::error_1(&JsValue::from_str(s));
}

/// Wrap a failed browser call.
pub fn dom_error(e: JsValue) -> RankError {
    RankError::Dom(
        e.as_string()
            .or_else(|| js_sys::JSON::stringify(&e).ok().and_then(|s| s.as_string()))
            .unwrap_or_else(|| format!("{e:?}")),
    )
}

/// Turn an error into a thrown JS `Error`.
pub fn to_js(e: RankError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

/// Sortable options, optionally overridden by `window.__RANK_INPUT_OPTIONS`
/// set by the host page. Unknown or invalid overrides fall back to defaults.
pub fn load_options(window: &Window) -> SortableOptions {
    let raw = match js_sys::Reflect::get(window, &JsValue::from_str("__RANK_INPUT_OPTIONS")) {
        Ok(v) if !v.is_undefined() && !v.is_null() => v,
        _ => return SortableOptions::default(),
    };
    let text = js_sys::JSON::stringify(&raw)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_default();
    match serde_json::from_str::<SortableOptions>(&text) {
        Ok(o) => o,
        Err(e) => {
            warn(&format!("Ignoring __RANK_INPUT_OPTIONS: {e}"));
            SortableOptions::default()
        }
    }
}
