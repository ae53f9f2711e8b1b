use js_sys::{Function, Object};
use wasm_bindgen::prelude::*;
use web_sys::Element;

// Globals the host page loads before the wasm module: SortableJS and htmx.
#[wasm_bindgen]
extern "C" {
    #[derive(Clone, Debug)]
    pub type Sortable;

    #[wasm_bindgen(constructor, catch)]
    pub fn new(el: &Element, options: &Object) -> Result<Sortable, JsValue>;

    /// Instance already bound to `el`, if any.
    #[wasm_bindgen(static_method_of = Sortable)]
    pub fn get(el: &Element) -> Option<Sortable>;

    #[wasm_bindgen(method, js_name = option)]
    pub fn set_option(this: &Sortable, name: &str, value: &JsValue);

    #[wasm_bindgen(method, js_name = option)]
    pub fn get_option(this: &Sortable, name: &str) -> JsValue;

    #[wasm_bindgen(method)]
    pub fn destroy(this: &Sortable);

    /// Argument of `onEnd`.
    pub type SortableEvent;

    #[wasm_bindgen(method, getter)]
    pub fn item(this: &SortableEvent) -> Element;

    #[wasm_bindgen(method, getter)]
    pub fn to(this: &SortableEvent) -> Element;

    /// Argument of `onMove`.
    pub type MoveEvent;

    #[wasm_bindgen(method, getter)]
    pub fn related(this: &MoveEvent) -> Element;

    #[wasm_bindgen(catch, js_namespace = htmx, js_name = onLoad)]
    pub fn htmx_on_load(handler: &Function) -> Result<(), JsValue>;
}
