use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Object;
use rank_core::constants::AFTER_SWAP_EVENT;
use rank_core::sorter::can_move;
use rank_core::{RankError, Result, SortableHandle, SortableOptions, on_drop, wire_subtree};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event};

use crate::bindings::{MoveEvent, Sortable, SortableEvent, htmx_on_load};
use crate::page::WebDom;
use crate::state::State;
use crate::utils::{dom_error, error, log};

type MoveClosure = Closure<dyn FnMut(MoveEvent) -> bool>;
type EndClosure = Closure<dyn FnMut(SortableEvent)>;

/// A SortableJS instance plus the callbacks it calls into. Dropping the handle
/// drops the callbacks, so it must outlive the instance.
pub struct SortableJs {
    inner: Sortable,
    /// False for an instance some other script bound to the container.
    owned: bool,
    _callbacks: (MoveClosure, EndClosure),
}

impl SortableHandle for SortableJs {
    fn set_disabled(&mut self, disabled: bool) {
        self.inner.set_option("disabled", &JsValue::from_bool(disabled));
    }

    fn is_disabled(&self) -> bool {
        self.inner.get_option("disabled").as_bool().unwrap_or(false)
    }

    fn release(&mut self) {
        if self.owned {
            self.inner.destroy();
        } else {
            self.inner.set_option("onMove", &JsValue::UNDEFINED);
            self.inner.set_option("onEnd", &JsValue::UNDEFINED);
        }
    }
}

fn callbacks(document: &Document, opts: &SortableOptions) -> (MoveClosure, EndClosure) {
    let doc = document.clone();
    let on_move = MoveClosure::wrap(Box::new(move |evt: MoveEvent| {
        can_move(&WebDom::new(doc.clone()), &evt.related())
    }));
    let doc = document.clone();
    let rewrite = opts.rank_rewrite;
    // Logged, not thrown: a throw out of onEnd skips SortableJS's drop cleanup.
    let on_end = EndClosure::wrap(Box::new(move |evt: SortableEvent| {
        let mut dom = WebDom::new(doc.clone());
        if let Err(e) = on_drop(&mut dom, &evt.item(), &evt.to(), rewrite) {
            error(&format!("Failed to update rank after drop: {e}"));
        }
    }));
    (on_move, on_end)
}

/// Create the SortableJS instance for `container`, or adopt the one already
/// bound to it by pointing its callbacks at ours.
fn build(document: &Document, container: &Element, opts: &SortableOptions) -> Result<SortableJs> {
    let (on_move, on_end) = callbacks(document, opts);

    if let Some(inner) = Sortable::get(container) {
        inner.set_option("onMove", on_move.as_ref());
        inner.set_option("onEnd", on_end.as_ref());
        return Ok(SortableJs {
            inner,
            owned: false,
            _callbacks: (on_move, on_end),
        });
    }

    let json = serde_json::to_string(opts).map_err(|e| RankError::Dom(e.to_string()))?;
    let options: Object = js_sys::JSON::parse(&json).map_err(dom_error)?.unchecked_into();
    js_sys::Reflect::set(&options, &JsValue::from_str("onMove"), on_move.as_ref())
        .map_err(dom_error)?;
    js_sys::Reflect::set(&options, &JsValue::from_str("onEnd"), on_end.as_ref())
        .map_err(dom_error)?;

    let inner = Sortable::new(container, &options).map_err(dom_error)?;
    Ok(SortableJs {
        inner,
        owned: true,
        _callbacks: (on_move, on_end),
    })
}

/// Wire every sortable container inside freshly loaded `content`.
pub fn wire(state: &mut State, content: &Element) -> Result<()> {
    let State {
        dom,
        options,
        registry,
    } = state;
    let document = dom.document().clone();
    let report = wire_subtree(dom, Some(content), registry, options, |el, opts| {
        build(&document, el, opts)
    })?;
    if report.skipped > 0 {
        error(&format!(
            "{} sortable container(s) without an id were not wired",
            report.skipped
        ));
    }
    if report.new + report.replaced > 0 {
        log(&format!(
            "Wired {} sortable(s), replaced {}, kept {}",
            report.new, report.replaced, report.existing
        ));
    }
    Ok(())
}

/// Forget controllers whose container left the document, then clear the
/// disabled flag on the rest.
pub fn after_swap(state: &mut State) -> usize {
    let dropped = state.registry.retain(|_, el| el.is_connected());
    if dropped > 0 {
        log(&format!("Released {dropped} detached sortable(s)"));
    }
    state.registry.enable_all()
}

// Hooks the runtime into htmx: new content gets wired on load and every swap
// re-enables the known controllers.
pub fn attach_htmx(state: Rc<RefCell<State>>) -> std::result::Result<(), JsValue> {
    let st = state.clone();
    let onload = Closure::<dyn FnMut(Element)>::wrap(Box::new(move |content: Element| {
        if let Err(e) = wire(&mut st.borrow_mut(), &content) {
            error(&format!("Failed to wire sortables: {e}"));
        }
    }));
    htmx_on_load(onload.as_ref().unchecked_ref())?;
    onload.forget();

    let document = state.borrow().dom.document().clone();
    let st = state.clone();
    let onswap = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
        after_swap(&mut st.borrow_mut());
    }));
    document
        .add_event_listener_with_callback(AFTER_SWAP_EVENT, onswap.as_ref().unchecked_ref())?;
    onswap.forget();

    // htmx may have loaded the initial page before this module did.
    if let Some(body) = document.body()
        && let Err(e) = wire(&mut state.borrow_mut(), &body)
    {
        error(&format!("Failed to wire sortables: {e}"));
    }
    Ok(())
}
