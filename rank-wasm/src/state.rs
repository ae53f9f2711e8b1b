use std::cell::RefCell;
use std::rc::Rc;

use rank_core::{SortableOptions, SortableRegistry};
use web_sys::Element;

use crate::page::WebDom;
use crate::sortable::SortableJs;

/// Runtime state shared by the htmx callbacks.
pub struct State {
    pub dom: WebDom,
    pub options: SortableOptions,
    pub registry: SortableRegistry<Element, SortableJs>,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}
