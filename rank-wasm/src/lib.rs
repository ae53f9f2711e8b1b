//! Browser runtime for the fixture page: team colouring and drag-and-drop
//! ranking on top of SortableJS and htmx.

use std::cell::RefCell;
use std::rc::Rc;

use rank_core::{RankBoard, SortableRegistry};
use wasm_bindgen::prelude::*;

mod bindings;
mod page;
mod sortable;
mod state;
mod utils;

use page::WebDom;
use state::{STATE, State};
use utils::{load_options, to_js};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let options = load_options(&window);

    let state = Rc::new(RefCell::new(State {
        dom: WebDom::new(document),
        options,
        registry: SortableRegistry::new(),
    }));
    STATE.with(|st| st.replace(Some(state.clone())));
    sortable::attach_htmx(state)?;
    Ok(())
}

/// Recolour team inputs and rebuild the `teams` datalist. The page calls this
/// whenever a team field changes.
#[wasm_bindgen(js_name = updateTeamDatalist)]
pub fn update_team_datalist() -> Result<(), JsValue> {
    let mut dom = WebDom::current().map_err(to_js)?;
    rank_core::update_team_datalist(&mut dom).map_err(to_js)?;
    Ok(())
}

/// Store `team_name` as the team of `username`'s ranked input.
#[wasm_bindgen(js_name = updateTeam)]
pub fn update_team(username: &str, team_name: &str) -> Result<(), JsValue> {
    let mut dom = WebDom::current().map_err(to_js)?;
    rank_core::update_team(&mut dom, username, team_name).map_err(to_js)?;
    Ok(())
}

/// JSON snapshot of the ranked items currently on the page.
#[wasm_bindgen(js_name = rankBoard)]
pub fn rank_board() -> Result<String, JsValue> {
    let dom = WebDom::current().map_err(to_js)?;
    let board = RankBoard::collect(&dom).map_err(to_js)?;
    serde_json::to_string(&board.summary()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Re-wire the whole document, for pages that insert sortables without htmx.
#[wasm_bindgen(js_name = wireSortables)]
pub fn wire_sortables() -> Result<(), JsValue> {
    let state = STATE
        .with(|st| st.borrow().clone())
        .ok_or("runtime not started")?;
    let body = state
        .borrow()
        .dom
        .document()
        .body()
        .ok_or("no body")?;
    sortable::wire(&mut state.borrow_mut(), &body).map_err(to_js)
}
