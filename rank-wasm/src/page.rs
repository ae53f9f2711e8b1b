use rank_core::{Dom, RankError, Result};
use wasm_bindgen::JsCast;
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, HtmlInputElement, HtmlOptionElement, NodeList,
};

use crate::utils::dom_error;

/// The live document seen through [`Dom`].
#[derive(Clone, Debug)]
pub struct WebDom {
    document: Document,
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        WebDom { document }
    }

    /// The document of the current window.
    pub fn current() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| RankError::Dom("no document".to_string()))?;
        Ok(WebDom::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Dom for WebDom {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_class(&self, scope: Option<&Element>, class: &str) -> Result<Vec<Element>> {
        let selector = format!(".{class}");
        let list = match scope {
            Some(el) => el.query_selector_all(&selector),
            None => self.document.query_selector_all(&selector),
        }
        .map_err(dom_error)?;
        Ok(elements(list))
    }

    fn id(&self, el: &Element) -> Option<String> {
        Some(el.id()).filter(|id| !id.is_empty())
    }

    fn value(&self, el: &Element) -> String {
        match el.dyn_ref::<HtmlInputElement>() {
            Some(input) => input.value(),
            None => el.get_attribute("value").unwrap_or_default(),
        }
    }

    fn set_value(&mut self, el: &Element, value: &str) -> Result<()> {
        match el.dyn_ref::<HtmlInputElement>() {
            Some(input) => {
                input.set_value(value);
                Ok(())
            }
            None => el.set_attribute("value", value).map_err(dom_error),
        }
    }

    fn classes(&self, el: &Element) -> Vec<String> {
        let list = el.class_list();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn has_class(&self, el: &Element, class: &str) -> bool {
        el.class_list().contains(class)
    }

    fn add_class(&mut self, el: &Element, class: &str) -> Result<()> {
        el.class_list().add_1(class).map_err(dom_error)
    }

    fn remove_class(&mut self, el: &Element, class: &str) -> Result<()> {
        el.class_list().remove_1(class).map_err(dom_error)
    }

    fn inputs(&self, el: &Element) -> Result<Vec<Element>> {
        Ok(elements(el.query_selector_all("input").map_err(dom_error)?))
    }

    fn first_input(&self, el: &Element) -> Option<Element> {
        el.query_selector("input").ok().flatten()
    }

    fn clear_children(&mut self, el: &Element) -> Result<()> {
        el.set_inner_html("");
        Ok(())
    }

    fn append_option(&mut self, list: &Element, value: &str) -> Result<()> {
        let option: HtmlOptionElement = self
            .document
            .create_element("option")
            .map_err(dom_error)?
            .dyn_into()
            .map_err(|_| RankError::Dom("option is not an HtmlOptionElement".to_string()))?;
        option.set_value(value);
        list.append_child(&option).map_err(dom_error)?;
        Ok(())
    }

    fn dispatch(&mut self, el: &Element, event: &str, bubbles: bool) -> Result<()> {
        let init = CustomEventInit::new();
        init.set_bubbles(bubbles);
        let ev = CustomEvent::new_with_event_init_dict(event, &init).map_err(dom_error)?;
        el.dispatch_event(&ev).map_err(dom_error)?;
        Ok(())
    }
}
