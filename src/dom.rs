use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};
use yew::NodeRef;

use crate::content::SiteConfig;
use crate::error::{Error, Result};
use crate::motion::Animated;

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(Error::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(Error::NoDocument)
}

pub fn viewport_height() -> Result<f64> {
    Ok(window()?.inner_height()?.as_f64().unwrap_or_default())
}

pub fn scroll_y() -> Result<f64> {
    Ok(window()?.scroll_y()?)
}

/// Furthest the page can scroll.
pub fn scroll_limit() -> Result<f64> {
    let root = document()?.document_element().ok_or(Error::NoDocument)?;
    Ok((root.scroll_height() as f64 - viewport_height()?).max(0.0))
}

/// The mounted element behind `node`.
pub fn element(node: &NodeRef, name: &'static str) -> Result<HtmlElement> {
    node.cast::<HtmlElement>().ok_or(Error::MissingNode(name))
}

pub fn animated(node: &NodeRef, name: &'static str) -> Result<Rc<Animated>> {
    element(node, name).map(Animated::new)
}

pub fn children(element: &Element) -> Vec<HtmlElement> {
    let children = element.children();
    (0..children.length())
        .filter_map(|index| children.item(index))
        .filter_map(|child| child.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn animated_children(element: &Element) -> Vec<Rc<Animated>> {
    children(element).into_iter().map(Animated::new).collect()
}

/// Applies language, title and description from the site record. Empty
/// fields leave the document untouched.
pub fn apply_site_metadata(site: &SiteConfig) -> Result<()> {
    let document = document()?;
    if !site.language.is_empty() {
        if let Some(root) = document.document_element() {
            root.set_attribute("lang", &site.language)?;
        }
    }
    if !site.site_name.is_empty() {
        document.set_title(&site.site_name);
    }
    if !site.site_description.is_empty() {
        if let Some(meta) = document.query_selector("meta[name=\"description\"]")? {
            meta.set_attribute("content", &site.site_description)?;
        }
    }
    Ok(())
}
