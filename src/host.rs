/// Everything this extension knows about the host page's markup.
///
/// The retail site owns its navigation bar and changes it without notice, so
/// the selector and the item markup live here and nowhere else.
use crate::links::LinkEntry;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

/// Container of the site's secondary navigation links
pub const NAV_CONTAINER_SELECTOR: &str = "#nav-xshop";

/// Class the site gives its own nav links; reused so ours look native
const HOST_LINK_CLASS: &str = "nav-a";

/// Marks the items this extension inserted
pub const SHORTCUT_CLASS: &str = "nav-shortcut-link";

pub fn find_nav_container(document: &Document) -> Option<Element> {
    document
        .query_selector(NAV_CONTAINER_SELECTOR)
        .ok()
        .flatten()
}

/// Create the `<a>` for one link.
pub fn build_nav_item(document: &Document, link: &LinkEntry) -> Result<Element, JsValue> {
    let item = document.create_element("a")?;
    item.set_class_name(&format!("{} {}", HOST_LINK_CLASS, SHORTCUT_CLASS));
    item.set_attribute("href", link.url.trim())?;
    if let Some(id) = &link.id {
        item.set_attribute("data-shortcut-id", id)?;
    }
    item.set_text_content(Some(link.name.trim()));
    Ok(item)
}
