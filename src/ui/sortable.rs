/// Drag-and-drop reordering through the SortableJS library

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

// Import JS bridge functions
#[wasm_bindgen(module = "/sortable.js")]
extern "C" {
    fn attachSortable(element: &HtmlElement, on_reorder: &js_sys::Function) -> bool;
}

/// Keeps the reorder callback alive; dropping it detaches the Rust side.
pub struct SortableHandle {
    _on_reorder: Closure<dyn FnMut(u32, u32)>,
}

/// Make the children of `list` draggable by their `.drag-handle`.
///
/// The bridge puts a dropped item back where it was and reports
/// `(old_index, new_index)`, leaving the actual move to the caller's
/// re-render. Returns `None` when SortableJS isn't loaded on the page.
pub fn attach<F>(list: &HtmlElement, on_reorder: F) -> Option<SortableHandle>
where
    F: Fn(usize, usize) + 'static,
{
    let closure = Closure::<dyn FnMut(u32, u32)>::new(move |from: u32, to: u32| {
        on_reorder(from as usize, to as usize);
    });

    if attachSortable(list, closure.as_ref().unchecked_ref()) {
        Some(SortableHandle {
            _on_reorder: closure,
        })
    } else {
        None
    }
}
