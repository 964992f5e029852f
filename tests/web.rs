//! In-browser tests for link injection. Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use nav_shortcuts::error::InjectError;
use nav_shortcuts::host::{find_nav_container, SHORTCUT_CLASS};
use nav_shortcuts::injector::{plan, render_into, run};
use nav_shortcuts::links::{LinkConfig, LinkEntry};
use nav_shortcuts::storage::{LinkRepository, MemoryStore};
use nav_shortcuts::ui::editor::{apply_edit, Edit, PageState};
use nav_shortcuts::ui::sortable;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Fresh `#nav-xshop` with one link of the site's own
fn mount_nav() -> Element {
    let document = document();
    if let Some(old) = find_nav_container(&document) {
        old.remove();
    }

    let nav = document.create_element("div").unwrap();
    nav.set_id("nav-xshop");
    let existing = document.create_element("a").unwrap();
    existing.set_class_name("nav-a");
    existing.set_text_content(Some("Today's Deals"));
    nav.append_child(&existing).unwrap();
    document.body().unwrap().append_child(&nav).unwrap();
    nav
}

fn link_texts(nav: &Element) -> Vec<String> {
    let children = nav.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .map(|child| child.text_content().unwrap_or_default())
        .collect()
}

#[wasm_bindgen_test]
fn render_keeps_configuration_order_before_site_links() {
    let nav = mount_nav();
    let links = vec![
        LinkEntry::custom("Orders", "/orders"),
        LinkEntry::custom("Lists", "/lists"),
        LinkEntry::custom("Deals", "/deals"),
    ];

    let inserted = render_into(&document(), &nav, &links).unwrap();

    assert_eq!(inserted, 3);
    assert_eq!(link_texts(&nav), vec!["Orders", "Lists", "Deals", "Today's Deals"]);

    let first = nav.first_element_child().unwrap();
    assert_eq!(first.get_attribute("href").as_deref(), Some("/orders"));
    assert!(first.class_list().contains(SHORTCUT_CLASS));
    nav.remove();
}

#[wasm_bindgen_test]
fn render_skips_disabled_links() {
    let nav = mount_nav();
    let mut config = LinkConfig::defaults();
    config.add_custom("Orders", "/orders").unwrap();
    config.set_enabled(0, false).unwrap();

    render_into(&document(), &nav, &plan(&config)).unwrap();

    assert_eq!(link_texts(&nav), vec!["Support Call", "Orders", "Today's Deals"]);
    nav.remove();
}

#[wasm_bindgen_test]
async fn run_seeds_defaults_after_rendering() {
    let nav = mount_nav();
    let repository = LinkRepository::new(MemoryStore::new());

    let inserted = run(&document(), &repository).await.unwrap();

    assert_eq!(inserted, 2);
    assert_eq!(link_texts(&nav), vec!["Returns", "Support Call", "Today's Deals"]);
    let first = nav.first_element_child().unwrap();
    assert_eq!(first.get_attribute("data-shortcut-id").as_deref(), Some("returns"));
    assert_eq!(repository.store().write_count(), 1);
    nav.remove();
}

#[wasm_bindgen_test]
async fn run_keeps_rendered_links_when_seeding_fails() {
    let nav = mount_nav();
    let repository = LinkRepository::new(MemoryStore::new());
    repository.store().fail_writes(true);

    let inserted = run(&document(), &repository).await.unwrap();

    assert_eq!(inserted, 2);
    assert_eq!(nav.children().length(), 3);
    assert_eq!(repository.store().value(), None);
    nav.remove();
}

#[wasm_bindgen_test]
async fn run_without_container_touches_nothing() {
    if let Some(old) = find_nav_container(&document()) {
        old.remove();
    }
    let repository = LinkRepository::new(MemoryStore::new());

    let result = run(&document(), &repository).await;

    assert!(matches!(result, Err(InjectError::MissingContainer(_))));
    assert_eq!(repository.store().write_count(), 0);
    let injected = document()
        .query_selector_all(&format!(".{}", SHORTCUT_CLASS))
        .unwrap();
    assert_eq!(injected.length(), 0);
}

#[wasm_bindgen_test]
async fn run_uses_stored_links() {
    let nav = mount_nav();
    let repository = LinkRepository::new(MemoryStore::with_value(json!([
        {"kind": "custom", "name": "Orders", "url": "/orders"},
        {"kind": "predefined", "id": "returns", "name": "Returns", "url": "/spr/returns/history", "enabled": false},
    ])));

    run(&document(), &repository).await.unwrap();

    assert_eq!(link_texts(&nav), vec!["Orders", "Today's Deals"]);
    assert_eq!(repository.store().write_count(), 0);
    nav.remove();
}

#[wasm_bindgen_test]
async fn run_twice_duplicates_links() {
    let nav = mount_nav();
    let repository = LinkRepository::new(MemoryStore::new());

    run(&document(), &repository).await.unwrap();
    run(&document(), &repository).await.unwrap();

    assert_eq!(nav.children().length(), 5);
    nav.remove();
}

/// Stand-in for SortableJS that remembers the options it was created with
fn install_fake_sortable() {
    js_sys::eval(
        "globalThis.Sortable = { create(el, opts) { globalThis.lastSortableOptions = opts; return {}; } };",
    )
    .unwrap();
}

fn mount_list(id: &str) -> HtmlElement {
    let document = document();
    if let Some(old) = document.get_element_by_id(id) {
        old.remove();
    }

    let list = document.create_element("ul").unwrap();
    list.set_id(id);
    for name in ["Returns", "Orders", "Lists"] {
        let item = document.create_element("li").unwrap();
        item.set_text_content(Some(name));
        list.append_child(&item).unwrap();
    }
    document.body().unwrap().append_child(&list).unwrap();
    list.dyn_into::<HtmlElement>().unwrap()
}

/// Move the `from` child to slot `to` the way a drag does, then fire `onEnd`
fn drag(id: &str, from: u32, to: u32) {
    js_sys::eval(&format!(
        "(() => {{
            const list = document.getElementById('{id}');
            const item = list.children[{from}];
            list.removeChild(item);
            list.insertBefore(item, list.children[{to}] ?? null);
            globalThis.lastSortableOptions.onEnd({{ from: list, item, oldIndex: {from}, newIndex: {to} }});
        }})()"
    ))
    .unwrap();
}

fn three_links() -> LinkConfig {
    let mut config = LinkConfig::new(vec![]);
    for (name, url) in [("Returns", "/returns"), ("Orders", "/orders"), ("Lists", "/lists")] {
        config.add_custom(name, url).unwrap();
    }
    config
}

#[wasm_bindgen_test]
fn drag_down_restores_dom_and_reports_move() {
    install_fake_sortable();
    let list = mount_list("sortable-down");
    let moves = Rc::new(RefCell::new(Vec::new()));
    let recorded = moves.clone();

    let handle = sortable::attach(&list, move |from, to| recorded.borrow_mut().push((from, to)));
    assert!(handle.is_some());

    drag("sortable-down", 0, 2);

    assert_eq!(link_texts(&list), vec!["Returns", "Orders", "Lists"]);
    assert_eq!(*moves.borrow(), vec![(0, 2)]);

    let (from, to) = moves.borrow()[0];
    let moved = apply_edit(&PageState::Idle, &three_links(), &Edit::Move { from, to }).unwrap();
    let names: Vec<&str> = moved.links.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Orders", "Lists", "Returns"]);
    assert_eq!(moved.links[0].order, Some(0));
    list.remove();
}

#[wasm_bindgen_test]
fn drag_up_restores_dom_and_reports_move() {
    install_fake_sortable();
    let list = mount_list("sortable-up");
    let moves = Rc::new(RefCell::new(Vec::new()));
    let recorded = moves.clone();

    let _handle = sortable::attach(&list, move |from, to| recorded.borrow_mut().push((from, to)));
    drag("sortable-up", 2, 0);

    assert_eq!(link_texts(&list), vec!["Returns", "Orders", "Lists"]);
    assert_eq!(*moves.borrow(), vec![(2, 0)]);

    let moved = apply_edit(&PageState::Idle, &three_links(), &Edit::Move { from: 2, to: 0 }).unwrap();
    let names: Vec<&str> = moved.links.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Lists", "Returns", "Orders"]);
    list.remove();
}

#[wasm_bindgen_test]
fn attach_without_library_gives_no_handle() {
    js_sys::eval("delete globalThis.Sortable;").unwrap();
    let list = mount_list("sortable-missing");

    let handle = sortable::attach(&list, |_, _| {});

    assert!(handle.is_none());
    list.remove();
}
