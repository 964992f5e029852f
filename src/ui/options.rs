/// Options page: edit, toggle, reorder and persist the link list

use crate::error::LinkError;
use crate::links::LinkConfig;
use crate::storage::{LinkRepository, SyncStorage};
use crate::ui::components::{LinkRow, StatusBanner};
use crate::ui::editor::{apply_edit, open, save_with_status, Edit, PageState, Status};
use crate::ui::sortable;
use log::{error, warn};
use patternfly_yew::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, HtmlInputElement};
use yew::prelude::*;

/// How long a save confirmation or error stays visible
pub const STATUS_TIMEOUT_MS: i32 = 2000;

/// Shows a status message and clears it again after [`STATUS_TIMEOUT_MS`].
///
/// Only the newest message is cleared by its timer.
#[derive(Clone)]
struct StatusNotifier {
    status: UseStateHandle<Option<Status>>,
    generation: Rc<RefCell<u32>>,
}

impl StatusNotifier {
    fn show(&self, status: Status) {
        let current = {
            let mut generation = self.generation.borrow_mut();
            *generation = generation.wrapping_add(1);
            *generation
        };
        self.status.set(Some(status));

        let Some(window) = web_sys::window() else {
            return;
        };
        let handle = self.status.clone();
        let generation = self.generation.clone();
        let clear = Closure::once_into_js(move || {
            if *generation.borrow() == current {
                handle.set(None);
            }
        });
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            clear.unchecked_ref(),
            STATUS_TIMEOUT_MS,
        ) {
            warn!("Failed to schedule status reset: {:?}", e);
        }
    }
}

fn prompt(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(message) {
            warn!("Failed to show prompt: {:?}", e);
        }
    }
}

#[function_component(OptionsPage)]
pub fn options_page() -> Html {
    let state = use_state(|| PageState::Loading);
    let links = use_state(LinkConfig::default);
    let name_input = use_state(String::new);
    let url_input = use_state(String::new);
    let status = use_state(|| None::<Status>);
    let generation = use_mut_ref(|| 0u32);
    let list_ref = use_node_ref();
    let reorder_slot = use_mut_ref(|| None::<Callback<Edit, bool>>);

    let notifier = StatusNotifier {
        status: status.clone(),
        generation: generation.clone(),
    };

    // Load links on mount; seeding defaults is silent
    {
        let state = state.clone();
        let links = links.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let (config, page_state) = open(&LinkRepository::new(SyncStorage)).await;
                links.set(config);
                state.set(page_state);
            });
            || ()
        });
    }

    // Apply an edit, show it, then write the whole list. Returns whether it was applied.
    let on_edit = {
        let state = state.clone();
        let links = links.clone();

        Callback::from(move |edit: Edit| -> bool {
            match apply_edit(&state, &links, &edit) {
                Ok(next) => {
                    links.set(next.clone());
                    let notifier = notifier.clone();
                    spawn_local(async move {
                        let status = save_with_status(&LinkRepository::new(SyncStorage), &next).await;
                        notifier.show(status);
                    });
                    true
                }
                Err(LinkError::MissingField) => {
                    prompt("Please enter both a name and a URL.");
                    false
                }
                Err(e) => {
                    warn!("Ignoring {:?}: {}", edit, e);
                    false
                }
            }
        })
    };

    let on_name_input = {
        let name_input = name_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                name_input.set(input.value());
            }
        })
    };

    let on_url_input = {
        let url_input = url_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                url_input.set(input.value());
            }
        })
    };

    let on_add = {
        let on_edit = on_edit.clone();
        let name_input = name_input.clone();
        let url_input = url_input.clone();

        Callback::from(move |_: ()| {
            let edit = Edit::Add {
                name: (*name_input).clone(),
                url: (*url_input).clone(),
            };
            if on_edit.emit(edit) {
                name_input.set(String::new());
                url_input.set(String::new());
            }
        })
    };

    let on_add_click = on_add.reform(|_: MouseEvent| ());

    let on_input_keydown = {
        let on_add = on_add.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                on_add.emit(());
            }
        })
    };

    let on_toggle = {
        let on_edit = on_edit.clone();
        Callback::from(move |(index, enabled): (usize, bool)| {
            on_edit.emit(Edit::SetEnabled { index, enabled });
        })
    };

    let on_remove = {
        let on_edit = on_edit.clone();
        Callback::from(move |index: usize| {
            on_edit.emit(Edit::Remove(index));
        })
    };

    // The drag-and-drop closure outlives this render; it always calls the latest handler
    *reorder_slot.borrow_mut() = Some(on_edit);

    {
        let list_ref = list_ref.clone();
        let reorder_slot = reorder_slot.clone();

        use_effect_with((), move |_| {
            let handle = match list_ref.cast::<HtmlElement>() {
                Some(list) => {
                    let handle = sortable::attach(&list, move |from, to| {
                        let handler = reorder_slot.borrow().clone();
                        if let Some(handler) = handler {
                            handler.emit(Edit::Move { from, to });
                        }
                    });
                    if handle.is_none() {
                        warn!("Drag-and-drop library not loaded, reordering disabled");
                    }
                    handle
                }
                None => {
                    error!("Link list element missing, reordering disabled");
                    None
                }
            };

            move || drop(handle)
        });
    }

    let editable = state.accepts_edits();

    html! {
        <div class="options-container">
            <h1 class="options-title">{"Navigation Shortcuts"}</h1>

            if let Some(current) = (*status).clone() {
                <StatusBanner status={current} />
            }

            {match &*state {
                PageState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading links..."}</p>
                    </div>
                },
                PageState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                PageState::Idle => html! {}
            }}

            <ul class="links-list" ref={list_ref}>
                {for links.links.iter().enumerate().map(|(index, entry)| html! {
                    <LinkRow
                        index={index}
                        entry={entry.clone()}
                        on_toggle={on_toggle.clone()}
                        on_remove={on_remove.clone()}
                        disabled={!editable}
                    />
                })}
            </ul>

            <div class="add-link">
                <input
                    id="link-name"
                    type="text"
                    placeholder="Link name"
                    value={(*name_input).clone()}
                    disabled={!editable}
                    oninput={on_name_input}
                    onkeydown={on_input_keydown.clone()}
                />
                <input
                    id="link-url"
                    type="text"
                    placeholder="/path or https://..."
                    value={(*url_input).clone()}
                    disabled={!editable}
                    oninput={on_url_input}
                    onkeydown={on_input_keydown}
                />
                <Button onclick={on_add_click} disabled={!editable}>
                    {"Add Link"}
                </Button>
            </div>

            <p class="footer-options">
                {format!("{} links • {} shown", links.len(), links.links.iter().filter(|l| l.enabled && l.is_renderable()).count())}
            </p>
        </div>
    }
}
