/// Reusable pieces of the options page

use crate::links::{LinkEntry, LinkKind};
use crate::ui::editor::Status;
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusBannerProps {
    pub status: Status,
}

#[function_component(StatusBanner)]
pub fn status_banner(props: &StatusBannerProps) -> Html {
    let (alert_type, message) = match &props.status {
        Status::Saved(msg) => (AlertType::Success, msg.clone()),
        Status::Failed(msg) => (AlertType::Danger, msg.clone()),
    };

    html! {
        <div class="status-banner">
            <Alert r#type={alert_type} title={message} inline={true}>
            </Alert>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LinkRowProps {
    pub index: usize,
    pub entry: LinkEntry,
    pub on_toggle: Callback<(usize, bool)>,
    pub on_remove: Callback<usize>,
    #[prop_or(false)]
    pub disabled: bool,
}

/// One draggable, toggleable line of the link list
#[function_component(LinkRow)]
pub fn link_row(props: &LinkRowProps) -> Html {
    let entry = &props.entry;
    let index = props.index;

    let on_change = props.on_toggle.reform(move |e: Event| {
        let checked = e
            .target_dyn_into::<web_sys::HtmlInputElement>()
            .map(|input| input.checked())
            .unwrap_or_default();
        (index, checked)
    });

    html! {
        <li class="link-row">
            <span class="drag-handle" title="Drag to reorder">{"☰"}</span>
            <input
                type="checkbox"
                class="link-enabled"
                checked={entry.enabled}
                disabled={props.disabled}
                onchange={on_change}
            />
            <div class="link-details">
                <span class="link-name">{&entry.name}</span>
                <span class="link-url">{&entry.url}</span>
            </div>
            if entry.kind == LinkKind::Predefined {
                <span class="link-badge">{"Default"}</span>
            } else {
                <Button
                    onclick={props.on_remove.reform(move |_| index)}
                    variant={ButtonVariant::Danger}
                    size={ButtonSize::Small}
                    disabled={props.disabled}
                >
                    {"Remove"}
                </Button>
            }
        </li>
    }
}
