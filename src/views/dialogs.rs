use crate::views::shared::spawn_with_controller;
use crate::widget::{CLEAR_PROMPT, ChatWidget};
use dioxus::prelude::*;

/// Blocking yes/no prompt in front of the clear request.
#[component]
pub fn ConfirmClearDialog(widget: Signal<ChatWidget>) -> Element {
    let mut widget = widget;
    if !widget.read().pending_clear() {
        return rsx! {};
    }

    rsx! {
        div { class: "dialog-overlay", role: "presentation",
            div { class: "dialog", role: "alertdialog", aria_modal: "true",
                p { class: "dialog-text", "{CLEAR_PROMPT}" }
                div { class: "dialog-actions",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| widget.with_mut(ChatWidget::decline_clear),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        autofocus: true,
                        onclick: move |_| {
                            spawn_with_controller(move |controller| async move {
                                controller.confirm_clear(widget).await;
                            })
                        },
                        "OK"
                    }
                }
            }
        }
    }
}

#[component]
pub fn AlertDialog(widget: Signal<ChatWidget>) -> Element {
    let mut widget = widget;
    let Some(text) = widget.read().alert().map(str::to_string) else {
        return rsx! {};
    };

    rsx! {
        div { class: "dialog-overlay", role: "presentation",
            div { class: "dialog", role: "alertdialog", aria_modal: "true",
                p { class: "dialog-text", "{text}" }
                div { class: "dialog-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        autofocus: true,
                        onclick: move |_| widget.with_mut(ChatWidget::dismiss_alert),
                        "OK"
                    }
                }
            }
        }
    }
}
