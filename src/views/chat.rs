use crate::views::shared::{EntryView, spawn_with_controller};
use crate::widget::{ChatWidget, KeyAction, classify_key};
use dioxus::events::Key;
use dioxus::prelude::*;
use std::rc::Rc;

fn height_style(height: Option<u32>) -> String {
    match height {
        Some(px) => format!("height: {px}px;"),
        None => "height: auto;".to_string(),
    }
}

#[component]
pub fn ChatView(widget: Signal<ChatWidget>) -> Element {
    let mut widget = widget;
    let mut input_el = use_signal(|| Option::<Rc<MountedData>>::None);
    let mut bottom_el = use_signal(|| Option::<Rc<MountedData>>::None);

    let focus_requests = use_memo(move || widget.read().focus_requests());
    let scroll_requests = use_memo(move || widget.read().scroll_requests());

    use_effect(move || {
        focus_requests();
        if let Some(el) = input_el() {
            spawn(async move {
                let _ = el.set_focus(true).await;
            });
        }
    });

    // Always pin to the newest entry.
    use_effect(move || {
        scroll_requests();
        if let Some(el) = bottom_el() {
            spawn(async move {
                let _ = el.scroll_to(ScrollBehavior::Smooth).await;
            });
        }
    });

    let submit = move || {
        spawn_with_controller(move |controller| async move {
            controller.submit(widget).await;
        });
    };

    let snapshot = widget();
    let assistant_name = snapshot.assistant_name().to_string();
    let sending = snapshot.is_sending();

    rsx! {
        div { class: "chat-container",
            div { id: "chatMessages", class: "chat-messages",
                for (i, entry) in snapshot.entries().iter().enumerate() {
                    EntryView {
                        key: "{i}",
                        entry: entry.clone(),
                        widget,
                        assistant_name: assistant_name.clone(),
                    }
                }
                div {
                    class: "chat-bottom",
                    onmounted: move |evt: MountedEvent| bottom_el.set(Some(evt.data())),
                }
            }

            form { class: "chat-input-container",
                onsubmit: move |ev| ev.prevent_default(),
                div { class: "chat-input-wrapper",
                    textarea {
                        id: "messageInput",
                        rows: "1",
                        placeholder: "Ask about stocks, markets, or your documents...",
                        style: "{height_style(snapshot.input_height())}",
                        value: "{snapshot.input()}",
                        onmounted: move |evt: MountedEvent| input_el.set(Some(evt.data())),
                        oninput: move |ev| {
                            widget.with_mut(|w| w.set_input(ev.value()));
                            if let Some(el) = input_el() {
                                spawn(async move {
                                    if let Ok(size) = el.get_scroll_size().await {
                                        widget.with_mut(|w| w.fit_input_height(size.height));
                                    }
                                });
                            }
                        },
                        onkeydown: move |ev| {
                            let action = classify_key(ev.key() == Key::Enter, ev.modifiers().shift());
                            if action == KeyAction::Submit {
                                ev.prevent_default();
                                submit();
                            }
                        },
                    }
                    button {
                        id: "sendButton",
                        class: "send-button",
                        r#type: "button",
                        disabled: sending,
                        onclick: move |_| submit(),
                        "Send"
                    }
                }
            }
        }
    }
}
