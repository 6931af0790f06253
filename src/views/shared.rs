use crate::controller::{ChatController, WidgetCell};
use crate::format::format_message;
use crate::types::{Message, Role};
use crate::widget::{ChatEntry, ChatWidget, WelcomeCard};
use dioxus::prelude::*;
use std::future::Future;

impl WidgetCell for Signal<ChatWidget> {
    fn update<R>(&mut self, f: impl FnOnce(&mut ChatWidget) -> R) -> R {
        self.with_mut(f)
    }
}

/// Runs a controller operation on the UI executor.
pub fn spawn_with_controller<F, Fut>(op: F)
where
    F: FnOnce(ChatController) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    let controller = consume_context::<ChatController>();
    spawn(op(controller));
}

#[component]
pub fn EntryView(entry: ChatEntry, widget: Signal<ChatWidget>, assistant_name: String) -> Element {
    match entry {
        ChatEntry::Welcome(card) => rsx! { WelcomePanel { card, widget } },
        ChatEntry::Message(message) => rsx! { MessageBubble { message, assistant_name } },
        ChatEntry::Typing => rsx! { TypingBubble { assistant_name } },
    }
}

#[component]
pub fn MessageBubble(message: Message, assistant_name: String) -> Element {
    let role = message.role;
    let author = role.author(&assistant_name).to_string();
    let body_html = format_message(&message.text);
    rsx! {
        div { class: format_args!("message {}", role.css_class()),
            div { class: "message-avatar", "{role.avatar()}" }
            div { class: "message-content",
                div { class: "message-header",
                    span { class: "message-author", "{author}" }
                    span { class: "message-time", "{message.timestamp}" }
                }
                div { class: "message-text", dangerous_inner_html: "{body_html}" }
            }
        }
    }
}

#[component]
pub fn TypingBubble(assistant_name: String) -> Element {
    rsx! {
        div { class: "message ai-message typing-message", id: "typingIndicator",
            div { class: "message-avatar", "{Role::Ai.avatar()}" }
            div { class: "message-content",
                div { class: "message-header",
                    span { class: "message-author", "{assistant_name}" }
                }
                div { class: "message-text typing-indicator",
                    div { class: "typing-dot" }
                    div { class: "typing-dot" }
                    div { class: "typing-dot" }
                }
            }
        }
    }
}

#[component]
pub fn WelcomePanel(card: WelcomeCard, widget: Signal<ChatWidget>) -> Element {
    rsx! {
        div { class: "welcome-message",
            div { class: "welcome-icon", "{card.icon}" }
            h2 { "{card.heading}" }
            p { "{card.description}" }
            div { class: "suggestions",
                div { class: "suggestion-title", "Try asking:" }
                for suggestion in card.suggestions.iter().copied() {
                    button {
                        key: "{suggestion}",
                        class: "suggestion-chip",
                        r#type: "button",
                        onclick: move |_| {
                            spawn_with_controller(move |controller| async move {
                                controller.send_suggestion(widget, suggestion).await;
                            })
                        },
                        "{suggestion}"
                    }
                }
            }
        }
    }
}
