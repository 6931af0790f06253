use crate::views::shared::spawn_with_controller;
use crate::widget::ChatWidget;
use dioxus::prelude::*;

fn count_label(count: Option<u64>) -> String {
    count.map_or_else(|| "–".to_string(), |n| n.to_string())
}

#[component]
pub fn DocsPanel(widget: Signal<ChatWidget>) -> Element {
    let mut widget = widget;
    let snapshot = widget();
    let names = snapshot.document_entries();

    rsx! {
        aside { class: "sidebar",
            div { class: "sidebar-section",
                h3 { class: "section-title", "Documents" }
                div { class: "doc-count-card",
                    span { id: "docCount", class: "doc-count", "{count_label(snapshot.doc_count())}" }
                    span { class: "doc-count-label", "loaded" }
                }
                ul { id: "docList", class: "doc-list",
                    for (i, name) in names.iter().enumerate() {
                        li { key: "{i}", "{name}" }
                    }
                }
            }
            div { class: "sidebar-actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        spawn_with_controller(move |controller| async move {
                            controller.reload_documents(widget).await;
                        })
                    },
                    "Reload documents"
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| widget.with_mut(ChatWidget::request_clear),
                    "Clear conversation"
                }
            }
        }
    }
}
