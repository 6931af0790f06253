use crate::client::HttpBackend;
use crate::config::WidgetConfig;
use crate::controller::ChatController;
use crate::views::{AlertDialog, ChatView, ConfirmClearDialog, DocsPanel};
use crate::widget::ChatWidget;
use dioxus::prelude::*;
use std::sync::Arc;

const WIDGET_CSS: Asset = asset!("/assets/widget.css");

fn build_controller(config: &WidgetConfig) -> Option<ChatController> {
    match HttpBackend::new(config.clone()) {
        Ok(backend) => Some(ChatController::new(Arc::new(backend))),
        Err(err) => {
            tracing::error!("failed to build HTTP client: {err}");
            None
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context::<WidgetConfig>();
    let controller = use_hook(|| build_controller(&config));

    let body = match controller {
        Some(controller) => rsx! {
            ChatApp { controller, config: config.clone() }
        },
        None => rsx! {
            div { class: "fatal", "Could not start the HTTP client. See the log for details." }
        },
    };
    rsx! {
        Styles {}
        {body}
    }
}

#[component]
fn ChatApp(controller: ChatController, config: WidgetConfig) -> Element {
    let controller = use_context_provider(|| controller);
    let widget =
        use_signal(|| ChatWidget::new(config.assistant_name.clone()).with_clock(config.clock));
    use_startup_sync(controller, widget);

    rsx! {
        div { class: "app",
            AppHeader { widget }
            div { class: "app-body",
                DocsPanel { widget }
                ChatView { widget }
            }
        }
        ConfirmClearDialog { widget }
        AlertDialog { widget }
    }
}

/// Checks the server and loads the document listing once on mount.
fn use_startup_sync(controller: ChatController, widget: Signal<ChatWidget>) {
    use_hook(move || {
        let health = controller.clone();
        spawn(async move {
            health.check_health(widget).await;
        });
        spawn(async move {
            controller.refresh_documents(widget).await;
        });
    });
}

#[component]
fn Styles() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: WIDGET_CSS }
    }
}

#[component]
fn AppHeader(widget: Signal<ChatWidget>) -> Element {
    let snapshot = widget.read();
    let (status_class, status_label) = match snapshot.server_online() {
        Some(true) => ("status-dot online", "Online"),
        Some(false) => ("status-dot offline", "Offline"),
        None => ("status-dot", "Connecting…"),
    };
    rsx! {
        header { class: "header",
            div { class: "header-content",
                h1 { class: "header-title", "{snapshot.assistant_name()}" }
                div { class: "status", title: "{status_label}",
                    span { class: "{status_class}" }
                    span { class: "status-label", "{status_label}" }
                }
            }
        }
    }
}
