use crate::client::ChatBackend;
use crate::widget::ChatWidget;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Somewhere the widget state lives. The app keeps it in a Dioxus signal;
/// tests use a plain `Rc<RefCell<_>>`.
pub trait WidgetCell {
    fn update<R>(&mut self, f: impl FnOnce(&mut ChatWidget) -> R) -> R;
}

impl WidgetCell for Rc<RefCell<ChatWidget>> {
    fn update<R>(&mut self, f: impl FnOnce(&mut ChatWidget) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Drives widget operations that need the network. Built once at startup
/// and shared by every component.
#[derive(Clone)]
pub struct ChatController {
    backend: Arc<dyn ChatBackend>,
}

impl PartialEq for ChatController {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.backend, &other.backend)
    }
}

impl ChatController {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    pub async fn submit(&self, mut widget: impl WidgetCell) {
        let Some(message) = widget.update(ChatWidget::begin_submit) else {
            return;
        };
        self.dispatch_chat(widget, message).await;
    }

    pub async fn send_suggestion(&self, mut widget: impl WidgetCell, text: &str) {
        let Some(message) = widget.update(|w| w.begin_suggestion(text)) else {
            return;
        };
        self.dispatch_chat(widget, message).await;
    }

    async fn dispatch_chat(&self, mut widget: impl WidgetCell, message: String) {
        let result = self.backend.chat(&message).await;
        match &result {
            Ok(reply) => tracing::info!(
                chars = reply.response.chars().count(),
                doc_count = ?reply.doc_count,
                "chat reply received"
            ),
            Err(err) => tracing::warn!("chat request failed: {err}"),
        }
        widget.update(|w| w.finish_submit(result));
    }

    /// Sends the clear request if the user accepted the confirmation.
    pub async fn confirm_clear(&self, mut widget: impl WidgetCell) {
        if !widget.update(ChatWidget::confirm_clear) {
            return;
        }
        let result = self.backend.clear().await;
        match &result {
            Ok(()) => tracing::info!("conversation cleared"),
            Err(err) => tracing::warn!("clear request failed: {err}"),
        }
        widget.update(|w| w.finish_clear(result));
    }

    pub async fn reload_documents(&self, widget: impl WidgetCell) {
        self.reload(widget, true).await;
    }

    /// Startup refresh: loads the listing without posting to the chat.
    pub async fn refresh_documents(&self, widget: impl WidgetCell) {
        self.reload(widget, false).await;
    }

    async fn reload(&self, mut widget: impl WidgetCell, announce: bool) {
        let result = self.backend.reload().await;
        match &result {
            Ok(listing) => tracing::info!(count = listing.count, "documents reloaded"),
            Err(err) => tracing::warn!("reload request failed: {err}"),
        }
        widget.update(|w| w.finish_reload(result, announce));
    }

    pub async fn check_health(&self, mut widget: impl WidgetCell) {
        let online = match self.backend.health().await {
            Ok(online) => online,
            Err(err) => {
                tracing::warn!("health check failed: {err}");
                false
            }
        };
        widget.update(|w| w.set_server_online(online));
    }
}
