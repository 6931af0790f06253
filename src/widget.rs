//! UI state of the chat widget.
//!
//! `ChatWidget` owns everything the view renders: the entry list, the input
//! field, the document listing and the dialogs. Each network-backed operation
//! is split into a synchronous `begin_*` step that runs before dispatch and a
//! `finish_*` step that applies the outcome, so the controller only ever holds
//! the state for the duration of a plain `&mut` call.

use crate::error::ClientResult;
use crate::types::{ChatReply, ClockStyle, DocumentListing, Message, Role};

pub const MAX_INPUT_HEIGHT_PX: u32 = 150;

pub const SUGGESTIONS: [&str; 3] = [
    "Should I invest in Reliance?",
    "Analyze TCS stock for me",
    "What documents do you have?",
];

pub const CHAT_FAILED: &str =
    "❌ Sorry, there was an error processing your request. Please try again.";
pub const RELOAD_FAILED: &str = "❌ Failed to reload documents. Please try again.";
pub const CLEAR_FAILED: &str = "Failed to clear conversation. Please try again.";
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear the conversation?";
pub const NO_DOCUMENTS: &str = "No documents found";

const WELCOME_DESCRIPTION: &str = "Your intelligent investment assistant. I analyze financial data, provide market insights, and help you make informed investment decisions.";

fn reload_confirmation(count: u64) -> String {
    format!("✅ Successfully reloaded {count} document(s) from the data folder.")
}

#[derive(Clone, Debug, PartialEq)]
pub struct WelcomeCard {
    pub icon: &'static str,
    pub heading: String,
    pub description: &'static str,
    pub suggestions: Vec<&'static str>,
}

impl WelcomeCard {
    pub fn new(assistant_name: &str) -> Self {
        Self {
            icon: "👋",
            heading: format!("Welcome to {assistant_name}!"),
            description: WELCOME_DESCRIPTION,
            suggestions: SUGGESTIONS.to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChatEntry {
    Welcome(WelcomeCard),
    Message(Message),
    Typing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    PassThrough,
}

/// Enter submits; Shift+Enter inserts a newline.
pub fn classify_key(is_enter: bool, shift: bool) -> KeyAction {
    if is_enter && !shift {
        KeyAction::Submit
    } else {
        KeyAction::PassThrough
    }
}

pub fn fit_height(scroll_height: f64) -> u32 {
    if !scroll_height.is_finite() || scroll_height <= 0.0 {
        return 0;
    }
    (scroll_height.ceil() as u32).min(MAX_INPUT_HEIGHT_PX)
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatWidget {
    assistant_name: String,
    clock: ClockStyle,
    entries: Vec<ChatEntry>,
    input: String,
    input_height: Option<u32>,
    in_flight: bool,
    listing: Option<DocumentListing>,
    doc_count: Option<u64>,
    pending_clear: bool,
    alert: Option<String>,
    server_online: Option<bool>,
    focus_requests: u64,
    scroll_requests: u64,
}

impl ChatWidget {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        let assistant_name = assistant_name.into();
        Self {
            entries: vec![ChatEntry::Welcome(WelcomeCard::new(&assistant_name))],
            assistant_name,
            clock: ClockStyle::default(),
            input: String::new(),
            input_height: None,
            in_flight: false,
            listing: None,
            doc_count: None,
            pending_clear: false,
            alert: None,
            server_online: None,
            focus_requests: 0,
            scroll_requests: 0,
        }
    }

    /// Clock used for the time shown under each new message.
    pub fn with_clock(mut self, clock: ClockStyle) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock(&self) -> ClockStyle {
        self.clock
    }

    pub fn assistant_name(&self) -> &str {
        &self.assistant_name
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|entry| match entry {
            ChatEntry::Message(msg) => Some(msg),
            _ => None,
        })
    }

    pub fn has_welcome(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, ChatEntry::Welcome(_)))
    }

    pub fn typing_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, ChatEntry::Typing))
            .count()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// `None` renders as `height: auto`.
    pub fn input_height(&self) -> Option<u32> {
        self.input_height
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight
    }

    pub fn doc_count(&self) -> Option<u64> {
        self.doc_count
    }

    /// Names for the document list; an empty listing yields the single
    /// "No documents found" line, an unloaded one yields nothing.
    pub fn document_entries(&self) -> Vec<String> {
        match &self.listing {
            Some(listing) if listing.names.is_empty() => vec![NO_DOCUMENTS.to_string()],
            Some(listing) => listing.names.clone(),
            None => Vec::new(),
        }
    }

    pub fn pending_clear(&self) -> bool {
        self.pending_clear
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn server_online(&self) -> Option<bool> {
        self.server_online
    }

    pub fn focus_requests(&self) -> u64 {
        self.focus_requests
    }

    pub fn scroll_requests(&self) -> u64 {
        self.scroll_requests
    }

    // ---------------
    // Input
    // ---------------

    /// Mirrors the field and drops the height back to automatic so the next
    /// measurement can shrink it.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.input_height = None;
    }

    pub fn fit_input_height(&mut self, scroll_height: f64) {
        self.input_height = Some(fit_height(scroll_height));
    }

    // ---------------
    // Submission
    // ---------------

    /// Runs everything that happens before the chat request goes out and
    /// returns the trimmed message to send. `None` means nothing changed:
    /// either the input is blank or a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.in_flight {
            return None;
        }
        let message = self.input.trim().to_string();
        if message.is_empty() {
            return None;
        }

        self.input.clear();
        self.input_height = None;
        self.in_flight = true;
        self.entries
            .retain(|entry| !matches!(entry, ChatEntry::Welcome(_)));
        self.push_message(Message::new(Role::User, message.clone(), self.clock));
        self.show_typing();
        Some(message)
    }

    pub fn begin_suggestion(&mut self, text: &str) -> Option<String> {
        if self.in_flight {
            return None;
        }
        self.set_input(text);
        self.begin_submit()
    }

    pub fn finish_submit(&mut self, result: ClientResult<ChatReply>) {
        self.remove_typing();
        match result {
            Ok(reply) => {
                self.push_message(Message::new(Role::Ai, reply.response, self.clock));
                if let Some(count) = reply.doc_count {
                    self.doc_count = Some(count);
                }
            }
            Err(_) => self.push_message(Message::new(Role::Ai, CHAT_FAILED, self.clock)),
        }
        self.in_flight = false;
        self.focus_requests += 1;
    }

    // ---------------
    // Clear
    // ---------------

    pub fn request_clear(&mut self) {
        self.pending_clear = true;
    }

    pub fn decline_clear(&mut self) {
        self.pending_clear = false;
    }

    /// Closes the confirmation; `true` when one was open and the clear
    /// request should go out.
    pub fn confirm_clear(&mut self) -> bool {
        std::mem::take(&mut self.pending_clear)
    }

    pub fn finish_clear(&mut self, result: ClientResult<()>) {
        match result {
            Ok(()) => {
                self.entries = vec![ChatEntry::Welcome(WelcomeCard::new(&self.assistant_name))];
            }
            Err(_) => self.alert = Some(CLEAR_FAILED.to_string()),
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // ---------------
    // Documents
    // ---------------

    /// Applies a reload outcome. `announce` appends the confirmation or
    /// error message to the chat; the silent startup refresh passes `false`.
    pub fn finish_reload(&mut self, result: ClientResult<DocumentListing>, announce: bool) {
        match result {
            Ok(listing) => {
                let count = listing.count;
                self.doc_count = Some(count);
                self.listing = Some(listing);
                if announce {
                    let confirmation = reload_confirmation(count);
                    self.push_message(Message::new(Role::Ai, confirmation, self.clock));
                }
            }
            Err(_) => {
                if announce {
                    self.push_message(Message::new(Role::Ai, RELOAD_FAILED, self.clock));
                }
            }
        }
    }

    pub fn set_server_online(&mut self, online: bool) {
        self.server_online = Some(online);
    }

    fn push_message(&mut self, message: Message) {
        self.entries.push(ChatEntry::Message(message));
        self.scroll_requests += 1;
    }

    fn show_typing(&mut self) {
        self.remove_typing();
        self.entries.push(ChatEntry::Typing);
        self.scroll_requests += 1;
    }

    fn remove_typing(&mut self) {
        self.entries
            .retain(|entry| !matches!(entry, ChatEntry::Typing));
    }
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ASSISTANT_NAME)
    }
}
