pub mod chat;
pub mod dialogs;
pub mod docs;
pub mod shared;

pub use chat::ChatView;
pub use dialogs::{AlertDialog, ConfirmClearDialog};
pub use docs::DocsPanel;
