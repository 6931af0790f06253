pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod logging;
pub mod types;
pub mod widget;

#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;
