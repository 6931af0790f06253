//! Tracing setup shared by every launch target.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Formatter used on native targets.
pub fn fmt_subscriber(level: Level) -> FmtSubscriber {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .finish()
}

/// Installs the global subscriber for `level`.
///
/// Native builds print through `tracing-subscriber`. The browser has no
/// stdout or system clock for it, so web builds hand the level to the Dioxus
/// console logger instead. Returns `false` if a subscriber was already set.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: Level) -> bool {
    tracing::subscriber::set_global_default(fmt_subscriber(level)).is_ok()
}

#[cfg(all(target_arch = "wasm32", feature = "dioxus"))]
pub fn init(level: Level) -> bool {
    dioxus::logger::init(level).is_ok()
}

#[cfg(all(target_arch = "wasm32", not(feature = "dioxus")))]
pub fn init(_level: Level) -> bool {
    false
}

/// Logs config values that were rejected while loading.
pub fn report_config_issues(issues: &[anyhow::Error]) {
    for issue in issues {
        tracing::warn!("{issue:#}");
    }
}
