use finbot::config::WidgetConfig;
use finbot::logging;

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // A missing .env is normal; the bundled config covers the defaults.
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        eprintln!("failed to read .env: {err}");
    }
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {}

fn main() {
    load_dotenv();
    let loaded = WidgetConfig::load();
    let config = loaded.config;
    logging::init(config.log_level);
    logging::report_config_issues(&loaded.issues);
    tracing::info!(server = %config.server_url, "starting chat widget");

    dioxus::LaunchBuilder::new()
        .with_context(config)
        .launch(finbot::ui::App);
}
