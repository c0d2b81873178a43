// src/main.rs
mod ai;
mod api;
mod capacity;
mod config;
mod layout;
mod model;
mod policy;
mod presets;
mod resolver;
mod store;
mod suggest;
mod types;

use config::AppConfig;

#[tokio::main]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("⚠️ Could not load .env: {}", err);
        }
    }

    let app_config = AppConfig::from_env();
    let api_config = app_config.api.clone();
    let assistant_config = app_config.assistant.clone();
    let layout_config = app_config.layout;

    println!("🍳 Kitchen organizer service starting...");
    api::start_api_server(api_config, assistant_config, layout_config).await;
}
