mod action;
mod app;
mod app_state;
mod client;
mod component;
mod components;
mod query;
mod session;
mod theme;
mod widgets;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = vibe_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("tui.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("vibealchemy log: {}", log_path.display());

    tracing::info!("vibealchemy starting…");

    let config = vibe_proto::config::Config::load().unwrap_or_default();

    let client = client::RecommendClient::new(&config.service.base_url);
    let tab_title = query::TabTitleSource::from_config(config.context.title_command.as_deref());

    let app = app::App::new(client, tab_title);
    app.run().await?;

    Ok(())
}
