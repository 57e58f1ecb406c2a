mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod mpv;
mod player;
mod theme;
mod widgets;

use std::time::Duration;

use tokio::sync::mpsc;

use radio_core::config::Config;

use crate::player::MpvPlayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = radio_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("radiogrid.log");
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
    eprintln!("radiogrid log: {}", log_path.display());

    tracing::info!("radiogrid starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config: {:#}, using defaults", e);
        Config::default()
    });

    // ── Player task (mpv is spawned lazily on first play) ────────────────────
    let (player_tx, player_rx) = mpsc::unbounded_channel();
    let (player, player_task) = MpvPlayer::spawn(&config.player, player_tx);

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(config, Box::new(player));
    let result = app.run(player_rx).await;

    // Give the player task a moment to kill mpv.
    if tokio::time::timeout(Duration::from_secs(2), player_task)
        .await
        .is_err()
    {
        tracing::warn!("player task did not exit in time");
    }

    result
}
