//! Playback delegate — hands stream URLs to an external player.
//!
//! The view only ever talks to a [`PlaybackDelegate`].  [`MpvPlayer`] is the
//! production implementation: a cheap sender in front of a background task
//! that owns the mpv process, spawning it lazily on first play and again if
//! it dies.  Results flow back as [`PlayerEvent`]s.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use radio_core::config::PlayerConfig;

use crate::mpv::{MpvDriver, MpvEvent, MpvHandle};

/// Receives the now-playing stream and the transport controls.
///
/// Calls must not block: implementations queue the work and report back
/// asynchronously.
pub trait PlaybackDelegate {
    /// Replace the current source with `url`.
    fn play(&mut self, url: &str);
    fn toggle_pause(&mut self);
    /// `volume` is 0.0–1.0.
    fn set_volume(&mut self, volume: f32);
    fn shutdown(&mut self);
}

/// What the player task reports back to the view.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// mpv accepted the stream.
    Started(String),
    Paused(bool),
    Error(String),
}

#[derive(Debug)]
enum PlayerCommand {
    Play(String),
    TogglePause,
    SetVolume(f32),
    Shutdown,
}

pub struct MpvPlayer {
    tx: mpsc::UnboundedSender<PlayerCommand>,
}

impl MpvPlayer {
    /// Start the player task.  mpv itself is not spawned until the first play.
    pub fn spawn(
        config: &PlayerConfig,
        events: mpsc::UnboundedSender<PlayerEvent>,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(player_task(
            config.mpv_path.clone(),
            config.default_volume.clamp(0.0, 1.0),
            rx,
            events,
        ));
        (Self { tx }, task)
    }

    fn send(&self, cmd: PlayerCommand) {
        if let Err(e) = self.tx.send(cmd) {
            warn!("player task gone, dropped {:?}", e.0);
        }
    }
}

impl PlaybackDelegate for MpvPlayer {
    fn play(&mut self, url: &str) {
        self.send(PlayerCommand::Play(url.to_string()));
    }

    fn toggle_pause(&mut self) {
        self.send(PlayerCommand::TogglePause);
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(PlayerCommand::SetVolume(volume));
    }

    fn shutdown(&mut self) {
        self.send(PlayerCommand::Shutdown);
    }
}

async fn player_task(
    mpv_path: Option<PathBuf>,
    volume: f32,
    mut rx: mpsc::UnboundedReceiver<PlayerCommand>,
    events: mpsc::UnboundedSender<PlayerEvent>,
) {
    let mut driver = MpvDriver::new(mpv_path, volume);
    let (mpv_event_tx, mut mpv_event_rx) = mpsc::channel::<MpvEvent>(64);
    let mut handle: Option<MpvHandle> = None;
    let mut paused = false;

    loop {
        tokio::select! {
            cmd = rx.recv() => {
                let Some(cmd) = cmd else { break };
                match cmd {
                    PlayerCommand::Play(url) => {
                        if handle.is_none() || !driver.process_alive() {
                            match driver.spawn_and_connect(mpv_event_tx.clone()).await {
                                Ok(h) => handle = Some(h),
                                Err(e) => {
                                    error!("player: could not start mpv: {:#}", e);
                                    handle = None;
                                    let _ = events.send(PlayerEvent::Error(format!("mpv: {}", e)));
                                    continue;
                                }
                            }
                        }
                        let Some(h) = handle.as_ref() else { continue };
                        match h.load_stream(&url).await {
                            Ok(()) => {
                                info!("player: playing {}", url);
                                if paused {
                                    let _ = h.set_pause(false).await;
                                    paused = false;
                                }
                                let _ = events.send(PlayerEvent::Started(url));
                            }
                            Err(e) => {
                                error!("player: loadfile failed: {:#}", e);
                                handle = None;
                                let _ = events.send(PlayerEvent::Error(format!("playback failed: {}", e)));
                            }
                        }
                    }
                    PlayerCommand::TogglePause => {
                        let Some(h) = handle.as_ref() else {
                            debug!("player: pause ignored, mpv not running");
                            continue;
                        };
                        match h.set_pause(!paused).await {
                            Ok(()) => {
                                paused = !paused;
                                let _ = events.send(PlayerEvent::Paused(paused));
                            }
                            Err(e) => {
                                warn!("player: set_pause failed: {:#}", e);
                                let _ = events.send(PlayerEvent::Error(format!("pause failed: {}", e)));
                            }
                        }
                    }
                    PlayerCommand::SetVolume(v) => {
                        driver.last_volume = v;
                        if let Some(h) = handle.as_ref() {
                            if let Err(e) = h.set_volume(v).await {
                                warn!("player: set_volume failed: {:#}", e);
                            }
                        }
                    }
                    PlayerCommand::Shutdown => break,
                }
            }
            Some(ev) = mpv_event_rx.recv() => {
                if let Some(reason) = ev.end_file_error() {
                    warn!("player: stream ended with error: {}", reason);
                    let _ = events.send(PlayerEvent::Error(format!("stream failed: {}", reason)));
                }
            }
        }
    }

    driver.kill().await;
    debug!("player: task exiting");
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every delegate call as a short string.
    #[derive(Clone, Default)]
    pub struct RecordingPlayer {
        pub calls: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingPlayer {
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PlaybackDelegate for RecordingPlayer {
        fn play(&mut self, url: &str) {
            self.calls.lock().unwrap().push(format!("play {}", url));
        }

        fn toggle_pause(&mut self) {
            self.calls.lock().unwrap().push("pause".to_string());
        }

        fn set_volume(&mut self, volume: f32) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("volume {:.2}", volume));
        }

        fn shutdown(&mut self) {
            self.calls.lock().unwrap().push("shutdown".to_string());
        }
    }
}
