/// mpv IPC driver with separated reader/writer tasks.
///
/// Architecture:
///
/// ```text
///   MpvDriver::spawn_and_connect()
///         │
///         ├── writer_task   ← receives PendingRequest via mpsc, serialises → socket
///         └── reader_task   ← reads JSON lines from socket
///                                ├── response (has request_id) → matched oneshot::Sender
///                                └── event                     → event_tx channel
/// ```
///
/// Platform notes:
/// - Unix:   Unix domain sockets
/// - Windows: Named pipes  \\.\pipe\<name>
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, info, warn};

#[cfg(unix)]
use tokio::net::UnixStream;

#[cfg(windows)]
use tokio::net::windows::named_pipe::ClientOptions;

static NEXT_REQ_ID: AtomicU64 = AtomicU64::new(1);

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<anyhow::Result<Value>>>>>;

struct PendingRequest {
    req_id: u64,
    payload: String, // serialised JSON line (already has '\n')
    reply: oneshot::Sender<anyhow::Result<Value>>,
}

/// An mpv event that arrived unsolicited (no request_id).
#[derive(Debug, Clone)]
pub struct MpvEvent {
    pub raw: Value,
}

impl MpvEvent {
    /// Returns the event name, e.g. "end-file", "start-file", "file-loaded".
    pub fn event_name(&self) -> Option<&str> {
        self.raw.get("event")?.as_str()
    }

    /// For an `end-file` event with `reason: "error"`, the reason mpv gives.
    pub fn end_file_error(&self) -> Option<String> {
        if self.event_name()? != "end-file" || self.raw.get("reason")?.as_str()? != "error" {
            return None;
        }
        Some(
            self.raw
                .get("file_error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        )
    }
}

// ── public handle ─────────────────────────────────────────────────────────────

/// Cloneable handle to the mpv writer task.  Use `send()` to fire a command
/// and await the response.
#[derive(Clone)]
pub struct MpvHandle {
    tx: mpsc::Sender<PendingRequest>,
}

impl MpvHandle {
    pub async fn send(&self, command: Value) -> anyhow::Result<Value> {
        let req_id = NEXT_REQ_ID.fetch_add(1, Ordering::Relaxed);
        let msg = json!({ "command": command, "request_id": req_id });
        let mut raw = serde_json::to_string(&msg)?;
        raw.push('\n');

        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(PendingRequest {
                req_id,
                payload: raw,
                reply: reply_tx,
            })
            .await
            .map_err(|_| anyhow::anyhow!("mpv writer task gone"))?;

        tokio::time::timeout(tokio::time::Duration::from_secs(5), reply_rx)
            .await
            .map_err(|_| anyhow::anyhow!("mpv IPC timeout for req={}", req_id))?
            .map_err(|_| anyhow::anyhow!("mpv reply channel dropped req={}", req_id))?
    }

    /// Replace whatever mpv is playing with `url`.
    pub async fn load_stream(&self, url: &str) -> anyhow::Result<()> {
        debug!("mpv: loadfile {}", url);
        self.send(json!(["loadfile", url, "replace"])).await?;
        Ok(())
    }

    pub async fn set_volume(&self, vol: f32) -> anyhow::Result<()> {
        self.send(json!(["set_property", "volume", volume_percent(vol)]))
            .await?;
        Ok(())
    }

    pub async fn set_pause(&self, paused: bool) -> anyhow::Result<()> {
        self.send(json!(["set_property", "pause", paused])).await?;
        Ok(())
    }
}

fn volume_percent(vol: f32) -> f64 {
    (vol.clamp(0.0, 1.0) * 100.0).round() as f64
}

// ── driver ────────────────────────────────────────────────────────────────────

/// Owns the mpv child process.
pub struct MpvDriver {
    pub socket_name: String,
    mpv_path: Option<PathBuf>,
    process: Option<tokio::process::Child>,
    pub last_volume: f32,
}

impl MpvDriver {
    pub fn new(mpv_path: Option<PathBuf>, volume: f32) -> Self {
        Self {
            socket_name: radio_core::platform::mpv_socket_name(),
            mpv_path,
            process: None,
            last_volume: volume,
        }
    }

    pub fn process_alive(&mut self) -> bool {
        if let Some(ref mut child) = self.process {
            match child.try_wait() {
                Ok(None) => true,
                Ok(Some(status)) => {
                    if let Some(code) = status.code() {
                        warn!("mpv process exited with code: {}", code);
                    } else {
                        warn!("mpv process terminated by signal");
                    }
                    false
                }
                Err(e) => {
                    warn!("mpv process_alive check failed: {}", e);
                    false
                }
            }
        } else {
            false
        }
    }

    /// Kill the process if running and clean up its socket.
    pub async fn kill(&mut self) {
        if let Some(mut p) = self.process.take() {
            let _ = p.kill().await;
            info!("mpv: process killed");
        }
        #[cfg(unix)]
        {
            let _ = tokio::fs::remove_file(&self.socket_name).await;
        }
    }

    fn spawn_process(&mut self) -> anyhow::Result<()> {
        let mpv_binary = radio_core::platform::find_mpv_binary(self.mpv_path.as_deref())
            .ok_or_else(|| anyhow::anyhow!("mpv binary not found"))?;

        let vol_arg = format!("--volume={}", volume_percent(self.last_volume) as i64);
        let ipc_arg = radio_core::platform::mpv_socket_arg();

        let data_dir = radio_core::platform::data_dir();
        std::fs::create_dir_all(&data_dir)?;
        let stderr_path = data_dir.join("mpv-stderr.log");
        let stderr_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&stderr_path)?;

        info!("mpv: spawning {}", mpv_binary.display());
        let child = tokio::process::Command::new(&mpv_binary)
            .arg("--no-video")
            .arg("--idle=yes")
            .arg(&ipc_arg)
            .arg("--quiet")
            .arg(&vol_arg)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(stderr_file)
            .kill_on_drop(true)
            .spawn()?;
        info!("mpv: spawned process with pid {:?}", child.id());
        self.process = Some(child);
        Ok(())
    }

    #[cfg(unix)]
    pub async fn spawn_and_connect(
        &mut self,
        event_tx: mpsc::Sender<MpvEvent>,
    ) -> anyhow::Result<MpvHandle> {
        self.kill().await;
        self.spawn_process()?;

        let socket_path = PathBuf::from(&self.socket_name);
        for _ in 0..50 {
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            if socket_path.exists() {
                break;
            }
        }
        if !socket_path.exists() {
            self.kill().await;
            anyhow::bail!("mpv IPC socket did not appear");
        }

        let stream = UnixStream::connect(&socket_path).await?;
        info!("mpv: connected to IPC socket");
        let (read_half, write_half) = stream.into_split();
        Ok(start_io_tasks(read_half, write_half, event_tx))
    }

    #[cfg(windows)]
    pub async fn spawn_and_connect(
        &mut self,
        event_tx: mpsc::Sender<MpvEvent>,
    ) -> anyhow::Result<MpvHandle> {
        self.kill().await;
        self.spawn_process()?;

        let pipe_path = format!(r"\\.\pipe\{}", self.socket_name);
        for _ in 0..50 {
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            if let Ok(client) = ClientOptions::new().open(&pipe_path) {
                info!("mpv: connected to named pipe");
                let (read_half, write_half) = tokio::io::split(client);
                return Ok(start_io_tasks(read_half, write_half, event_tx));
            }
        }
        self.kill().await;
        anyhow::bail!("mpv named pipe did not appear")
    }
}

/// Wire a connected socket to fresh reader/writer tasks.
fn start_io_tasks<R, W>(read_half: R, write_half: W, event_tx: mpsc::Sender<MpvEvent>) -> MpvHandle
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
    let (cmd_tx, cmd_rx) = mpsc::channel::<PendingRequest>(64);

    tokio::spawn(writer_task(write_half, cmd_rx, pending.clone()));
    tokio::spawn(reader_task(BufReader::new(read_half), pending, event_tx));

    MpvHandle { tx: cmd_tx }
}

// ── reader task ───────────────────────────────────────────────────────────────

async fn reader_task<R>(mut reader: BufReader<R>, pending: PendingMap, event_tx: mpsc::Sender<MpvEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                debug!("mpv reader: connection closed");
                fail_pending(&pending, "mpv IPC connection closed").await;
                break;
            }
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let val: Value = match serde_json::from_str(trimmed) {
                    Ok(v) => v,
                    Err(e) => {
                        debug!("mpv reader: invalid json '{}': {}", trimmed, e);
                        continue;
                    }
                };

                if let Some(req_id) = val.get("request_id").and_then(Value::as_u64) {
                    let mut map = pending.lock().await;
                    if let Some(tx) = map.remove(&req_id) {
                        let result = if val["error"].as_str() == Some("success") {
                            Ok(val)
                        } else {
                            let err = val["error"].as_str().unwrap_or("unknown error").to_string();
                            debug!("mpv reader: response req={} err={}", req_id, err);
                            Err(anyhow::anyhow!("mpv error: {}", err))
                        };
                        let _ = tx.send(result);
                    } else {
                        debug!("mpv reader: response for unknown req={}", req_id);
                    }
                } else {
                    debug!("mpv reader: event {}", trimmed);
                    let _ = event_tx.send(MpvEvent { raw: val }).await;
                }
            }
            Err(e) => {
                warn!("mpv reader: read error: {}", e);
                fail_pending(&pending, "mpv IPC read error").await;
                break;
            }
        }
    }
}

async fn fail_pending(pending: &PendingMap, reason: &str) {
    let mut map = pending.lock().await;
    for (_, tx) in map.drain() {
        let _ = tx.send(Err(anyhow::anyhow!("{}", reason)));
    }
}

// ── writer task ───────────────────────────────────────────────────────────────

async fn writer_task<W>(mut writer: W, mut rx: mpsc::Receiver<PendingRequest>, pending: PendingMap)
where
    W: AsyncWrite + Unpin,
{
    while let Some(req) = rx.recv().await {
        // Register before writing so the reader can always match the reply.
        pending.lock().await.insert(req.req_id, req.reply);
        debug!("mpv writer: send req={} payload={}", req.req_id, req.payload.trim());
        if let Err(e) = writer.write_all(req.payload.as_bytes()).await {
            warn!("mpv writer: write error: {}", e);
            if let Some(tx) = pending.lock().await.remove(&req.req_id) {
                let _ = tx.send(Err(anyhow::anyhow!("mpv write error: {}", e)));
            }
            break;
        }
    }
    let _ = writer.shutdown().await;
    debug!("mpv writer: task exiting");
}
