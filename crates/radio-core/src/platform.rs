use std::path::{Path, PathBuf};

const APP_DIR: &str = "radiogrid";

#[cfg(unix)]
pub fn mpv_socket_name() -> String {
    format!(
        "{}/radiogrid-mpv-{}.sock",
        std::env::temp_dir().display(),
        std::process::id()
    )
}

#[cfg(windows)]
pub fn mpv_socket_name() -> String {
    format!("radiogrid-mpv-{}", std::process::id())
}

#[cfg(unix)]
pub fn mpv_socket_arg() -> String {
    format!("--input-ipc-server={}", mpv_socket_name())
}

#[cfg(windows)]
pub fn mpv_socket_arg() -> String {
    format!("--input-ipc-server=\\\\.\\pipe\\{}", mpv_socket_name())
}

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/radiogrid/ (XDG layout)
    // instead of macOS Application Support for consistency
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(temp_dir)
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir()
}

#[cfg(unix)]
pub fn mpv_binary_name() -> &'static str {
    "mpv"
}

#[cfg(windows)]
pub fn mpv_binary_name() -> &'static str {
    "mpv.exe"
}

fn find_beside_exe(name: &str) -> Option<PathBuf> {
    let current_exe = std::env::current_exe().ok()?;
    let dir = current_exe.parent()?;
    let p = dir.join(name);
    if p.exists() {
        return Some(p);
    }
    let p = dir.join("external").join(name);
    if p.exists() {
        return Some(p);
    }
    None
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|p| p.exists())
}

/// Find the mpv binary for playback.
///
/// Order: explicit override (if it exists), beside the current exe, PATH.
pub fn find_mpv_binary(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = override_path {
        if p.exists() {
            return Some(p.to_path_buf());
        }
        tracing::warn!("configured mpv_path {} does not exist", p.display());
    }
    find_beside_exe(mpv_binary_name()).or_else(|| find_on_path(mpv_binary_name()))
}
