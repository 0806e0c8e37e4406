//! Startup hooks.
//!
//! [`Autostart`] runs a user script once when the window manager starts.
//! The script is started in the background; its exit status is not
//! observed.

use crate::traits::Spawner;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from running a hook.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("autostart script {} does not exist", .0.display())]
    Missing(PathBuf),
    #[error("autostart script {} is not executable", .0.display())]
    NotExecutable(PathBuf),
    #[error("failed to start {}: {reason}", .path.display())]
    Spawn { path: PathBuf, reason: String },
}

/// The startup-once hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Autostart {
    /// Path to the script.  A leading `~` is expanded against `$HOME`.
    pub script: String,
    /// Disable without removing the path.
    pub enabled: bool,
}

impl Default for Autostart {
    fn default() -> Self {
        Self {
            script: "~/.config/qtile/autostart.sh".into(),
            enabled: true,
        }
    }
}

impl Autostart {
    /// The script path with `~` expanded.
    pub fn script_path(&self) -> PathBuf {
        expand_home(&self.script)
    }

    /// Start the script through `spawner`.  Returns the child's pid, or
    /// `None` when the hook is disabled.
    pub fn run<S: Spawner>(&self, spawner: &S) -> Result<Option<u32>, HookError> {
        if !self.enabled {
            debug!("autostart disabled");
            return Ok(None);
        }
        let path = self.script_path();
        check_executable(&path)?;

        let pid = spawner.spawn(&path, &[]).map_err(|e| HookError::Spawn {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        info!("autostart {} started (pid {})", path.display(), pid);
        Ok(Some(pid))
    }
}

fn check_executable(path: &Path) -> Result<(), HookError> {
    let meta = std::fs::metadata(path).map_err(|_| HookError::Missing(path.to_path_buf()))?;
    if !meta.is_file() || !is_executable(&meta) {
        return Err(HookError::NotExecutable(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(unix)]
fn is_executable(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &std::fs::Metadata) -> bool {
    true
}

/// Expand a leading `~` or `~/` against `$HOME`.  Other paths are returned
/// as given.
pub fn expand_home(path: &str) -> PathBuf {
    let home = || std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    if path == "~" {
        PathBuf::from(home())
    } else if let Some(rest) = path.strip_prefix("~/") {
        PathBuf::from(home()).join(rest)
    } else {
        PathBuf::from(path)
    }
}
