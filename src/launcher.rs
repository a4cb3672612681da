//! Browser process launcher.
//!
//! Resolves an executable from the configured candidate list, spawns it with
//! a throwaway profile and a remote-debugging port, then polls the debug
//! endpoint until it yields a WebSocket debugger URL.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tempfile::TempDir;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::cdp::protocol::BrowserVersion;
use crate::config::BrowserConfig;
use crate::error::BrowserError;

/// A running browser process with its debugger endpoint.
pub struct LaunchedChrome {
    child: Child,
    /// WebSocket debugger URL extracted from `/json/version`.
    pub ws_url: String,
    /// Profile directory; removed from disk when the handle drops.
    _profile_dir: TempDir,
}

impl LaunchedChrome {
    /// Terminate the process and wait for it to exit.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.child.kill().await {
            warn!("Failed to kill browser process: {}", e);
        }
    }
}

/// Launches a browser configured for CDP control.
pub struct ChromeLauncher {
    config: BrowserConfig,
}

impl ChromeLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// Spawn the browser and wait for its debug endpoint.
    ///
    /// Fails with [`BrowserError::ChromeNotFound`] when no candidate
    /// resolves, [`BrowserError::LaunchFailed`] when the spawn itself fails,
    /// and [`BrowserError::ConnectionFailed`] when the polling budget runs
    /// out; in the last case the spawned process has been terminated.
    pub async fn launch(&self) -> Result<LaunchedChrome, BrowserError> {
        let executable = self.resolve_executable()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .map_err(|e| BrowserError::LaunchFailed(format!("http client: {}", e)))?;

        let profile_dir = tempfile::Builder::new()
            .prefix("webhelm-profile-")
            .tempdir()
            .map_err(|e| BrowserError::LaunchFailed(format!("profile dir: {}", e)))?;

        info!(
            executable = %executable,
            port = self.config.debug_port,
            headless = self.config.headless,
            "Launching browser"
        );

        let mut cmd = Command::new(&executable);
        cmd.arg(format!("--remote-debugging-port={}", self.config.debug_port))
            .arg(format!("--user-data-dir={}", profile_dir.path().display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        if self.config.headless {
            cmd.arg("--headless=new");
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(format!("{}: {}", executable, e)))?;

        match self.wait_for_debugger(&http).await {
            Some(ws_url) => {
                info!("Browser debug endpoint ready at {}", ws_url);
                Ok(LaunchedChrome {
                    child,
                    ws_url,
                    _profile_dir: profile_dir,
                })
            }
            None => {
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill browser after connect failure: {}", e);
                }
                Err(BrowserError::ConnectionFailed(format!(
                    "debug endpoint on port {} not ready after {} attempts",
                    self.config.debug_port, self.config.launch_poll_attempts
                )))
            }
        }
    }

    /// First candidate that resolves: absolute paths must exist, bare names
    /// are handed to PATH resolution as-is.
    fn resolve_executable(&self) -> Result<String, BrowserError> {
        for candidate in &self.config.chrome_candidates {
            let is_path = candidate.contains('/') || candidate.contains('\\');
            if is_path {
                if Path::new(candidate).exists() {
                    return Ok(candidate.clone());
                }
            } else {
                return Ok(candidate.clone());
            }
        }
        Err(BrowserError::ChromeNotFound)
    }

    /// Poll `/json/version` until it answers with a debugger URL.
    async fn wait_for_debugger(&self, http: &reqwest::Client) -> Option<String> {
        let url = format!("http://127.0.0.1:{}/json/version", self.config.debug_port);

        for attempt in 1..=self.config.launch_poll_attempts {
            tokio::time::sleep(self.config.launch_poll_interval).await;

            match http.get(&url).send().await {
                Ok(response) => match response.json::<BrowserVersion>().await {
                    Ok(version) => return Some(version.web_socket_debugger_url),
                    Err(e) => debug!("Malformed /json/version response: {}", e),
                },
                Err(_) => debug!(
                    "Waiting for debug endpoint ({}/{})",
                    attempt, self.config.launch_poll_attempts
                ),
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
