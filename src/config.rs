//! Engine configuration.

use std::time::Duration;

/// Browser engine configuration.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run the browser headless.
    pub headless: bool,
    /// Remote debugging port.
    pub debug_port: u16,
    /// Ordered candidate executables: absolute paths are existence-checked,
    /// bare names are left to PATH resolution.
    pub chrome_candidates: Vec<String>,
    /// Per-command response bound. A crashed or navigated-away target stalls
    /// callers forever without one.
    pub command_timeout: Duration,
    /// Debug-endpoint polling budget after spawn.
    pub launch_poll_attempts: u32,
    /// Spacing between polls.
    pub launch_poll_interval: Duration,
    /// WebSocket frame-size limit; full-page DOM snapshots need well over
    /// the protocol default.
    pub max_frame_size: usize,
    /// Settle delay after navigation before the page is worth observing.
    pub navigation_settle: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            debug_port: 9222,
            chrome_candidates: default_chrome_candidates(),
            command_timeout: Duration::from_secs(5),
            launch_poll_attempts: 15,
            launch_poll_interval: Duration::from_secs(1),
            max_frame_size: 16 * 1024 * 1024,
            navigation_settle: Duration::from_secs(2),
        }
    }
}

/// Platform-specific Chrome/Chromium candidates, most specific first.
pub fn default_chrome_candidates() -> Vec<String> {
    let candidates: &[&str] = if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
        ]
    } else if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "google-chrome",
            "chromium-browser",
            "chromium",
        ]
    };
    candidates.iter().map(|s| s.to_string()).collect()
}
