//! Engine error types.

use thiserror::Error;

use crate::cdp::CdpError;

/// Engine-level errors.
///
/// Interaction failures (a stale index, an occluded element) are deliberately
/// not errors: they come back as boolean or outcome values so callers can
/// retry with a different index without exception plumbing.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// No candidate executable resolved.
    #[error("No Chrome/Chromium executable found among the configured candidates")]
    ChromeNotFound,

    /// The browser process failed to spawn.
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// The debug endpoint never became reachable; the process was cleaned up.
    #[error("Browser debug endpoint unreachable: {0}")]
    ConnectionFailed(String),

    /// An operation was called before `start()` or after `close()`.
    #[error("Browser not started")]
    NotStarted,

    /// A protocol command failed or timed out.
    #[error(transparent)]
    Cdp(#[from] CdpError),
}
