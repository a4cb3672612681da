//! Browser control engine over the Chrome DevTools Protocol (CDP).
//!
//! Launches a Chrome/Chromium process, drives a single page target over the
//! debugging WebSocket, reconstructs a semantic model of the interactive
//! elements on the page, and synthesizes mouse/keyboard input to act on them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │     Browser     │ ◄──────────────► │  Chrome process  │
//! │  (this crate)   │       CDP        │  (spawned here)  │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! An observe/act loop drives the engine:
//!
//! ```rust,ignore
//! let mut browser = Browser::new(BrowserConfig::default());
//! browser.start().await?;
//! browser.navigate("https://example.com").await?;
//!
//! let state = browser.observe().await?;
//! println!("{}", state.elements);   // "[0] <a href='/about'> About ..."
//!
//! let feedback = browser.click_with_feedback(0).await?;
//! browser.close().await;
//! ```
//!
//! Element indices come from the latest [`Browser::observe`] call and die
//! with it: the next observation rebuilds the index cache from scratch.
//! Interaction failures (stale index, occluded element) are ordinary `false`
//! results rather than errors, so a planning layer can retry with another
//! index without exception handling on every call.

pub mod browser;
pub mod cdp;
pub mod config;
pub mod detect;
pub mod dom;
pub mod error;
pub mod highlight;
pub mod keys;
pub mod launcher;

pub use browser::{Browser, BrowserState, ClickFeedback};
pub use cdp::{CdpError, CdpTransport, PageSession};
pub use config::BrowserConfig;
pub use detect::{ChangeDetector, PageEffect, PageFingerprint};
pub use dom::{AttributeMap, ElementIndexCache, InteractiveElement};
pub use error::BrowserError;
pub use launcher::{ChromeLauncher, LaunchedChrome};
