//! Browser engine façade.
//!
//! Owns the browser process, the CDP transport, the attached page session,
//! and the per-observation element cache. The planning layer drives the page
//! exclusively through these operations, addressing elements by the indices
//! of the latest observation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cdp::protocol::ScreenshotFormat;
use crate::cdp::session::PageSession;
use crate::cdp::transport::CdpTransport;
use crate::config::BrowserConfig;
use crate::detect::{ChangeDetector, PageEffect};
use crate::dom::{self, ElementIndexCache};
use crate::error::BrowserError;
use crate::highlight;
use crate::keys::{self, KeyChord};
use crate::launcher::{ChromeLauncher, LaunchedChrome};

const SCREENSHOT_QUALITY: u8 = 60;
const DEFAULT_VIEWPORT_HEIGHT: f64 = 1000.0;
const SCROLL_ANCHOR: (f64, f64) = (400.0, 400.0);
const POST_CLICK_SETTLE: Duration = Duration::from_millis(800);

/// Snapshot of the page handed to the planning layer. Superseded, never
/// mutated, by the next observation.
#[derive(Debug, Clone)]
pub struct BrowserState {
    pub url: String,
    pub title: String,
    /// One line per interactive element: `[index] <tag attr='v'> text`.
    pub elements: String,
    /// JPEG capture, absent when the screenshot failed.
    pub screenshot: Option<Vec<u8>>,
}

/// Outcome of a feedback-classified click.
#[derive(Debug, Clone)]
pub struct ClickFeedback {
    pub clicked: bool,
    /// Whether the script fallback did the clicking after native dispatch failed.
    pub via_script: bool,
    pub effect: Option<PageEffect>,
}

/// Single-target browser engine over CDP.
pub struct Browser {
    config: BrowserConfig,
    chrome: Option<LaunchedChrome>,
    transport: Option<Arc<CdpTransport>>,
    session: Option<PageSession>,
    cache: ElementIndexCache,
    detector: ChangeDetector,
}

impl Browser {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            chrome: None,
            transport: None,
            session: None,
            cache: ElementIndexCache::default(),
            detector: ChangeDetector::default(),
        }
    }

    /// Launch the browser, connect the transport, and attach a page session.
    /// Every failure path tears down whatever was already acquired.
    pub async fn start(&mut self) -> Result<(), BrowserError> {
        let chrome = ChromeLauncher::new(self.config.clone()).launch().await?;

        let transport = match CdpTransport::connect(
            &chrome.ws_url,
            self.config.command_timeout,
            self.config.max_frame_size,
        )
        .await
        {
            Ok(transport) => Arc::new(transport),
            Err(e) => {
                chrome.shutdown().await;
                return Err(e.into());
            }
        };

        let session = match PageSession::attach(transport.clone()).await {
            Ok(session) => session,
            Err(e) => {
                transport.close().await;
                chrome.shutdown().await;
                return Err(e.into());
            }
        };

        self.chrome = Some(chrome);
        self.transport = Some(transport);
        self.session = Some(session);
        info!("Browser started");
        Ok(())
    }

    /// Navigate to a URL and let the page settle.
    pub async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        let session = self.session()?;
        // Drop the overlay first so no stale highlight outlives the page.
        highlight::clear(session).await;
        session.navigate(url).await?;
        tokio::time::sleep(self.config.navigation_settle).await;
        Ok(())
    }

    /// Observe the page: rebuild the element cache, render the listing,
    /// highlight the elements, and capture a screenshot.
    pub async fn observe(&mut self) -> Result<BrowserState, BrowserError> {
        self.cache.clear();
        let session = self.session.as_ref().ok_or(BrowserError::NotStarted)?;

        let info = session.target_info().await?;
        let elements = dom::capture(session).await?;
        let listing = dom::render_listing(&elements);
        self.cache.rebuild(&elements);
        debug!("Observed {} interactive elements", elements.len());

        if !elements.is_empty() {
            highlight::render(session, &elements).await;
            tokio::time::sleep(Duration::from_millis(200)).await;
        }

        let screenshot = match session
            .screenshot(ScreenshotFormat::Jpeg, Some(SCREENSHOT_QUALITY))
            .await
        {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Screenshot capture failed: {}", e);
                None
            }
        };

        Ok(BrowserState {
            url: info.url,
            title: info.title,
            elements: listing,
            screenshot,
        })
    }

    /// Click an element by index via synthesized mouse events.
    ///
    /// Returns `false` rather than raising for every ordinary interaction
    /// failure: unknown index, missing box model, dispatch errors. Callers
    /// are expected to fall back to [`Self::click_via_script`].
    pub async fn click(&self, index: usize) -> bool {
        let Some(node_id) = self.cache.node_id(index) else {
            warn!("Element index {} not in cache", index);
            return false;
        };
        let Some(session) = self.session.as_ref() else {
            return false;
        };

        // The element may sit outside the viewport; mouse coordinates only
        // make sense after it is scrolled in.
        if let Err(e) = session.scroll_into_view(node_id).await {
            debug!("Native scroll-into-view failed, using script fallback: {}", e);
            let script = format!(
                r#"(function() {{
    const node = document.querySelector('[data-node-id="{}"]');
    if (node) {{ node.scrollIntoView({{block: 'center', behavior: 'smooth'}}); return true; }}
    return false;
}})()"#,
                node_id
            );
            if let Err(e) = session.evaluate(&script).await {
                debug!("Script scroll-into-view failed: {}", e);
            }
        }
        tokio::time::sleep(Duration::from_millis(300)).await;

        let model = match session.get_box_model(node_id).await {
            Ok(Some(model)) => model,
            Ok(None) => {
                warn!("No box model for element {}", index);
                return false;
            }
            Err(e) => {
                warn!("Box model lookup failed for element {}: {}", index, e);
                return false;
            }
        };
        let Some((x, y)) = model.content_center() else {
            warn!("Malformed content quad for element {}", index);
            return false;
        };

        match session.mouse_click(x, y).await {
            Ok(()) => {
                tokio::time::sleep(Duration::from_secs(1)).await;
                info!("Clicked element [{}] at ({}, {})", index, x, y);
                true
            }
            Err(e) => {
                warn!("Click failed for element [{}]: {}", index, e);
                false
            }
        }
    }

    /// Script-based click fallback: resolve the cached node to a remote
    /// object and invoke its `click` method. Bypasses real input-event side
    /// effects, so it runs strictly after native dispatch has failed.
    pub async fn click_via_script(&self, index: usize) -> bool {
        let Some(node_id) = self.cache.node_id(index) else {
            warn!("Element index {} not in cache", index);
            return false;
        };
        let Some(session) = self.session.as_ref() else {
            return false;
        };

        let object = match session.resolve_node(node_id).await {
            Ok(object) => object,
            Err(e) => {
                warn!("Failed to resolve element [{}]: {}", index, e);
                return false;
            }
        };
        let Some(object_id) = object.object_id else {
            warn!("Element [{}] resolved without an object id", index);
            return false;
        };

        match session
            .call_function_on(&object_id, "function() { this.click(); }")
            .await
        {
            Ok(_) => {
                info!("Script click executed for element [{}]", index);
                true
            }
            Err(e) => {
                warn!("Script click failed for element [{}]: {}", index, e);
                false
            }
        }
    }

    /// Click with before/after change classification: native dispatch first,
    /// script fallback second, then a settle delay and a fingerprint diff.
    pub async fn click_with_feedback(&self, index: usize) -> Result<ClickFeedback, BrowserError> {
        let session = self.session()?;
        let before = self.detector.capture(session).await?;

        let mut via_script = false;
        let mut clicked = self.click(index).await;
        if !clicked {
            via_script = self.click_via_script(index).await;
            clicked = via_script;
        }
        if !clicked {
            return Ok(ClickFeedback {
                clicked: false,
                via_script: false,
                effect: None,
            });
        }

        tokio::time::sleep(POST_CLICK_SETTLE).await;
        let after = self.detector.capture(self.session()?).await?;

        Ok(ClickFeedback {
            clicked: true,
            via_script,
            effect: Some(self.detector.classify(&before, &after)),
        })
    }

    /// Type text into an element by index: focus, clear via select-all, then
    /// per-character keystrokes. Returns `false` on any interaction failure.
    pub async fn input_text(&self, index: usize, text: &str) -> bool {
        let Some(node_id) = self.cache.node_id(index) else {
            warn!("Element index {} not in cache", index);
            return false;
        };
        let Some(session) = self.session.as_ref() else {
            return false;
        };

        if let Err(e) = session.focus(node_id).await {
            warn!("Focus failed for element [{}]: {}", index, e);
            return false;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;

        if let Err(e) = session.select_all(keys::platform_command_modifier()).await {
            warn!("Select-all failed for element [{}]: {}", index, e);
            return false;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;

        for ch in text.chars() {
            if let Err(e) = session.type_char(ch).await {
                warn!("Typing into element [{}] failed: {}", index, e);
                return false;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        info!("Typed {} characters into element [{}]", text.chars().count(), index);
        true
    }

    /// Send a key or `+`-joined combination, e.g. `Enter` or `ctrl+a`.
    pub async fn send_keys(&self, keys_input: &str) -> Result<(), BrowserError> {
        use crate::cdp::protocol::KeyEventType::{KeyDown, KeyUp, RawKeyDown};

        let session = self.session()?;
        let chord = KeyChord::parse(keys_input);

        if chord.modifiers.is_empty() {
            session.key_event(KeyDown, &chord.key, 0).await?;
            session.key_event(KeyUp, &chord.key, 0).await?;
        } else {
            let bitmask = chord.bitmask();
            for modifier in &chord.modifiers {
                session.key_event(RawKeyDown, modifier, 0).await?;
            }
            session.key_event(KeyDown, &chord.key, bitmask).await?;
            session.key_event(KeyUp, &chord.key, bitmask).await?;
            for modifier in chord.modifiers.iter().rev() {
                session.key_event(KeyUp, modifier, 0).await?;
            }
        }

        tokio::time::sleep(Duration::from_millis(300)).await;
        Ok(())
    }

    /// Scroll by whole pages via a synthetic mouse wheel.
    pub async fn scroll(&self, down: bool, pages: f64) -> Result<(), BrowserError> {
        let session = self.session()?;

        let viewport_height = match session.viewport_height().await {
            Ok(Some(height)) => height,
            Ok(None) => DEFAULT_VIEWPORT_HEIGHT,
            Err(e) => {
                debug!("Layout metrics unavailable, using default height: {}", e);
                DEFAULT_VIEWPORT_HEIGHT
            }
        };

        let mut delta = pages * viewport_height;
        if !down {
            delta = -delta;
        }

        let (x, y) = SCROLL_ANCHOR;
        session.mouse_wheel(x, y, 0.0, delta).await?;
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(())
    }

    /// Capture a JPEG screenshot.
    pub async fn screenshot(&self) -> Result<Vec<u8>, BrowserError> {
        let session = self.session()?;
        let bytes = session
            .screenshot(ScreenshotFormat::Jpeg, Some(SCREENSHOT_QUALITY))
            .await?;
        Ok(bytes)
    }

    /// Extract the rendered page text.
    pub async fn extract_content(&self) -> Result<String, BrowserError> {
        Ok(self.session()?.page_text().await?)
    }

    /// Tear down: close the socket, terminate the process, drop the cache.
    /// Safe to call at any point, including after a failed `start()`.
    pub async fn close(&mut self) {
        self.cache.clear();
        self.session = None;
        if let Some(transport) = self.transport.take() {
            transport.close().await;
        }
        if let Some(chrome) = self.chrome.take() {
            chrome.shutdown().await;
        }
        info!("Browser closed");
    }

    fn session(&self) -> Result<&PageSession, BrowserError> {
        self.session.as_ref().ok_or(BrowserError::NotStarted)
    }
}

impl Default for Browser {
    fn default() -> Self {
        Self::new(BrowserConfig::default())
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
