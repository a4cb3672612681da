//! Core session struct: target creation, flattened attach, command dispatch.

use std::sync::Arc;

use base64::Engine;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{CdpEvent, ScreenshotFormat};
use crate::cdp::transport::CdpTransport;

/// A session attached to a single page target.
///
/// Created by [`PageSession::attach`], which makes a blank page target and
/// attaches to it in flattened mode: the returned session id scopes every
/// subsequent command instead of nesting messages inside `Target.sendMessageToTarget`.
pub struct PageSession {
    transport: Arc<CdpTransport>,
    target_id: String,
    session_id: String,
    /// Unsolicited events for this session, fed by the transport reader task.
    events: tokio::sync::Mutex<mpsc::UnboundedReceiver<CdpEvent>>,
}

impl PageSession {
    /// Create a blank page target, attach to it, and enable the page, DOM,
    /// and runtime domains. Any enable failure leaves the session unusable.
    pub async fn attach(transport: Arc<CdpTransport>) -> Result<Self, CdpError> {
        let result = transport
            .call("Target.createTarget", Some(json!({"url": "about:blank"})), None)
            .await?;
        let target_id = result["targetId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("missing targetId".to_string()))?
            .to_string();

        let result = transport
            .call(
                "Target.attachToTarget",
                Some(json!({"targetId": target_id, "flatten": true})),
                None,
            )
            .await?;
        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("missing sessionId".to_string()))?
            .to_string();

        // Subscribe before enabling domains so no early event is lost.
        let events = transport.subscribe(&session_id);

        let session = Self {
            transport,
            target_id,
            session_id,
            events: tokio::sync::Mutex::new(events),
        };
        session.enable_domains().await?;

        debug!(
            target_id = %session.target_id,
            session_id = %session.session_id,
            "Attached page session"
        );
        Ok(session)
    }

    /// Get target ID.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Get session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command scoped to this session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id))
            .await
    }

    /// Send a browser-level (unscoped) CDP command.
    pub(crate) async fn call_browser(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, CdpError> {
        self.transport.call(method, params, None).await
    }

    async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("DOM.enable", None).await?;
        self.call("Runtime.enable", None).await?;
        Ok(())
    }

    /// Next unsolicited event for this session, if any has been queued.
    pub async fn try_next_event(&self) -> Option<CdpEvent> {
        self.events.lock().await.try_recv().ok()
    }

    /// Wait for the next unsolicited event for this session.
    pub async fn next_event(&self) -> Option<CdpEvent> {
        self.events.lock().await.recv().await
    }

    /// Take a screenshot and return the decoded image bytes.
    pub async fn screenshot(
        &self,
        format: ScreenshotFormat,
        quality: Option<u8>,
    ) -> Result<Vec<u8>, CdpError> {
        let mut params = json!({"format": format});
        if let Some(q) = quality {
            params["quality"] = json!(q);
        }

        let result = self.call("Page.captureScreenshot", Some(params)).await?;
        let data = result["data"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("missing screenshot data".to_string()))?;

        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| CdpError::InvalidResponse(format!("screenshot payload: {}", e)))
    }

    /// Extract the rendered page text.
    pub async fn page_text(&self) -> Result<String, CdpError> {
        let value = self.evaluate("document.body.innerText").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }
}
