//! Navigation and page metadata for a page session.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::TargetInfo;

use super::core::PageSession;

impl PageSession {
    /// Navigate to a URL. The page keeps loading after this resolves; callers
    /// that need a settled DOM wait before observing.
    pub async fn navigate(&self, url: &str) -> Result<(), CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|v| v.as_str()) {
            return Err(CdpError::InvalidResponse(format!(
                "navigation to {} failed: {}",
                url, error
            )));
        }

        debug!("Navigated to {}", url);
        Ok(())
    }

    /// Current title and url of the attached target.
    pub async fn target_info(&self) -> Result<TargetInfo, CdpError> {
        let result = self
            .call_browser(
                "Target.getTargetInfo",
                Some(json!({"targetId": self.target_id()})),
            )
            .await?;
        let info: TargetInfo = serde_json::from_value(result["targetInfo"].clone())?;
        Ok(info)
    }

    /// Visual viewport height from layout metrics, when the page reports one.
    pub async fn viewport_height(&self) -> Result<Option<f64>, CdpError> {
        let result = self.call("Page.getLayoutMetrics", None).await?;
        Ok(result["cssVisualViewport"]["clientHeight"].as_f64())
    }
}
