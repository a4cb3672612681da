//! DOM operations for a page session.

use serde_json::{Value, json};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{BoxModel, DomNode, RemoteObject};

use super::core::PageSession;

impl PageSession {
    /// Fetch the entire DOM tree, piercing shadow boundaries.
    pub async fn get_document(&self) -> Result<DomNode, CdpError> {
        let result = self
            .call("DOM.getDocument", Some(json!({"depth": -1, "pierce": true})))
            .await?;
        let root: DomNode = serde_json::from_value(result["root"].clone())?;
        Ok(root)
    }

    /// Fetch a layout snapshot: per laid-out node, its backend node id,
    /// bounding rectangle, and the computed style flags that drive visibility.
    pub async fn capture_layout_snapshot(&self) -> Result<Value, CdpError> {
        self.call(
            "DOMSnapshot.captureSnapshot",
            Some(json!({
                "computedStyles": ["display", "visibility", "opacity"],
                "includePaintOrder": false,
                "includeDOMRects": true,
            })),
        )
        .await
    }

    /// Get the box model for a node. `None` when the node has no layout
    /// (hidden, detached, or zero-sized).
    pub async fn get_box_model(&self, node_id: i64) -> Result<Option<BoxModel>, CdpError> {
        let result = self
            .call("DOM.getBoxModel", Some(json!({"nodeId": node_id})))
            .await;

        match result {
            Ok(r) => {
                let model: BoxModel = serde_json::from_value(r["model"].clone())?;
                Ok(Some(model))
            }
            Err(CdpError::Protocol { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Focus an element.
    pub async fn focus(&self, node_id: i64) -> Result<(), CdpError> {
        self.call("DOM.focus", Some(json!({"nodeId": node_id}))).await?;
        Ok(())
    }

    /// Natively scroll a node into view.
    pub async fn scroll_into_view(&self, node_id: i64) -> Result<(), CdpError> {
        self.call(
            "DOM.scrollIntoViewIfNeeded",
            Some(json!({"nodeId": node_id})),
        )
        .await?;
        Ok(())
    }

    /// Resolve a DOM node to a runtime object for script interaction.
    pub async fn resolve_node(&self, node_id: i64) -> Result<RemoteObject, CdpError> {
        let result = self
            .call("DOM.resolveNode", Some(json!({"nodeId": node_id})))
            .await?;
        let object: RemoteObject = serde_json::from_value(result["object"].clone())?;
        Ok(object)
    }
}
