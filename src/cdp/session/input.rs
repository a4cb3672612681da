//! Input (mouse and keyboard) primitives for a page session.

use serde_json::{Value, json};
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{KeyEventType, MouseButton, MouseEventType};
use crate::keys;

use super::core::PageSession;

impl PageSession {
    /// Dispatch a left-button press followed by a release at the point.
    pub async fn mouse_click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.mouse_event(MouseEventType::MousePressed, x, y).await?;
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        self.mouse_event(MouseEventType::MouseReleased, x, y).await?;
        debug!("Clicked at ({}, {})", x, y);
        Ok(())
    }

    async fn mouse_event(&self, kind: MouseEventType, x: f64, y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": kind,
                "x": x,
                "y": y,
                "button": MouseButton::Left,
                "clickCount": 1,
            })),
        )
        .await?;
        Ok(())
    }

    /// Dispatch a mouse-wheel event at the point with the given delta.
    pub async fn mouse_wheel(&self, x: f64, y: f64, delta_x: f64, delta_y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": MouseEventType::MouseWheel,
                "x": x,
                "y": y,
                "deltaX": delta_x,
                "deltaY": delta_y,
            })),
        )
        .await?;
        Ok(())
    }

    /// Dispatch one key event carrying key name, code, and virtual key code.
    pub async fn key_event(
        &self,
        kind: KeyEventType,
        key: &str,
        modifiers: i32,
    ) -> Result<(), CdpError> {
        let mut params = keys::key_event_params(key);
        params["type"] = json!(kind);
        if modifiers != 0 {
            params["modifiers"] = json!(modifiers);
        }
        self.call("Input.dispatchKeyEvent", Some(params)).await?;
        Ok(())
    }

    /// Insert one character as a `char` event, as a physical keystroke would.
    pub async fn type_char(&self, ch: char) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchKeyEvent",
            Some(json!({
                "type": KeyEventType::Char,
                "text": ch.to_string(),
            })),
        )
        .await?;
        Ok(())
    }

    /// Select-all chord used to clear a focused field before typing.
    pub async fn select_all(&self, modifiers: i32) -> Result<(), CdpError> {
        for kind in [KeyEventType::KeyDown, KeyEventType::KeyUp] {
            self.call(
                "Input.dispatchKeyEvent",
                Some(json!({
                    "type": kind,
                    "key": "a",
                    "code": "KeyA",
                    "modifiers": modifiers,
                })),
            )
            .await?;
        }
        Ok(())
    }

    /// Raw key event dispatch for callers that build their own params.
    pub async fn dispatch_key_event(&self, params: Value) -> Result<(), CdpError> {
        self.call("Input.dispatchKeyEvent", Some(params)).await?;
        Ok(())
    }
}
