//! Transient on-page highlight overlay.
//!
//! Draws one outlined box with an index badge per positioned element so a
//! human (or a vision model reading the screenshot) can map indices to the
//! page. The container ignores pointer events and sits at maximal stacking
//! order, so it never interferes with synthesized input.

use serde_json::json;
use tracing::{debug, warn};

use crate::cdp::session::PageSession;
use crate::dom::InteractiveElement;

/// DOM id of the injected overlay container.
pub const OVERLAY_CONTAINER_ID: &str = "webhelm-highlights";

/// Script removing any previously injected overlay.
pub fn clear_script() -> String {
    format!(
        "(function() {{ const el = document.getElementById('{}'); if (el) el.remove(); }})();",
        OVERLAY_CONTAINER_ID
    )
}

/// Build the overlay script for elements with usable positions. Returns
/// `None` when no element has one.
pub fn overlay_script(elements: &[InteractiveElement]) -> Option<String> {
    let boxes: Vec<serde_json::Value> = elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| {
            let position = element.position?;
            if position.width <= 0.0 || position.height <= 0.0 {
                return None;
            }
            Some(json!({
                "index": index,
                "x": position.x,
                "y": position.y,
                "width": position.width,
                "height": position.height,
            }))
        })
        .collect();

    if boxes.is_empty() {
        return None;
    }

    let skipped = elements.len() - boxes.len();
    if skipped > 0 {
        debug!("{} elements lack a usable position and get no highlight", skipped);
    }

    let data = serde_json::to_string(&boxes).ok()?;
    Some(format!(
        r#"(function() {{
    const existing = document.getElementById('{id}');
    if (existing) existing.remove();

    const elements = {data};

    const container = document.createElement('div');
    container.id = '{id}';
    container.style.cssText = `
        position: absolute;
        top: 0;
        left: 0;
        width: 100vw;
        height: 100vh;
        pointer-events: none;
        z-index: 2147483647;
        overflow: visible;
    `;

    elements.forEach(el => {{
        const highlight = document.createElement('div');
        highlight.style.cssText = `
            position: absolute;
            left: ${{el.x}}px;
            top: ${{el.y}}px;
            width: ${{el.width}}px;
            height: ${{el.height}}px;
            outline: 2px solid #FF7F27;
            outline-offset: -2px;
            background: rgba(255, 127, 39, 0.1);
            pointer-events: none;
        `;

        const label = document.createElement('div');
        label.textContent = el.index;
        label.style.cssText = `
            position: absolute;
            top: -20px;
            left: 0;
            background-color: #FF7F27;
            color: white;
            padding: 2px 6px;
            font-size: 12px;
            font-family: monospace;
            font-weight: bold;
            border-radius: 3px;
            white-space: nowrap;
        `;

        highlight.appendChild(label);
        container.appendChild(highlight);
    }});

    document.body.appendChild(container);
    return {{ added: elements.length }};
}})();"#,
        id = OVERLAY_CONTAINER_ID,
        data = data,
    ))
}

/// Inject the overlay. Failures are logged and never fail the observation.
pub async fn render(session: &PageSession, elements: &[InteractiveElement]) {
    let Some(script) = overlay_script(elements) else {
        warn!("No elements with usable positions to highlight");
        return;
    };

    match session.evaluate(&script).await {
        Ok(value) => {
            let added = value["added"].as_u64().unwrap_or(0);
            debug!("Highlighted {} elements", added);
        }
        Err(e) => warn!("Failed to inject highlight overlay: {}", e),
    }
}

/// Remove the overlay, e.g. before navigating away. Best effort.
pub async fn clear(session: &PageSession) {
    if let Err(e) = session.evaluate(&clear_script()).await {
        debug!("Failed to clear highlight overlay: {}", e);
    }
}

#[cfg(test)]
#[path = "highlight_tests.rs"]
mod tests;
