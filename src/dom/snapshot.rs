//! Interactive-element extraction.
//!
//! Fuses the full DOM tree (`DOM.getDocument`) with a layout snapshot
//! (`DOMSnapshot.captureSnapshot`) into a visibility/position index, then
//! walks the tree collecting visible interactive elements in document order.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::DomNode;
use crate::cdp::session::PageSession;

use super::attributes::AttributeMap;

/// Cap on elements surfaced per observation.
pub const MAX_ELEMENTS: usize = 100;

/// Traversal depth bound. The tree is acyclic by construction; the bound is
/// a safety net, and exceeding it means "stop descending", not an error.
pub const MAX_TRAVERSAL_DEPTH: usize = 50;

const MAX_RAW_TEXT_CHARS: usize = 100;
const MAX_TEXT_CHARS: usize = 80;
const MAX_ATTR_VALUE_CHARS: usize = 50;
const LISTING_ATTR_LIMIT: usize = 3;

const INTERACTIVE_TAGS: &[&str] = &["a", "button", "input", "textarea", "select"];
const INTERACTIVE_ROLES: &[&str] = &["button", "link", "checkbox", "radio", "tab", "menuitem"];
const FILTERED_ATTRIBUTES: &[&str] = &["id", "class", "name", "type", "href", "aria-label"];

/// Viewport-space bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One actionable element surfaced to the planning layer. Its index is its
/// position in the observation's element list and is only meaningful for
/// the observation cycle that produced it.
#[derive(Debug, Clone)]
pub struct InteractiveElement {
    pub node_id: i64,
    pub backend_node_id: i64,
    pub tag: String,
    pub text: String,
    pub attributes: AttributeMap,
    pub position: Option<Rect>,
}

/// Visibility and position lookups keyed by backend node id, fused from a
/// layout snapshot.
#[derive(Debug, Default)]
pub struct LayoutIndex {
    visible: HashMap<i64, bool>,
    position: HashMap<i64, Rect>,
}

impl LayoutIndex {
    /// Build the index from a `DOMSnapshot.captureSnapshot` result.
    ///
    /// `layout.nodeIndex[i]` points into the document's node arrays and
    /// `layout.bounds[i]` is that node's `[x, y, width, height]` rectangle.
    /// A node is visible only when both dimensions are positive; positions
    /// are recorded only for visible nodes.
    pub fn from_snapshot(snapshot: &Value) -> Self {
        let mut index = Self::default();

        let Some(documents) = snapshot["documents"].as_array() else {
            return index;
        };

        for doc in documents {
            let backend_ids = doc["nodes"]["backendNodeId"].as_array();
            let node_index = doc["layout"]["nodeIndex"].as_array();
            let bounds = doc["layout"]["bounds"].as_array();
            let (Some(backend_ids), Some(node_index)) = (backend_ids, node_index) else {
                continue;
            };

            for (i, snapshot_idx) in node_index.iter().enumerate() {
                let Some(node_pos) = snapshot_idx.as_u64().map(|v| v as usize) else {
                    continue;
                };
                let Some(backend_id) = backend_ids.get(node_pos).and_then(|v| v.as_i64()) else {
                    continue;
                };

                let mut is_visible = true;
                if let Some(rect) = bounds
                    .and_then(|b| b.get(i))
                    .and_then(|b| b.as_array())
                    .filter(|b| b.len() >= 4)
                {
                    let x = rect[0].as_f64().unwrap_or(0.0);
                    let y = rect[1].as_f64().unwrap_or(0.0);
                    let width = rect[2].as_f64().unwrap_or(0.0);
                    let height = rect[3].as_f64().unwrap_or(0.0);
                    is_visible = width > 0.0 && height > 0.0;
                    if is_visible {
                        index.position.insert(backend_id, Rect { x, y, width, height });
                    }
                }
                index.visible.insert(backend_id, is_visible);
            }
        }

        index
    }

    /// Absent nodes count as invisible.
    pub fn visible(&self, backend_node_id: i64) -> bool {
        self.visible.get(&backend_node_id).copied().unwrap_or(false)
    }

    pub fn position(&self, backend_node_id: i64) -> Option<Rect> {
        self.position.get(&backend_node_id).copied()
    }
}

/// Fetch DOM and layout data over the session and extract the interactive
/// elements, filling missing positions with on-demand box-model queries.
pub async fn capture(session: &PageSession) -> Result<Vec<InteractiveElement>, CdpError> {
    let root = session.get_document().await?;
    let snapshot = session.capture_layout_snapshot().await?;
    let layout = LayoutIndex::from_snapshot(&snapshot);

    let mut elements = collect_interactive(&root, &layout);
    debug!("Collected {} interactive elements", elements.len());

    for element in elements.iter_mut().filter(|e| e.position.is_none()) {
        match session.get_box_model(element.node_id).await {
            Ok(Some(model)) => {
                if let Some(rect) = rect_from_quad(&model.content) {
                    if rect.width > 0.0 && rect.height > 0.0 {
                        element.position = Some(rect);
                    }
                }
            }
            Ok(None) => {}
            // Position stays absent; the element is still listed and clickable.
            Err(e) => debug!("Box model lookup failed for node {}: {}", element.node_id, e),
        }
    }

    Ok(elements)
}

/// Pre-order depth-bounded traversal collecting visible interactive elements,
/// truncated to [`MAX_ELEMENTS`] in document order.
pub fn collect_interactive(root: &DomNode, layout: &LayoutIndex) -> Vec<InteractiveElement> {
    let mut elements = Vec::new();
    walk(root, layout, 0, &mut elements);
    elements.truncate(MAX_ELEMENTS);
    elements
}

fn walk(node: &DomNode, layout: &LayoutIndex, depth: usize, out: &mut Vec<InteractiveElement>) {
    if depth > MAX_TRAVERSAL_DEPTH {
        return;
    }

    if !node.is_element() {
        for child in &node.children {
            walk(child, layout, depth + 1, out);
        }
        return;
    }

    // A hidden container can still hold visible descendants, so an invisible
    // element is skipped from the result set but its children are not.
    if !layout.visible(node.backend_node_id) {
        for child in &node.children {
            walk(child, layout, depth + 1, out);
        }
        return;
    }

    let attributes = AttributeMap::from_flat(node.attributes.as_deref().unwrap_or(&[]));
    let tag = node.tag();

    if is_interactive(&tag, &attributes) {
        let text = derive_text(node, &tag, &attributes);
        let mut filtered = AttributeMap::default();
        for (key, value) in attributes.iter() {
            if FILTERED_ATTRIBUTES.contains(&key) {
                filtered.insert(key, safe_truncate(value, MAX_ATTR_VALUE_CHARS));
            }
        }

        out.push(InteractiveElement {
            node_id: node.node_id,
            backend_node_id: node.backend_node_id,
            tag,
            text,
            attributes: filtered,
            position: layout.position(node.backend_node_id),
        });
    }

    for child in &node.children {
        walk(child, layout, depth + 1, out);
    }
    for shadow in &node.shadow_roots {
        walk(shadow, layout, depth + 1, out);
    }
}

fn is_interactive(tag: &str, attributes: &AttributeMap) -> bool {
    INTERACTIVE_TAGS.contains(&tag)
        || attributes
            .get("role")
            .is_some_and(|role| INTERACTIVE_ROLES.contains(&role))
        || attributes.contains("onclick")
}

/// Display text: concatenated text-node descendants, falling back through
/// labeling attributes, else a generic tag label.
fn derive_text(node: &DomNode, tag: &str, attributes: &AttributeMap) -> String {
    let mut parts = Vec::new();
    collect_text(node, &mut parts);
    let joined = parts.join(" ");
    let text = safe_truncate(joined.trim(), MAX_RAW_TEXT_CHARS).to_string();

    let text = if text.is_empty() {
        ["aria-label", "title", "placeholder", "value", "alt"]
            .into_iter()
            .find_map(|key| attributes.get(key).filter(|v| !v.is_empty()))
            .map(|v| v.to_string())
            .unwrap_or_else(|| format!("{} element", tag))
    } else {
        text
    };

    safe_truncate(&text, MAX_TEXT_CHARS).to_string()
}

fn collect_text(node: &DomNode, out: &mut Vec<String>) {
    if node.is_text() {
        if let Some(value) = &node.node_value {
            out.push(value.clone());
        }
    }
    for child in &node.children {
        collect_text(child, out);
    }
}

/// One line per element: `[index] <tag attr='v' ...> text`, limited to the
/// first few non-empty filtered attributes.
pub fn render_listing(elements: &[InteractiveElement]) -> String {
    if elements.is_empty() {
        return "No interactive elements found".to_string();
    }

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let attrs: Vec<String> = element
                .attributes
                .iter()
                .filter(|(_, value)| !value.is_empty())
                .take(LISTING_ATTR_LIMIT)
                .map(|(key, value)| format!("{}='{}'", key, value))
                .collect();
            let attr_str = if attrs.is_empty() {
                String::new()
            } else {
                format!(" {}", attrs.join(" "))
            };
            format!("[{}] <{}{}> {}", index, element.tag, attr_str, element.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bounding rectangle of a box-model quad: min/max over its four corners.
pub fn rect_from_quad(quad: &[f64]) -> Option<Rect> {
    if quad.len() < 8 {
        return None;
    }
    let xs = [quad[0], quad[2], quad[4], quad[6]];
    let ys = [quad[1], quad[3], quad[5], quad[7]];
    let x = xs.iter().cloned().fold(f64::INFINITY, f64::min);
    let y = ys.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_x = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let max_y = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Some(Rect {
        x,
        y,
        width: max_x - x,
        height: max_y - y,
    })
}

/// Truncate to a character budget without splitting a code point.
pub(crate) fn safe_truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
