use super::*;
use crate::dom::{AttributeMap, InteractiveElement, Rect};

fn element(node_id: i64, position: Option<Rect>) -> InteractiveElement {
    InteractiveElement {
        node_id,
        backend_node_id: node_id * 10,
        tag: "button".to_string(),
        text: "Go".to_string(),
        attributes: AttributeMap::default(),
        position,
    }
}

fn rect(width: f64, height: f64) -> Rect {
    Rect { x: 5.0, y: 10.0, width, height }
}

#[test]
fn overlay_script_includes_container_and_boxes() {
    let elements = vec![element(1, Some(rect(80.0, 20.0))), element(2, Some(rect(40.0, 40.0)))];
    let script = overlay_script(&elements).unwrap();
    assert!(script.contains(OVERLAY_CONTAINER_ID));
    assert!(script.contains("pointer-events: none"));
    assert!(script.contains("2147483647"));
    assert!(script.contains("\"index\":0"));
    assert!(script.contains("\"index\":1"));
}

#[test]
fn overlay_script_skips_elements_without_positions() {
    let elements = vec![
        element(1, None),
        element(2, Some(rect(40.0, 40.0))),
        element(3, Some(rect(0.0, 40.0))),
    ];
    let script = overlay_script(&elements).unwrap();
    assert!(!script.contains("\"index\":0"));
    assert!(script.contains("\"index\":1"));
    assert!(!script.contains("\"index\":2"));
}

#[test]
fn overlay_script_is_none_without_positioned_elements() {
    assert!(overlay_script(&[]).is_none());
    assert!(overlay_script(&[element(1, None)]).is_none());
    assert!(overlay_script(&[element(1, Some(rect(0.0, 0.0)))]).is_none());
}

#[test]
fn clear_script_removes_the_container() {
    let script = clear_script();
    assert!(script.contains(OVERLAY_CONTAINER_ID));
    assert!(script.contains("remove()"));
}

#[test]
fn overlay_script_always_clears_prior_overlay_first() {
    let script = overlay_script(&[element(1, Some(rect(10.0, 10.0)))]).unwrap();
    let clear_pos = script.find("existing.remove()").unwrap();
    let append_pos = script.find("appendChild(container)").unwrap();
    assert!(clear_pos < append_pos);
}
