use super::*;

#[test]
fn request_serializes_without_session_id() {
    let req = CdpRequest {
        id: 1,
        method: "Page.navigate".to_string(),
        params: Some(serde_json::json!({"url": "https://example.com"})),
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Page.navigate"));
    assert!(json.contains("example.com"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn request_serializes_with_session_id() {
    let req = CdpRequest {
        id: 7,
        method: "DOM.enable".to_string(),
        params: None,
        session_id: Some("sess-1".to_string()),
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("\"sessionId\":\"sess-1\""));
    assert!(!json.contains("params"));
}

#[test]
fn response_frame_deserializes() {
    let json = r#"{"id": 1, "result": {"frameId": "abc"}}"#;
    let frame: CdpFrame = serde_json::from_str(json).unwrap();
    assert_eq!(frame.id, Some(1));
    assert!(frame.result.is_some());
    assert!(frame.method.is_none());
}

#[test]
fn error_frame_deserializes() {
    let json = r#"{"id": 3, "error": {"code": -32000, "message": "No node found"}}"#;
    let frame: CdpFrame = serde_json::from_str(json).unwrap();
    let err = frame.error.unwrap();
    assert_eq!(err.code, -32000);
    assert_eq!(err.message, "No node found");
}

#[test]
fn event_frame_deserializes() {
    let json = r#"{"method": "Page.loadEventFired", "params": {"timestamp": 1.0}, "sessionId": "s"}"#;
    let frame: CdpFrame = serde_json::from_str(json).unwrap();
    assert_eq!(frame.id, None);
    assert_eq!(frame.method.as_deref(), Some("Page.loadEventFired"));
    assert_eq!(frame.session_id.as_deref(), Some("s"));
}

#[test]
fn dom_node_deserializes_with_attributes_and_shadow_roots() {
    let json = serde_json::json!({
        "nodeId": 4,
        "backendNodeId": 44,
        "nodeType": 1,
        "nodeName": "BUTTON",
        "localName": "button",
        "attributes": ["id", "go", "class", "primary"],
        "shadowRoots": [{
            "nodeId": 5,
            "backendNodeId": 55,
            "nodeType": 11,
            "nodeName": "#document-fragment"
        }]
    });
    let node: DomNode = serde_json::from_value(json).unwrap();
    assert!(node.is_element());
    assert_eq!(node.tag(), "button");
    assert_eq!(node.attributes.as_ref().unwrap().len(), 4);
    assert_eq!(node.shadow_roots.len(), 1);
    assert!(node.children.is_empty());
}

#[test]
fn dom_node_tag_falls_back_to_node_name() {
    let json = serde_json::json!({
        "nodeId": 1,
        "backendNodeId": 2,
        "nodeType": 9,
        "nodeName": "#document"
    });
    let node: DomNode = serde_json::from_value(json).unwrap();
    assert_eq!(node.tag(), "#document");
    assert!(!node.is_element());
}

#[test]
fn box_model_content_center_is_corner_midpoint() {
    let model = BoxModel {
        content: vec![10.0, 20.0, 110.0, 20.0, 110.0, 60.0, 10.0, 60.0],
        padding: vec![],
        border: vec![],
        margin: vec![],
        width: 100,
        height: 40,
    };
    assert_eq!(model.content_center(), Some((60.0, 40.0)));
}

#[test]
fn box_model_center_requires_full_quad() {
    let model = BoxModel {
        content: vec![1.0, 2.0],
        padding: vec![],
        border: vec![],
        margin: vec![],
        width: 0,
        height: 0,
    };
    assert_eq!(model.content_center(), None);
}

#[test]
fn mouse_button_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&MouseButton::Left).unwrap(), "\"left\"");
}

#[test]
fn key_event_type_serializes_camel_case() {
    assert_eq!(
        serde_json::to_string(&KeyEventType::RawKeyDown).unwrap(),
        "\"rawKeyDown\""
    );
    assert_eq!(serde_json::to_string(&KeyEventType::Char).unwrap(), "\"char\"");
}

#[test]
fn screenshot_format_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ScreenshotFormat::Jpeg).unwrap(), "\"jpeg\"");
}

#[test]
fn browser_version_deserializes_pascal_case() {
    let json = r#"{
        "Browser": "Chrome/120.0",
        "Protocol-Version": "1.3",
        "webSocketDebuggerUrl": "ws://127.0.0.1:9222/devtools/browser/x"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert_eq!(version.browser, "Chrome/120.0");
    assert!(version.web_socket_debugger_url.starts_with("ws://"));
}
