use std::collections::HashMap;

use parking_lot::{Mutex, RwLock};
use serde_json::json;
use tokio::sync::{mpsc, oneshot};

use super::*;
use crate::cdp::protocol::CdpFrame;

fn frame(value: serde_json::Value) -> CdpFrame {
    serde_json::from_value(value).unwrap()
}

#[test]
fn response_resolves_matching_pending_exactly_once() {
    let pending = Mutex::new(HashMap::new());
    let routes = RwLock::new(HashMap::new());

    let (tx, mut rx) = oneshot::channel();
    pending.lock().insert(7, PendingRequest { tx });

    dispatch_frame(frame(json!({"id": 7, "result": {"ok": true}})), &pending, &routes);

    let result = rx.try_recv().unwrap().unwrap();
    assert_eq!(result["ok"], json!(true));
    assert!(pending.lock().is_empty());

    // A duplicate response for the same id has nowhere to land and is ignored.
    dispatch_frame(frame(json!({"id": 7, "result": {"ok": false}})), &pending, &routes);
    assert!(pending.lock().is_empty());
}

#[test]
fn response_with_error_field_yields_protocol_error() {
    let pending = Mutex::new(HashMap::new());
    let routes = RwLock::new(HashMap::new());

    let (tx, mut rx) = oneshot::channel();
    pending.lock().insert(2, PendingRequest { tx });

    dispatch_frame(
        frame(json!({"id": 2, "error": {"code": -32000, "message": "Could not find node"}})),
        &pending,
        &routes,
    );

    match rx.try_recv().unwrap() {
        Err(CdpError::Protocol { code, message }) => {
            assert_eq!(code, -32000);
            assert_eq!(message, "Could not find node");
        }
        other => panic!("expected protocol error, got {:?}", other),
    }
}

#[test]
fn response_leaves_other_pending_ids_untouched() {
    let pending = Mutex::new(HashMap::new());
    let routes = RwLock::new(HashMap::new());

    let (tx1, mut rx1) = oneshot::channel();
    let (tx2, mut rx2) = oneshot::channel();
    pending.lock().insert(1, PendingRequest { tx: tx1 });
    pending.lock().insert(2, PendingRequest { tx: tx2 });

    dispatch_frame(frame(json!({"id": 2, "result": {}})), &pending, &routes);

    assert!(rx1.try_recv().is_err());
    assert!(rx2.try_recv().is_ok());
    assert_eq!(pending.lock().len(), 1);
}

#[test]
fn event_routes_to_its_session_channel() {
    let pending = Mutex::new(HashMap::new());
    let routes = RwLock::new(HashMap::new());

    let (tx, mut rx) = mpsc::unbounded_channel();
    routes.write().insert("sess-1".to_string(), tx);

    dispatch_frame(
        frame(json!({
            "method": "Page.loadEventFired",
            "params": {"timestamp": 1.5},
            "sessionId": "sess-1"
        })),
        &pending,
        &routes,
    );

    let event = rx.try_recv().unwrap();
    assert_eq!(event.method, "Page.loadEventFired");
    assert_eq!(event.params["timestamp"], json!(1.5));
    assert_eq!(event.session_id.as_deref(), Some("sess-1"));
}

#[test]
fn event_is_not_mistaken_for_a_response() {
    let pending = Mutex::new(HashMap::new());
    let routes = RwLock::new(HashMap::new());

    let (tx, mut rx) = oneshot::channel();
    pending.lock().insert(1, PendingRequest { tx });

    dispatch_frame(
        frame(json!({"method": "DOM.documentUpdated", "params": {}})),
        &pending,
        &routes,
    );

    assert!(rx.try_recv().is_err());
    assert_eq!(pending.lock().len(), 1);
}

#[test]
fn unrouted_event_is_dropped_without_panic() {
    let pending = Mutex::new(HashMap::new());
    let routes = RwLock::new(HashMap::new());

    dispatch_frame(
        frame(json!({"method": "Target.targetCreated", "params": {}})),
        &pending,
        &routes,
    );
}
