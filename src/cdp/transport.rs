//! CDP WebSocket transport.
//!
//! Owns the socket, assigns monotonically increasing command ids, and runs a
//! single reader task that demultiplexes inbound frames: responses resolve
//! the pending entry matching their id, everything else is routed to the
//! event channel registered for its session. Blocking the socket until an id
//! match would serialize all commands and drop unsolicited events, so frame
//! routing lives entirely in the reader task.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{CdpEvent, CdpFrame, CdpRequest};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

type PendingMap = Mutex<HashMap<u64, PendingRequest>>;
type EventRoutes = RwLock<HashMap<String, mpsc::UnboundedSender<CdpEvent>>>;

/// Pending command waiting for its response.
pub(crate) struct PendingRequest {
    pub tx: oneshot::Sender<Result<Value, CdpError>>,
}

/// CDP transport over one WebSocket connection.
pub struct CdpTransport {
    /// WebSocket sender, serialized across callers.
    ws_tx: tokio::sync::Mutex<WsSink>,
    /// Command id counter.
    request_id: AtomicU64,
    /// Pending commands waiting for responses.
    pending: Arc<PendingMap>,
    /// Event channels keyed by session id ("" for browser-level events).
    event_routes: Arc<EventRoutes>,
    /// Per-command response bound.
    command_timeout: Duration,
    /// Reader task handle.
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpTransport {
    /// Connect to a CDP WebSocket endpoint.
    ///
    /// `max_frame_size` must comfortably exceed a full-page DOM snapshot;
    /// anything below 10 MiB risks dropped frames on heavy pages.
    pub async fn connect(
        ws_url: &str,
        command_timeout: Duration,
        max_frame_size: usize,
    ) -> Result<Self, CdpError> {
        let mut ws_config = WebSocketConfig::default();
        ws_config.max_message_size = Some(max_frame_size);
        ws_config.max_frame_size = Some(max_frame_size);

        let (ws_stream, _) =
            tokio_tungstenite::connect_async_with_config(ws_url, Some(ws_config), false)
                .await
                .map_err(|e| CdpError::ConnectionFailed(format!("{}: {}", ws_url, e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let pending: Arc<PendingMap> = Arc::new(Mutex::new(HashMap::new()));
        let event_routes: Arc<EventRoutes> = Arc::new(RwLock::new(HashMap::new()));

        let recv_task = {
            let pending = pending.clone();
            let event_routes = event_routes.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, pending, event_routes).await;
            })
        };

        debug!("CDP transport connected to {}", ws_url);

        Ok(Self {
            ws_tx: tokio::sync::Mutex::new(ws_sink),
            request_id: AtomicU64::new(1),
            pending,
            event_routes,
            command_timeout,
            recv_task,
        })
    }

    /// WebSocket receive loop. On exit every pending command fails with
    /// `SessionClosed` so no caller is left waiting on a dead socket.
    async fn receive_loop(
        mut ws_source: WsSource,
        pending: Arc<PendingMap>,
        event_routes: Arc<EventRoutes>,
    ) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    match serde_json::from_str::<CdpFrame>(&text) {
                        Ok(frame) => dispatch_frame(frame, &pending, &event_routes),
                        Err(e) => warn!("Failed to parse CDP frame: {}", e),
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("CDP WebSocket closed by remote");
                    break;
                }
                Err(e) => {
                    error!("CDP WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }

        let drained: Vec<PendingRequest> = pending.lock().drain().map(|(_, req)| req).collect();
        for req in drained {
            let _ = req.tx.send(Err(CdpError::SessionClosed));
        }
    }

    /// Send a CDP command and wait for its response.
    pub async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(|s| s.to_string()),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, PendingRequest { tx });

        {
            let mut ws = self.ws_tx.lock().await;
            if let Err(e) = ws.send(Message::Text(json.into())).await {
                self.pending.lock().remove(&id);
                return Err(e.into());
            }
        }

        match tokio::time::timeout(self.command_timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!(
                    "{} got no response within {:?}",
                    method, self.command_timeout
                )))
            }
        }
    }

    /// Register the event channel for a session id. Events for that session
    /// are pushed to the returned receiver instead of being discarded.
    pub fn subscribe(&self, session_id: &str) -> mpsc::UnboundedReceiver<CdpEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.event_routes.write().insert(session_id.to_string(), tx);
        rx
    }

    /// Close the socket and stop the reader task.
    pub async fn close(&self) {
        let mut ws = self.ws_tx.lock().await;
        let _ = ws.send(Message::Close(None)).await;
        self.recv_task.abort();
    }
}

impl Drop for CdpTransport {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}

/// Route one inbound frame: command responses resolve their pending entry
/// exactly once; frames without an id are events and go to the session's
/// channel. Unroutable frames are logged, never silently load-bearing.
pub(crate) fn dispatch_frame(frame: CdpFrame, pending: &PendingMap, event_routes: &EventRoutes) {
    if let Some(id) = frame.id {
        let entry = pending.lock().remove(&id);
        match entry {
            Some(req) => {
                let result = if let Some(err) = frame.error {
                    Err(CdpError::Protocol {
                        code: err.code,
                        message: err.message,
                    })
                } else {
                    Ok(frame.result.unwrap_or(Value::Null))
                };
                let _ = req.tx.send(result);
            }
            None => debug!("Response for unknown or already-resolved id {}", id),
        }
    } else if let Some(method) = frame.method {
        let event = CdpEvent {
            method,
            params: frame.params.unwrap_or(Value::Null),
            session_id: frame.session_id,
        };
        let key = event.session_id.clone().unwrap_or_default();
        let routes = event_routes.read();
        match routes.get(&key) {
            Some(tx) => {
                let _ = tx.send(event);
            }
            None => debug!("Unrouted CDP event {} (session {:?})", event.method, event.session_id),
        }
    } else {
        warn!("CDP frame with neither id nor method");
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
