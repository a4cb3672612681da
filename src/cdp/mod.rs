//! Chrome DevTools Protocol (CDP) client.
//!
//! A pure Rust CDP client speaking JSON frames over the browser's debugging
//! WebSocket. The transport correlates command responses by id from a single
//! reader task; a [`PageSession`] scopes commands to one attached page target.

pub mod error;
pub mod protocol;
pub mod session;
pub mod transport;

pub use error::CdpError;
pub use protocol::{
    BoxModel, BrowserVersion, CdpEvent, DomNode, KeyEventType, MouseButton, MouseEventType,
    RemoteObject, ScreenshotFormat, TargetInfo,
};
pub use session::PageSession;
pub use transport::CdpTransport;
