//! Before/after change detection around page actions.
//!
//! A click's effect is classified from a cheap page fingerprint taken before
//! and shortly after the action: current url, count of modal-like nodes, a
//! serialized-body-length proxy for content size, and the text of any
//! cart-like element.

use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::session::PageSession;

/// Fingerprint script evaluated in the page.
const FINGERPRINT_SCRIPT: &str = r#"(function() {
    return {
        url: window.location.href,
        modalCount: document.querySelectorAll('[role="dialog"], .modal, [class*="modal"], [class*="popup"], [class*="overlay"]').length,
        bodyLength: document.body.innerHTML.length,
        cartText: document.querySelector('[class*="cart"], [aria-label*="cart"], [id*="cart"]')?.textContent || ''
    };
})();"#;

/// Cheap page fingerprint captured around an action.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageFingerprint {
    pub url: String,
    pub modal_count: i64,
    pub body_length: i64,
    pub cart_text: String,
}

/// Classified effect of an action.
///
/// `NoObviousChange` is a weak signal, not proof of no effect: a same-page
/// update with a small content delta is indistinguishable from a no-op here.
/// Corroborate with a screenshot before concluding the action did nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEffect {
    Navigated { url: String },
    ModalAppeared,
    CartUpdated,
    ContentChanged,
    NoObviousChange,
}

impl fmt::Display for PageEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageEffect::Navigated { url } => write!(f, "page navigated to {}", url),
            PageEffect::ModalAppeared => write!(f, "modal or popup appeared"),
            PageEffect::CartUpdated => write!(f, "cart updated (item likely added)"),
            PageEffect::ContentChanged => write!(f, "page content changed"),
            PageEffect::NoObviousChange => {
                write!(f, "no obvious change detected (verify with a screenshot)")
            }
        }
    }
}

/// Captures fingerprints and classifies the difference.
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    /// Body-length delta below which content is considered unchanged.
    pub content_threshold: i64,
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self { content_threshold: 100 }
    }
}

impl ChangeDetector {
    /// Capture the current page fingerprint.
    pub async fn capture(&self, session: &PageSession) -> Result<PageFingerprint, CdpError> {
        let value = session.evaluate(FINGERPRINT_SCRIPT).await?;
        let fingerprint: PageFingerprint = serde_json::from_value(value)?;
        debug!(?fingerprint, "Captured page fingerprint");
        Ok(fingerprint)
    }

    /// Classify what changed between two fingerprints, in priority order:
    /// navigation, modal appearance, cart update, content change.
    pub fn classify(&self, before: &PageFingerprint, after: &PageFingerprint) -> PageEffect {
        if after.url != before.url {
            PageEffect::Navigated { url: after.url.clone() }
        } else if after.modal_count > before.modal_count {
            PageEffect::ModalAppeared
        } else if after.cart_text != before.cart_text {
            PageEffect::CartUpdated
        } else if (after.body_length - before.body_length).abs() > self.content_threshold {
            PageEffect::ContentChanged
        } else {
            PageEffect::NoObviousChange
        }
    }
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
