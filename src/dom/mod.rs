//! Semantic page model: interactive elements reconstructed from raw DOM and
//! layout snapshots, plus the per-observation index cache.

mod attributes;
mod cache;
mod snapshot;

pub use attributes::AttributeMap;
pub use cache::ElementIndexCache;
pub use snapshot::{
    InteractiveElement, LayoutIndex, MAX_ELEMENTS, MAX_TRAVERSAL_DEPTH, Rect, capture,
    collect_interactive, rect_from_quad, render_listing,
};

#[cfg(test)]
#[path = "dom_tests.rs"]
mod tests;
