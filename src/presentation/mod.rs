//! Presentation layer: state holders consumed by views.

/// Widget state.
pub mod widgets;

pub use widgets::ImageSlot;
