//! View-side state holders.

mod image_slot;

pub use image_slot::ImageSlot;
