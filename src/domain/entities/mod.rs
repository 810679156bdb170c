//! Domain entity definitions.

mod city;
mod clothing_item;
mod image;

pub use city::CityInfo;
pub use clothing_item::ClothingItem;
pub use image::{ImageKey, ImageStatus, LoadToken};
