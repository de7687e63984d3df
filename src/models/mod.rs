pub mod image;
pub mod property;

pub use image::{ImageRecord, StoredImage};
pub use property::{Property, PropertyInput};
