pub mod embedding;
pub mod event;
pub mod image;

pub use embedding::*;
pub use event::*;
pub use image::*;
