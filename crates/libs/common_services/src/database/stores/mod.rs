pub mod embedding_store;
pub mod event_store;
pub mod image_store;

pub use embedding_store::*;
pub use event_store::*;
pub use image_store::*;
