mod embedder;
mod face_config;
mod metric;
mod remote_embedder;
mod threshold;

pub use embedder::*;
pub use face_config::*;
pub use metric::*;
pub use remote_embedder::*;
pub use threshold::*;
