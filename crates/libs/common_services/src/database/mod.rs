mod error;
mod ranking;
mod similarity;
mod stores;
mod tables;
mod utils;

pub use error::*;
pub use ranking::*;
pub use similarity::*;
pub use stores::*;
pub use tables::*;
pub use utils::*;
