#![deny(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,
    clippy::module_name_repetitions
)]

pub mod api;
pub mod database;
pub mod face;
pub mod lifecycle;
pub mod storage;
