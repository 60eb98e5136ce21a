pub mod error;
pub mod interfaces;
