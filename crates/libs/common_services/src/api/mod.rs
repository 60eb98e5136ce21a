pub mod auth;
pub mod event;
pub mod image;
pub mod matching;
