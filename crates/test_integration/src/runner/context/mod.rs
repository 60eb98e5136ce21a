pub mod face_provider;
pub mod test_context;
pub mod utils;
