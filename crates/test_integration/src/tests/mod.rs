pub mod test_matching;
pub mod test_root;
