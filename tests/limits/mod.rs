pub mod strategy;
pub mod test_limit;
pub mod test_preprocess;
