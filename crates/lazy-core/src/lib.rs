pub mod dictionary;
pub mod error;
pub mod language;
pub mod preprocess;
pub mod storage;
