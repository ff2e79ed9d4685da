pub mod builder;
pub mod committer;
pub mod encoding;
pub mod error;
pub mod importer;
pub mod parser;
pub mod progress;
pub mod reader;
pub mod types;

pub use builder::DictionaryBuilder;
pub use committer::BatchCommitter;
pub use error::ImportError;
pub use importer::{ImportSummary, Importer};
pub use parser::LineParser;
pub use progress::ProgressSink;
pub use reader::ChunkReader;
pub use types::{DictionaryRecord, ImportContext};
