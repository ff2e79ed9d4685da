pub mod processor;
pub mod singularizer;
pub mod stemmer;
pub mod translator;

pub use processor::EnglishProcessor;
pub use singularizer::Singularizer;
pub use stemmer::PorterStemmer;
pub use translator::ScriptTranslator;
