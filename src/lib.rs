mod analyzer;
mod cleaner;
mod config;
mod error;
mod extractor;
mod fetcher;
mod frequency;
mod tokenizer;

pub mod charts;
pub mod shell;
pub mod telemetry;

pub use analyzer::{Analyzer, AnalyzerBuilder};
pub use charts::{Chart, ChartKind};
pub use cleaner::{PunctuationCleaner, TextCleaner, CJK_PUNCTUATION};
pub use config::{AnalysisConfig, AppConfig, ChartConfig, ServerConfig};
pub use error::{AnalysisError, ChartError, ConfigError, FetchError};
pub use extractor::{decode, TextExtractor};
pub use fetcher::{charset_from_content_type, Fetcher, HttpFetcher, RawDocument};
pub use frequency::{FrequencyMap, Threshold, WordCount};
pub use tokenizer::{JiebaTokenizer, Tokenizer, MIN_TOKEN_CHARS};
