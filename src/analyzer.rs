use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use crate::{
    cleaner::{PunctuationCleaner, TextCleaner},
    extractor::TextExtractor,
    fetcher::{Fetcher, HttpFetcher, RawDocument},
    frequency::FrequencyMap,
    tokenizer::{JiebaTokenizer, Tokenizer},
    AnalysisError,
};

/// A builder for the `Analyzer` struct
/// That allows for swapping any stage
/// of the pipeline before building it
pub struct AnalyzerBuilder {
    fetcher: Option<Arc<dyn Fetcher>>,
    cleaner: Option<Arc<dyn TextCleaner>>,
    tokenizer: Option<Arc<dyn Tokenizer>>,
    hmm: bool,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        AnalyzerBuilder {
            fetcher: None,
            cleaner: None,
            tokenizer: None,
            hmm: true,
        }
    }

    pub fn with_fetcher<T: Fetcher + 'static>(mut self, fetcher: T) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    pub fn with_cleaner<T: TextCleaner + 'static>(mut self, cleaner: T) -> Self {
        self.cleaner = Some(Arc::new(cleaner));
        self
    }

    pub fn with_tokenizer<T: Tokenizer + 'static>(mut self, tokenizer: T) -> Self {
        self.tokenizer = Some(Arc::new(tokenizer));
        self
    }

    /// Only consulted when no tokenizer was supplied.
    pub fn with_hmm(mut self, hmm: bool) -> Self {
        self.hmm = hmm;
        self
    }

    pub fn build(self) -> Analyzer {
        let hmm = self.hmm;
        Analyzer {
            fetcher: self.fetcher.unwrap_or_else(|| Arc::new(HttpFetcher::new())),
            cleaner: self.cleaner.unwrap_or_else(|| Arc::new(PunctuationCleaner)),
            tokenizer: self
                .tokenizer
                .unwrap_or_else(|| Arc::new(JiebaTokenizer::new(hmm))),
            extractor: TextExtractor,
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs fetch → extract → clean → tokenize → count for one URL.
///
/// Holds no per-request state; every call starts from the fetch.
#[derive(Clone)]
pub struct Analyzer {
    fetcher: Arc<dyn Fetcher>,
    cleaner: Arc<dyn TextCleaner>,
    tokenizer: Arc<dyn Tokenizer>,
    extractor: TextExtractor,
}

impl Debug for Analyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Analyzer")
    }
}

impl Analyzer {
    pub fn new() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub async fn fetch(&self, url: &str) -> Result<RawDocument, AnalysisError> {
        Ok(self.fetcher.fetch(url).await?)
    }

    /// Fetches `url` and counts its words. Parsing and segmentation run on
    /// the blocking pool.
    pub async fn analyze_url(&self, url: &str) -> Result<FrequencyMap, AnalysisError> {
        let document = self.fetch(url).await?;
        if document.is_empty() {
            return Err(AnalysisError::EmptyContent);
        }
        let analyzer = self.clone();
        let frequencies =
            tokio::task::spawn_blocking(move || analyzer.analyze_document(&document)).await??;
        tracing::info!(
            url,
            distinct = frequencies.len(),
            tokens = frequencies.total(),
            "analyzed page"
        );
        Ok(frequencies)
    }

    /// Decodes a fetched page and counts its words.
    pub fn analyze_document(&self, document: &RawDocument) -> Result<FrequencyMap, AnalysisError> {
        self.analyze_visible(self.extractor.extract_document(document))
    }

    /// Counts the words in an already decoded HTML page.
    pub fn analyze_html(&self, html: &str) -> Result<FrequencyMap, AnalysisError> {
        self.analyze_visible(self.extractor.extract(html))
    }

    fn analyze_visible(&self, text: String) -> Result<FrequencyMap, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyContent);
        }
        Ok(self.analyze_text(&text))
    }

    /// Counts the words in visible text; empty text gives an empty map.
    pub fn analyze_text(&self, text: &str) -> FrequencyMap {
        let cleaned = self.cleaner.clean(text);
        FrequencyMap::from_tokens(self.tokenizer.tokenize(&cleaned))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::Mutex,
        thread::{self, ThreadId},
    };

    use async_trait::async_trait;

    use super::*;
    use crate::FetchError;

    struct SplitTokenizer;

    impl Tokenizer for SplitTokenizer {
        fn tokenize(&self, text: &str) -> Vec<String> {
            text.split(' ')
                .filter(|w| w.chars().count() >= 2)
                .map(str::to_string)
                .collect()
        }
    }

    fn analyzer() -> Analyzer {
        Analyzer::new().with_tokenizer(SplitTokenizer).build()
    }

    /// Remembers which thread did the segmenting.
    #[derive(Clone, Default)]
    struct ThreadRecorder(Arc<Mutex<Option<ThreadId>>>);

    impl Tokenizer for ThreadRecorder {
        fn tokenize(&self, text: &str) -> Vec<String> {
            *self.0.lock().unwrap() = Some(thread::current().id());
            SplitTokenizer.tokenize(text)
        }
    }

    struct OnePageFetcher(&'static str);

    #[async_trait]
    impl Fetcher for OnePageFetcher {
        async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
            Ok(RawDocument::new(url, self.0.as_bytes().to_vec()))
        }
    }

    #[test]
    fn text_pipeline_counts_words() {
        let map = analyzer().analyze_text("the, the; the! cat cat. dog a");
        let pairs: Vec<_> = map.iter().map(|e| (e.word.as_str(), e.count)).collect();
        assert_eq!(pairs, vec![("the", 3), ("cat", 2), ("dog", 1)]);
    }

    #[test]
    fn html_pipeline_skips_scripts() {
        let html = "<body><script>var secret=1;</script><p>alpha beta alpha</p></body>";
        let map = analyzer().analyze_html(html).unwrap();
        assert_eq!(map.get("alpha"), Some(2));
        assert_eq!(map.get("var"), None);
        assert_eq!(map.get("secret1"), None);
    }

    #[test]
    fn blank_page_is_empty_content() {
        let result = analyzer().analyze_html("<html><body>   <script>x()</script></body></html>");
        assert!(matches!(result, Err(AnalysisError::EmptyContent)));
    }

    #[test]
    fn punctuation_only_text_is_empty_map() {
        assert!(analyzer().analyze_text("!!! ... ？？").is_empty());
    }

    #[test]
    fn document_is_extracted_once() {
        // Extracted text that looks like markup must not be parsed again.
        let doc = RawDocument::new(
            "http://example.com",
            b"<p>less &lt;script&gt; shown &lt;/script&gt; more</p>".to_vec(),
        );
        let map = analyzer().analyze_document(&doc).unwrap();
        assert_eq!(map.get("shown"), Some(1));
        assert_eq!(map.get("less"), Some(1));
    }

    #[tokio::test]
    async fn segmentation_runs_off_the_async_thread() {
        let recorder = ThreadRecorder::default();
        let analyzer = Analyzer::new()
            .with_fetcher(OnePageFetcher("<p>alpha beta alpha</p>"))
            .with_tokenizer(recorder.clone())
            .build();

        let map = analyzer.analyze_url("http://example.com").await.unwrap();
        assert_eq!(map.get("alpha"), Some(2));
        let worker = recorder.0.lock().unwrap().expect("tokenizer never ran");
        assert_ne!(worker, thread::current().id());
    }
}
