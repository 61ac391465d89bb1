use jieba_rs::Jieba;

/// Shortest token, in chars, that survives segmentation.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Splits normalized text into word tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Dictionary segmentation backed by jieba's prefix dictionary, with the HMM
/// fallback for out-of-vocabulary words. ASCII alphanumeric runs stay whole.
pub struct JiebaTokenizer {
    jieba: Jieba,
    hmm: bool,
}

impl JiebaTokenizer {
    /// Loads the bundled dictionary. This is the expensive part, so build one
    /// tokenizer and share it.
    pub fn new(hmm: bool) -> Self {
        JiebaTokenizer {
            jieba: Jieba::new(),
            hmm,
        }
    }
}

impl Default for JiebaTokenizer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Tokenizer for JiebaTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        self.jieba
            .cut(text, self.hmm)
            .into_iter()
            .filter(|word| keep_token(word))
            .map(str::to_string)
            .collect()
    }
}

#[inline]
fn keep_token(word: &str) -> bool {
    word.chars().count() >= MIN_TOKEN_CHARS && !word.chars().all(char::is_whitespace)
}
