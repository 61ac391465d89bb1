use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::bytes::{Regex, RegexBuilder};
use scraper::{Html, Node};

use crate::fetcher::RawDocument;

/// How far into the body a `<meta>` charset declaration is looked for.
const META_SNIFF_BYTES: usize = 1024;

/// Elements whose subtrees never count as visible text.
const HIDDEN_ELEMENTS: [&str; 2] = ["script", "style"];

static META_CHARSET_REGEX: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r#"<meta\b[^>]*?charset\s*=\s*["']?\s*([a-zA-Z0-9_:.\-]+)"#)
        .case_insensitive(true)
        .build()
        .expect("meta charset pattern is valid")
});

/// Decodes a fetched body to text.
///
/// Precedence: byte-order mark, `Content-Type` charset, `<meta>` charset,
/// then UTF-8. Malformed sequences become U+FFFD.
pub fn decode(document: &RawDocument) -> String {
    let declared = document
        .charset
        .as_deref()
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| sniff_meta_charset(&document.body))
        .unwrap_or(UTF_8);
    let (text, used, had_errors) = declared.decode(&document.body);
    if had_errors {
        tracing::debug!(url = %document.url, encoding = used.name(), "replaced malformed bytes");
    }
    text.into_owned()
}

fn sniff_meta_charset(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(META_SNIFF_BYTES)];
    let caps = META_CHARSET_REGEX.captures(head)?;
    Encoding::for_label(caps.get(1)?.as_bytes())
}

/// Pulls the visible text out of an HTML document.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor;

impl TextExtractor {
    /// Detaches every `script` and `style` subtree first, then concatenates
    /// the remaining text nodes in document order without separators.
    pub fn extract(&self, html: &str) -> String {
        let mut document = Html::parse_document(html);

        let hidden: Vec<_> = document
            .tree
            .nodes()
            .filter(|node| match node.value() {
                Node::Element(element) => HIDDEN_ELEMENTS.contains(&element.name()),
                _ => false,
            })
            .map(|node| node.id())
            .collect();
        for id in hidden {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }

        document.root_element().text().collect()
    }

    pub fn extract_document(&self, document: &RawDocument) -> String {
        self.extract(&decode(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<html><head><style>.x{}</style></head><body><script>var a=1;</script><p>hello world</p></body></html>";

    #[test]
    fn script_and_style_are_removed() {
        let text = TextExtractor.extract(PAGE);
        assert!(!text.contains("var a=1"));
        assert!(!text.contains(".x{}"));
        assert!(text.contains("hello world"));
    }

    #[test]
    fn nested_hidden_elements_take_their_subtree() {
        let html = "<div>keep<script><b>inner</b>gone</script><style>p{}</style>also</div>";
        assert_eq!(TextExtractor.extract(html), "keepalso");
    }

    #[test]
    fn text_nodes_are_joined_without_separators() {
        let html = "<p>one</p><p>two</p><span> three</span>";
        assert_eq!(TextExtractor.extract(html), "onetwo three");
    }

    #[test]
    fn title_text_counts_as_visible() {
        let html = "<html><head><title>标题</title></head><body>正文</body></html>";
        assert_eq!(TextExtractor.extract(html), "标题正文");
    }

    #[test]
    fn comments_are_not_text() {
        let html = "<body>a<!-- hidden -->b</body>";
        assert_eq!(TextExtractor.extract(html), "ab");
    }

    #[test]
    fn empty_document_gives_empty_text() {
        assert_eq!(TextExtractor.extract(""), "");
    }

    #[test]
    fn header_charset_wins() {
        let (bytes, _, _) = encoding_rs::GBK.encode("<p>中文</p>");
        let doc = RawDocument::new("http://example.com", bytes.into_owned()).with_charset("gbk");
        assert_eq!(TextExtractor.extract_document(&doc), "中文");
    }

    #[test]
    fn meta_charset_is_sniffed() {
        let (bytes, _, _) = encoding_rs::GBK
            .encode("<html><head><meta charset=\"gb2312\"></head><body>新闻</body></html>");
        let doc = RawDocument::new("http://example.com", bytes.into_owned());
        assert_eq!(TextExtractor.extract_document(&doc), "新闻");
    }

    #[test]
    fn http_equiv_meta_is_sniffed() {
        let html = "<meta http-equiv=\"Content-Type\" content=\"text/html; charset=Shift_JIS\"><p>日本</p>";
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(html);
        let doc = RawDocument::new("http://example.com", bytes.into_owned());
        assert_eq!(TextExtractor.extract_document(&doc), "日本");
    }

    #[test]
    fn defaults_to_utf8_and_tolerates_bad_bytes() {
        let mut body = "<p>ok</p>".as_bytes().to_vec();
        body.push(0xff);
        let doc = RawDocument::new("http://example.com", body);
        let text = TextExtractor.extract_document(&doc);
        assert!(text.starts_with("ok"));
    }
}
