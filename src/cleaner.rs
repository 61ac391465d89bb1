/// Turns extracted page text into normalized text ready for segmentation.
pub trait TextCleaner: Send + Sync {
    fn clean(&self, text: &str) -> String;
}

/// Full-width and CJK marks stripped in addition to ASCII punctuation.
/// `⚗︎` contributes U+2697 and the text presentation selector U+FE0E.
/// The ideographic full stop U+3002 is deliberately absent.
pub const CJK_PUNCTUATION: &str = "！？｡＂＃＄％＆＇（）＊＋，－／：；＜＝＞＠［＼］＾＿｀｛｜｝～｟📐｢｣、〃〈〉《》「」『』【】〔〕〖〗〘〙〚〛〜〝〞〟⚗︎〾〿–—‘’‛“”„‟…‧﹏.";

#[inline]
pub fn is_stripped(c: char) -> bool {
    c.is_ascii_punctuation() || CJK_PUNCTUATION.contains(c)
}

/// Removes the fixed punctuation set, then collapses whitespace runs into
/// single spaces with no leading or trailing space.
pub struct PunctuationCleaner;

impl TextCleaner for PunctuationCleaner {
    fn clean(&self, text: &str) -> String {
        let stripped: String = text.chars().filter(|&c| !is_stripped(c)).collect();
        stripped.split_whitespace().collect::<Vec<&str>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(text: &str) -> String {
        PunctuationCleaner.clean(text)
    }

    #[test]
    fn strips_ascii_punctuation() {
        assert_eq!(clean("Hello, world! (really?)"), "Hello world really");
        assert_eq!(clean("a-b_c.d"), "abcd");
    }

    #[test]
    fn strips_full_width_marks() {
        assert_eq!(clean("你好，世界！"), "你好世界");
        assert_eq!(clean("《三体》「好书」"), "三体好书");
        assert_eq!(clean("他说：“走吧”…"), "他说走吧");
    }

    #[test]
    fn keeps_ideographic_full_stop() {
        assert_eq!(clean("结束。"), "结束。");
    }

    #[test]
    fn strips_symbols_outside_punctuation_category() {
        assert_eq!(clean("尺📐子"), "尺子");
        assert_eq!(clean("烧瓶⚗︎"), "烧瓶");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean("  one \n\t two   three  "), "one two three");
        assert_eq!(clean("\u{3000}全角\u{3000}空格"), "全角 空格");
        assert_eq!(clean(" ... "), "");
    }

    #[test]
    fn punctuation_between_words_leaves_no_gap() {
        assert_eq!(clean("end.Start"), "endStart");
        assert_eq!(clean("end. Start"), "end Start");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "   ",
            "Hello,   world!!",
            "混合 text，带有 “引号” 和 —— 破折号…",
            "tabs\tand\nnewlines\r\n",
            "〔注〕①②",
        ];
        for sample in samples {
            let once = clean(sample);
            assert_eq!(clean(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn output_contains_no_stripped_character() {
        let text = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~ ok ！？｡＂ ok2 ";
        let out = clean(text);
        assert!(!out.chars().any(is_stripped));
        assert_eq!(out, "ok ok2");
    }
}
