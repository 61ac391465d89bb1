use std::fmt::Write;

/// Transparent hover targets carrying a `<title>`, laid over a finished SVG.
/// Coordinates are backend pixels, i.e. relative to the whole canvas.
#[derive(Debug, Default)]
pub(crate) struct Tooltips {
    markup: String,
}

impl Tooltips {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&mut self, a: (i32, i32), b: (i32, i32), tip: &str) {
        let _ = write!(
            self.markup,
            r#"<rect x="{}" y="{}" width="{}" height="{}"><title>{}</title></rect>"#,
            a.0.min(b.0),
            a.1.min(b.1),
            (b.0 - a.0).abs(),
            (b.1 - a.1).abs(),
            escape(tip)
        );
    }

    /// Square target of side `2 * half` around `center`.
    pub fn around(&mut self, center: (i32, i32), half: i32, tip: &str) {
        self.rect(
            (center.0 - half, center.1 - half),
            (center.0 + half, center.1 + half),
            tip,
        );
    }

    pub fn polygon(&mut self, points: &[(i32, i32)], tip: &str) {
        if points.len() < 3 {
            return;
        }
        let coords: Vec<String> = points.iter().map(|(x, y)| format!("{},{}", x, y)).collect();
        let _ = write!(
            self.markup,
            r#"<polygon points="{}"><title>{}</title></polygon>"#,
            coords.join(" "),
            escape(tip)
        );
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }

    /// Inserts the targets just before the closing `</svg>`.
    pub fn apply(self, mut svg: String) -> String {
        if self.is_empty() {
            return svg;
        }
        if let Some(end) = svg.rfind("</svg>") {
            let layer = format!(
                r#"<g class="tooltips" fill="black" fill-opacity="0">{}</g>"#,
                self.markup
            );
            svg.insert_str(end, &layer);
        }
        svg
    }
}

/// Hover text for one word.
pub(crate) fn word_tip(word: &str, count: u32) -> String {
    format!("{}: {}", word, count)
}

/// Shifts an area-relative point into canvas pixels.
pub(crate) fn offset(base: (i32, i32), point: (i32, i32)) -> (i32, i32) {
    (base.0 + point.0, base.1 + point.1)
}

/// Escapes text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
