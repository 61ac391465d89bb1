use std::fmt::Write;

use crate::{
    charts::{escape, ChartKind},
    frequency::Threshold,
    shell::Report,
};

/// Current form values, echoed back into the controls.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub url: String,
    pub chart: ChartKind,
    pub min_count: Threshold,
}

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex}\
aside{width:240px;padding:16px;background:#f3f4f6;min-height:100vh}\
main{flex:1;padding:16px 32px}\
input[type=text]{width:100%;max-width:640px;padding:6px}\
table{border-collapse:collapse;margin-top:8px}\
td,th{border:1px solid #ddd;padding:4px 12px;text-align:left}";

/// The whole page: sidebar controls, URL box, chart and top-word table.
/// `report` is `None` until a URL has been submitted.
pub fn render(form: &FormState, report: Option<&Report>) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    html.push_str("<title>Article word frequency</title>");
    let _ = write!(html, "<style>{}</style></head><body>", STYLE);
    html.push_str("<form method=\"get\" action=\"/\" style=\"display:contents\">");

    html.push_str("<aside><label for=\"chart\">Chart type</label><br>");
    html.push_str("<select id=\"chart\" name=\"chart\" onchange=\"this.form.submit()\">");
    for kind in ChartKind::ALL {
        let selected = if kind == form.chart { " selected" } else { "" };
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            kind.as_str(),
            selected,
            kind.label()
        );
    }
    html.push_str("</select><br><br>");
    let _ = write!(
        html,
        "<label for=\"min_count\">Minimum occurrences: <output id=\"min_count_out\">{value}</output></label><br>\
         <input type=\"range\" id=\"min_count\" name=\"min_count\" min=\"{min}\" max=\"{max}\" value=\"{value}\" \
         oninput=\"min_count_out.value=this.value\" onchange=\"this.form.submit()\">",
        min = Threshold::MIN,
        max = Threshold::MAX,
        value = form.min_count.get()
    );
    html.push_str("</aside>");

    html.push_str("<main><h1>Article URL word frequency</h1>");
    let _ = write!(
        html,
        "<label for=\"url\">Article URL:</label><br>\
         <input type=\"text\" id=\"url\" name=\"url\" value=\"{}\" onchange=\"this.form.submit()\">",
        escape(&form.url)
    );

    if let Some(report) = report {
        if let Some(chart) = &report.chart {
            let _ = write!(html, "<div class=\"chart\">{}</div>", chart.svg);
        }
        if !report.top_words.is_empty() {
            let _ = write!(
                html,
                "<h3>Top {} words</h3><table><tr><th>Word</th><th>Count</th></tr>",
                report.top_words.len()
            );
            for entry in &report.top_words {
                let _ = write!(
                    html,
                    "<tr><td>{}</td><td>{}</td></tr>",
                    escape(&entry.word),
                    entry.count
                );
            }
            html.push_str("</table>");
        }
    }

    html.push_str("</main></form></body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        charts::Chart,
        frequency::WordCount,
    };

    #[test]
    fn blank_form_has_no_results() {
        let html = render(&FormState::default(), None);
        assert!(html.contains("name=\"url\""));
        assert!(html.contains("<option value=\"word_cloud\" selected>"));
        assert!(html.contains("min=\"1\" max=\"100\" value=\"1\""));
        assert!(!html.contains("<table"));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn form_echoes_current_values() {
        let form = FormState {
            url: "http://example.com/?a=1&b=\"2\"".to_string(),
            chart: ChartKind::Radar,
            min_count: Threshold::new(7).unwrap(),
        };
        let html = render(&form, None);
        assert!(html.contains("value=\"http://example.com/?a=1&amp;b=&quot;2&quot;\""));
        assert!(html.contains("<option value=\"radar\" selected>"));
        assert!(html.contains("value=\"7\""));
    }

    #[test]
    fn report_shows_chart_and_table() {
        let report = Report {
            chart: Some(Chart {
                kind: ChartKind::Bar,
                svg: "<svg id=\"c\"></svg>".to_string(),
            }),
            top_words: vec![WordCount {
                word: "<b>".to_string(),
                count: 4,
            }],
            distinct_words: 1,
            total_words: 4,
        };
        let html = render(&FormState::default(), Some(&report));
        assert!(html.contains("<svg id=\"c\"></svg>"));
        assert!(html.contains("<td>&lt;b&gt;</td><td>4</td>"));
    }

    #[test]
    fn empty_report_shows_neither_section() {
        let html = render(&FormState::default(), Some(&Report::default()));
        assert!(!html.contains("<table"));
        assert!(!html.contains("class=\"chart\""));
    }
}
