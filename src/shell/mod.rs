//! Presentation shell.
//!
//! Every interaction carries the full input (URL, chart type, threshold) and
//! reruns the pipeline from the fetch. Failures never reach the user as
//! errors; the affected section is just left out.

pub mod error;
pub mod page;
pub mod routes;

use std::sync::Arc;

use serde::Serialize;

use crate::{
    analyzer::Analyzer,
    charts::{self, Chart, ChartKind},
    config::AppConfig,
    frequency::{FrequencyMap, Threshold, WordCount},
    AnalysisError,
};

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub url: String,
    pub chart: ChartKind,
    pub min_count: Threshold,
}

/// What one interaction shows: the chart, if any, and the most common words
/// of the unfiltered map.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub chart: Option<Chart>,
    pub top_words: Vec<WordCount>,
    pub distinct_words: usize,
    pub total_words: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(analyzer: Analyzer, config: AppConfig) -> Self {
        AppState {
            analyzer,
            config: Arc::new(config),
        }
    }
}

/// Runs the whole pipeline for `request`. Fetch failures and empty pages give
/// an empty report.
pub async fn run(analyzer: &Analyzer, request: &AnalysisRequest, config: &AppConfig) -> Report {
    match analyzer.analyze_url(&request.url).await {
        Ok(frequencies) => report_on_blocking_pool(frequencies, request, config).await,
        Err(AnalysisError::EmptyContent) => {
            tracing::info!(url = %request.url, "page has no text to analyze");
            Report::default()
        }
        Err(err) => {
            tracing::warn!(url = %request.url, error = %err, "analysis failed");
            Report::default()
        }
    }
}

/// Chart drawing is CPU-bound, so it stays off the async workers.
async fn report_on_blocking_pool(
    full: FrequencyMap,
    request: &AnalysisRequest,
    config: &AppConfig,
) -> Report {
    let (request, config) = (request.clone(), config.clone());
    tokio::task::spawn_blocking(move || build_report(&full, &request, &config))
        .await
        .unwrap_or_else(|err| {
            tracing::error!(error = %err, "report task failed");
            Report::default()
        })
}

pub fn build_report(full: &FrequencyMap, request: &AnalysisRequest, config: &AppConfig) -> Report {
    let filtered = full.filter_min(request.min_count);
    let chart = match chart_for(request.chart, &filtered, full, config) {
        Ok(chart) => Some(chart),
        Err(AnalysisError::EmptyResult) => {
            tracing::debug!(
                chart = %request.chart,
                min_count = request.min_count.get(),
                "nothing to chart"
            );
            None
        }
        Err(err) => {
            tracing::warn!(chart = %request.chart, error = %err, "chart rendering failed");
            None
        }
    };

    Report {
        chart,
        top_words: full.most_common(config.analysis.top_n),
        distinct_words: full.len(),
        total_words: full.total(),
    }
}

fn chart_for(
    kind: ChartKind,
    filtered: &FrequencyMap,
    full: &FrequencyMap,
    config: &AppConfig,
) -> Result<Chart, AnalysisError> {
    charts::render(kind, filtered, full, &config.charts)?.ok_or(AnalysisError::EmptyResult)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(chart: ChartKind, min_count: u32) -> AnalysisRequest {
        AnalysisRequest {
            url: "http://example.com".to_string(),
            chart,
            min_count: Threshold::new(min_count).unwrap(),
        }
    }

    fn sample() -> FrequencyMap {
        FrequencyMap::from_tokens("the the the cat cat dog".split(' '))
    }

    #[test]
    fn report_has_chart_and_table() {
        let report = build_report(&sample(), &request(ChartKind::Pie, 1), &AppConfig::default());
        let chart = report.chart.unwrap();
        assert_eq!(chart.kind, ChartKind::Pie);
        assert!(chart.svg.contains("dog"));
        assert_eq!(report.top_words.len(), 3);
        assert_eq!(report.distinct_words, 3);
        assert_eq!(report.total_words, 6);
    }

    #[test]
    fn threshold_filters_chart_not_table() {
        let report = build_report(&sample(), &request(ChartKind::Line, 2), &AppConfig::default());
        let chart = report.chart.unwrap();
        assert!(chart.svg.contains("\ncat\n"));
        assert!(!chart.svg.contains("\ndog\n"));
        assert!(chart.svg.contains("<title>cat: 2</title>"));
        assert!(!chart.svg.contains("<title>dog: 1</title>"));
        assert!(report.top_words.iter().any(|w| w.word == "dog"));
    }

    #[test]
    fn threshold_above_every_count_leaves_only_the_table() {
        let report = build_report(&sample(), &request(ChartKind::Radar, 50), &AppConfig::default());
        assert!(report.chart.is_none());
        assert_eq!(report.top_words[0].word, "the");
    }

    #[test]
    fn ranked_bar_ignores_threshold() {
        let report = build_report(&sample(), &request(ChartKind::Bar, 50), &AppConfig::default());
        assert!(report.chart.is_some());
    }

    #[test]
    fn empty_map_gives_empty_report() {
        let report = build_report(
            &FrequencyMap::new(),
            &request(ChartKind::WordCloud, 1),
            &AppConfig::default(),
        );
        assert!(report.chart.is_none());
        assert!(report.top_words.is_empty());
    }

    #[test]
    fn table_size_follows_config() {
        let tokens: Vec<String> = (0..40).map(|i| format!("w{}", i)).collect();
        let mut config = AppConfig::default();
        config.analysis.top_n = 5;
        let report = build_report(
            &FrequencyMap::from_tokens(&tokens),
            &request(ChartKind::Scatter, 1),
            &config,
        );
        assert_eq!(report.top_words.len(), 5);
    }

    #[tokio::test]
    async fn pooled_report_matches_inline_one() {
        let config = AppConfig::default();
        let request = request(ChartKind::HeatMap, 2);
        let inline = build_report(&sample(), &request, &config);
        let pooled = report_on_blocking_pool(sample(), &request, &config).await;
        assert_eq!(pooled.top_words, inline.top_words);
        assert_eq!(pooled.total_words, 6);
        assert_eq!(pooled.chart.map(|c| c.svg), inline.chart.map(|c| c.svg));
    }
}
