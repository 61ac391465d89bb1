use plotters::{prelude::*, style::text_anchor::HPos, style::FontTransform};

use super::{draw_svg, label_style, text_width, word_tip, Tooltips, FONT};
use crate::{
    config::ChartConfig,
    frequency::{FrequencyMap, WordCount},
    ChartError,
};

const TITLE: &str = "Top words by frequency";
const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);
const LABEL_SIZE: f64 = 14.0;

/// Highest counts first, ties in first-seen order.
pub fn ranked(map: &FrequencyMap, limit: usize) -> Vec<WordCount> {
    map.most_common(limit)
}

/// Horizontal bars for the top words of the unfiltered map, highest on top.
pub fn render(map: &FrequencyMap, config: &ChartConfig) -> Result<Option<String>, ChartError> {
    let ranked = ranked(map, config.ranked_limit);
    let Some(top) = ranked.first() else {
        return Ok(None);
    };
    let rows = ranked.len() as u32;
    let x_max = top.count + 1;
    let label_area = ranked
        .iter()
        .map(|entry| text_width(&entry.word, LABEL_SIZE))
        .fold(0.0, f64::max) as u32
        + 20;

    // Rank 0 sits on the top row.
    let row_of = |rank: usize| rows - 1 - rank as u32;

    let mut tips = Tooltips::new();
    let svg = draw_svg(config, |root| {
        let area = root.titled(TITLE, (FONT, 24))?;
        let mut chart = ChartBuilder::on(&area)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(label_area)
            .build_cartesian_2d(0u32..x_max, (0u32..rows).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc("Frequency")
            .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
            .y_labels(rows as usize + 1)
            .y_label_style((FONT, LABEL_SIZE))
            .y_label_formatter(&|value| match value {
                SegmentValue::CenterOf(row) if *row < rows => {
                    ranked[(rows - 1 - *row) as usize].word.clone()
                }
                _ => String::new(),
            })
            .draw()?;

        chart.draw_series(ranked.iter().enumerate().map(|(rank, entry)| {
            let row = row_of(rank);
            Rectangle::new(
                [
                    (0, SegmentValue::Exact(row)),
                    (entry.count, SegmentValue::Exact(row + 1)),
                ],
                BAR_COLOR.filled(),
            )
        }))?;

        chart.draw_series(ranked.iter().enumerate().map(|(rank, entry)| {
            Text::new(
                format!(" {}", entry.count),
                (entry.count, SegmentValue::CenterOf(row_of(rank))),
                label_style(12.0, BLACK, HPos::Left),
            )
        }))?;

        for (rank, entry) in ranked.iter().enumerate() {
            let row = row_of(rank);
            tips.rect(
                chart.backend_coord(&(0, SegmentValue::Exact(row))),
                chart.backend_coord(&(entry.count, SegmentValue::Exact(row + 1))),
                &word_tip(&entry.word, entry.count),
            );
        }
        Ok(())
    })?;
    Ok(Some(tips.apply(svg)))
}
