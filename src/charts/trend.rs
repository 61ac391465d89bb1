use plotters::{prelude::*, style::FontTransform};

use super::{draw_svg, palette, word_tip, Tooltips, FONT};
use crate::{
    config::ChartConfig,
    frequency::{FrequencyMap, WordCount},
    ChartError,
};

/// Beyond this many words the x axis labels only a spread of them.
const MAX_WORD_LABELS: usize = 60;

#[derive(Clone, Copy)]
enum Mark {
    Line,
    Point,
}

/// Count per word, x in first-seen order.
pub fn render_line(map: &FrequencyMap, config: &ChartConfig) -> Result<Option<String>, ChartError> {
    render_series(map, config, "Word frequency trend", Mark::Line)
}

/// Same axes as the line chart, one dot per word.
pub fn render_scatter(
    map: &FrequencyMap,
    config: &ChartConfig,
) -> Result<Option<String>, ChartError> {
    render_series(map, config, "Word frequency scatter", Mark::Point)
}

fn render_series(
    map: &FrequencyMap,
    config: &ChartConfig,
    title: &str,
    mark: Mark,
) -> Result<Option<String>, ChartError> {
    let Some(max) = map.max_count() else {
        return Ok(None);
    };
    let entries = map.entries();
    let columns = entries.len() as u32;
    let color = palette(0);

    let mut tips = Tooltips::new();
    let svg = draw_svg(config, |root| {
        let area = root.titled(title, (FONT, 24))?;
        let mut chart = ChartBuilder::on(&area)
            .margin(20)
            .x_label_area_size(90)
            .y_label_area_size(50)
            .build_cartesian_2d((0u32..columns).into_segmented(), 0u32..max + 1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Word")
            .y_desc("Frequency")
            .x_labels((entries.len() + 1).min(MAX_WORD_LABELS))
            .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
            .x_label_formatter(&|value| word_at(entries, value))
            .draw()?;

        let points = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (SegmentValue::CenterOf(i as u32), entry.count));
        match mark {
            Mark::Line => {
                chart.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?;
                chart.draw_series(points.map(|p| Circle::new(p, 3, color.filled())))?;
            }
            Mark::Point => {
                chart.draw_series(points.map(|p| Circle::new(p, 5, color.filled())))?;
            }
        }

        for (i, entry) in entries.iter().enumerate() {
            let point = chart.backend_coord(&(SegmentValue::CenterOf(i as u32), entry.count));
            tips.around(point, 6, &word_tip(&entry.word, entry.count));
        }
        Ok(())
    })?;
    Ok(Some(tips.apply(svg)))
}

fn word_at(entries: &[WordCount], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => entries
            .get(*i as usize)
            .map(|e| e.word.clone())
            .unwrap_or_default(),
        _ => String::new(),
    }
}
