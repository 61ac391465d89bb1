use plotters::{prelude::*, style::text_anchor::HPos, style::FontTransform};

use super::{draw_svg, label_style, offset, word_tip, Tooltips, FONT};
use crate::{config::ChartConfig, frequency::FrequencyMap, ChartError};

const TITLE: &str = "Word frequency heat map";
/// Cell labels are skipped once cells get narrower than this.
const MIN_LABELLED_CELL: i32 = 12;
const LEGEND_STEPS: i32 = 64;

/// Yellow → green → blue, light to dark.
const SCALE: [(u8, u8, u8); 9] = [
    (255, 255, 217),
    (237, 248, 177),
    (199, 233, 180),
    (127, 205, 187),
    (65, 182, 196),
    (29, 145, 192),
    (34, 94, 168),
    (37, 52, 148),
    (8, 29, 88),
];

/// Colour at `t` in `0.0..=1.0` along the scale, linearly interpolated.
pub fn color_at(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (SCALE.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(SCALE.len() - 1);
    let frac = scaled - lower as f64;
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
    let (a, b) = (SCALE[lower], SCALE[upper]);
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatCell {
    pub column: usize,
    pub word: String,
    pub count: u32,
    /// Position of `count` within the legend range.
    pub intensity: f64,
}

/// Legend range fitted to the data.
pub fn legend_range(map: &FrequencyMap) -> Option<(u32, u32)> {
    let min = map.iter().map(|e| e.count).min()?;
    let max = map.iter().map(|e| e.count).max()?;
    Some((min, max))
}

/// One cell per word along a single row, in first-seen order.
pub fn cells(map: &FrequencyMap) -> Vec<HeatCell> {
    let Some((min, max)) = legend_range(map) else {
        return Vec::new();
    };
    let span = f64::from(max - min);
    map.iter()
        .enumerate()
        .map(|(column, entry)| HeatCell {
            column,
            word: entry.word.clone(),
            count: entry.count,
            intensity: if span == 0.0 {
                1.0
            } else {
                f64::from(entry.count - min) / span
            },
        })
        .collect()
}

pub fn render(map: &FrequencyMap, config: &ChartConfig) -> Result<Option<String>, ChartError> {
    let cells = cells(map);
    let Some((min, max)) = legend_range(map) else {
        return Ok(None);
    };

    let mut tips = Tooltips::new();
    let svg = draw_svg(config, |root| {
        let area = root.titled(TITLE, (FONT, 24))?;
        let base = area.get_base_pixel();
        let (width, height) = area.dim_in_pixel();
        let (width, height) = (width as i32, height as i32);

        let left = 60;
        let right = width - 40;
        let row_top = height / 4;
        let row_bottom = row_top + height / 4;
        let cell_width = ((right - left) / cells.len() as i32).max(1);

        area.draw(&Text::new(
            "Frequency",
            (left - 8, (row_top + row_bottom) / 2),
            label_style(13.0, BLACK, HPos::Right),
        ))?;

        for cell in &cells {
            let x0 = left + cell.column as i32 * cell_width;
            area.draw(&Rectangle::new(
                [(x0, row_top), (x0 + cell_width, row_bottom)],
                color_at(cell.intensity).filled(),
            ))?;
            tips.rect(
                offset(base, (x0, row_top)),
                offset(base, (x0 + cell_width, row_bottom)),
                &word_tip(&cell.word, cell.count),
            );
            if cell_width >= MIN_LABELLED_CELL {
                area.draw(&Text::new(
                    cell.word.clone(),
                    (x0 + cell_width / 2, row_bottom + 6),
                    (FONT, 12).into_font().transform(FontTransform::Rotate90),
                ))?;
            }
        }

        // Continuous legend under the row, min on the left.
        let legend_top = height - 60;
        let legend_width = (right - left).min(400);
        let step = (legend_width / LEGEND_STEPS).max(1);
        for i in 0..LEGEND_STEPS {
            let x0 = left + i * step;
            area.draw(&Rectangle::new(
                [(x0, legend_top), (x0 + step, legend_top + 14)],
                color_at(f64::from(i) / f64::from(LEGEND_STEPS - 1)).filled(),
            ))?;
        }
        area.draw(&Text::new(
            min.to_string(),
            (left, legend_top + 26),
            label_style(12.0, BLACK, HPos::Left),
        ))?;
        area.draw(&Text::new(
            max.to_string(),
            (left + LEGEND_STEPS * step, legend_top + 26),
            label_style(12.0, BLACK, HPos::Right),
        ))?;
        Ok(())
    })?;
    Ok(Some(tips.apply(svg)))
}
