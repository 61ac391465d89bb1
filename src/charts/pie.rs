use std::f64::consts::{FRAC_PI_2, PI, TAU};

use plotters::{prelude::*, style::text_anchor::HPos};

use super::{draw_svg, label_style, offset, palette, Tooltips, FONT};
use crate::{config::ChartConfig, frequency::FrequencyMap, ChartError};

const TITLE: &str = "Word frequency share";
/// Arc resolution; one polygon vertex per this many radians.
const ARC_STEP: f64 = PI / 90.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub word: String,
    pub count: u32,
    /// Share of the plotted subtotal, 0..=100.
    pub percent: f64,
    /// Radians, clockwise from twelve o'clock.
    pub start: f64,
    pub sweep: f64,
}

impl PieSlice {
    pub fn label(&self) -> String {
        format!("{}: {} ({:.2}%)", self.word, self.count, self.percent)
    }
}

/// The first `limit` entries in first-seen order. Truncation is by position,
/// so a late but frequent word can miss the pie.
pub fn slices(map: &FrequencyMap, limit: usize) -> Vec<PieSlice> {
    let plotted = &map.entries()[..map.len().min(limit)];
    let subtotal: u64 = plotted.iter().map(|e| u64::from(e.count)).sum();
    if subtotal == 0 {
        return Vec::new();
    }

    let mut start = 0.0;
    plotted
        .iter()
        .map(|entry| {
            let share = f64::from(entry.count) / subtotal as f64;
            let slice = PieSlice {
                word: entry.word.clone(),
                count: entry.count,
                percent: share * 100.0,
                start,
                sweep: share * TAU,
            };
            start += slice.sweep;
            slice
        })
        .collect()
}

pub fn render(map: &FrequencyMap, config: &ChartConfig) -> Result<Option<String>, ChartError> {
    let slices = slices(map, config.pie_limit);
    if slices.is_empty() {
        return Ok(None);
    }

    let mut tips = Tooltips::new();
    let svg = draw_svg(config, |root| {
        let area = root.titled(TITLE, (FONT, 24))?;
        let (width, height) = area.dim_in_pixel();
        let (legend, plot) = area.split_horizontally((width as f64 * 0.2) as u32);

        let legend_top = (height as f64 * 0.15) as i32;
        for (i, slice) in slices.iter().enumerate() {
            let y = legend_top + i as i32 * 20;
            legend.draw(&Rectangle::new(
                [(10, y - 6), (24, y + 6)],
                palette(i).filled(),
            ))?;
            legend.draw(&Text::new(
                slice.word.clone(),
                (30, y),
                label_style(13.0, BLACK, HPos::Left),
            ))?;
        }

        let (plot_width, plot_height) = plot.dim_in_pixel();
        let center = (plot_width as i32 / 2, plot_height as i32 / 2);
        let radius = f64::from(plot_width.min(plot_height)) * 0.32;

        let base = plot.get_base_pixel();
        for (i, slice) in slices.iter().enumerate() {
            let outline = wedge(center, radius, slice.start, slice.sweep);
            let on_canvas: Vec<_> = outline.iter().map(|&p| offset(base, p)).collect();
            tips.polygon(&on_canvas, &slice.label());
            plot.draw(&Polygon::new(outline, palette(i).filled()))?;
        }

        for slice in &slices {
            let mid = slice.start + slice.sweep / 2.0;
            let anchor = point_at(center, radius * 1.12, mid);
            let h_pos = if anchor.0 >= center.0 {
                HPos::Left
            } else {
                HPos::Right
            };
            plot.draw(&PathElement::new(
                vec![point_at(center, radius, mid), anchor],
                BLACK.mix(0.5).stroke_width(1),
            ))?;
            plot.draw(&Text::new(
                slice.label(),
                anchor,
                label_style(12.0, BLACK, h_pos),
            ))?;
        }
        Ok(())
    })?;
    Ok(Some(tips.apply(svg)))
}

/// Pixel position at `radius` and `angle` (clockwise from twelve o'clock).
fn point_at(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    let theta = angle - FRAC_PI_2;
    (
        center.0 + (radius * theta.cos()).round() as i32,
        center.1 + (radius * theta.sin()).round() as i32,
    )
}

fn wedge(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep / ARC_STEP).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        points.push(point_at(center, radius, start + sweep * step as f64 / steps as f64));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_position_not_magnitude() {
        // 25 words; the last five are by far the most frequent.
        let mut tokens = Vec::new();
        for i in 0..25 {
            let repeat = if i >= 20 { 50 } else { 1 + i % 3 };
            for _ in 0..repeat {
                tokens.push(format!("w{:02}", i));
            }
        }
        let map = FrequencyMap::from_tokens(&tokens);
        let pie = slices(&map, 20);
        assert_eq!(pie.len(), 20);
        let words: Vec<_> = pie.iter().map(|s| s.word.clone()).collect();
        let expected: Vec<_> = (0..20).map(|i| format!("w{:02}", i)).collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn percentages_are_of_the_plotted_subtotal() {
        let map = FrequencyMap::from_tokens(["aa", "aa", "aa", "bb", "cc", "dd", "dd", "dd", "dd"]);
        let pie = slices(&map, 2);
        assert_eq!(pie.len(), 2);
        assert!((pie[0].percent - 75.0).abs() < 1e-9);
        assert!((pie[1].percent - 25.0).abs() < 1e-9);
        assert_eq!(pie[0].label(), "aa: 3 (75.00%)");
        assert_eq!(pie[1].label(), "bb: 1 (25.00%)");
    }

    #[test]
    fn slices_cover_the_full_circle() {
        let map = FrequencyMap::from_tokens(["aa", "bb", "bb", "cc", "cc", "cc"]);
        let pie = slices(&map, 20);
        let last = pie.last().unwrap();
        assert!((last.start + last.sweep - TAU).abs() < 1e-9);
        assert_eq!(pie[0].start, 0.0);
    }

    #[test]
    fn render_labels_slices() {
        let map = FrequencyMap::from_tokens(["spring", "summer", "summer"]);
        let svg = render(&map, &ChartConfig::default()).unwrap().unwrap();
        assert!(svg.contains("spring: 1 (33.33%)"));
        assert!(svg.contains("summer: 2 (66.67%)"));
        assert!(svg.contains("<title>spring: 1 (33.33%)</title></polygon>"));
    }

    #[test]
    fn twelve_o_clock_is_up() {
        assert_eq!(point_at((100, 100), 10.0, 0.0), (100, 90));
        assert_eq!(point_at((100, 100), 10.0, FRAC_PI_2), (110, 100));
    }

    #[test]
    fn empty_map_draws_nothing() {
        assert!(slices(&FrequencyMap::new(), 20).is_empty());
        assert!(render(&FrequencyMap::new(), &ChartConfig::default())
            .unwrap()
            .is_none());
    }
}
