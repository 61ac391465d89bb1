use std::f64::consts::{FRAC_PI_2, TAU};

use plotters::{prelude::*, style::text_anchor::HPos};

use super::{draw_svg, label_style, offset, palette, word_tip, Tooltips, FONT};
use crate::{config::ChartConfig, frequency::FrequencyMap, ChartError};

const TITLE: &str = "Word frequency radar";
/// Concentric grid rings.
const SPLIT_LEVELS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct RadarSpec {
    pub indicators: Vec<String>,
    pub values: Vec<u32>,
    /// Shared by every axis.
    pub max: u32,
}

/// Axes for the first `limit` entries in first-seen order. The scale is the
/// largest count of the whole map, not of the plotted entries. `None` when
/// no axis would be drawn.
pub fn spec(map: &FrequencyMap, limit: usize) -> Option<RadarSpec> {
    let max = map.max_count()?;
    let plotted = map.iter().take(limit);
    let (indicators, values): (Vec<_>, Vec<_>) =
        plotted.map(|e| (e.word.clone(), e.count)).unzip();
    if indicators.is_empty() {
        return None;
    }
    Some(RadarSpec {
        indicators,
        values,
        max,
    })
}

pub fn render(map: &FrequencyMap, config: &ChartConfig) -> Result<Option<String>, ChartError> {
    let Some(spec) = spec(map, config.radar_limit) else {
        return Ok(None);
    };
    let axes = spec.indicators.len();

    let mut tips = Tooltips::new();
    let svg = draw_svg(config, |root| {
        let area = root.titled(TITLE, (FONT, 24))?;
        let base = area.get_base_pixel();
        let (width, height) = area.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = f64::from(width.min(height)) * 0.36;
        let grid = BLACK.mix(0.25);

        for level in 1..=SPLIT_LEVELS {
            let r = radius * f64::from(level) / f64::from(SPLIT_LEVELS);
            let mut ring: Vec<_> = (0..axes).map(|i| vertex(center, r, i, axes)).collect();
            ring.push(ring[0]);
            area.draw(&PathElement::new(ring, grid.stroke_width(1)))?;
        }

        for (i, name) in spec.indicators.iter().enumerate() {
            let tip = vertex(center, radius, i, axes);
            area.draw(&PathElement::new(vec![center, tip], grid.stroke_width(1)))?;

            let anchor = vertex(center, radius * 1.08, i, axes);
            let h_pos = if (anchor.0 - center.0).abs() < 4 {
                HPos::Center
            } else if anchor.0 > center.0 {
                HPos::Left
            } else {
                HPos::Right
            };
            area.draw(&Text::new(
                name.clone(),
                anchor,
                label_style(14.0, BLACK, h_pos),
            ))?;
        }

        let color = palette(0);
        let shape: Vec<_> = spec
            .values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                vertex(center, radius * f64::from(value) / f64::from(spec.max), i, axes)
            })
            .collect();
        area.draw(&Polygon::new(shape.clone(), color.mix(0.3).filled()))?;
        let mut outline = shape.clone();
        outline.push(shape[0]);
        area.draw(&PathElement::new(outline, color.stroke_width(2)))?;
        for ((point, name), &value) in shape.iter().zip(&spec.indicators).zip(&spec.values) {
            area.draw(&Circle::new(*point, 3, color.filled()))?;
            tips.around(offset(base, *point), 6, &word_tip(name, value));
        }

        area.draw(&Text::new(
            format!("scale 0..{}", spec.max),
            (10, height as i32 - 14),
            label_style(12.0, BLACK, HPos::Left),
        ))?;
        Ok(())
    })?;
    Ok(Some(tips.apply(svg)))
}

/// Vertex of axis `i` of `axes`, the first pointing up and the rest
/// following counter-clockwise.
fn vertex(center: (i32, i32), radius: f64, i: usize, axes: usize) -> (i32, i32) {
    let theta = -FRAC_PI_2 - TAU * i as f64 / axes as f64;
    (
        center.0 + (radius * theta.cos()).round() as i32,
        center.1 + (radius * theta.sin()).round() as i32,
    )
}
