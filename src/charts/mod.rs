//! Chart adapters.
//!
//! Every adapter takes a frequency map and draws an SVG with plotters:
//! - **word_cloud**: every word, sized by count
//! - **bar**: ranked top words, horizontal
//! - **trend**: line and scatter over first-seen order
//! - **pie**: first slices by position
//! - **radar**: first axes on a shared scale
//! - **heatmap**: one row of cells on a colour scale
//!
//! An empty map yields `None`, never an error. Hovering a word, bar, slice,
//! point or cell shows its count through an SVG `<title>`.

pub mod bar;
pub mod heatmap;
pub mod pie;
pub mod radar;
mod tooltip;
pub mod trend;
pub mod word_cloud;

use std::{fmt, str::FromStr};

use plotters::{
    coord::Shift,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use serde::{Deserialize, Serialize};

use crate::{config::ChartConfig, frequency::FrequencyMap, ChartError};
pub use tooltip::escape;
pub(crate) use tooltip::{offset, word_tip, Tooltips};

pub(crate) const FONT: &str = "sans-serif";

/// Default series palette, cycled by entry position.
pub(crate) const PALETTE: [RGBColor; 9] = [
    RGBColor(84, 112, 198),
    RGBColor(145, 204, 117),
    RGBColor(250, 200, 88),
    RGBColor(238, 102, 102),
    RGBColor(115, 192, 222),
    RGBColor(59, 162, 114),
    RGBColor(252, 132, 82),
    RGBColor(154, 96, 180),
    RGBColor(234, 124, 204),
];

pub(crate) fn palette(i: usize) -> RGBColor {
    PALETTE[i % PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    WordCloud,
    Bar,
    Line,
    Pie,
    Scatter,
    Radar,
    HeatMap,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::WordCloud,
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Scatter,
        ChartKind::Radar,
        ChartKind::HeatMap,
    ];

    /// Query-string name.
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::WordCloud => "word_cloud",
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Radar => "radar",
            ChartKind::HeatMap => "heat_map",
        }
    }

    /// Human-readable name for the selector.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::WordCloud => "Word cloud",
            ChartKind::Bar => "Bar chart",
            ChartKind::Line => "Line chart",
            ChartKind::Pie => "Pie chart",
            ChartKind::Scatter => "Scatter plot",
            ChartKind::Radar => "Radar chart",
            ChartKind::HeatMap => "Heat map",
        }
    }

    /// The ranked bar ignores the threshold and reads the unfiltered map.
    pub fn uses_unfiltered(self) -> bool {
        matches!(self, ChartKind::Bar)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ChartError::UnknownKind(s.to_string()))
    }
}

/// A rendered chart, ready to embed in a page.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub svg: String,
}

/// Draws `kind` for the given maps. `filtered` feeds every adapter except the
/// ranked bar, which reads `full`.
pub fn render(
    kind: ChartKind,
    filtered: &FrequencyMap,
    full: &FrequencyMap,
    config: &ChartConfig,
) -> Result<Option<Chart>, ChartError> {
    let svg = match kind {
        ChartKind::WordCloud => word_cloud::render(filtered, config)?,
        ChartKind::Bar => bar::render(full, config)?,
        ChartKind::Line => trend::render_line(filtered, config)?,
        ChartKind::Pie => pie::render(filtered, config)?,
        ChartKind::Scatter => trend::render_scatter(filtered, config)?,
        ChartKind::Radar => radar::render(filtered, config)?,
        ChartKind::HeatMap => heatmap::render(filtered, config)?,
    };
    Ok(svg.map(|svg| Chart { kind, svg }))
}

/// Runs `draw` on a white SVG canvas of the configured size and returns the
/// markup.
pub(crate) fn draw_svg<F>(config: &ChartConfig, draw: F) -> Result<String, ChartError>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> Result<(), ChartError>,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }
    Ok(svg)
}

/// Text style anchored vertically on its centre line.
pub(crate) fn label_style(size: f64, color: RGBColor, h_pos: HPos) -> TextStyle<'static> {
    (FONT, size)
        .into_font()
        .color(&color)
        .pos(Pos::new(h_pos, VPos::Center))
}

/// Rough rendered width of `text` at `size` px: full-width glyphs take a
/// whole em, everything else about six tenths.
pub(crate) fn text_width(text: &str, size: f64) -> f64 {
    text.chars()
        .map(|c| if c.is_ascii() { 0.6 } else { 1.0 })
        .sum::<f64>()
        * size
}
