use plotters::{prelude::*, style::text_anchor::HPos};

use super::{draw_svg, label_style, offset, palette, text_width, word_tip, Tooltips, FONT};
use crate::{config::ChartConfig, frequency::FrequencyMap, ChartError};

const TITLE: &str = "Word cloud";
/// Side of one occupancy cell in pixels.
const GRID_CELL: i32 = 4;
/// Spiral probes per word before giving up on a free spot.
const MAX_PROBES: usize = 2000;
const SPIRAL_STEP: f64 = 0.35;
const TITLE_BAND: i32 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub count: u32,
    pub font_size: f64,
    /// Centre of the word in pixels.
    pub x: i32,
    pub y: i32,
    /// Whether a free spot was found; otherwise the word overlaps others.
    pub fits: bool,
}

/// Linear map of `count` from `[min, max]` onto the size range. A flat
/// distribution gets the middle of the range.
pub fn font_size(count: u32, min: u32, max: u32, range: (u32, u32)) -> f64 {
    let (low, high) = (f64::from(range.0), f64::from(range.1));
    if max == min {
        return (low + high) / 2.0;
    }
    low + (high - low) * f64::from(count - min) / f64::from(max - min)
}

/// Coarse bitmap of claimed pixels.
struct Occupancy {
    columns: i32,
    rows: i32,
    cells: Vec<bool>,
}

impl Occupancy {
    fn new(width: i32, height: i32) -> Self {
        let columns = (width / GRID_CELL).max(1);
        let rows = (height / GRID_CELL).max(1);
        Occupancy {
            columns,
            rows,
            cells: vec![false; (columns * rows) as usize],
        }
    }

    /// Cell span of a box, or `None` when it leaves the canvas.
    fn span(&self, b: (i32, i32, i32, i32)) -> Option<(i32, i32, i32, i32)> {
        let (x0, y0, x1, y1) = (
            b.0 / GRID_CELL,
            b.1 / GRID_CELL,
            (b.2 + GRID_CELL - 1) / GRID_CELL,
            (b.3 + GRID_CELL - 1) / GRID_CELL,
        );
        (b.0 >= 0 && b.1 >= 0 && x1 <= self.columns && y1 <= self.rows).then_some((x0, y0, x1, y1))
    }

    fn is_free(&self, b: (i32, i32, i32, i32)) -> bool {
        let Some((x0, y0, x1, y1)) = self.span(b) else {
            return false;
        };
        (y0..y1).all(|row| (x0..x1).all(|col| !self.cells[(row * self.columns + col) as usize]))
    }

    fn claim(&mut self, b: (i32, i32, i32, i32)) {
        if let Some((x0, y0, x1, y1)) = self.span(b) {
            for row in y0..y1 {
                for col in x0..x1 {
                    self.cells[(row * self.columns + col) as usize] = true;
                }
            }
        }
    }
}

/// Places every entry on a `width` × `height` canvas, largest words first,
/// walking an Archimedean spiral out from the centre. Nothing is dropped:
/// a word with no free spot lands on the centre and is marked `fits: false`.
pub fn layout(map: &FrequencyMap, width: i32, height: i32, range: (u32, u32)) -> Vec<PlacedWord> {
    let (Some(min), Some(max)) = (map.iter().map(|e| e.count).min(), map.max_count()) else {
        return Vec::new();
    };

    let mut order: Vec<_> = map.iter().collect();
    order.sort_by(|a, b| b.count.cmp(&a.count));

    let center = (width / 2, height / 2);
    let mut occupancy = Occupancy::new(width, height);
    let mut placed = Vec::with_capacity(order.len());

    for entry in order {
        let size = font_size(entry.count, min, max, range);
        let half_w = (text_width(&entry.word, size) / 2.0).ceil() as i32;
        let half_h = (size / 2.0).ceil() as i32;
        let bounds = |x: i32, y: i32| (x - half_w, y - half_h, x + half_w, y + half_h);

        let spot = (0..MAX_PROBES)
            .map(|probe| {
                let angle = probe as f64 * SPIRAL_STEP;
                let radius = angle * 2.0;
                (
                    center.0 + (radius * angle.cos()) as i32,
                    center.1 + (radius * angle.sin() * 0.65) as i32,
                )
            })
            .find(|&(x, y)| occupancy.is_free(bounds(x, y)));

        let (x, y, fits) = match spot {
            Some((x, y)) => {
                occupancy.claim(bounds(x, y));
                (x, y, true)
            }
            None => (center.0, center.1, false),
        };
        placed.push(PlacedWord {
            word: entry.word.clone(),
            count: entry.count,
            font_size: size,
            x,
            y,
            fits,
        });
    }
    placed
}

pub fn render(map: &FrequencyMap, config: &ChartConfig) -> Result<Option<String>, ChartError> {
    if map.is_empty() {
        return Ok(None);
    }
    let width = config.width as i32;
    let height = config.height as i32 - TITLE_BAND;
    let words = layout(map, width, height, config.word_size_range);
    let overflow = words.iter().filter(|w| !w.fits).count();
    if overflow > 0 {
        tracing::debug!(overflow, "word cloud ran out of room");
    }

    let mut tips = Tooltips::new();
    let svg = draw_svg(config, |root| {
        let area = root.titled(TITLE, (FONT, 24))?;
        let base = area.get_base_pixel();
        for (i, word) in words.iter().enumerate() {
            area.draw(&Text::new(
                word.word.clone(),
                (word.x, word.y),
                label_style(word.font_size, palette(i), HPos::Center),
            ))?;
            let half_w = (text_width(&word.word, word.font_size) / 2.0).ceil() as i32;
            let half_h = (word.font_size / 2.0).ceil() as i32;
            tips.rect(
                offset(base, (word.x - half_w, word.y - half_h)),
                offset(base, (word.x + half_w, word.y + half_h)),
                &word_tip(&word.word, word.count),
            );
        }
        Ok(())
    })?;
    Ok(Some(tips.apply(svg)))
}
