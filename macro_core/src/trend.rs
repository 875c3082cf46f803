//! Weight trend series and a plain-text line chart.

use crate::{TrendPoint, WeightLog};

/// Padding, in kg, added above and below the observed weights
const DOMAIN_PADDING_KG: f64 = 2.0;

const POINT: char = '●';
const LINK: char = '·';

/// Oldest-first weight series, rebuilt from the log on every read
#[derive(Clone, Debug, PartialEq)]
pub struct TrendSeries {
    points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn from_log(log: &WeightLog) -> Self {
        Self {
            points: log.to_chronological_series(),
        }
    }

    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    /// A trend needs at least two observations
    pub fn is_chartable(&self) -> bool {
        self.points.len() > 1
    }

    /// Y-axis range: lowest weight minus 2 kg to highest plus 2 kg
    pub fn domain(&self) -> Option<(f64, f64)> {
        let mut weights = self.points.iter().map(|p| p.weight);
        let first = weights.next()?;
        let (min, max) = weights.fold((first, first), |(lo, hi), w| (lo.min(w), hi.max(w)));
        Some((min - DOMAIN_PADDING_KG, max + DOMAIN_PADDING_KG))
    }

    /// Net change from the first to the last observation
    pub fn net_change(&self) -> Option<f64> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 1 => {
                Some(last.weight - first.weight)
            }
            _ => None,
        }
    }

    /// Draw the series as a text chart
    ///
    /// `width` and `height` size the plotting area in characters; dates on the
    /// x-axis use `date_format` (chrono strftime syntax).
    pub fn render(&self, width: usize, height: usize, date_format: &str) -> String {
        let Some((low, high)) = self.domain() else {
            return String::new();
        };
        let width = width.max(2);
        let height = height.max(2);
        let n = self.points.len();

        let column = |i: usize| -> usize {
            if n == 1 {
                0
            } else {
                ((i * (width - 1)) as f64 / (n - 1) as f64).round() as usize
            }
        };
        let row = |weight: f64| -> usize {
            let frac = (high - weight) / (high - low);
            ((frac * (height - 1) as f64).round() as usize).min(height - 1)
        };

        let mut grid = vec![vec![' '; width]; height];

        for (i, pair) in self.points.windows(2).enumerate() {
            let (c0, c1) = (column(i), column(i + 1));
            for c in c0 + 1..c1 {
                let t = (c - c0) as f64 / (c1 - c0) as f64;
                let w = pair[0].weight + t * (pair[1].weight - pair[0].weight);
                let r = row(w);
                if grid[r][c] == ' ' {
                    grid[r][c] = LINK;
                }
            }
        }
        for (i, point) in self.points.iter().enumerate() {
            grid[row(point.weight)][column(i)] = POINT;
        }

        let mut out = String::new();
        for (r, cells) in grid.iter().enumerate() {
            let label = if r == 0 {
                format!("{:>7.1}", high)
            } else if r == height - 1 {
                format!("{:>7.1}", low)
            } else if r == (height - 1) / 2 {
                format!("{:>7.1}", (high + low) / 2.0)
            } else {
                " ".repeat(7)
            };
            let line: String = cells.iter().collect();
            out.push_str(&format!("{} ┤{}\n", label, line.trim_end()));
        }
        out.push_str(&format!("{} └{}\n", " ".repeat(7), "─".repeat(width)));

        let first = self.points[0].date.format(date_format).to_string();
        let last = self.points[n - 1].date.format(date_format).to_string();
        let gap = width.saturating_sub(first.chars().count() + last.chars().count());
        if n > 1 && gap > 0 {
            out.push_str(&format!("{}  {}{}{}\n", " ".repeat(7), first, " ".repeat(gap), last));
        } else {
            out.push_str(&format!("{}  {}\n", " ".repeat(7), first));
        }

        out
    }
}
