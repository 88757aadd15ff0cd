use super::{category_label, category_range, padded_range, plot_err, Chart, CAPTION_FONT, STEEL_BLUE};
use crate::error::{MlearnError, Result};
use crate::stats::ContingencyTable;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Horizontal bar chart of one value per named item.
#[derive(Debug, Clone)]
pub struct BarChart {
    title: String,
    x_label: String,
    bars: Vec<(String, f64)>,
    color: RGBColor,
}

impl BarChart {
    /// Bars are drawn bottom-up in the given order.
    pub fn new<I, S>(title: impl Into<String>, bars: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            x_label: String::new(),
            bars: bars.into_iter().map(|(n, v)| (n.into(), v)).collect(),
            color: STEEL_BLUE,
        }
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    /// Orders bars by value so the smallest sits at the bottom.
    pub fn sorted_ascending(mut self) -> Self {
        self.bars.sort_by(|a, b| a.1.total_cmp(&b.1));
        self
    }

    pub fn bars(&self) -> &[(String, f64)] {
        &self.bars
    }
}

impl Chart for BarChart {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        if self.bars.is_empty() {
            return Err(MlearnError::EmptyData(format!("bar chart '{}' has no bars", self.title)));
        }
        let n = self.bars.len();
        let labels: Vec<String> = self.bars.iter().map(|(name, _)| name.clone()).collect();
        let x_range = padded_range(
            self.bars.iter().map(|(_, v)| *v).chain(std::iter::once(0.0)),
            0.12,
        );

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, CAPTION_FONT)
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(120)
            .build_cartesian_2d(x_range, category_range(n))
            .map_err(plot_err)?;
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(2 * n + 1)
            .y_label_formatter(&|y| category_label(&labels, *y))
            .x_desc(self.x_label.as_str())
            .draw()
            .map_err(plot_err)?;

        let color = self.color;
        chart
            .draw_series(self.bars.iter().enumerate().map(|(i, (_, v))| {
                let y = i as f64;
                Rectangle::new([(v.min(0.0), y - 0.35), (v.max(0.0), y + 0.35)], color.filled())
            }))
            .map_err(plot_err)?;

        let value_style = ("sans-serif", 14)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        chart
            .draw_series(self.bars.iter().enumerate().map(|(i, (_, v))| {
                Text::new(format!("{v:.2}"), (*v, i as f64), value_style.clone())
            }))
            .map_err(plot_err)?;
        Ok(())
    }
}

/// Vertical bars stacked per category, one stack layer per series.
#[derive(Debug, Clone)]
pub struct StackedBarChart {
    title: String,
    x_label: String,
    y_label: String,
    categories: Vec<String>,
    layers: Vec<(String, Vec<f64>, RGBColor)>,
}

impl StackedBarChart {
    /// Rows of `table` become bars; its columns become the stacked layers,
    /// coloured in order from `colors` (cycled).
    pub fn from_table(title: impl Into<String>, table: &ContingencyTable, colors: &[RGBColor]) -> Self {
        let layers = table
            .col_labels
            .iter()
            .enumerate()
            .map(|(c, label)| {
                let values = table.counts.iter().map(|row| row[c] as f64).collect();
                let color = colors.get(c % colors.len().max(1)).copied().unwrap_or(STEEL_BLUE);
                (label.clone(), values, color)
            })
            .collect();
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            categories: table.row_labels.clone(),
            layers,
        }
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    fn totals(&self) -> Vec<f64> {
        (0..self.categories.len())
            .map(|i| self.layers.iter().map(|(_, v, _)| v[i]).sum())
            .collect()
    }
}

impl Chart for StackedBarChart {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let n = self.categories.len();
        if n == 0 || self.layers.is_empty() {
            return Err(MlearnError::EmptyData(format!("stacked bar chart '{}' is empty", self.title)));
        }
        let y_max = self.totals().into_iter().fold(0.0, f64::max).max(1.0) * 1.1;

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, CAPTION_FONT)
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(category_range(n), 0.0..y_max)
            .map_err(plot_err)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(2 * n + 1)
            .x_label_formatter(&|x| category_label(&self.categories, *x))
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .map_err(plot_err)?;

        let count_style = ("sans-serif", 14)
            .into_font()
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let mut bottoms = vec![0.0; n];
        for (label, values, color) in &self.layers {
            let color = *color;
            let segments: Vec<(f64, f64, f64)> = values
                .iter()
                .zip(&bottoms)
                .enumerate()
                .map(|(i, (v, b))| (i as f64, *b, *b + v))
                .collect();
            chart
                .draw_series(segments.iter().map(|&(x, lo, hi)| {
                    Rectangle::new([(x - 0.3, lo), (x + 0.3, hi)], color.filled())
                }))
                .map_err(plot_err)?
                .label(label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
            chart
                .draw_series(segments.iter().filter(|(_, lo, hi)| hi > lo).map(|&(x, lo, hi)| {
                    Text::new(format!("{}", (hi - lo).round()), (x, (lo + hi) / 2.0), count_style.clone())
                }))
                .map_err(plot_err)?;
            for (b, v) in bottoms.iter_mut().zip(values) {
                *b += v;
            }
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(plot_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{render_svg, MINT, SALMON};
    use crate::stats::crosstab;

    #[test]
    fn test_bar_chart_sorted_ascending() {
        let chart = BarChart::new("Feature importance", [("a", 3.0), ("b", -1.0), ("c", 2.0)]).sorted_ascending();
        let names: Vec<&str> = chart.bars().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        let svg = render_svg(&chart).unwrap();
        assert!(svg.contains("Feature importance"));
        assert!(svg.contains("-1.00"));
    }

    #[test]
    fn test_empty_bar_chart_rejected() {
        let chart = BarChart::new("none", Vec::<(String, f64)>::new());
        assert!(render_svg(&chart).is_err());
    }

    #[test]
    fn test_stacked_bars_from_table() {
        let table = crosstab(&["x", "x", "y"], &["Pass", "Fail", "Pass"]).unwrap();
        let chart = StackedBarChart::from_table("Results", &table, &[SALMON, MINT]);
        assert_eq!(chart.totals(), vec![2.0, 1.0]);
        let svg = render_svg(&chart).unwrap();
        assert!(svg.contains("Pass"));
        assert!(svg.contains("Fail"));
    }
}
