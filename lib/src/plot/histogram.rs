use super::{padded_range, plot_err, Chart, CAPTION_FONT, CRIMSON, FOREST_GREEN, STEEL_BLUE};
use crate::distributions::Normal;
use crate::error::{MlearnError, Result};
use crate::stats::{histogram, mean, std_dev};
use plotters::coord::Shift;
use plotters::prelude::*;

/// Equal-width histogram with optional mean line and fitted normal density.
#[derive(Debug, Clone)]
pub struct HistogramChart {
    title: String,
    x_label: String,
    y_label: String,
    values: Vec<f64>,
    bins: usize,
    show_mean: bool,
    show_density: bool,
}

impl HistogramChart {
    pub fn new(title: impl Into<String>, values: Vec<f64>, bins: usize) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: "Frequency".to_string(),
            values,
            bins,
            show_mean: false,
            show_density: false,
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

    pub fn with_mean_line(mut self) -> Self {
        self.show_mean = true;
        self
    }

    /// Overlays N(mean, sd²) of the values, scaled to bin counts.
    pub fn with_density_curve(mut self) -> Self {
        self.show_density = true;
        self
    }

    /// Density curve in count units, `None` for a constant sample.
    fn density_curve(&self, bin_width: f64) -> Option<Vec<(f64, f64)>> {
        let normal = Normal::new(mean(&self.values)?, std_dev(&self.values)?).ok()?;
        let scale = self.values.len() as f64 * bin_width;
        Some(
            normal
                .curve(3.0, 200)
                .into_iter()
                .map(|(x, d)| (x, d * scale))
                .collect(),
        )
    }
}

impl Chart for HistogramChart {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let (edges, counts) = histogram(&self.values, self.bins).ok_or_else(|| {
            MlearnError::EmptyData(format!("histogram '{}' needs finite values and bins", self.title))
        })?;
        let bin_width = edges[1] - edges[0];
        let density = if self.show_density {
            self.density_curve(bin_width)
        } else {
            None
        };
        let density_points = density.iter().flatten();
        let x_range = padded_range(
            edges.iter().copied().chain(density_points.clone().map(|p| p.0)),
            0.05,
        );
        let peak = density_points.map(|p| p.1).fold(0.0, f64::max);
        let y_max = (counts.iter().copied().max().unwrap_or(0) as f64).max(peak) + 1.0;

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, CAPTION_FONT)
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, 0.0..y_max)
            .map_err(plot_err)?;
        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .map_err(plot_err)?;

        let bars = || edges.windows(2).zip(&counts);
        chart
            .draw_series(bars().map(|(e, &c)| {
                Rectangle::new([(e[0], 0.0), (e[1], c as f64)], STEEL_BLUE.mix(0.7).filled())
            }))
            .map_err(plot_err)?;
        chart
            .draw_series(bars().map(|(e, &c)| Rectangle::new([(e[0], 0.0), (e[1], c as f64)], BLACK.stroke_width(1))))
            .map_err(plot_err)?;

        let mut has_legend = false;
        if let Some(points) = density {
            chart
                .draw_series(LineSeries::new(points, FOREST_GREEN.stroke_width(2)))
                .map_err(plot_err)?
                .label("Normal fit")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], FOREST_GREEN.stroke_width(2)));
            has_legend = true;
        }
        if self.show_mean {
            if let Some(m) = mean(&self.values) {
                chart
                    .draw_series(std::iter::once(PathElement::new(
                        vec![(m, 0.0), (m, y_max)],
                        CRIMSON.stroke_width(2),
                    )))
                    .map_err(plot_err)?
                    .label(format!("Mean: {m:.2}"))
                    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CRIMSON.stroke_width(2)));
                has_legend = true;
            }
        }
        if has_legend {
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(plot_err)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::render_svg;

    #[test]
    fn test_renders_with_mean_label() {
        let chart = HistogramChart::new("Scores", vec![30.0, 45.0, 50.0, 60.0, 99.0], 5)
            .x_label("Score")
            .with_mean_line();
        let svg = render_svg(&chart).unwrap();
        assert!(svg.contains("Mean: 56.80"));
    }

    #[test]
    fn test_density_curve_in_count_units() {
        let values = vec![30.0, 45.0, 50.0, 60.0, 99.0];
        let chart = HistogramChart::new("Scores", values, 5).with_density_curve();
        let curve = chart.density_curve(10.0).unwrap();
        assert_eq!(curve.len(), 200);
        // Area under the scaled curve over ±3σ is close to n · width.
        let area: f64 = curve.windows(2).map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0).sum();
        assert!((area - 50.0 * 0.9973).abs() < 0.1, "area = {area}");

        let svg = render_svg(&chart).unwrap();
        assert!(svg.contains("Normal fit"));
    }

    #[test]
    fn test_constant_sample_has_no_density() {
        let chart = HistogramChart::new("flat", vec![5.0, 5.0, 5.0], 3).with_density_curve();
        assert!(chart.density_curve(1.0).is_none());
        assert!(render_svg(&chart).is_ok());
    }

    #[test]
    fn test_empty_values_rejected() {
        let chart = HistogramChart::new("none", vec![], 5);
        assert!(matches!(render_svg(&chart), Err(MlearnError::EmptyData(_))));
    }
}
