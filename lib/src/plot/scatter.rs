use super::{padded_range, plot_err, Chart, CAPTION_FONT, CRIMSON, FOREST_GREEN, PURPLE, STEEL_BLUE};
use crate::error::{MlearnError, Result};
use crate::stats::{linear_fit, mean};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::iter;

/// Scatter plot with optional least-squares line and mean lines.
#[derive(Debug, Clone)]
pub struct ScatterChart {
    title: String,
    x_label: String,
    y_label: String,
    x: Vec<f64>,
    y: Vec<f64>,
    regression_line: bool,
    mean_lines: bool,
    annotation: Option<String>,
}

impl ScatterChart {
    /// # Errors
    /// Returns [`MlearnError::InvalidParameter`] if the columns differ in length.
    pub fn new(title: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(MlearnError::InvalidParameter(format!(
                "scatter columns differ in length: {} vs {}",
                x.len(),
                y.len()
            )));
        }
        Ok(Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            x,
            y,
            regression_line: false,
            mean_lines: false,
            annotation: None,
        })
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn with_regression_line(mut self) -> Self {
        self.regression_line = true;
        self
    }

    pub fn with_mean_lines(mut self) -> Self {
        self.mean_lines = true;
        self
    }

    /// Text box in the upper-left corner, e.g. the correlation.
    pub fn annotation(mut self, text: impl Into<String>) -> Self {
        self.annotation = Some(text.into());
        self
    }
}

impl Chart for ScatterChart {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        if self.x.is_empty() {
            return Err(MlearnError::EmptyData(format!("scatter '{}' has no points", self.title)));
        }
        let x_range = padded_range(self.x.iter().copied(), 0.05);
        let y_range = padded_range(self.y.iter().copied(), 0.08);
        let (x_lo, x_hi) = (x_range.start, x_range.end);
        let (y_lo, y_hi) = (y_range.start, y_range.end);

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, CAPTION_FONT)
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(80)
            .build_cartesian_2d(x_range, y_range)
            .map_err(plot_err)?;
        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .map_err(plot_err)?;

        chart
            .draw_series(
                self.x
                    .iter()
                    .zip(&self.y)
                    .map(|(&x, &y)| Circle::new((x, y), 4, STEEL_BLUE.mix(0.6).filled())),
            )
            .map_err(plot_err)?;

        let mut has_legend = false;
        if self.regression_line {
            if let Some((slope, intercept)) = linear_fit(&self.x, &self.y) {
                chart
                    .draw_series(LineSeries::new(
                        [x_lo, x_hi].map(|x| (x, slope * x + intercept)),
                        CRIMSON.stroke_width(3),
                    ))
                    .map_err(plot_err)?
                    .label(format!("y = {slope:.2}x + {intercept:.2}"))
                    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CRIMSON.stroke_width(3)));
                has_legend = true;
            }
        }
        if self.mean_lines {
            if let (Some(mx), Some(my)) = (mean(&self.x), mean(&self.y)) {
                chart
                    .draw_series(iter::once(PathElement::new(
                        vec![(mx, y_lo), (mx, y_hi)],
                        FOREST_GREEN.stroke_width(2),
                    )))
                    .map_err(plot_err)?
                    .label(format!("Mean {}: {mx:.1}", self.x_label))
                    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], FOREST_GREEN.stroke_width(2)));
                chart
                    .draw_series(iter::once(PathElement::new(
                        vec![(x_lo, my), (x_hi, my)],
                        PURPLE.stroke_width(2),
                    )))
                    .map_err(plot_err)?
                    .label(format!("Mean {}: {my:.0}", self.y_label))
                    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PURPLE.stroke_width(2)));
                has_legend = true;
            }
        }
        if let Some(text) = &self.annotation {
            let style = ("sans-serif", 16)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Left, VPos::Top));
            let at = (x_lo + (x_hi - x_lo) * 0.02, y_hi - (y_hi - y_lo) * 0.02);
            chart
                .draw_series(iter::once(Text::new(text.clone(), at, style)))
                .map_err(plot_err)?;
        }
        if has_legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::LowerRight)
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
    fn test_renders_fit_means_and_annotation() {
        let chart = ScatterChart::new("Hours vs score", vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 3.0, 5.0, 7.0])
            .unwrap()
            .x_label("Hours")
            .y_label("Score")
            .with_regression_line()
            .with_mean_lines()
            .annotation("Correlation: 1.00");
        let svg = render_svg(&chart).unwrap();
        assert!(svg.contains("y = 2.00x + 1.00"));
        assert!(svg.contains("Mean Hours: 1.5"));
        assert!(svg.contains("Correlation: 1.00"));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(ScatterChart::new("bad", vec![1.0], vec![]).is_err());
    }
}
