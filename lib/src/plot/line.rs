use super::{padded_range, plot_err, Chart, CAPTION_FONT, CRIMSON};
use crate::error::{MlearnError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::iter;

#[derive(Debug, Clone)]
struct Series {
    name: String,
    points: Vec<(f64, f64)>,
    color: RGBColor,
}

/// One or more line series with optional vertical reference lines and
/// highlighted points.
#[derive(Debug, Clone)]
pub struct LineChart {
    title: String,
    x_label: String,
    y_label: String,
    series: Vec<Series>,
    vlines: Vec<(f64, String)>,
    markers: Vec<((f64, f64), String)>,
    footnote: Option<String>,
}

impl LineChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            series: Vec::new(),
            vlines: Vec::new(),
            markers: Vec::new(),
            footnote: None,
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

    pub fn series(mut self, name: impl Into<String>, points: Vec<(f64, f64)>, color: RGBColor) -> Self {
        self.series.push(Series {
            name: name.into(),
            points,
            color,
        });
        self
    }

    /// Full-height vertical line at `x`, listed in the legend as `label`.
    pub fn vline(mut self, x: f64, label: impl Into<String>) -> Self {
        self.vlines.push((x, label.into()));
        self
    }

    /// Highlighted point, listed in the legend as `label`.
    pub fn marker(mut self, point: (f64, f64), label: impl Into<String>) -> Self {
        self.markers.push((point, label.into()));
        self
    }

    /// Line of text under the plotting area.
    pub fn footnote(mut self, text: impl Into<String>) -> Self {
        self.footnote = Some(text.into());
        self
    }
}

impl Chart for LineChart {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        if self.series.iter().all(|s| s.points.is_empty()) {
            return Err(MlearnError::EmptyData(format!("line chart '{}' has no points", self.title)));
        }
        let all_points = || self.series.iter().flat_map(|s| s.points.iter().copied());
        let x_range = padded_range(
            all_points().map(|p| p.0).chain(self.vlines.iter().map(|v| v.0)),
            0.02,
        );
        let y_range = padded_range(
            all_points().map(|p| p.1).chain(self.markers.iter().map(|m| m.0 .1)),
            0.08,
        );
        let (y_lo, y_hi) = (y_range.start, y_range.end);

        let (width, height) = root.dim_in_pixel();
        let plot_area = if self.footnote.is_some() {
            root.margin(0, 30, 0, 0)
        } else {
            root.clone()
        };
        let mut chart = ChartBuilder::on(&plot_area)
            .caption(&self.title, CAPTION_FONT)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)
            .map_err(plot_err)?;
        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .map_err(plot_err)?;

        for s in &self.series {
            let color = s.color;
            chart
                .draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))
                .map_err(plot_err)?
                .label(s.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }
        for (x, label) in &self.vlines {
            chart
                .draw_series(iter::once(PathElement::new(
                    vec![(*x, y_lo), (*x, y_hi)],
                    CRIMSON.stroke_width(1),
                )))
                .map_err(plot_err)?
                .label(label.as_str())
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CRIMSON.stroke_width(1)));
        }
        for (point, label) in &self.markers {
            chart
                .draw_series(iter::once(Circle::new(*point, 6, CRIMSON.filled())))
                .map_err(plot_err)?
                .label(label.as_str())
                .legend(|(x, y)| Circle::new((x + 10, y), 5, CRIMSON.filled()));
        }
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(plot_err)?;

        if let Some(note) = &self.footnote {
            let style = ("sans-serif", 14).into_font().color(&BLACK);
            root.draw(&Text::new(
                note.as_str(),
                (width as i32 / 2 - 4 * note.len() as i32, height as i32 - 24),
                style,
            ))
            .map_err(plot_err)?;
        }
        Ok(())
    }
}
