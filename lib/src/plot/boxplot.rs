use super::{category_label, category_range, padded_range, plot_err, Chart, CAPTION_FONT, CRIMSON, STEEL_BLUE};
use crate::error::{MlearnError, Result};
use crate::random::{create_rng, uniform_samples};
use crate::stats::{mean, BoxStats};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const BOX_HALF_WIDTH: f64 = 0.3;
const JITTER_HALF_WIDTH: f64 = 0.15;

/// Box-and-whisker plot of several labelled groups.
///
/// Whiskers stop at the most extreme observation within 1.5 IQR of the box;
/// anything further is drawn as an outlier dot.
#[derive(Debug, Clone)]
pub struct BoxPlot {
    title: String,
    x_label: String,
    y_label: String,
    groups: Vec<(String, Vec<f64>)>,
    show_means: bool,
    jitter_seed: Option<u64>,
    color: RGBColor,
}

impl BoxPlot {
    pub fn new<I, S>(title: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            groups: groups.into_iter().map(|(n, v)| (n.into(), v)).collect(),
            show_means: false,
            jitter_seed: None,
            color: STEEL_BLUE,
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

    /// Draws a dashed-style red line and label at each group mean.
    pub fn with_means(mut self) -> Self {
        self.show_means = true;
        self
    }

    /// Overlays every observation with a seeded horizontal jitter.
    pub fn with_jitter(mut self, seed: u64) -> Self {
        self.jitter_seed = Some(seed);
        self
    }
}

impl Chart for BoxPlot {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let n = self.groups.len();
        if self.groups.iter().all(|(_, v)| v.is_empty()) {
            return Err(MlearnError::EmptyData(format!("box plot '{}' has no values", self.title)));
        }
        let labels: Vec<String> = self.groups.iter().map(|(name, _)| name.clone()).collect();
        let y_range = padded_range(self.groups.iter().flat_map(|(_, v)| v.iter().copied()), 0.1);

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, CAPTION_FONT)
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(category_range(n), y_range)
            .map_err(plot_err)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(2 * n + 1)
            .x_label_formatter(&|x| category_label(&labels, *x))
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .map_err(plot_err)?;

        let mut rng = self.jitter_seed.map(create_rng);
        for (i, (_, values)) in self.groups.iter().enumerate() {
            let Some(stats) = BoxStats::from_data(values) else {
                continue;
            };
            let x = i as f64;
            let (left, right) = (x - BOX_HALF_WIDTH, x + BOX_HALF_WIDTH);
            let cap = BOX_HALF_WIDTH / 2.0;

            chart
                .draw_series([
                    Rectangle::new([(left, stats.q1), (right, stats.q3)], self.color.mix(0.6).filled()),
                    Rectangle::new([(left, stats.q1), (right, stats.q3)], BLACK.stroke_width(1)),
                ])
                .map_err(plot_err)?;
            chart
                .draw_series(
                    [
                        vec![(left, stats.median), (right, stats.median)],
                        vec![(x, stats.q3), (x, stats.upper_whisker)],
                        vec![(x, stats.q1), (x, stats.lower_whisker)],
                        vec![(x - cap, stats.upper_whisker), (x + cap, stats.upper_whisker)],
                        vec![(x - cap, stats.lower_whisker), (x + cap, stats.lower_whisker)],
                    ]
                    .into_iter()
                    .map(|path| PathElement::new(path, BLACK.stroke_width(2))),
                )
                .map_err(plot_err)?;

            if let Some(rng) = rng.as_mut() {
                let offsets = uniform_samples(rng, -JITTER_HALF_WIDTH, JITTER_HALF_WIDTH, values.len())?;
                chart
                    .draw_series(
                        values
                            .iter()
                            .zip(offsets)
                            .map(|(&v, dx)| Circle::new((x + dx, v), 3, BLACK.mix(0.5).filled())),
                    )
                    .map_err(plot_err)?;
            } else {
                chart
                    .draw_series(
                        stats
                            .outliers
                            .iter()
                            .map(|&v| Circle::new((x, v), 4, BLACK.stroke_width(1))),
                    )
                    .map_err(plot_err)?;
            }

            if self.show_means {
                if let Some(m) = mean(values) {
                    let style = ("sans-serif", 14)
                        .into_font()
                        .color(&CRIMSON)
                        .pos(Pos::new(HPos::Center, VPos::Bottom));
                    chart
                        .draw_series(std::iter::once(PathElement::new(
                            vec![(x - 0.4, m), (x + 0.4, m)],
                            CRIMSON.stroke_width(2),
                        )))
                        .map_err(plot_err)?;
                    chart
                        .draw_series(std::iter::once(Text::new(format!("Mean: {m:.1}"), (x, m), style)))
                        .map_err(plot_err)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::render_svg;

    #[test]
    fn test_renders_groups_with_means() {
        let chart = BoxPlot::new(
            "Scores",
            vec![("A", vec![1.0, 2.0, 3.0, 4.0]), ("B", vec![5.0, 6.0, 7.0, 30.0])],
        )
        .with_means();
        let svg = render_svg(&chart).unwrap();
        assert!(svg.contains("Mean: 2.5"));
        assert!(svg.contains("Mean: 12.0"));
    }

    #[test]
    fn test_jitter_is_deterministic() {
        let chart = BoxPlot::new("Sales", vec![("x", vec![1.0, 2.0, 3.0, 2.5, 1.5])]).with_jitter(42);
        assert_eq!(render_svg(&chart).unwrap(), render_svg(&chart).unwrap());
    }

    #[test]
    fn test_skips_empty_groups() {
        let chart = BoxPlot::new("Mixed", vec![("empty", vec![]), ("full", vec![1.0, 2.0])]);
        assert!(render_svg(&chart).is_ok());
        let chart = BoxPlot::new("None", vec![("empty", Vec::<f64>::new())]);
        assert!(render_svg(&chart).is_err());
    }
}
