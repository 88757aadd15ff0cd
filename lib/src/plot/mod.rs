//! Chart rendering on top of `plotters`.
//!
//! Each chart is a plain description struct implementing [`Chart`].
//! [`save_chart`] picks the backend from the file extension: `.png` renders
//! a bitmap, anything else an SVG document. Text in both formats is laid
//! out with the bundled DejaVu Sans face, registered as `sans-serif` before
//! the first chart is drawn.

mod bar;
mod boxplot;
mod histogram;
mod line;
mod scatter;

pub use bar::{BarChart, StackedBarChart};
pub use boxplot::BoxPlot;
pub use histogram::HistogramChart;
pub use line::LineChart;
pub use scatter::ScatterChart;

use crate::error::{MlearnError, Result};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::fmt::Display;
use std::fs;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

/// Canvas size used when a chart does not ask for another one.
pub const DEFAULT_SIZE: (u32, u32) = (1000, 600);

pub const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
pub const CRIMSON: RGBColor = RGBColor(220, 20, 60);
pub const FOREST_GREEN: RGBColor = RGBColor(34, 139, 34);
pub const PURPLE: RGBColor = RGBColor(128, 0, 128);
pub const SALMON: RGBColor = RGBColor(255, 107, 107);
pub const MINT: RGBColor = RGBColor(81, 207, 102);

const CAPTION_FONT: (&str, u32) = ("sans-serif", 22);

static SANS_SERIF: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Registers the bundled face once per process.
fn ensure_font() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED
        .get_or_init(|| register_font("sans-serif", FontStyle::Normal, SANS_SERIF).is_ok());
    if ok {
        Ok(())
    } else {
        Err(MlearnError::Plot("bundled sans-serif font could not be parsed".into()))
    }
}

/// Something that can draw itself onto any `plotters` backend.
pub trait Chart {
    fn size(&self) -> (u32, u32) {
        DEFAULT_SIZE
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>;
}

/// Renders `chart` to `path`, creating the parent directory if needed.
pub fn save_chart<C: Chart, P: AsRef<Path>>(chart: &C, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_png {
        let root = BitMapBackend::new(path, chart.size()).into_drawing_area();
        render(chart, &root)?;
    } else {
        let root = SVGBackend::new(path, chart.size()).into_drawing_area();
        render(chart, &root)?;
    }
    info!("saved chart to {}", path.display());
    Ok(())
}

/// Renders `chart` into an in-memory SVG document.
pub fn render_svg<C: Chart>(chart: &C) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, chart.size()).into_drawing_area();
        render(chart, &root)?;
    }
    Ok(buf)
}

fn render<C: Chart, DB: DrawingBackend>(chart: &C, root: &DrawingArea<DB, Shift>) -> Result<()> {
    ensure_font()?;
    root.fill(&WHITE).map_err(plot_err)?;
    chart.draw(root)?;
    root.present().map_err(plot_err)
}

pub(crate) fn plot_err<E: Display>(err: E) -> MlearnError {
    MlearnError::Plot(err.to_string())
}

/// Smallest range covering `values`, widened by `pad` times its span on
/// each side. Degenerate input yields a unit-width range.
pub(crate) fn padded_range<I: IntoIterator<Item = f64>>(values: I, pad: f64) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        return lo - 1.0..hi + 1.0;
    }
    let margin = (hi - lo) * pad;
    lo - margin..hi + margin
}

/// Axis label for categorical positions `0, 1, 2, …`; blank between them.
pub(crate) fn category_label(labels: &[String], v: f64) -> String {
    let idx = v.round();
    if (v - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Axis range placing `n` categories at integer positions.
pub(crate) fn category_range(n: usize) -> Range<f64> {
    -0.5..n as f64 - 0.5
}
