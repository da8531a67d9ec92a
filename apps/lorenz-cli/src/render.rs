//! Lorenz curve renderers
//!
//! Renderers receive the two cumulative sequences and write a
//! representation of the curve. They play no part in the computation.

use std::io::Write;
use std::path::Path;

use lorenz_stats::LorenzPoint;

use crate::error::{CliError, CliResult};

/// Something that can draw or dump a Lorenz curve
pub trait CurveRenderer {
    /// Write the curve given as parallel cumulative sequences
    fn render(
        &self,
        cumulative_weight: &[f64],
        cumulative_outcome: &[f64],
        out: &mut dyn Write,
    ) -> CliResult<()>;

    /// Format name for log messages
    fn format_name(&self) -> &'static str;
}

fn check_lengths(cumulative_weight: &[f64], cumulative_outcome: &[f64]) -> CliResult<()> {
    if cumulative_weight.len() != cumulative_outcome.len() {
        return Err(CliError::Render(format!(
            "curve sequences differ in length: {} weights, {} outcomes",
            cumulative_weight.len(),
            cumulative_outcome.len()
        )));
    }
    Ok(())
}

/// Pick a renderer from an output file extension
///
/// `.svg` plots the curve, `.json` dumps points, anything else is CSV.
pub fn renderer_for_path(path: &Path, plot: SvgRenderer) -> Box<dyn CurveRenderer> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "svg" => Box::new(plot),
        "json" => Box::new(JsonCurveWriter),
        _ => Box::new(CsvCurveWriter),
    }
}

/// SVG line plot of the Lorenz curve against the line of equality
#[derive(Debug, Clone, PartialEq)]
pub struct SvgRenderer {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: None,
        }
    }
}

impl SvgRenderer {
    const MARGIN: f64 = 40.0;

    fn project(&self, x: f64, y: f64) -> (f64, f64) {
        let plot_w = self.width as f64 - 2.0 * Self::MARGIN;
        let plot_h = self.height as f64 - 2.0 * Self::MARGIN;
        (
            Self::MARGIN + x * plot_w,
            self.height as f64 - Self::MARGIN - y * plot_h,
        )
    }

    /// Build the SVG document
    pub fn to_svg(&self, cumulative_weight: &[f64], cumulative_outcome: &[f64]) -> String {
        let (x0, y0) = self.project(0.0, 0.0);
        let (x1, y1) = self.project(1.0, 1.0);

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        svg.push('\n');
        svg.push_str(&format!(
            r##"  <rect x="{x0:.2}" y="{y1:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="#999999"/>"##,
            x1 - x0,
            y0 - y1
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"  <line class="equality" x1="{x0:.2}" y1="{y0:.2}" x2="{x1:.2}" y2="{y1:.2}" stroke="#888888" stroke-dasharray="4 4"/>"##
        ));
        svg.push('\n');

        let points: Vec<String> = std::iter::once((0.0, 0.0))
            .chain(cumulative_weight.iter().copied().zip(cumulative_outcome.iter().copied()))
            .map(|(x, y)| {
                let (px, py) = self.project(x, y);
                format!("{px:.2},{py:.2}")
            })
            .collect();
        svg.push_str(&format!(
            r##"  <polyline class="lorenz" points="{}" fill="none" stroke="#1f77b4" stroke-width="2"/>"##,
            points.join(" ")
        ));
        svg.push('\n');

        if let Some(title) = &self.title {
            svg.push_str(&format!(
                r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                self.width as f64 / 2.0,
                Self::MARGIN / 2.0,
                escape_xml(title)
            ));
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl CurveRenderer for SvgRenderer {
    fn render(
        &self,
        cumulative_weight: &[f64],
        cumulative_outcome: &[f64],
        out: &mut dyn Write,
    ) -> CliResult<()> {
        check_lengths(cumulative_weight, cumulative_outcome)?;
        out.write_all(self.to_svg(cumulative_weight, cumulative_outcome).as_bytes())?;
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "SVG"
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Two-column CSV dump of the curve
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCurveWriter;

impl CurveRenderer for CsvCurveWriter {
    fn render(
        &self,
        cumulative_weight: &[f64],
        cumulative_outcome: &[f64],
        out: &mut dyn Write,
    ) -> CliResult<()> {
        check_lengths(cumulative_weight, cumulative_outcome)?;
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(["cumulative_weight", "cumulative_outcome"])?;
        for (w, o) in cumulative_weight.iter().zip(cumulative_outcome) {
            writer.write_record([w.to_string(), o.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}

/// JSON array of curve points
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCurveWriter;

impl CurveRenderer for JsonCurveWriter {
    fn render(
        &self,
        cumulative_weight: &[f64],
        cumulative_outcome: &[f64],
        out: &mut dyn Write,
    ) -> CliResult<()> {
        check_lengths(cumulative_weight, cumulative_outcome)?;
        let points: Vec<LorenzPoint> = cumulative_weight
            .iter()
            .zip(cumulative_outcome)
            .map(|(&w, &o)| LorenzPoint::new(w, o))
            .collect();
        serde_json::to_writer_pretty(&mut *out, &points)?;
        out.write_all(b"\n")?;
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }
}
