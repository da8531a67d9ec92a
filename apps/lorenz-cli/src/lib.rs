//! lorenz-cli - Gini coefficient and Lorenz curve tool
//!
//! Loads a table, computes the Gini coefficient with `lorenz-stats`, and
//! hands the Lorenz curve to a renderer when an output file is requested.

pub mod cli;
pub mod config;
pub mod error;
pub mod render;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use lorenz_io::{open_file, BoxedTable, CsvReader, IoError, TabularData};
use lorenz_stats::{GiniCalculator, GiniOptions, LorenzCurve};
use serde::Serialize;

pub use cli::Args;
pub use config::LorenzConfig;
pub use error::{CliError, CliResult};
pub use render::{CurveRenderer, CsvCurveWriter, JsonCurveWriter, SvgRenderer};

use config::InputConfig;

/// Summary of a run, printed to stdout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub input: String,
    pub rows: usize,
    pub outcome: String,
    pub rank: String,
    pub weight: Option<String>,
    pub ascending: bool,
    pub coefficient: f64,
}

impl Report {
    /// Human-readable output
    pub fn to_text(&self) -> String {
        format!(
            "Gini coefficient: {:.6}\n  input:   {} ({} rows)\n  outcome: {}\n  rank:    {} ({})\n  weight:  {}\n",
            self.coefficient,
            self.input,
            self.rows,
            self.outcome,
            self.rank,
            if self.ascending { "ascending" } else { "descending" },
            self.weight.as_deref().unwrap_or("uniform"),
        )
    }

    /// JSON output
    pub fn to_json(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run the tool with parsed arguments
pub fn run(args: &Args) -> CliResult<Report> {
    let config = args.resolve_config()?;

    let outcome = config
        .columns
        .outcome
        .clone()
        .filter(|o| !o.is_empty())
        .ok_or(CliError::MissingOutcome)?;
    let mut options = GiniOptions::new(outcome).with_ascending(config.ordering.ascending);
    options.rank = config.columns.rank.clone();
    options.weight = config.columns.weight.clone();

    let table = load_table(&args.input, &config.input)?;
    tracing::info!(
        "Loaded {:?}: {} rows, {} columns",
        args.input,
        table.num_rows(),
        table.column_names().len()
    );

    let calculator = GiniCalculator::new(options);
    let result = calculator.compute(table.as_ref())?;

    if let Some(path) = &args.plot {
        let thinned = result.curve.subsample(config.plot.max_points);
        tracing::info!(
            "Plotting {} of {} curve points to {:?}",
            thinned.len(),
            result.curve.len(),
            path
        );
        let renderer = SvgRenderer {
            width: config.plot.width,
            height: config.plot.height,
            title: config.plot.title.clone(),
        };
        write_curve(path, &renderer, &thinned)?;
    }

    if let Some(path) = &args.curve {
        let plot = SvgRenderer {
            width: config.plot.width,
            height: config.plot.height,
            title: config.plot.title.clone(),
        };
        let renderer = render::renderer_for_path(path, plot);
        tracing::info!(
            "Writing {} curve points as {} to {:?}",
            result.curve.len(),
            renderer.format_name(),
            path
        );
        write_curve(path, renderer.as_ref(), &result.curve)?;
    }

    let options = calculator.options();
    Ok(Report {
        input: args.input.display().to_string(),
        rows: table.num_rows(),
        outcome: options.outcome.clone(),
        rank: options.effective_rank().to_string(),
        weight: options.effective_weight().map(str::to_string),
        ascending: options.ascending,
        coefficient: result.coefficient,
    })
}

/// Load the input table, honouring delimiter and header settings
pub fn load_table(path: &Path, input: &InputConfig) -> CliResult<BoxedTable> {
    let path_str = path
        .to_str()
        .ok_or_else(|| IoError::InvalidFormat(format!("non UTF-8 path: {:?}", path)))?;

    if input.delimiter.is_none() && input.has_header {
        return Ok(open_file(path_str)?);
    }

    let is_tsv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
    let delimiter = match input.delimiter {
        Some(c) => c as u8,
        None if is_tsv => b'\t',
        None => b',',
    };
    let reader = CsvReader::open_with_options(path_str, delimiter, input.has_header)?;
    Ok(Box::new(reader.into_frame()))
}

/// Render a curve into a file
pub fn write_curve(
    path: &Path,
    renderer: &dyn CurveRenderer,
    curve: &LorenzCurve,
) -> CliResult<()> {
    let file = File::create(path).map_err(|source| CliError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    renderer.render(
        &curve.cumulative_weights(),
        &curve.cumulative_outcomes(),
        &mut out,
    )?;
    out.flush()?;
    Ok(())
}
