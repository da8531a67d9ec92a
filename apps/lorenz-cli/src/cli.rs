//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::config::LorenzConfig;
use crate::error::CliResult;

/// Compute the Gini coefficient of a CSV dataset and optionally plot its Lorenz curve
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "lorenz", version, about)]
pub struct Args {
    /// Input table (.csv or .tsv)
    pub input: PathBuf,

    /// Outcome column (income, incurred loss, ...)
    #[arg(short, long)]
    pub outcome: Option<String>,

    /// Column used to rank records; defaults to the outcome column
    #[arg(short, long)]
    pub rank: Option<String>,

    /// Weight column (exposure, population, ...); defaults to uniform weight
    #[arg(short, long)]
    pub weight: Option<String>,

    /// Rank descending, placing the curve over the diagonal
    #[arg(long)]
    pub descending: bool,

    /// Write an SVG plot of the Lorenz curve
    #[arg(long, value_name = "FILE")]
    pub plot: Option<PathBuf>,

    /// Write every curve point (.csv, .json or .svg)
    #[arg(long, value_name = "FILE")]
    pub curve: Option<PathBuf>,

    /// Maximum number of points drawn in the plot
    #[arg(long, value_name = "N")]
    pub max_points: Option<usize>,

    /// Plot title
    #[arg(long)]
    pub title: Option<String>,

    /// Configuration file (defaults to <config dir>/lorenz/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Field delimiter for the input
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Input has no header row; columns are named col_0, col_1, ...
    #[arg(long)]
    pub no_header: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Overlay command-line values on a configuration
    pub fn apply_to(&self, config: &mut LorenzConfig) {
        if let Some(outcome) = &self.outcome {
            config.columns.outcome = Some(outcome.clone());
        }
        if let Some(rank) = &self.rank {
            config.columns.rank = Some(rank.clone());
        }
        if let Some(weight) = &self.weight {
            config.columns.weight = Some(weight.clone());
        }
        if self.descending {
            config.ordering.ascending = false;
        }
        if let Some(max_points) = self.max_points {
            config.plot.max_points = max_points;
        }
        if let Some(title) = &self.title {
            config.plot.title = Some(title.clone());
        }
        if let Some(delimiter) = self.delimiter {
            config.input.delimiter = Some(delimiter);
        }
        if self.no_header {
            config.input.has_header = false;
        }
    }

    /// Load the configuration file and apply command-line overrides
    pub fn resolve_config(&self) -> CliResult<LorenzConfig> {
        let mut config = match &self.config {
            Some(path) => LorenzConfig::load(path)?,
            None => LorenzConfig::load_default()?,
        };
        self.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "lorenz",
            "claims.csv",
            "--outcome",
            "actual_loss",
            "-r",
            "predicted_loss",
            "-w",
            "earned_car_years",
            "--descending",
            "--plot",
            "lorenz.svg",
            "--max-points",
            "500",
        ])
        .unwrap();

        assert_eq!(args.input, PathBuf::from("claims.csv"));
        assert_eq!(args.outcome.as_deref(), Some("actual_loss"));
        assert_eq!(args.rank.as_deref(), Some("predicted_loss"));
        assert_eq!(args.weight.as_deref(), Some("earned_car_years"));
        assert!(args.descending);
        assert_eq!(args.max_points, Some(500));
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = LorenzConfig::from_toml(
            r#"
[columns]
outcome = "income"
weight = "households"

[plot]
max_points = 200
"#,
        )
        .unwrap();

        let args = Args {
            rank: Some("score".to_string()),
            descending: true,
            delimiter: Some(';'),
            ..Args::default()
        };
        args.apply_to(&mut config);

        assert_eq!(config.columns.outcome.as_deref(), Some("income"));
        assert_eq!(config.columns.rank.as_deref(), Some("score"));
        assert_eq!(config.columns.weight.as_deref(), Some("households"));
        assert!(!config.ordering.ascending);
        assert_eq!(config.plot.max_points, 200);
        assert_eq!(config.input.delimiter, Some(';'));
    }

    #[test]
    fn test_missing_input_is_rejected() {
        assert!(Args::try_parse_from(["lorenz"]).is_err());
    }
}
