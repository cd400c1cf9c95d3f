//! Dashboard defaults, optionally overridden from a JSON settings file.

use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::data::series::{ChartKind, DEFAULT_HISTOGRAM_BINS, MAX_HISTOGRAM_BINS};

/// Environment variable naming a settings file for the desktop dashboard.
pub const SETTINGS_ENV: &str = "RUSTY_DASH_SETTINGS";

/// Initial slider position, slider range, chart defaults and display sizes.
///
/// Every field is optional in the JSON file; missing ones keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub default_threshold: f64,
    pub threshold_min: f64,
    pub threshold_max: f64,
    pub chart_kind: ChartKind,
    /// `#rrggbb` hex colour for single-colour charts.
    pub chart_color: String,
    /// Rows shown in the raw data preview.
    pub preview_rows: usize,
    pub histogram_bins: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_threshold: 50.0,
            threshold_min: 0.0,
            threshold_max: 100.0,
            chart_kind: ChartKind::Line,
            chart_color: "#FF5733".to_string(),
            preview_rows: 10,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl Settings {
    /// Read and validate a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.threshold_min <= self.threshold_max,
            "threshold_min ({}) is greater than threshold_max ({})",
            self.threshold_min,
            self.threshold_max
        );
        ensure!(
            self.default_threshold.is_finite(),
            "default_threshold must be a finite number"
        );
        ensure!(
            (1..=MAX_HISTOGRAM_BINS).contains(&self.histogram_bins),
            "histogram_bins must be between 1 and {MAX_HISTOGRAM_BINS}, got {}",
            self.histogram_bins
        );
        self.color()?;
        Ok(())
    }

    /// The chart colour as 8-bit RGB.
    pub fn color(&self) -> Result<Srgb<u8>> {
        match self.chart_color.parse::<Srgb<u8>>() {
            Ok(c) => Ok(c),
            Err(_) => bail!("chart_color '{}' is not a #rrggbb colour", self.chart_color),
        }
    }

    /// Starting threshold, pulled into the slider range.
    pub fn initial_threshold(&self) -> f64 {
        self.default_threshold
            .clamp(self.threshold_min, self.threshold_max)
    }
}
