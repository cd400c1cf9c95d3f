use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::Color32;

use rusty_dash::config::Settings;
use rusty_dash::data::export::to_download;
use rusty_dash::data::model::{Column, ColumnKind, Table};
use rusty_dash::data::pipeline::{evaluate, Evaluation, Query};
use rusty_dash::data::series::ChartKind;
use rusty_dash::data::stats::{describe, ColumnDescription};
use rusty_dash::data::{parse, FilteredView, ValidationError};

use crate::color::to_color32;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full per-session dashboard state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Uploaded table (None until the user loads a file).
    pub table: Option<Table>,

    /// Display name of the uploaded file.
    pub file_name: Option<String>,

    /// Statistics of every numeric column over the whole table.
    pub raw_description: Vec<ColumnDescription>,

    /// Columns shown in the data grids. Downloads always carry every column.
    pub visible_columns: BTreeSet<String>,

    /// Column the threshold applies to.
    pub column: Option<String>,

    pub threshold: f64,

    pub chart_kind: ChartKind,

    pub chart_color: Color32,

    /// Result of the last pipeline run (cached until an input changes).
    pub evaluation: Option<Result<Evaluation, ValidationError>>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let chart_color = settings
            .color()
            .map(to_color32)
            .unwrap_or(Color32::from_rgb(0xFF, 0x57, 0x33));
        Self {
            threshold: settings.initial_threshold(),
            chart_kind: settings.chart_kind,
            chart_color,
            settings,
            table: None,
            file_name: None,
            raw_description: Vec::new(),
            visible_columns: BTreeSet::new(),
            column: None,
            evaluation: None,
            status_message: None,
        }
    }

    /// Replace the current table with a freshly parsed upload.
    ///
    /// The previous table, selection results and messages are discarded.
    pub fn set_table(&mut self, table: Table, file_name: impl Into<String>) {
        // Default column: first numeric one, else the first column.
        self.column = table
            .numeric_column_names()
            .first()
            .map(|s| s.to_string())
            .or_else(|| table.column_names().next().map(str::to_string));
        self.visible_columns = table.column_names().map(str::to_string).collect();
        self.raw_description = describe(&FilteredView::all(&table));
        self.table = Some(table);
        self.file_name = Some(file_name.into());
        self.status_message = None;
        self.reevaluate();
    }

    /// Parse uploaded bytes; parse failures become the status message.
    pub fn upload_bytes(&mut self, bytes: &[u8], file_name: &str) {
        match parse(bytes) {
            Ok(table) => {
                log::info!(
                    "Loaded {file_name}: {} rows, columns {:?}",
                    table.len(),
                    table.column_names().collect::<Vec<_>>()
                );
                self.set_table(table, file_name);
            }
            Err(e) => {
                log::error!("Failed to load {file_name}: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Read and parse a file from disk.
    pub fn upload_path(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match std::fs::read(path) {
            Ok(bytes) => self.upload_bytes(&bytes, &name),
            Err(e) => {
                log::error!("Failed to read {}: {e}", path.display());
                self.status_message = Some(format!("Error: cannot read {name}: {e}"));
            }
        }
    }

    /// Recompute the cached evaluation after any input change.
    pub fn reevaluate(&mut self) {
        self.evaluation = match (&self.table, &self.column) {
            (Some(table), Some(column)) => {
                let query = Query::new(column.clone(), self.threshold)
                    .with_chart(self.chart_kind)
                    .with_bins(self.settings.histogram_bins);
                let result = evaluate(table, &query);
                if let Err(e) = &result {
                    log::warn!("{e}");
                }
                Some(result)
            }
            _ => None,
        };
    }

    pub fn set_column(&mut self, column: String) {
        if self.column.as_deref() != Some(column.as_str()) {
            self.column = Some(column);
            self.reevaluate();
        }
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
        self.reevaluate();
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        if self.chart_kind != kind {
            self.chart_kind = kind;
            self.reevaluate();
        }
    }

    pub fn is_column_visible(&self, name: &str) -> bool {
        self.visible_columns.contains(name)
    }

    pub fn set_column_visible(&mut self, name: &str, visible: bool) {
        if visible {
            self.visible_columns.insert(name.to_string());
        } else {
            self.visible_columns.remove(name);
        }
    }

    /// Visible columns in table order.
    pub fn shown_columns(&self) -> Vec<&Column> {
        match &self.table {
            Some(table) => table
                .columns()
                .iter()
                .filter(|c| self.is_column_visible(c.name()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Successful evaluation, if any.
    pub fn current(&self) -> Option<&Evaluation> {
        match &self.evaluation {
            Some(Ok(eval)) => Some(eval),
            _ => None,
        }
    }

    /// Whether the selected column can be thresholded.
    pub fn column_is_numeric(&self) -> bool {
        match (&self.table, &self.column) {
            (Some(t), Some(c)) => t.column(c).is_some_and(|c| c.kind() == ColumnKind::Numeric),
            _ => false,
        }
    }

    /// CSV bytes of the current filtered view.
    pub fn download_bytes(&self) -> Result<Option<Vec<u8>>> {
        let (Some(table), Some(eval)) = (&self.table, self.current()) else {
            return Ok(None);
        };
        let bytes = to_download(&eval.view(table)).context("serializing filtered rows")?;
        Ok(Some(bytes))
    }
}
