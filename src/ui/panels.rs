use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use rusty_dash::data::export::DOWNLOAD_FILE_NAME;
use rusty_dash::data::series::ChartKind;
use rusty_dash::data::stats::SummaryStatistics;

use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – column, threshold and chart settings
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Settings");
    ui.separator();

    if ui.button("Upload CSV…").clicked() {
        open_file_dialog(state);
    }
    if let Some(name) = &state.file_name {
        ui.label(RichText::new(name).weak());
    }
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state below.
    let columns: Vec<String> = table.column_names().map(str::to_string).collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Column selector ----
            ui.strong("Filter column");
            let current = state.column.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("filter_column")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &columns {
                        if ui.selectable_label(current == *col, col).clicked() {
                            state.set_column(col.clone());
                        }
                    }
                });
            ui.add_space(8.0);

            // ---- Threshold ----
            ui.strong("Filter values greater than");
            let mut threshold = state.threshold;
            let range = state.settings.threshold_min..=state.settings.threshold_max;
            let slider = ui.add_enabled(
                state.column_is_numeric(),
                egui::Slider::new(&mut threshold, range),
            );
            if slider.changed() {
                state.set_threshold(threshold);
            }
            ui.add_space(8.0);

            // ---- Chart kind ----
            ui.strong("Chart type");
            let mut kind = state.chart_kind;
            for k in ChartKind::ALL {
                ui.radio_value(&mut kind, k, k.label());
            }
            state.set_chart_kind(kind);
            ui.add_space(8.0);

            ui.horizontal(|ui: &mut Ui| {
                ui.strong("Chart color");
                ui.color_edit_button_srgba(&mut state.chart_color);
            });
            ui.add_space(8.0);

            // ---- Displayed columns ----
            egui::CollapsingHeader::new(RichText::new("Columns to display").strong())
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for col in &columns {
                        let mut shown = state.is_column_visible(col);
                        if ui.checkbox(&mut shown, col.as_str()).changed() {
                            state.set_column_visible(col, shown);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_save = state.current().is_some();
            if ui
                .add_enabled(can_save, egui::Button::new("Download filtered data…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(eval)) = (&state.table, state.current()) {
            ui.label(format!(
                "{} rows loaded, {} pass the filter",
                table.len(),
                eval.rows.len()
            ));
        } else if let Some(table) = &state.table {
            ui.label(format!("{} rows loaded", table.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – previews, metrics, chart, statistics
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(data) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Upload a CSV file to get started  (File → Open CSV…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let shown = state.shown_columns();

            ui.heading("Raw Data Preview");
            let preview: Vec<usize> = (0..data.len().min(state.settings.preview_rows)).collect();
            table::data_table(ui, "preview", &shown, &preview);
            ui.add_space(12.0);

            egui::CollapsingHeader::new(RichText::new("Raw Data Statistics").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    table::describe_table(ui, "describe_raw", &state.raw_description);
                });
            ui.add_space(12.0);

            let column = state.column.as_deref().unwrap_or_default();
            let eval = match &state.evaluation {
                Some(Ok(eval)) => eval,
                Some(Err(e)) => {
                    ui.colored_label(Color32::YELLOW, format!("⚠ {e}"));
                    return;
                }
                None => {
                    ui.colored_label(Color32::YELLOW, "⚠ Please select a column to filter.");
                    return;
                }
            };

            ui.heading(format!(
                "Filtered Data (by `{column} > {}`)",
                eval.query.threshold
            ));
            table::data_table(ui, "filtered", &shown, &eval.rows);
            ui.add_space(12.0);

            ui.heading("Key Metrics");
            metrics(ui, &eval.summary);
            ui.add_space(12.0);

            ui.heading(format!("{} for `{column}`", state.chart_kind));
            plot::chart(ui, column, state.chart_kind, &eval.series, state.chart_color);
            ui.add_space(12.0);

            egui::CollapsingHeader::new(RichText::new("Summary Statistics").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    table::describe_table(ui, "describe_filtered", &eval.description);
                });
        });
}

fn metrics(ui: &mut Ui, summary: &SummaryStatistics) {
    let SummaryStatistics::Populated {
        min, max, count, ..
    } = summary
    else {
        ui.label("No rows pass the filter.");
        return;
    };
    let mean = summary.display_mean().unwrap_or_default();

    ui.horizontal(|ui: &mut Ui| {
        metric(ui, "Max Value", &max.to_string());
        metric(ui, "Min Value", &min.to_string());
        metric(ui, "Mean Value", &mean.to_string());
        metric(ui, "Rows", &count.to_string());
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).small().weak());
            ui.label(RichText::new(value).heading());
        });
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload your dataset (CSV)")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.upload_path(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let bytes = match state.download_bytes() {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return,
        Err(e) => {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
            return;
        }
    };

    let file = rfd::FileDialog::new()
        .set_title("Download filtered data")
        .set_file_name(DOWNLOAD_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match std::fs::write(&path, &bytes) {
            Ok(()) => {
                log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to write {}: {e}", path.display());
                state.status_message = Some(format!("Error: cannot write {}: {e}", path.display()));
            }
        }
    }
}
