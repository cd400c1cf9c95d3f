use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use rusty_dash::data::model::{CellValue, Column};
use rusty_dash::data::stats::ColumnDescription;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Data grid
// ---------------------------------------------------------------------------

/// Render `rows` (source indices) of `columns` as a scrollable grid.
pub fn data_table(ui: &mut Ui, id: &str, columns: &[&Column], rows: &[usize]) {
    if rows.is_empty() {
        ui.label("No rows.");
        return;
    }
    if columns.is_empty() {
        ui.label("No columns selected for display.");
        return;
    }

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(260.0)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(TableColumn::auto())
            .columns(TableColumn::auto().at_least(60.0), columns.len())
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("#");
                });
                for column in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(column.name())
                            .on_hover_text(column.kind().to_string());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let source = rows[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(source.to_string());
                    });
                    for column in columns {
                        row.col(|ui: &mut Ui| match column.value(source) {
                            CellValue::Missing => {
                                ui.weak(column.raw(source));
                            }
                            _ => {
                                ui.label(column.raw(source));
                            }
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Statistics table (count / mean / std / quartiles per numeric column)
// ---------------------------------------------------------------------------

const STAT_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

pub fn describe_table(ui: &mut Ui, id: &str, description: &[ColumnDescription]) {
    if description.is_empty() {
        ui.label("No numeric columns.");
        return;
    }

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(TableColumn::auto())
            .columns(TableColumn::auto().at_least(70.0), description.len())
            .header(20.0, |mut header| {
                header.col(|_ui: &mut Ui| {});
                for d in description {
                    header.col(|ui: &mut Ui| {
                        ui.strong(&d.column);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, STAT_ROWS.len(), |mut row| {
                    let stat = row.index();
                    row.col(|ui: &mut Ui| {
                        ui.label(RichText::new(STAT_ROWS[stat]).strong());
                    });
                    for d in description {
                        row.col(|ui: &mut Ui| {
                            ui.label(stat_cell(d, stat));
                        });
                    }
                });
            });
    });
}

fn stat_cell(d: &ColumnDescription, stat: usize) -> String {
    let value = match stat {
        0 => return d.count.to_string(),
        1 => d.mean,
        2 => d.std,
        3 => d.min,
        4 => d.p25,
        5 => d.p50,
        6 => d.p75,
        _ => d.max,
    };
    value.map_or_else(|| "NaN".to_string(), |v| format!("{v:.6}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_cells_follow_row_order() {
        let d = ColumnDescription {
            column: "a".into(),
            count: 3,
            mean: Some(2.0),
            std: None,
            min: Some(1.0),
            p25: Some(1.5),
            p50: Some(2.0),
            p75: Some(2.5),
            max: Some(3.0),
        };
        assert_eq!(stat_cell(&d, 0), "3");
        assert_eq!(stat_cell(&d, 1), "2.000000");
        assert_eq!(stat_cell(&d, 2), "NaN");
        assert_eq!(stat_cell(&d, 7), "3.000000");
    }
}
