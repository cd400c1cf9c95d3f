//! egui rendering of the dashboard. Widgets only read pipeline output and
//! forward user input to [`AppState`](crate::state::AppState).

pub mod panels;
pub mod plot;
pub mod table;
