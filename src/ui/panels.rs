use eframe::egui::{self, Color32, Grid, RichText, Ui};

use crate::data::model::Peak;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – peaks and damping
// ---------------------------------------------------------------------------

/// Render the left summary panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Record");
    ui.separator();

    let record = &state.analysis.record;
    Grid::new("record_grid").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("Samples");
        ui.label(record.len().to_string());
        ui.end_row();
        ui.label("Δt");
        ui.label(format!("{} s", record.dt));
        ui.end_row();
        ui.label("Duration");
        ui.label(format!("{:.2} s", record.duration()));
        ui.end_row();
    });

    ui.add_space(8.0);
    ui.heading("Peaks");
    ui.separator();

    let summary = state.summary;
    Grid::new("peak_grid").num_columns(2).show(ui, |ui: &mut Ui| {
        peak_row(ui, "PGA", summary.pga, "g", "s");
        peak_row(ui, "PGV", summary.pgv, "m/s", "s");
        peak_row(ui, "PGD", summary.pgd, "m", "s");
        if let Some(sa) = summary.peak_sa {
            peak_row(ui, "Sa max", sa, "g", "s period");
        }
    });

    ui.add_space(8.0);
    ui.heading("Oscillators");
    ui.separator();

    ui.label(format!("{} periods", state.analysis.spectrum.len()));
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Damping ratio ζ");
        ui.add(
            egui::DragValue::new(&mut state.damping_input)
                .speed(0.005)
                .range(0.0..=2.0)
                .max_decimals(3),
        );
    });
    if ui
        .add_enabled(state.damping_changed(), egui::Button::new("Recompute spectrum"))
        .clicked()
    {
        state.apply_damping();
    }
}

fn peak_row(ui: &mut Ui, name: &str, peak: Peak, unit: &str, at_unit: &str) {
    ui.strong(name);
    ui.label(format!("{:.4} {unit}  @ {:.2} {at_unit}", peak.value, peak.at));
    ui.end_row();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}  ·  ζ = {}",
            state.config.record_path.display(),
            state.analysis.spectrum.damping_ratio
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open accelerogram")
        .add_filter("Supported files", &["acc", "ACC", "txt", "csv"])
        .add_filter("Fixed-width accelerogram", &["acc", "ACC", "txt"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load(&path) {
            log::error!("Failed to load record: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}
