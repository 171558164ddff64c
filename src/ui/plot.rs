use eframe::egui::{Color32, Ui};
use egui_extras::{Size, StripBuilder};
use egui_plot::{Corner, HPlacement, Legend, Line, Plot, PlotPoints};

use crate::color::Quantity;
use crate::config::Range;
use crate::state::AppState;

/// Left column is twice as wide as the right one.
const TIME_COLUMN_SHARE: f32 = 2.0 / 3.0;

// ---------------------------------------------------------------------------
// Panel description
// ---------------------------------------------------------------------------

/// One subplot of the figure.
struct Panel<'a> {
    id: &'static str,
    legend: &'static str,
    y_label: &'static str,
    /// Only the bottom row carries an x label.
    x_label: Option<&'static str>,
    x: &'a [f64],
    y: &'a [f64],
    x_range: Range,
    y_range: Range,
    color: Color32,
}

// ---------------------------------------------------------------------------
// Figure (central panel)
// ---------------------------------------------------------------------------

/// Render the 3 × 2 figure: time histories on the left, spectra on the right.
pub fn figure(ui: &mut Ui, state: &AppState) {
    let analysis = &state.analysis;
    let axes = &state.config.axes;
    let time = &analysis.record.time;
    let periods = &analysis.spectrum.periods;

    let time_histories = [
        Panel {
            id: "acceleration",
            legend: "N-S Motion",
            y_label: "Acceleration (g)",
            x_label: None,
            x: time,
            y: &analysis.acceleration_g,
            x_range: axes.time,
            y_range: axes.acceleration,
            color: state.palette.color_for(Quantity::Acceleration),
        },
        Panel {
            id: "velocity",
            legend: "N-S Motion",
            y_label: "Velocity (m/s)",
            x_label: None,
            x: time,
            y: &analysis.motion.velocity,
            x_range: axes.time,
            y_range: axes.velocity,
            color: state.palette.color_for(Quantity::Velocity),
        },
        Panel {
            id: "displacement",
            legend: "N-S Motion",
            y_label: "Displacement (m)",
            x_label: Some("Time (s)"),
            x: time,
            y: &analysis.motion.displacement,
            x_range: axes.time,
            y_range: axes.displacement,
            color: state.palette.color_for(Quantity::Displacement),
        },
    ];

    let spectra = [
        Panel {
            id: "sa",
            legend: "Pseudo Acc. Spectrum",
            y_label: "Sa (g)",
            x_label: None,
            x: periods,
            y: &analysis.spectrum.sa,
            x_range: axes.period,
            y_range: axes.sa,
            color: state.palette.color_for(Quantity::Acceleration),
        },
        Panel {
            id: "sv",
            legend: "Pseudo Vel. Spectrum",
            y_label: "Sv (m/s)",
            x_label: None,
            x: periods,
            y: &analysis.spectrum.sv,
            x_range: axes.period,
            y_range: axes.sv,
            color: state.palette.color_for(Quantity::Velocity),
        },
        Panel {
            id: "sd",
            legend: "Pseudo Disp. Spectrum",
            y_label: "Sd (m)",
            x_label: Some("Period (s)"),
            x: periods,
            y: &analysis.spectrum.sd,
            x_range: axes.period,
            y_range: axes.sd,
            color: state.palette.color_for(Quantity::Displacement),
        },
    ];

    StripBuilder::new(ui)
        .size(Size::relative(TIME_COLUMN_SHARE))
        .size(Size::remainder())
        .horizontal(|mut columns| {
            columns.strip(|builder| column(builder, &time_histories, false));
            columns.strip(|builder| column(builder, &spectra, true));
        });
}

fn column(builder: StripBuilder<'_>, panels: &[Panel<'_>], spectrum: bool) {
    builder
        .sizes(Size::remainder(), panels.len())
        .vertical(|mut rows| {
            for panel in panels {
                rows.cell(|ui| panel_plot(ui, panel, spectrum));
            }
        });
}

fn panel_plot(ui: &mut Ui, panel: &Panel<'_>, spectrum: bool) {
    let mut plot = Plot::new(panel.id)
        .legend(Legend::default().position(Corner::RightTop))
        .y_axis_label(panel.y_label)
        .default_x_bounds(panel.x_range.min, panel.x_range.max)
        .default_y_bounds(panel.y_range.min, panel.y_range.max)
        .show_grid(spectrum)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if spectrum {
        plot = plot.y_axis_position(HPlacement::Right);
    }
    if let Some(label) = panel.x_label {
        plot = plot.x_axis_label(label);
    }

    let points: PlotPoints = panel
        .x
        .iter()
        .zip(panel.y)
        .map(|(&xi, &yi)| [xi, yi])
        .collect();

    plot.show(ui, |plot_ui| {
        plot_ui.line(
            Line::new(panel.legend, points)
                .color(panel.color)
                .width(1.5),
        );
    });
}
