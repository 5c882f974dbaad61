use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoint, PlotPoints, Points,
    Polygon, Text,
};

use crate::color;
use crate::data::summary::{
    availability_column, availability_counts, box_summary, ordered_bars, title_case, ViewIssue,
};
use crate::state::AppState;

/// Placeholder shown instead of a chart.
fn notice(ui: &mut Ui, issue: &ViewIssue) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new(issue.to_string()).italics());
    });
}

// ---------------------------------------------------------------------------
// Distribution (box plot)
// ---------------------------------------------------------------------------

pub fn box_plot(ui: &mut Ui, state: &AppState) {
    let Some(var) = state.variable.as_deref() else {
        notice(ui, &ViewIssue::NoData);
        return;
    };
    ui.strong(format!("Distribution of {}", title_case(var)));

    let summary = match box_summary(state.catalog.dataset(), &state.visible_indices, var) {
        Ok(s) => s,
        Err(issue) => {
            notice(ui, &issue);
            return;
        }
    };

    let elem = BoxElem::new(
        0.0,
        BoxSpread::new(
            summary.lower_whisker,
            summary.q1,
            summary.median,
            summary.q3,
            summary.upper_whisker,
        ),
    )
    .name(format!("{var} (n = {})", summary.count))
    .box_width(0.5)
    .fill(color::BOX_FILL.gamma_multiply(0.4))
    .stroke(eframe::egui::Stroke::new(1.5, color::BOX_FILL));

    let outliers: Vec<[f64; 2]> = summary.outliers.iter().map(|&y| [0.0, y]).collect();

    Plot::new("box_plot")
        .y_axis_label(var)
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(vec![elem]).name(var));
            if !outliers.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::from(outliers))
                        .radius(3.0)
                        .color(color::BOX_FILL)
                        .name("outliers"),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Availability (pie)
// ---------------------------------------------------------------------------

/// Points of a circle sector from angle `start` to `end`, centred at the origin.
fn sector(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = ((end - start) / TAU * 96.0).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let a = start + (end - start) * i as f64 / steps as f64;
        points.push([a.cos(), a.sin()]);
    }
    points
}

pub fn availability_pie(ui: &mut Ui, state: &AppState) {
    let Some(var) = state.variable.as_deref() else {
        notice(ui, &ViewIssue::NoData);
        return;
    };
    let column = availability_column(var);
    let sensor = var.rsplit_once('_').map_or("", |(sensor, _)| sensor);
    ui.strong(format!("Availability of {}", title_case(sensor)));

    let counts = match availability_counts(state.catalog.dataset(), &state.visible_indices, &column)
    {
        Ok(c) => c,
        Err(issue) => {
            notice(ui, &issue);
            return;
        }
    };

    let total = counts.total() as f64;
    let slices = [(true, counts.available), (false, counts.unavailable)];

    Plot::new("availability_pie")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            // Start at twelve o'clock, go clockwise.
            let mut angle = TAU / 4.0;
            for (flag, count) in slices {
                if count == 0 {
                    continue;
                }
                let share = count as f64 / total;
                let end = angle - share * TAU;
                let c = color::availability(flag);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(sector(end, angle)))
                        .fill_color(c.gamma_multiply(0.8))
                        .stroke(eframe::egui::Stroke::new(1.0, Color32::WHITE))
                        .name(flag.to_string()),
                );
                let mid = (angle + end) / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                    RichText::new(format!("{:.1}%", share * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
                angle = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Ordered histogram by model (bars)
// ---------------------------------------------------------------------------

pub fn ordered_bar_chart(ui: &mut Ui, state: &AppState) {
    let Some(var) = state.variable.clone() else {
        notice(ui, &ViewIssue::NoData);
        return;
    };
    ui.strong("Ordered Histogram by Model");

    let bars = match ordered_bars(state.catalog.dataset(), &state.visible_indices, &var) {
        Ok(b) => b,
        Err(issue) => {
            notice(ui, &issue);
            return;
        }
    };

    let (min, max) = bars
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| {
            (lo.min(*v), hi.max(*v))
        });
    let span = max - min;

    let chart_bars: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, (model, value))| {
            let t = if span > 0.0 { (value - min) / span } else { 0.5 };
            Bar::new(i as f64, *value)
                .name(model)
                .width(0.8)
                .fill(color::value_gradient(t))
        })
        .collect();

    let labels: Vec<String> = bars.into_iter().map(|(model, _)| model).collect();

    Plot::new("ordered_bars")
        .x_axis_label("Model")
        .y_axis_label(var.as_str())
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(chart_bars).name(&var));
        });
}
