use std::collections::BTreeMap;

use eframe::egui::{self, Color32, RichText, Sense, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Grouped box plot
// ---------------------------------------------------------------------------

/// One notch-less box per category: quartiles with 1.5·IQR whiskers,
/// computed here from the grouped feature values.
pub fn grouped_box_plot(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    y_label: &str,
    groups: &BTreeMap<String, Vec<f64>>,
    colors: &ColorMap,
) {
    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(260.0)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .show(ui, |plot_ui| {
            for (slot, (category, values)) in groups.iter().enumerate() {
                let Some((low, q1, median, q3, high)) = five_number_summary(values) else {
                    continue;
                };
                let color = colors.color_for(category);
                let elem = BoxElem::new(slot as f64, BoxSpread::new(low, q1, median, q3, high))
                    .name(category)
                    .fill(color.gamma_multiply(0.5))
                    .stroke(Stroke::new(1.5, color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(category));
            }
        });
}

// ---------------------------------------------------------------------------
// Grouped bar chart
// ---------------------------------------------------------------------------

/// One bar per category: the sum of the grouped feature values.
pub fn grouped_bar_chart(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    y_label: &str,
    groups: &BTreeMap<String, Vec<f64>>,
    colors: &ColorMap,
) {
    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(260.0)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .show(ui, |plot_ui| {
            for (slot, (category, values)) in groups.iter().enumerate() {
                let total: f64 = values.iter().sum();
                let color = colors.color_for(category);
                let bar = Bar::new(slot as f64, total).name(category).fill(color);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(category).width(0.6));
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter + least-squares trendline
// ---------------------------------------------------------------------------

/// Scatter of (x, y) pairs with a red ordinary-least-squares trendline.
/// The fit is skipped when the x values are degenerate.
pub fn scatter_with_trendline(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    y_label: &str,
    points: &[[f64; 2]],
) {
    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(300.0)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .show(ui, |plot_ui| {
            let scatter: PlotPoints = points.iter().copied().collect();
            plot_ui.points(
                Points::new(scatter)
                    .radius(2.5)
                    .color(Color32::LIGHT_BLUE)
                    .name(y_label),
            );

            if let Some((slope, intercept)) = linear_fit(points) {
                let (x_min, x_max) = points.iter().fold(
                    (f64::INFINITY, f64::NEG_INFINITY),
                    |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])),
                );
                let line = Line::new(PlotPoints::from(vec![
                    [x_min, slope * x_min + intercept],
                    [x_max, slope * x_max + intercept],
                ]))
                .color(Color32::RED)
                .width(2.0)
                .name("OLS trendline");
                plot_ui.line(line);
            }
        });
}

/// Ordinary least squares over (x, y) pairs → (slope, intercept).
/// `None` with fewer than two points or zero x-variance.
pub fn linear_fit(points: &[[f64; 2]]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p[1]).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var = 0.0;
    for p in points {
        cov += (p[0] - mean_x) * (p[1] - mean_y);
        var += (p[0] - mean_x).powi(2);
    }
    if var == 0.0 {
        return None;
    }
    let slope = cov / var;
    Some((slope, mean_y - slope * mean_x))
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Pie of each category's share of the feature total, painted directly
/// (egui_plot has no pie mark). Categories with a non-positive total
/// cannot be drawn as slices and are skipped.
pub fn pie_chart(ui: &mut Ui, groups: &BTreeMap<String, Vec<f64>>, colors: &ColorMap) {
    let sums: Vec<(&String, f64)> = groups
        .iter()
        .map(|(category, values)| (category, values.iter().sum::<f64>()))
        .filter(|(_, total)| *total > 0.0)
        .collect();
    let grand_total: f64 = sums.iter().map(|(_, total)| total).sum();

    if grand_total <= 0.0 {
        ui.label("Nothing to chart for this selection.");
        return;
    }

    ui.horizontal(|ui| {
        let (response, painter) = ui.allocate_painter(Vec2::splat(220.0), Sense::hover());
        let center = response.rect.center();
        let radius = response.rect.height() / 2.0 - 6.0;

        let mut start_angle = -std::f32::consts::FRAC_PI_2;
        for (category, total) in &sums {
            let fraction = (total / grand_total) as f32;
            let sweep = fraction * std::f32::consts::TAU;

            // Triangle fan; enough segments to keep the arc smooth.
            let segments = ((fraction * 64.0).ceil() as usize).max(2);
            let mut vertices = vec![center];
            for s in 0..=segments {
                let angle = start_angle + sweep * s as f32 / segments as f32;
                vertices.push(center + Vec2::angled(angle) * radius);
            }
            painter.add(egui::Shape::convex_polygon(
                vertices,
                colors.color_for(category),
                Stroke::NONE,
            ));
            start_angle += sweep;
        }

        ui.vertical(|ui| {
            for (category, total) in &sums {
                let pct = total / grand_total * 100.0;
                ui.label(
                    RichText::new(format!("{category}: {pct:.1}%"))
                        .color(colors.color_for(category)),
                );
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Quartiles
// ---------------------------------------------------------------------------

/// (low whisker, q1, median, q3, high whisker) with linearly interpolated
/// quartiles; whiskers reach the furthest points within 1.5·IQR of the box.
fn five_number_summary(values: &[f64]) -> Option<(f64, f64, f64, f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    let low = sorted
        .iter()
        .copied()
        .find(|v| *v >= low_fence)
        .unwrap_or(sorted[0]);
    let high = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= high_fence)
        .unwrap_or(sorted[sorted.len() - 1]);

    Some((low, q1, median, q3, high))
}

/// Linearly interpolated quantile over a sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_fit_recovers_exact_lines() {
        let points = [[0.0, 1.0], [1.0, 3.0], [2.0, 5.0]];
        let (slope, intercept) = linear_fit(&points).unwrap();
        assert!((slope - 2.0).abs() < 1e-12);
        assert!((intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn linear_fit_rejects_degenerate_input() {
        assert_eq!(linear_fit(&[[1.0, 2.0]]), None);
        assert_eq!(linear_fit(&[[1.0, 2.0], [1.0, 5.0]]), None);
    }

    #[test]
    fn five_number_summary_of_a_simple_run() {
        let (low, q1, median, q3, high) =
            five_number_summary(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!((low, q1, median, q3, high), (1.0, 2.0, 3.0, 4.0, 5.0));
    }

    #[test]
    fn whiskers_exclude_outliers() {
        let (low, _, _, _, high) =
            five_number_summary(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(low, 1.0);
        assert!(high < 100.0);
    }

    #[test]
    fn quantile_interpolates() {
        let sorted = [0.0, 10.0];
        assert_eq!(quantile(&sorted, 0.5), 5.0);
        assert_eq!(quantile(&sorted, 0.0), 0.0);
        assert_eq!(quantile(&sorted, 1.0), 10.0);
    }
}
