//! Product-defined interpolation constants.
//!
//! The breakpoints below are product decisions, not derived values; they
//! must match what shipping clients render.

/// Marker radius (px) by population of the centre.
pub const POPULATION_RADIUS_STOPS: &[(f64, f64)] =
    &[(500.0, 4.0), (10_000.0, 8.0), (50_000.0, 12.0), (100_000.0, 16.0)];

/// Heatmap point weight by feature severity (0-5).
pub const HEATMAP_WEIGHT_STOPS: &[(f64, f64)] = &[(0.0, 0.0), (5.0, 1.0)];

/// Heatmap intensity by zoom level.
pub const HEATMAP_INTENSITY_STOPS: &[(f64, f64)] = &[(0.0, 1.0), (9.0, 3.0)];

/// Heatmap radius (px) by zoom level.
pub const HEATMAP_RADIUS_STOPS: &[(f64, f64)] = &[(0.0, 2.0), (9.0, 20.0)];

/// Bearing increment per rotation frame, degrees.
pub const ROTATION_STEP_DEGREES: f64 = 0.5;

/// Piecewise-linear interpolation over ascending `(input, output)` stops,
/// clamped to the first/last output outside the covered range.
pub fn piecewise_linear(stops: &[(f64, f64)], x: f64) -> f64 {
    match stops {
        [] => 0.0,
        [only] => only.1,
        [first, ..] if x <= first.0 => first.1,
        [.., last] if x >= last.0 => last.1,
        _ => {
            for pair in stops.windows(2) {
                let (x0, y0) = pair[0];
                let (x1, y1) = pair[1];
                if x >= x0 && x <= x1 {
                    let t = (x - x0) / (x1 - x0);
                    return y0 + t * (y1 - y0);
                }
            }
            stops[stops.len() - 1].1
        }
    }
}

/// Marker radius for a population count.
pub fn population_radius(population: f64) -> f64 {
    piecewise_linear(POPULATION_RADIUS_STOPS, population)
}

/// Heatmap intensity at a zoom level.
pub fn heatmap_intensity(zoom: f64) -> f64 {
    piecewise_linear(HEATMAP_INTENSITY_STOPS, zoom)
}

/// Heatmap radius at a zoom level.
pub fn heatmap_radius(zoom: f64) -> f64 {
    piecewise_linear(HEATMAP_RADIUS_STOPS, zoom)
}

/// Heatmap weight for a feature severity.
pub fn heatmap_weight(severity: f64) -> f64 {
    piecewise_linear(HEATMAP_WEIGHT_STOPS, severity)
}

/// A stops list rendered as a map-engine `interpolate` expression, e.g.
/// `["interpolate", ["linear"], ["get", "population"], 500, 4, ...]`.
pub fn interpolate_expression(stops: &[(f64, f64)], input: serde_json::Value) -> serde_json::Value {
    let mut expr = vec![
        serde_json::json!("interpolate"),
        serde_json::json!(["linear"]),
        input,
    ];
    for (x, y) in stops {
        expr.push(serde_json::json!(x));
        expr.push(serde_json::json!(y));
    }
    serde_json::Value::Array(expr)
}
