//! Minimal GeoJSON checks over `serde_json` values.
//!
//! The hosted tables store geometries as raw JSON text written by external
//! upload flows, so every read has to re-validate before trusting the
//! coordinates.

use serde_json::Value;

/// Parse a stored GeoJSON `Point` and return `(longitude, latitude)`.
///
/// Returns `None` unless the document is a `Point` whose `coordinates` is
/// exactly a 2-element array of finite numbers.
pub fn point_coordinates(location_json: &str) -> Option<(f64, f64)> {
    let value: Value = serde_json::from_str(location_json).ok()?;
    if value.get("type").and_then(Value::as_str) != Some("Point") {
        return None;
    }
    let coords = value.get("coordinates")?.as_array()?;
    if coords.len() != 2 {
        return None;
    }
    let lon = coords[0].as_f64()?;
    let lat = coords[1].as_f64()?;
    if !lon.is_finite() || !lat.is_finite() {
        return None;
    }
    Some((lon, lat))
}

/// Whether a value looks like a GeoJSON `FeatureCollection`.
pub fn is_feature_collection(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some("FeatureCollection")
        && value.get("features").map(Value::is_array).unwrap_or(false)
}
