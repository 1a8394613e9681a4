use serde::Serialize;
use serde_json::{json, Value};

use crate::interpolate::{
    interpolate_expression, HEATMAP_INTENSITY_STOPS, HEATMAP_RADIUS_STOPS, HEATMAP_WEIGHT_STOPS,
    POPULATION_RADIUS_STOPS,
};
use crate::view::LayerId;

/// One layer definition as served to clients: where the data comes from
/// and how it is painted. Paint parameters are map-engine expression JSON
/// so all front ends share a single source of truth.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LayerDescriptor {
    pub id: LayerId,
    /// Rendering kind: fill / line / heatmap / circle / raster.
    #[schema(value_type = String)]
    pub kind: &'static str,
    /// GeoJSON path or raster tile URL template.
    pub source: String,
    #[schema(value_type = Object)]
    pub paint: Value,
}

/// The full product layer catalog.
///
/// The rainfall raster needs the weather provider key for its tile URL;
/// without a key the layer is omitted rather than served broken.
pub fn layer_catalog(weather_api_key: Option<&str>) -> Vec<LayerDescriptor> {
    let mut layers = vec![
        LayerDescriptor {
            id: LayerId::Rivers,
            kind: "line",
            source: "/data/namibia/major_rivers.geojson".to_string(),
            paint: json!({
                "line-color": "#0066cc",
                "line-width": 3,
            }),
        },
        LayerDescriptor {
            id: LayerId::HighGround,
            kind: "fill",
            source: "/data/high_ground_elevation.geojson".to_string(),
            paint: json!({
                "fill-color": "#16a34a",
                "fill-opacity": 0.35,
            }),
        },
        LayerDescriptor {
            id: LayerId::Heatmap,
            kind: "heatmap",
            source: "/data/flood_zones.geojson".to_string(),
            paint: json!({
                "heatmap-weight":
                    interpolate_expression(HEATMAP_WEIGHT_STOPS, json!(["get", "severity"])),
                "heatmap-intensity":
                    interpolate_expression(HEATMAP_INTENSITY_STOPS, json!(["zoom"])),
                "heatmap-radius":
                    interpolate_expression(HEATMAP_RADIUS_STOPS, json!(["zoom"])),
                "heatmap-opacity": 0.7,
            }),
        },
        LayerDescriptor {
            id: LayerId::SafeZones,
            kind: "circle",
            source: "/api/safe-zones".to_string(),
            paint: json!({
                "circle-color": "#16a34a",
                "circle-radius": 6,
                "circle-stroke-color": "#ffffff",
                "circle-stroke-width": 2,
            }),
        },
        LayerDescriptor {
            id: LayerId::PopulationCenters,
            kind: "circle",
            source: "/api/population-centers".to_string(),
            paint: json!({
                "circle-color": "#ff6b35",
                "circle-radius":
                    interpolate_expression(POPULATION_RADIUS_STOPS, json!(["get", "population"])),
                "circle-stroke-color": "#ffffff",
                "circle-stroke-width": 2,
                "circle-opacity": 0.8,
            }),
        },
        LayerDescriptor {
            id: LayerId::MonitoringStations,
            kind: "circle",
            source: "/data/namibia/monitoring_stations.geojson".to_string(),
            paint: json!({
                "circle-color": "#ff4444",
                "circle-radius": 6,
                "circle-stroke-color": "#ffffff",
                "circle-stroke-width": 2,
            }),
        },
    ];

    if let Some(key) = weather_api_key {
        layers.push(LayerDescriptor {
            id: LayerId::Rainfall,
            kind: "raster",
            source: format!(
                "https://tile.openweathermap.org/map/precipitation_new/{{z}}/{{x}}/{{y}}.png?appid={key}"
            ),
            paint: json!({
                "raster-opacity": 0.6,
            }),
        });
    }

    layers
}
