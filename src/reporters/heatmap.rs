use crate::domain::model::{AccidentRecord, AccidentTable};
use crate::domain::ports::Reporter;
use crate::utils::error::Result;
use std::path::Path;

pub const HEATMAP_FILE: &str = "accident_hotspots_map.html";
pub const DEFAULT_ZOOM: u8 = 6;
pub const DEFAULT_RADIUS: u32 = 10;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>Accident Hotspots</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js"></script>
<style>
html, body, #map { width: 100%; height: 100%; margin: 0; padding: 0; }
</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView(__CENTER__, __ZOOM__);
L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);
var points = __POINTS__;
L.heatLayer(points, { radius: __RADIUS__ }).addTo(map);
</script>
</body>
</html>
"#;

/// Leaflet heatmap of every accident location, centered on the mean coordinate.
#[derive(Debug, Clone)]
pub struct HotspotHeatmap {
    zoom: u8,
    radius: u32,
}

impl HotspotHeatmap {
    pub fn new(zoom: u8, radius: u32) -> Self {
        Self { zoom, radius }
    }

    /// 產生完整的 HTML 頁面；相同輸入一定得到相同輸出
    pub fn to_html(&self, table: &AccidentTable) -> Result<String> {
        let (lat, lng) = table.mean_location().unwrap_or((0.0, 0.0));
        let points: Vec<[f64; 2]> = table
            .iter()
            .filter_map(AccidentRecord::location)
            .map(|(lat, lng)| [lat, lng])
            .collect();

        Ok(PAGE_TEMPLATE
            .replace("__CENTER__", &serde_json::to_string(&[lat, lng])?)
            .replace("__ZOOM__", &self.zoom.to_string())
            .replace("__RADIUS__", &self.radius.to_string())
            .replace("__POINTS__", &serde_json::to_string(&points)?))
    }
}

impl Default for HotspotHeatmap {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM, DEFAULT_RADIUS)
    }
}

impl Reporter for HotspotHeatmap {
    fn name(&self) -> &'static str {
        "heatmap"
    }

    fn file_name(&self) -> &str {
        HEATMAP_FILE
    }

    fn render(&self, table: &AccidentTable, path: &Path) -> Result<()> {
        let html = self.to_html(table)?;
        std::fs::write(path, html)?;
        Ok(())
    }
}
