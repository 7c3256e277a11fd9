use super::{Bounds, LatLon, LayerId, LineStyle, MapLayer};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use std::{collections::BTreeMap, fs, io, path::Path};

/// Raster base layer the scene is drawn over.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub max_zoom: u8,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 19,
            attribution: "&copy; OpenStreetMap contributors".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    Centered { center: LatLon, zoom: u8 },
    Fitted(Bounds),
}

#[derive(Debug, Clone)]
enum Layer {
    Line {
        path: Vec<LatLon>,
        style: LineStyle,
        popup: String,
    },
    Marker {
        at: LatLon,
        popup: String,
    },
}

/// In-memory map: keeps every drawable and the current viewport, and can
/// export the drawables as GeoJSON.
#[derive(Debug, Clone)]
pub struct SceneMap {
    tiles: TileLayer,
    viewport: Viewport,
    layers: BTreeMap<LayerId, Layer>,
    next_id: u64,
}

impl Default for SceneMap {
    /// Initial view sits between Rond-point Victoire and Gare Centrale.
    fn default() -> Self {
        Self::new(TileLayer::default(), LatLon::new(-4.320, 15.311), 13)
    }
}

impl SceneMap {
    pub fn new(tiles: TileLayer, center: LatLon, zoom: u8) -> Self {
        Self {
            tiles,
            viewport: Viewport::Centered { center, zoom },
            layers: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn tiles(&self) -> &TileLayer {
        &self.tiles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn line_count(&self) -> usize {
        self.layers
            .values()
            .filter(|l| matches!(l, Layer::Line { .. }))
            .count()
    }

    pub fn marker_count(&self) -> usize {
        self.layers
            .values()
            .filter(|l| matches!(l, Layer::Marker { .. }))
            .count()
    }

    pub fn line_style(&self, id: LayerId) -> Option<&LineStyle> {
        match self.layers.get(&id)? {
            Layer::Line { style, .. } => Some(style),
            Layer::Marker { .. } => None,
        }
    }

    pub fn popup(&self, id: LayerId) -> Option<&str> {
        match self.layers.get(&id)? {
            Layer::Line { popup, .. } | Layer::Marker { popup, .. } => Some(popup),
        }
    }

    fn allocate(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, layer);
        id
    }

    /// Drawables as a `FeatureCollection`, lines carrying simplestyle properties.
    pub fn to_geojson(&self) -> GeoJson {
        let features = self
            .layers
            .iter()
            .map(|(id, layer)| {
                let (geometry, popup) = match layer {
                    Layer::Line { path, popup, .. } => (
                        Value::LineString(path.iter().map(|p| vec![p.lon, p.lat]).collect()),
                        popup,
                    ),
                    Layer::Marker { at, popup } => (Value::Point(vec![at.lon, at.lat]), popup),
                };
                let mut feature = Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(geometry)),
                    id: None,
                    properties: None,
                    foreign_members: None,
                };
                feature.set_property("layer_id", id.0);
                feature.set_property("popup", popup.as_str());
                if let Layer::Line { style, .. } = layer {
                    feature.set_property("type", "route");
                    feature.set_property("stroke", style.color.as_str());
                    feature.set_property("stroke-width", style.weight);
                    feature.set_property("stroke-opacity", style.opacity);
                    if let Some(dash) = &style.dash_array {
                        feature.set_property("dash-array", dash.as_str());
                    }
                } else {
                    feature.set_property("type", "marker");
                }
                feature
            })
            .collect();

        GeoJson::FeatureCollection(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }

    pub fn export_geojson<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let data = serde_json::to_string_pretty(&self.to_geojson())?;
        fs::write(path, data)
    }
}

impl MapLayer for SceneMap {
    fn add_polyline(&mut self, path: &[LatLon], style: &LineStyle, popup: &str) -> LayerId {
        self.allocate(Layer::Line {
            path: path.to_vec(),
            style: style.clone(),
            popup: popup.to_string(),
        })
    }

    fn add_marker(&mut self, at: LatLon, popup: &str) -> LayerId {
        self.allocate(Layer::Marker {
            at,
            popup: popup.to_string(),
        })
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.layers.remove(&id);
    }

    fn has_layer(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }

    fn layer_bounds(&self, id: LayerId) -> Option<Bounds> {
        match self.layers.get(&id)? {
            Layer::Line { path, .. } => Bounds::from_points(path),
            Layer::Marker { at, .. } => Some(Bounds::around(*at)),
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        log::debug!("Fitting viewport to {:?}", bounds);
        self.viewport = Viewport::Fitted(bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut map = SceneMap::default();
        let a = map.add_marker(LatLon::new(-4.3, 15.3), "a");
        map.remove_layer(a);
        let b = map.add_marker(LatLon::new(-4.3, 15.3), "b");
        assert_ne!(a, b);
        assert!(!map.has_layer(a));
        assert_eq!(map.layer_count(), 1);
    }

    #[test]
    fn geojson_export_keeps_styles_and_lon_lat_order() {
        let mut map = SceneMap::default();
        let path = [LatLon::new(-4.34, 15.31), LatLon::new(-4.30, 15.32)];
        map.add_polyline(&path, &LineStyle::for_route(1, false), "line");
        map.add_marker(path[0], "Départ: A");

        let GeoJson::FeatureCollection(fc) = map.to_geojson() else {
            panic!("expected a feature collection");
        };
        assert_eq!(fc.features.len(), 2);

        let line = &fc.features[0];
        assert_eq!(line.property("stroke").unwrap(), "#d7191c");
        assert_eq!(line.property("dash-array").unwrap(), "6,8");
        match &line.geometry.as_ref().unwrap().value {
            Value::LineString(coords) => assert_eq!(coords[0], vec![15.31, -4.34]),
            other => panic!("unexpected geometry {:?}", other),
        }

        let marker = &fc.features[1];
        assert_eq!(marker.property("type").unwrap(), "marker");
        assert!(marker.property("stroke").is_none());
    }

    #[test]
    fn starts_centered() {
        let map = SceneMap::default();
        assert_eq!(
            map.viewport(),
            Viewport::Centered {
                center: LatLon::new(-4.320, 15.311),
                zoom: 13
            }
        );
        assert_eq!(map.tiles().max_zoom, 19);
    }
}
