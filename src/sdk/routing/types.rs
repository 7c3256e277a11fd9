use crate::sdk::map::LatLon;
use serde::{Deserialize, Serialize};

/// Backend clamp on the number of alternatives it will compute.
pub const MAX_ALTERNATIVES: u32 = 8;

// --- Request body for POST /api/routes ---

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: LatLon,
    pub end: LatLon,
    pub alternatives: u32,
}

impl RouteRequest {
    /// Builds a request, clamping `alternatives` into `1..=MAX_ALTERNATIVES`.
    pub fn new(start: LatLon, end: LatLon, alternatives: u32) -> Self {
        let clamped = alternatives.clamp(1, MAX_ALTERNATIVES);
        if clamped != alternatives {
            log::warn!(
                "Requested {} alternatives, sending {} instead",
                alternatives,
                clamped
            );
        }
        Self {
            start,
            end,
            alternatives: clamped,
        }
    }
}

// --- Data Structures for parsing route service responses ---

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RoutesResponse {
    #[serde(default)]
    pub routes: Vec<RouteResult>,
    #[serde(default)]
    pub shortest_index: Option<usize>,
}

impl RoutesResponse {
    pub fn is_best(&self, index: usize) -> bool {
        self.shortest_index == Some(index)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub geometry: RouteGeometry,
    pub distance_km: f64,
    pub duration_min: f64,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub stops: Vec<RouteStop>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RouteGeometry {
    /// `[lon, lat]` pairs, in travel order. Extra members such as altitude are dropped.
    #[serde(default, deserialize_with = "positions::deserialize")]
    pub coordinates: Vec<[f64; 2]>,
}

// --- Serde helper for GeoJSON positions of any dimension ---
mod positions {
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<[f64; 2]>, D::Error> {
        Vec::<Vec<f64>>::deserialize(deserializer)?
            .into_iter()
            .map(|position| match position[..] {
                [lon, lat, ..] => Ok([lon, lat]),
                _ => Err(Error::custom(format!(
                    "position needs at least 2 members, got {}",
                    position.len()
                ))),
            })
            .collect()
    }
}

impl RouteGeometry {
    /// The path in map order (latitude first).
    pub fn to_path(&self) -> Vec<LatLon> {
        self.coordinates
            .iter()
            .copied()
            .map(LatLon::from_lon_lat)
            .collect()
    }
}

/// A point of interest the service attaches to an alternative.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RouteStop {
    pub name: String,
}

/// Body of a non-2xx response.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_wire_shape() {
        let req = RouteRequest::new(
            LatLon::new(-4.340787, 15.313731),
            LatLon::new(-4.301203, 15.317859),
            3,
        );
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "start": { "lat": -4.340787, "lon": 15.313731 },
                "end": { "lat": -4.301203, "lon": 15.317859 },
                "alternatives": 3
            })
        );
    }

    #[test]
    fn alternatives_are_clamped() {
        let p = LatLon::new(0.0, 0.0);
        assert_eq!(RouteRequest::new(p, p, 0).alternatives, 1);
        assert_eq!(RouteRequest::new(p, p, 20).alternatives, MAX_ALTERNATIVES);
    }

    #[test]
    fn parses_full_backend_response() {
        let body = r#"{
            "start": {"lat": -4.34, "lon": 15.31, "name": "Rond-point Victoire"},
            "routes": [
                {
                    "distance_km": 5.123,
                    "duration_min": 11.4,
                    "geometry": {"type": "LineString", "coordinates": [[15.31, -4.34], [15.32, -4.30]]},
                    "summary": "Boulevard du 30 Juin",
                    "type": "direct",
                    "stops": [{"name": "Marché Central", "lat": -4.307, "lon": 15.312, "type": "commerce"}]
                }
            ],
            "shortest_index": 0,
            "total_routes_found": 1
        }"#;
        let resp: RoutesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.routes.len(), 1);
        assert!(resp.is_best(0));
        let route = &resp.routes[0];
        assert_eq!(route.kind.as_deref(), Some("direct"));
        assert_eq!(route.stops[0].name, "Marché Central");
        assert_eq!(
            route.geometry.to_path(),
            vec![LatLon::new(-4.34, 15.31), LatLon::new(-4.30, 15.32)]
        );
    }

    #[test]
    fn positions_with_altitude_keep_lon_lat() {
        let geometry: RouteGeometry =
            serde_json::from_str(r#"{"coordinates": [[15.3, -4.3, 0.0], [15.31, -4.31, 12.5]]}"#)
                .unwrap();
        assert_eq!(
            geometry.to_path(),
            vec![LatLon::new(-4.3, 15.3), LatLon::new(-4.31, 15.31)]
        );
    }

    #[test]
    fn rejects_positions_without_latitude() {
        let result = serde_json::from_str::<RouteGeometry>(r#"{"coordinates": [[15.3, -4.3], [15.31]]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn tolerates_missing_fields() {
        let resp: RoutesResponse = serde_json::from_str(r#"{"routes": []}"#).unwrap();
        assert!(resp.routes.is_empty());
        assert_eq!(resp.shortest_index, None);

        let resp: RoutesResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.routes.is_empty());
    }
}
