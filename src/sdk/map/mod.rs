pub mod scene;
pub mod style;

pub use scene::{SceneMap, TileLayer, Viewport};
pub use style::{LineStyle, PALETTE};

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Padding ratio applied every time the viewport is fitted to route geometry.
pub const FIT_PADDING: f64 = 0.2;

/// A geographic position. Field order follows the map convention (latitude first);
/// the routing service sends `[lon, lat]` pairs which are flipped on the way in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Builds a position from a `[lon, lat]` pair as found in GeoJSON geometries.
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[1],
            lon: pair[0],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

impl FromStr for LatLon {
    type Err = &'static str;

    /// Parses `"lat,lon"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s.split_once(',').ok_or("Expected coordinates as \"lat,lon\"")?;
        let lat = lat.trim().parse().map_err(|_| "Invalid latitude")?;
        let lon = lon.trim().parse().map_err(|_| "Invalid longitude")?;
        let point = LatLon { lat, lon };
        if point.is_valid() {
            Ok(point)
        } else {
            Err("Coordinates out of range")
        }
    }
}

/// Axis-aligned lat/lon box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LatLon,
    pub north_east: LatLon,
}

impl Bounds {
    pub fn around(point: LatLon) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Smallest box holding every point, or `None` for an empty path.
    pub fn from_points(points: &[LatLon]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(
            rest.iter()
                .fold(Self::around(*first), |acc, p| acc.extend(&Self::around(*p))),
        )
    }

    pub fn extend(&self, other: &Bounds) -> Self {
        Self {
            south_west: LatLon {
                lat: self.south_west.lat.min(other.south_west.lat),
                lon: self.south_west.lon.min(other.south_west.lon),
            },
            north_east: LatLon {
                lat: self.north_east.lat.max(other.north_east.lat),
                lon: self.north_east.lon.max(other.north_east.lon),
            },
        }
    }

    /// Grows the box on every side by `ratio` of its height and width.
    pub fn pad(&self, ratio: f64) -> Self {
        let height = (self.north_east.lat - self.south_west.lat).abs() * ratio;
        let width = (self.north_east.lon - self.south_west.lon).abs() * ratio;
        Self {
            south_west: LatLon {
                lat: self.south_west.lat - height,
                lon: self.south_west.lon - width,
            },
            north_east: LatLon {
                lat: self.north_east.lat + height,
                lon: self.north_east.lon + width,
            },
        }
    }

    pub fn contains(&self, point: LatLon) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lon..=self.north_east.lon).contains(&point.lon)
    }
}

/// Handle to a drawable owned by a [`MapLayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

/// The drawing surface the controller renders onto.
pub trait MapLayer {
    /// Draws a line through `path` (in order) and binds `popup` to it.
    fn add_polyline(&mut self, path: &[LatLon], style: &LineStyle, popup: &str) -> LayerId;

    /// Places a point marker with popup content.
    fn add_marker(&mut self, at: LatLon, popup: &str) -> LayerId;

    /// Removes a drawable. Unknown ids are ignored.
    fn remove_layer(&mut self, id: LayerId);

    fn has_layer(&self, id: LayerId) -> bool;

    /// Bounding box of a drawable, `None` if it is unknown or has no points.
    fn layer_bounds(&self, id: LayerId) -> Option<Bounds>;

    fn fit_bounds(&mut self, bounds: Bounds);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_grows_each_side_by_ratio_of_extent() {
        let b = Bounds {
            south_west: LatLon::new(-4.0, 15.0),
            north_east: LatLon::new(-3.0, 17.0),
        };
        let padded = b.pad(0.2);
        assert!((padded.south_west.lat - -4.2).abs() < 1e-12);
        assert!((padded.north_east.lat - -2.8).abs() < 1e-12);
        assert!((padded.south_west.lon - 14.6).abs() < 1e-12);
        assert!((padded.north_east.lon - 17.4).abs() < 1e-12);
    }

    #[test]
    fn from_points_covers_path() {
        let path = [
            LatLon::new(-4.34, 15.31),
            LatLon::new(-4.30, 15.32),
            LatLon::new(-4.32, 15.29),
        ];
        let b = Bounds::from_points(&path).unwrap();
        assert_eq!(b.south_west, LatLon::new(-4.34, 15.29));
        assert_eq!(b.north_east, LatLon::new(-4.30, 15.32));
        assert!(path.iter().all(|p| b.contains(*p)));
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn parses_lat_lon_pairs() {
        let p: LatLon = "-4.340787, 15.313731".parse().unwrap();
        assert_eq!(p, LatLon::new(-4.340787, 15.313731));
        assert!("15.3".parse::<LatLon>().is_err());
        assert!("abc,1".parse::<LatLon>().is_err());
        assert!("95,1".parse::<LatLon>().is_err());
    }

    #[test]
    fn flips_geojson_pairs() {
        assert_eq!(
            LatLon::from_lon_lat([15.317859, -4.301203]),
            LatLon::new(-4.301203, 15.317859)
        );
    }
}
