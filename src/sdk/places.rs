use crate::sdk::map::LatLon;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::{collections::BTreeMap, error::Error, fs::File, path::Path};

/// Kinshasa landmarks offered as start and end points.
const BUILTIN_PLACES: [(&str, f64, f64); 10] = [
    ("Rond-point Victoire", -4.340787, 15.313731),
    ("Gare Centrale", -4.301203, 15.317859),
    ("Gombe", -4.30306, 15.30333),
    ("Lingwala", -4.32028, 15.29833),
    ("Kasa-Vubu", -4.34250, 15.30528),
    ("Matonge", -4.34022, 15.31599),
    ("Barumbu", -4.31694, 15.32778),
    ("Ngaliema", -4.37247, 15.25459),
    ("Lemba", -4.39611, 15.31917),
    ("Limete", -4.37439, 15.34542),
];

#[derive(Debug, Clone, PartialEq)]
pub struct NamedPoint {
    pub name: String,
    pub location: LatLon,
}

#[derive(Debug, Deserialize)]
struct PlaceRecord {
    name: String,
    lat: f64,
    lon: f64,
}

/// An origin or destination as picked by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Named(String),
    Coordinates(LatLon),
}

impl From<&str> for Endpoint {
    fn from(name: &str) -> Self {
        Endpoint::Named(name.to_string())
    }
}

impl From<LatLon> for Endpoint {
    fn from(point: LatLon) -> Self {
        Endpoint::Coordinates(point)
    }
}

/// Read-only table of named points, filled once at startup.
#[derive(Debug, Clone)]
pub struct PlaceBook {
    places: BTreeMap<String, LatLon>,
}

impl Default for PlaceBook {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PlaceBook {
    pub fn builtin() -> Self {
        let places = BUILTIN_PLACES
            .iter()
            .map(|(name, lat, lon)| (name.to_string(), LatLon::new(*lat, *lon)))
            .collect();
        Self { places }
    }

    /// Loads a 3-column CSV file with a `name,lat,lon` header.
    pub fn from_csv<P: AsRef<Path>>(csv_path: P) -> Result<Self, Box<dyn Error>> {
        let file = File::open(csv_path)?;
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

        let mut places = BTreeMap::new();
        for result in rdr.deserialize() {
            let record: PlaceRecord = result?;
            let location = LatLon::new(record.lat, record.lon);
            if !location.is_valid() {
                return Err(format!("Invalid coordinates for place {}", record.name).into());
            }
            if places.insert(record.name.clone(), location).is_some() {
                return Err(format!("Duplicate place {}", record.name).into());
            }
        }
        if places.is_empty() {
            return Err("Place file contains no places".into());
        }

        Ok(PlaceBook { places })
    }

    pub fn get(&self, name: &str) -> Option<LatLon> {
        self.places.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.places.contains_key(name)
    }

    /// All places, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = NamedPoint> + '_ {
        self.places.iter().map(|(name, location)| NamedPoint {
            name: name.clone(),
            location: *location,
        })
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Coordinates and display label for an endpoint. Raw coordinates have an empty label.
    pub fn resolve(&self, endpoint: &Endpoint) -> Option<(LatLon, String)> {
        match endpoint {
            Endpoint::Named(name) => self.get(name).map(|loc| (loc, name.clone())),
            Endpoint::Coordinates(point) if point.is_valid() => Some((*point, String::new())),
            Endpoint::Coordinates(_) => None,
        }
    }
}
