//! Building graph components - locations and connections

use std::{convert::Infallible, fmt, str::FromStr};

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::Floor;
use crate::loading::LocationRecord;

/// Role of a location in the building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    /// Point of interest a visitor can search for and navigate to
    Poi,
    /// Doors, corners, stair landings and other waypoints
    Connector,
}

/// Building graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LocationRecord", into = "LocationRecord")]
pub struct Location {
    /// Identifier, unique across every floor of the building
    pub id: String,
    /// Display name used in narrated steps
    pub name: String,
    /// Position in the floor's local coordinate system
    pub geometry: Point<f64>,
    /// Floor index, the ground floor is 1
    pub floor: Floor,
    pub kind: LocationKind,
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        x: f64,
        y: f64,
        floor: Floor,
        kind: LocationKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            geometry: Point::new(x, y),
            floor,
            kind,
        }
    }

    pub fn x(&self) -> f64 {
        self.geometry.x()
    }

    pub fn y(&self) -> f64 {
        self.geometry.y()
    }

    pub fn is_poi(&self) -> bool {
        self.kind == LocationKind::Poi
    }

    /// Straight-line distance in the floor plane, floors are ignored
    pub fn planar_distance(&self, other: &Location) -> f64 {
        let delta = other.geometry - self.geometry;
        delta.x().hypot(delta.y())
    }

    /// Direction towards `other` in radians, counter-clockwise from the +x axis
    pub fn bearing_to(&self, other: &Location) -> f64 {
        let delta = other.geometry - self.geometry;
        delta.y().atan2(delta.x())
    }
}

/// Physical medium of a connection
///
/// Unknown tags from the input data are kept verbatim in `Other` and
/// traversed like corridors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectionType {
    Corridor,
    Stairs,
    Elevator,
    Ramp,
    Other(String),
}

impl ConnectionType {
    pub fn as_str(&self) -> &str {
        match self {
            ConnectionType::Corridor => "corridor",
            ConnectionType::Stairs => "stairs",
            ConnectionType::Elevator => "elevator",
            ConnectionType::Ramp => "ramp",
            ConnectionType::Other(tag) => tag,
        }
    }

    /// Whether this medium is expected to join two floors
    pub fn changes_floor(&self) -> bool {
        matches!(
            self,
            ConnectionType::Stairs | ConnectionType::Elevator | ConnectionType::Ramp
        )
    }

    /// Whether a wheelchair user can traverse this medium
    pub fn is_step_free(&self) -> bool {
        !matches!(self, ConnectionType::Stairs)
    }
}

impl From<String> for ConnectionType {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "corridor" => ConnectionType::Corridor,
            "stairs" => ConnectionType::Stairs,
            "elevator" => ConnectionType::Elevator,
            "ramp" => ConnectionType::Ramp,
            _ => ConnectionType::Other(tag),
        }
    }
}

impl From<ConnectionType> for String {
    fn from(kind: ConnectionType) -> Self {
        match kind {
            ConnectionType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ConnectionType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ConnectionType::from(s.to_string()))
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Building graph edge
///
/// One record per undirected connection, both directions of travel read the
/// same metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub kind: ConnectionType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_tags_are_case_insensitive_and_extensible() {
        assert_eq!(ConnectionType::from("Stairs".to_string()), ConnectionType::Stairs);
        assert_eq!(
            ConnectionType::from("escalator".to_string()),
            ConnectionType::Other("escalator".to_string())
        );
        assert_eq!(String::from(ConnectionType::Elevator), "elevator");
        assert!(!ConnectionType::Stairs.is_step_free());
        assert!(ConnectionType::Ramp.is_step_free());
    }

    #[test]
    fn location_kind_is_strict() {
        let kind: LocationKind = serde_json::from_str("\"poi\"").unwrap();
        assert_eq!(kind, LocationKind::Poi);
        for tag in ["\"POI\"", "\"Poi\"", "\"shop\""] {
            assert!(serde_json::from_str::<LocationKind>(tag).is_err(), "{tag} accepted");
        }
    }

    #[test]
    fn bearing_is_counter_clockwise_from_x_axis() {
        let a = Location::new("a", "A", 0.0, 0.0, 1, LocationKind::Poi);
        let b = Location::new("b", "B", 0.0, 10.0, 1, LocationKind::Poi);
        assert!((a.bearing_to(&b) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((a.planar_distance(&b) - 10.0).abs() < 1e-12);
    }
}
