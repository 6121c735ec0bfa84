use serde::{Deserialize, Serialize};

use crate::{
    Floor,
    model::{ConnectionType, Location, LocationKind},
};

/// Location row as it appears in the input tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub floor: Floor,
    #[serde(rename = "type")]
    pub kind: LocationKind,
}

/// Connection row as it appears in the input tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub start: String,
    pub end: String,
    #[serde(rename = "type")]
    pub kind: ConnectionType,
}

/// Whole building description, the layout of `nav_data.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavData {
    pub nodes: Vec<Location>,
    pub edges: Vec<ConnectionRecord>,
}

impl From<LocationRecord> for Location {
    fn from(record: LocationRecord) -> Self {
        Location::new(
            record.id,
            record.name,
            record.x,
            record.y,
            record.floor,
            record.kind,
        )
    }
}

impl From<Location> for LocationRecord {
    fn from(location: Location) -> Self {
        LocationRecord {
            x: location.x(),
            y: location.y(),
            id: location.id,
            name: location.name,
            floor: location.floor,
            kind: location.kind,
        }
    }
}
