use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use itertools::Itertools;
use serde_json::json;

use crate::{Error, Floor, model::Location, routing::RouteResult};

impl RouteResult {
    /// Converts the route to a `GeoJSON` `FeatureCollection` in floor plan
    /// coordinates
    ///
    /// Every run of consecutive locations on one floor becomes a walk
    /// feature, every floor transition a point feature at the connector
    /// reached on the new floor.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let mut features = Vec::new();
        let runs = self.path.iter().chunk_by(|location| location.floor);
        let mut previous: Option<&Location> = None;

        for (leg_idx, (floor, run)) in (&runs).into_iter().enumerate() {
            let run: Vec<&Location> = run.collect();

            if let (Some(from), Some(&to)) = (previous, run.first()) {
                features.push(create_floor_change_feature(from, to)?);
            }
            features.push(create_walk_feature(leg_idx, floor, &run)?);
            previous = run.last().copied();
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn create_walk_feature(leg_idx: usize, floor: Floor, run: &[&Location]) -> Result<Feature, Error> {
    let (Some(first), Some(last)) = (run.first(), run.last()) else {
        return Err(Error::GeoJsonError("empty walk leg".to_string()));
    };

    // A single location can not form a line, the leg is drawn as a point
    let geometry = if run.len() == 1 {
        Geometry::new(GeoJsonValue::from(&first.geometry))
    } else {
        let coords: Vec<Coord<f64>> = run.iter().map(|location| location.geometry.into()).collect();
        Geometry::new(GeoJsonValue::from(&LineString::new(coords)))
    };

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "leg_type": "walk",
            "leg_index": leg_idx,
            "floor": floor,
            "from_name": first.name,
            "to_name": last.name,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn create_floor_change_feature(from: &Location, to: &Location) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&to.geometry));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "leg_type": "floor_change",
            "from_floor": from.floor,
            "to_floor": to.floor,
            "name": to.name,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::LocationKind,
        routing::{NavigationMode, RoutingConfig, synthesize},
    };

    fn route(path: Vec<Location>) -> RouteResult {
        let instructions = synthesize(&path, &RoutingConfig::default());
        RouteResult {
            path,
            steps: instructions.steps,
            total_distance: instructions.total_distance,
            cost: 0.0,
            mode: NavigationMode::STANDARD,
        }
    }

    #[test]
    fn one_walk_feature_per_floor_run() {
        let result = route(vec![
            Location::new("a", "Office", 0.0, 0.0, 1, LocationKind::Poi),
            Location::new("s1", "Stairs 1", 50.0, 0.0, 1, LocationKind::Connector),
            Location::new("s2", "Stairs 2", 50.0, 0.0, 2, LocationKind::Connector),
            Location::new("b", "Lab", 50.0, 40.0, 2, LocationKind::Poi),
        ]);

        let collection = serde_json::to_value(result.to_geojson().unwrap()).unwrap();
        let features = collection["features"].as_array().unwrap();
        let leg_types: Vec<&str> = features
            .iter()
            .map(|f| f["properties"]["leg_type"].as_str().unwrap())
            .collect();
        assert_eq!(leg_types, vec!["walk", "floor_change", "walk"]);

        let change = &features[1]["properties"];
        assert_eq!(change["from_floor"], json!(1));
        assert_eq!(change["to_floor"], json!(2));
        assert_eq!(features[2]["properties"]["floor"], json!(2));
        assert_eq!(features[0]["geometry"]["type"], json!("LineString"));
    }

    #[test]
    fn single_location_route_is_a_point() {
        let result = route(vec![Location::new(
            "a",
            "Lobby",
            1.0,
            2.0,
            1,
            LocationKind::Poi,
        )]);
        let collection = serde_json::to_value(result.to_geojson().unwrap()).unwrap();
        assert_eq!(collection["features"].as_array().unwrap().len(), 1);
        assert_eq!(collection["features"][0]["geometry"]["type"], json!("Point"));
        assert!(result.to_geojson_string().unwrap().contains("FeatureCollection"));
    }
}
