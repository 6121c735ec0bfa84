//! Map export of route results

mod to_geojson;
