//! Indoor navigation routing for multi-floor buildings.
//!
//! A building is described as a graph of named locations (points of interest
//! and connectors) joined by typed connections (corridors, stairs, elevators).
//! This crate builds that graph from static tables, searches it with A* under
//! a per-query navigation mode, and turns the resulting location sequence into
//! narrated turn-by-turn steps.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{
    ConnectionRecord, NavData, NavDataSource, create_navigation_graph, load_nav_data,
};
pub use model::{
    Connection, ConnectionType, Location, LocationKind, NavigationGraph, Neighbor,
};
pub use routing::{
    InstructionStep, Instructions, NavigationMode, Path, RouteQuery, RouteResult, RoutingConfig,
    StepKind, TurnDirection, find_path, request_route, route_batch, synthesize,
};

/// Floor index inside a building, the ground floor is 1
pub type Floor = i32;
/// Traversal weight in raw coordinate units
pub type Weight = f64;
/// Distance in display units (raw distance divided by the distance scale)
pub type DisplayDistance = u32;
