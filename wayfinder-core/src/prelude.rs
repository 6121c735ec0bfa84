// Re-export key components
pub use crate::loading::{
    ConnectionRecord, NavData, NavDataSource, create_navigation_graph, load_nav_data,
};
pub use crate::model::{
    Connection, ConnectionType, Location, LocationKind, NavigationGraph, Neighbor,
};
pub use crate::routing::{
    InstructionStep, Instructions, NavigationMode, Path, RouteQuery, RouteResult, RoutingConfig,
    StepKind, TurnDirection, TurnThresholds, edge_cost, find_path, request_route, route_batch,
    synthesize,
};

// Core scalar types
pub use crate::DisplayDistance;
pub use crate::Error;
pub use crate::Floor;
pub use crate::Weight;
