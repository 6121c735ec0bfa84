//! Route search and turn-by-turn instruction generation

pub mod astar;
pub mod config;
pub mod cost;
pub mod instructions;
mod itinerary;
pub mod route;

pub use astar::{Path, find_path};
pub use config::{RoutingConfig, TurnThresholds};
pub use cost::{NavigationMode, edge_cost};
pub use instructions::{InstructionStep, Instructions, StepKind, TurnDirection, synthesize};
pub use route::{RouteQuery, RouteResult, request_route, route_batch};
