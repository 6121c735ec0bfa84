//! Data model for indoor navigation
//!
//! Contains the building graph: locations on floors and typed connections
//! between them.

pub mod components;
pub mod network;

pub use components::{Connection, ConnectionType, Location, LocationKind};
pub use network::{IndexedLocation, NavigationGraph, Neighbor};
