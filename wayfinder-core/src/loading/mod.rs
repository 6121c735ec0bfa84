//! This module is responsible for loading the static building data (JSON or
//! CSV tables) and building the navigation graph.

mod builder;
mod config;
mod parser;
mod raw_types;

pub use builder::create_navigation_graph;
pub use config::NavDataSource;
pub use parser::{deserialize_csv_file, load_nav_data};
pub use raw_types::{ConnectionRecord, LocationRecord, NavData};
