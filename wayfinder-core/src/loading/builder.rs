use log::info;

use super::{NavDataSource, load_nav_data};
use crate::{Error, model::NavigationGraph};

/// Creates a navigation graph from the configured data source
///
/// # Errors
///
/// Returns an error if there are problems reading the data or if the data
/// describes an inconsistent graph
pub fn create_navigation_graph(source: &NavDataSource) -> Result<NavigationGraph, Error> {
    validate_source(source)?;

    info!("Loading building data: {source:?}");
    let data = load_nav_data(source)?;
    info!(
        "Read {} locations and {} connections",
        data.nodes.len(),
        data.edges.len()
    );

    NavigationGraph::build(data.nodes, data.edges)
}

fn validate_source(source: &NavDataSource) -> Result<(), Error> {
    for path in source.paths() {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Building data file not found: {}", path.display()),
            )));
        }
    }

    Ok(())
}
