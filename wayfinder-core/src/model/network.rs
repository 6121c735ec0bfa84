//! Navigation graph with id lookup and per-floor spatial indices

use std::ops::Index;

use hashbrown::{HashMap, hash_map::Entry};
use log::{info, warn};
use petgraph::{
    algo::tarjan_scc,
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
};
use rstar::{RTree, primitives::GeomWithData};

use super::{Connection, ConnectionType, Location};
use crate::{Error, Floor, loading::ConnectionRecord};

/// Location position stored in the per-floor R-tree
pub type IndexedLocation = GeomWithData<[f64; 2], NodeIndex>;

/// A location adjacent to another one and the connection joining them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    pub location: &'a Location,
    pub connection: &'a Connection,
}

/// Immutable building graph
///
/// Locations live in a petgraph arena and are addressed by `NodeIndex`
/// internally, the string ids are resolved once per query.
#[derive(Debug, Clone)]
pub struct NavigationGraph {
    pub(crate) graph: UnGraph<Location, Connection>,
    index: HashMap<String, NodeIndex>,
    floor_trees: HashMap<Floor, RTree<IndexedLocation>>,
}

impl NavigationGraph {
    /// Builds the graph from location and connection tables
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` for duplicate location ids, floors below 1,
    /// non-finite coordinates and connections referencing unknown locations.
    pub fn build<L, C>(locations: L, connections: C) -> Result<Self, Error>
    where
        L: IntoIterator<Item = Location>,
        C: IntoIterator<Item = ConnectionRecord>,
    {
        let locations = locations.into_iter();
        let mut graph = UnGraph::with_capacity(locations.size_hint().0, 0);
        let mut index = HashMap::new();

        for location in locations {
            validate_location(&location)?;
            match index.entry(location.id.clone()) {
                Entry::Occupied(_) => {
                    return Err(Error::InvalidData(format!(
                        "duplicate location id '{}'",
                        location.id
                    )));
                }
                Entry::Vacant(entry) => {
                    entry.insert(graph.add_node(location));
                }
            }
        }

        for record in connections {
            let start = resolve_endpoint(&index, &record.start, &record)?;
            let end = resolve_endpoint(&index, &record.end, &record)?;

            if start == end {
                warn!("Skipping connection from '{}' to itself", record.start);
                continue;
            }

            let (from, to) = (&graph[start], &graph[end]);
            if from.floor != to.floor && !record.kind.changes_floor() {
                warn!(
                    "Connection '{}' - '{}' of type {} joins floors {} and {}",
                    record.start, record.end, record.kind, from.floor, to.floor
                );
            }

            if let ConnectionType::Other(tag) = &record.kind {
                warn!(
                    "Connection '{}' - '{}' has unknown type '{tag}', treated as step-free",
                    record.start, record.end
                );
            }

            graph.add_edge(start, end, Connection { kind: record.kind });
        }

        let floor_trees = build_floor_trees(&graph);
        let navigation_graph = Self {
            graph,
            index,
            floor_trees,
        };

        navigation_graph.report_connectivity();
        info!(
            "Navigation graph built: {} locations, {} connections, {} floors",
            navigation_graph.location_count(),
            navigation_graph.connection_count(),
            navigation_graph.floor_trees.len()
        );

        Ok(navigation_graph)
    }

    /// Looks up a location by id
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownLocation` if no location has this id.
    pub fn location(&self, id: &str) -> Result<&Location, Error> {
        self.node_index(id)
            .map(|node| &self.graph[node])
            .ok_or_else(|| Error::UnknownLocation(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Locations directly connected to `id`, one entry per connection
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownLocation` if no location has this id.
    pub fn neighbors(&self, id: &str) -> Result<Vec<Neighbor<'_>>, Error> {
        let node = self
            .node_index(id)
            .ok_or_else(|| Error::UnknownLocation(id.to_string()))?;

        Ok(self
            .adjacent(node)
            .map(|(next, connection)| Neighbor {
                location: &self.graph[next],
                connection,
            })
            .collect())
    }

    /// All locations in input order
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.graph.node_weights()
    }

    pub fn location_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Distinct floor indices in ascending order
    pub fn floors(&self) -> Vec<Floor> {
        let mut floors: Vec<Floor> = self.floor_trees.keys().copied().collect();
        floors.sort_unstable();
        floors
    }

    /// Nearest location on `floor` to the given point of the floor plan
    pub fn nearest_location(&self, floor: Floor, x: f64, y: f64) -> Option<&Location> {
        self.floor_trees
            .get(&floor)?
            .nearest_neighbor(&[x, y])
            .map(|entry| &self.graph[entry.data])
    }

    /// Points of interest whose name contains `term`, ignoring case
    pub fn search_pois(&self, term: &str) -> Vec<&Location> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        self.locations()
            .filter(|location| location.is_poi() && location.name.to_lowercase().contains(&term))
            .collect()
    }

    pub(crate) fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Adjacent nodes of `node` together with the joining connection
    pub(crate) fn adjacent(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (NodeIndex, &Connection)> + '_ {
        self.graph.edges(node).map(move |edge| {
            let next = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            (next, edge.weight())
        })
    }

    fn report_connectivity(&self) {
        let components = tarjan_scc(&self.graph);
        if components.len() > 1 {
            let largest = components.iter().map(Vec::len).max().unwrap_or(0);
            warn!(
                "Navigation graph has {} disconnected parts, {} of {} locations are \
                unreachable from the largest part",
                components.len(),
                self.location_count() - largest,
                self.location_count()
            );
        }
    }
}

impl Index<NodeIndex> for NavigationGraph {
    type Output = Location;

    fn index(&self, node: NodeIndex) -> &Self::Output {
        &self.graph[node]
    }
}

fn validate_location(location: &Location) -> Result<(), Error> {
    if location.floor < 1 {
        return Err(Error::InvalidData(format!(
            "location '{}' has floor {}, floors start at 1",
            location.id, location.floor
        )));
    }
    if !location.x().is_finite() || !location.y().is_finite() {
        return Err(Error::InvalidData(format!(
            "location '{}' has non-finite coordinates",
            location.id
        )));
    }
    Ok(())
}

fn resolve_endpoint(
    index: &HashMap<String, NodeIndex>,
    id: &str,
    record: &ConnectionRecord,
) -> Result<NodeIndex, Error> {
    index.get(id).copied().ok_or_else(|| {
        Error::InvalidData(format!(
            "connection '{}' - '{}' references unknown location '{id}'",
            record.start, record.end
        ))
    })
}

fn build_floor_trees(
    graph: &UnGraph<Location, Connection>,
) -> HashMap<Floor, RTree<IndexedLocation>> {
    let mut points: HashMap<Floor, Vec<IndexedLocation>> = HashMap::new();
    for node in graph.node_indices() {
        let location = &graph[node];
        points
            .entry(location.floor)
            .or_default()
            .push(IndexedLocation::new([location.x(), location.y()], node));
    }

    points
        .into_iter()
        .map(|(floor, entries)| (floor, RTree::bulk_load(entries)))
        .collect()
}
