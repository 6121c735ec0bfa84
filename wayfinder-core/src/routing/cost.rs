//! Edge weights under a navigation mode

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RoutingConfig;
use crate::{
    Weight,
    model::{Connection, Location},
};

/// Per-query routing constraint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NavigationMode {
    /// Step-free route required, stairs are impassable
    #[serde(default)]
    pub accessible: bool,
}

impl NavigationMode {
    pub const STANDARD: Self = Self { accessible: false };
    pub const ACCESSIBLE: Self = Self { accessible: true };
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.accessible {
            "accessible"
        } else {
            "walking"
        })
    }
}

/// Weight of traversing `connection` between `from` and `to`
///
/// Returns `None` when the connection is impassable in `mode`. The weight is
/// the planar distance, plus the floor change penalty when the locations are
/// on different floors, and does not depend on the direction of travel.
pub fn edge_cost(
    from: &Location,
    to: &Location,
    connection: &Connection,
    mode: NavigationMode,
    config: &RoutingConfig,
) -> Option<Weight> {
    if mode.accessible && !connection.kind.is_step_free() {
        return None;
    }

    let distance = from.planar_distance(to);
    if from.floor == to.floor {
        Some(distance)
    } else {
        Some(distance + config.floor_change_penalty)
    }
}
