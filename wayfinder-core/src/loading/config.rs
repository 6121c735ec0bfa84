use std::path::PathBuf;

use serde::Deserialize;

/// Where the building description is read from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase", tag = "format")]
pub enum NavDataSource {
    /// Single JSON document with `nodes` and `edges` arrays
    Json { path: PathBuf },
    /// Two CSV tables with headers `id,name,x,y,floor,type` and `start,end,type`
    Csv {
        locations: PathBuf,
        connections: PathBuf,
    },
}

impl NavDataSource {
    pub fn paths(&self) -> Vec<&PathBuf> {
        match self {
            NavDataSource::Json { path } => vec![path],
            NavDataSource::Csv {
                locations,
                connections,
            } => vec![locations, connections],
        }
    }
}
