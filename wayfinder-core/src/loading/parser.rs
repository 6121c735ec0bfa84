use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{ConnectionRecord, LocationRecord, NavData, NavDataSource};
use crate::Error;

/// Reads the building description from `source`
///
/// # Errors
///
/// Returns `Error::IoError` if a file can not be opened and
/// `Error::InvalidData` if its content is malformed.
pub fn load_nav_data(source: &NavDataSource) -> Result<NavData, Error> {
    match source {
        NavDataSource::Json { path } => {
            let file = open(path)?;
            Ok(serde_json::from_reader(BufReader::new(file))?)
        }
        NavDataSource::Csv {
            locations,
            connections,
        } => {
            let nodes = deserialize_csv_file::<LocationRecord>(locations)?
                .into_iter()
                .map(Into::into)
                .collect();
            let edges = deserialize_csv_file::<ConnectionRecord>(connections)?;
            Ok(NavData { nodes, edges })
        }
    }
}

/// Deserializes every row of a CSV table, the first malformed row is an error
pub fn deserialize_csv_file<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = open(path)?;
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| Error::InvalidData(format!("{}: {e}", path.display())))
}

fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| {
        Error::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        ))
    })
}
