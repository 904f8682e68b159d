use include_dir::{include_dir, Dir};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

static DATA_DIR: Dir = include_dir!("src/data");

/// Name substrings that mark a record as a playable street.
const NAME_TOKENS: [&str; 4] = ["street", "highway", "square", "avenue"];

/// Ordinal leftovers from the upstream map data ("4th ...", "2nd ...").
const ORDINAL_ARTIFACTS: [&str; 2] = ["th ", "nd "];

/// A geocoordinate, stored as `[lat, lng]` in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(p: GeoPoint) -> Self {
        (p.lat, p.lng)
    }
}

/// A raw dataset record: one named polyline with at least two points.
/// Several records may share a name (disjoint segments of one street).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Street {
    pub name: String,
    pub path: Vec<GeoPoint>,
}

/// A filtered-pool entry: a street plus the positional id that keeps
/// co-named segments distinguishable for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStreet {
    pub name: String,
    pub path: Vec<GeoPoint>,
    pub unique_id: String,
}

impl CatalogStreet {
    /// Lowercased name, the identity used for scoring and pool membership.
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Difficulty level; every level except `Hard` maps to an embedded
/// allow-list of street names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Level {
    Easy,
    Alik,
    Xcho,
    Irenchik,
    Hard,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Easy,
        Level::Alik,
        Level::Xcho,
        Level::Irenchik,
        Level::Hard,
    ];

    fn allow_list_file(&self) -> Option<&'static str> {
        match self {
            Level::Easy => Some("easy.json"),
            Level::Alik => Some("alik.json"),
            Level::Xcho => Some("xcho.json"),
            Level::Irenchik => Some("irenchik.json"),
            Level::Hard => None,
        }
    }

    /// Lowercased allow-list for this level, or `None` for `Hard`
    /// (all streets eligible).
    pub fn allow_list(&self) -> Option<HashSet<String>> {
        let file_name = self.allow_list_file()?;
        let names: Vec<String> = read_embedded_json(file_name);
        Some(names.into_iter().map(|n| n.to_lowercase()).collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read street dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse street dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The static street dataset. Loaded once; never mutated.
#[derive(Debug, Clone)]
pub struct Catalog {
    streets: Vec<Street>,
}

impl Catalog {
    /// The dataset compiled into the crate.
    pub fn embedded() -> Self {
        Self {
            streets: read_embedded_json("streets.json"),
        }
    }

    /// Load the same `[{name, path}, ...]` format from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let streets = serde_json::from_reader(reader)?;
        Ok(Self { streets })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let bytes = fs::read(path)?;
        let streets = serde_json::from_slice(&bytes)?;
        Ok(Self { streets })
    }

    pub fn from_streets(streets: Vec<Street>) -> Self {
        Self { streets }
    }

    pub fn streets(&self) -> &[Street] {
        &self.streets
    }

    /// Derive the playable pool for a level: allow-list membership
    /// (case-insensitive; everything for `Hard`), then the name-token
    /// inclusion filter and the ordinal-artifact exclusion. The same name
    /// filters apply to every level. An empty result is valid.
    pub fn filter_by_level(&self, level: Level) -> Vec<CatalogStreet> {
        let allow = level.allow_list();

        let pool: Vec<CatalogStreet> = self
            .streets
            .iter()
            .filter(|street| {
                let lower = street.name.to_lowercase();
                allow.as_ref().map_or(true, |names| names.contains(&lower))
            })
            .filter(|street| {
                let lower = street.name.to_lowercase();
                NAME_TOKENS.iter().any(|token| lower.contains(token))
                    && !ORDINAL_ARTIFACTS.iter().any(|artifact| lower.contains(artifact))
            })
            .enumerate()
            .map(|(index, street)| CatalogStreet {
                name: street.name.clone(),
                path: street.path.clone(),
                unique_id: format!("{}-{}", street.name, index),
            })
            .collect();

        debug!(
            "level {level}: {} segments, {} unique names",
            pool.len(),
            unique_name_count(&pool)
        );
        pool
    }
}

/// Distinct lowercased names in a pool. This is the scoring denominator,
/// not the segment count.
pub fn unique_name_count(pool: &[CatalogStreet]) -> usize {
    pool.iter().map(|s| s.name_key()).unique().count()
}

fn read_embedded_json<T: serde::de::DeserializeOwned>(file_name: &str) -> T {
    let file = DATA_DIR
        .get_file(file_name)
        .expect("Dataset file not found");

    let contents = file
        .contents_utf8()
        .expect("Unable to interpret dataset file as a string");

    serde_json::from_str(contents).expect("Unable to deserialize dataset json")
}
