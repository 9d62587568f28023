// Copyright 2026 Turath Desktop Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The loaded gazetteer: an immutable collection of buildings plus the
//! year bounds derived from it.

use log::info;
use thiserror::Error;

use crate::building::{Building, RawCollection};

/// Errors surfaced while fetching or parsing the gazetteer file.
///
/// There is no retry: a failed load leaves the store empty and the
/// application interactive over an empty dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed gazetteer file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not read gazetteer file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not fetch gazetteer: {0}")]
    Http(String),
}

/// The loaded feature collection. Immutable after construction.
#[derive(Debug, Default)]
pub struct Dataset {
    buildings: Vec<Building>,
    year_min: Option<i32>,
    year_max: Option<i32>,
}

impl Dataset {
    /// Parse a GeoJSON feature collection.
    ///
    /// Features without a usable point geometry are skipped; buildings
    /// lacking a parseable year are excluded from the year bounds (they pass
    /// any year-ceiling filter unconditionally).
    pub fn from_geojson(text: &str) -> Result<Self, LoadError> {
        let raw: RawCollection = serde_json::from_str(text)?;
        let total = raw.features.len();

        let buildings: Vec<Building> = raw
            .features
            .into_iter()
            .filter_map(Building::from_feature)
            .collect();

        let years: Vec<i32> = buildings.iter().filter_map(|b| b.year).collect();
        let year_min = years.iter().min().copied();
        let year_max = years.iter().max().copied();

        info!(
            "loaded {} of {} gazetteer features (year range {:?}..{:?})",
            buildings.len(),
            total,
            year_min,
            year_max
        );

        Ok(Self {
            buildings,
            year_min,
            year_max,
        })
    }

    /// Look a building up by its derived key. Unknown keys fail silently
    /// (`None`), including malformed keys restored from share links.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.key == key)
    }

    #[must_use]
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Minimum defined year in the dataset, if any building has one.
    #[must_use]
    pub fn year_min(&self) -> Option<i32> {
        self.year_min
    }

    /// Maximum defined year in the dataset, if any building has one.
    #[must_use]
    pub fn year_max(&self) -> Option<i32> {
        self.year_max
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature",
             "geometry": {"type": "Point", "coordinates": [35.2034, 31.9038]},
             "properties": {"id": "qasr", "name": "القصر الكبير", "year": 1890,
                            "era": "عثماني", "status": "مرمم"}},
            {"type": "Feature",
             "geometry": {"type": "Point", "coordinates": [35.21, 31.91]},
             "properties": {"id": "hosh", "name": "حوش العائلة",
                            "era": "انتدابي", "status": "مهدد بالانهيار"}},
            {"type": "Feature",
             "geometry": {"type": "Point", "coordinates": [35.19, 31.90]},
             "properties": {"id": "saraya", "name": "السرايا", "year": "1950"}}
        ]
    }"#;

    #[test]
    fn test_year_bounds_skip_missing_years() {
        let ds = Dataset::from_geojson(SAMPLE).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.year_min(), Some(1890));
        assert_eq!(ds.year_max(), Some(1950));
    }

    #[test]
    fn test_find_by_key() {
        let ds = Dataset::from_geojson(SAMPLE).unwrap();
        assert_eq!(ds.find("hosh").map(|b| b.name.as_str()), Some("حوش العائلة"));
        assert!(ds.find("no-such-key").is_none());
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        assert!(matches!(
            Dataset::from_geojson("{not json"),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_features_array_means_empty() {
        // The original viewer tolerates a collection without features.
        let ds = Dataset::from_geojson(r#"{"type":"FeatureCollection"}"#).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.year_max(), None);
    }

    #[test]
    fn test_bad_geometry_features_are_skipped() {
        let ds = Dataset::from_geojson(
            r#"{"features":[
                {"geometry":{"type":"Point","coordinates":[35.2,31.9]},
                 "properties":{"name":"أ"}},
                {"geometry":{"type":"Polygon","coordinates":[]},
                 "properties":{"name":"ب"}},
                {"properties":{"name":"ج"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 1);
    }
}
