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

//! Core library for the Turath heritage-building gazetteer.
//!
//! This crate holds everything about the viewer that is independent of any
//! rendering surface, so the interesting invariants can be tested without a
//! window:
//!
//! - **Data model**: parsing the GeoJSON gazetteer into [`Building`] records
//!   with stable keys and defaults substituted exactly once at load time
//! - **Filter/sort engine**: a pure function from [`Criteria`] and a
//!   [`Dataset`] to an ordered subset of buildings
//! - **Marker index**: the key → marker-state table that keeps exactly one
//!   marker highlighted and marker visibility in sync with the filtered list
//! - **Tour player**: the closed/paused/playing state machine that walks the
//!   filtered list on a poll-driven timer
//! - **Share links**: building and parsing the `?id=` selection parameter
//!
//! # Quick Start
//!
//! ```
//! use turath_core::{apply, Criteria, Dataset};
//!
//! let geojson = r#"{"type":"FeatureCollection","features":[
//!     {"type":"Feature",
//!      "geometry":{"type":"Point","coordinates":[35.2034,31.9038]},
//!      "properties":{"id":"qasr","name":"القصر الكبير","year":1890}}
//! ]}"#;
//!
//! let dataset = Dataset::from_geojson(geojson).unwrap();
//! let criteria = Criteria::unconstrained(&dataset);
//! let matches = apply(&criteria, &dataset);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].key, "qasr");
//! ```

pub mod building;
pub mod dataset;
pub mod filter;
pub mod marker;
pub mod share;
pub mod tour;

pub use building::{BeforeAfter, Building, UNSPECIFIED};
pub use dataset::{Dataset, LoadError};
pub use filter::{
    apply, collate, distinct_eras, distinct_statuses, distinct_styles, CategoryFilter, Criteria,
    SortKey,
};
pub use marker::{MarkerIndex, MarkerPalette, MarkerState};
pub use share::{parse_selection, share_url};
pub use tour::{TourPlayer, TourState};
