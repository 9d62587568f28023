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

//! Building records and the GeoJSON property schema.
//!
//! The gazetteer file is a standard GeoJSON feature collection whose
//! properties are loosely typed. All default substitution happens here,
//! exactly once, when a raw feature is turned into a [`Building`] —
//! downstream code never re-derives defaults.

use log::warn;
use serde::Deserialize;
use serde_json::Value;

/// Sentinel value substituted for blank categorical fields (era/style/status).
pub const UNSPECIFIED: &str = "غير محدد";

/// Placeholder name for buildings the dataset left unnamed.
pub const UNNAMED: &str = "مبنى بدون اسم";

/// Placeholder story for buildings without a description yet.
pub const NO_STORY: &str = "لا يوجد وصف بعد.";

/// A before/after image pair for the restoration comparison widget.
///
/// Only present when the dataset carries both halves; a lone `before` or
/// `after` is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeforeAfter {
    pub before: String,
    pub after: String,
}

/// One building record: geometry plus the property bag with defaults applied.
///
/// Immutable after load. `key` is the sole addressing mechanism for markers
/// and share links; it is stable for the lifetime of the loaded dataset.
#[derive(Debug, Clone)]
pub struct Building {
    /// Derived identity: first non-empty of {id, slug, name, "lon,lat"}.
    pub key: String,
    pub name: String,
    pub year: Option<i32>,
    pub era: String,
    pub style: String,
    pub status: String,
    pub story: String,
    /// Longitude (GeoJSON x).
    pub lon: f64,
    /// Latitude (GeoJSON y).
    pub lat: f64,
    pub image: Option<String>,
    pub gallery: Vec<String>,
    pub before_after: Option<BeforeAfter>,
    pub audio: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCollection {
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFeature {
    #[serde(default)]
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: RawProperties,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProperties {
    id: Option<Value>,
    slug: Option<String>,
    name: Option<String>,
    year: Option<Value>,
    era: Option<String>,
    style: Option<String>,
    status: Option<String>,
    story: Option<String>,
    image: Option<String>,
    gallery: Option<Vec<String>>,
    #[serde(rename = "beforeAfter")]
    before_after: Option<RawBeforeAfter>,
    audio: Option<String>,
    link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBeforeAfter {
    before: Option<String>,
    after: Option<String>,
}

/// Parse a year that may appear as a JSON number or a numeric string.
/// Anything unparseable is treated as "no year".
fn parse_year(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

/// A JSON scalar rendered the way the dataset authors wrote it.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

impl Building {
    /// Convert a raw GeoJSON feature into a building record.
    ///
    /// Returns `None` (with a warning) for features without a usable point
    /// geometry; absent optional fields degrade to defaults, never error.
    pub(crate) fn from_feature(raw: RawFeature) -> Option<Self> {
        let geometry = raw.geometry?;
        if geometry.kind != "Point" || geometry.coordinates.len() < 2 {
            warn!(
                "skipping feature without point geometry (type: {:?})",
                geometry.kind
            );
            return None;
        }
        let (lon, lat) = (geometry.coordinates[0], geometry.coordinates[1]);

        let p = raw.properties;
        let raw_name = non_blank(p.name);

        // Key fallback chain: explicit id, slug, name, coordinate pair.
        let key = p
            .id
            .as_ref()
            .map(value_to_string)
            .and_then(|s| non_blank(Some(s)))
            .or_else(|| non_blank(p.slug))
            .or_else(|| raw_name.clone())
            .unwrap_or_else(|| format!("{lon},{lat}"));

        let before_after = p.before_after.and_then(|ba| {
            match (non_blank(ba.before), non_blank(ba.after)) {
                (Some(before), Some(after)) => Some(BeforeAfter { before, after }),
                _ => None,
            }
        });

        Some(Self {
            key,
            name: raw_name.unwrap_or_else(|| UNNAMED.to_owned()),
            year: p.year.as_ref().and_then(parse_year),
            era: non_blank(p.era).unwrap_or_else(|| UNSPECIFIED.to_owned()),
            style: non_blank(p.style).unwrap_or_else(|| UNSPECIFIED.to_owned()),
            status: non_blank(p.status).unwrap_or_else(|| UNSPECIFIED.to_owned()),
            story: non_blank(p.story).unwrap_or_else(|| NO_STORY.to_owned()),
            lon,
            lat,
            image: non_blank(p.image),
            gallery: p.gallery.unwrap_or_default(),
            before_after,
            audio: non_blank(p.audio),
            link: non_blank(p.link),
        })
    }
}
