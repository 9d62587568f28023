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

//! The filter/sort engine: a pure function from criteria and a dataset to
//! an ordered subset of buildings.
//!
//! Filtering is conjunctive across independent predicates; sorting is stable
//! so ties keep their original relative order.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

use crate::building::Building;
use crate::dataset::Dataset;

/// Sort key for the result list. Name ordering uses [`collate`]; year
/// ordering places buildings without a year last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Year,
}

/// One categorical axis of the filter: unconstrained, or an exact value
/// (post-default-substitution, so the sentinel is selectable like any other).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

/// The process-wide filter/sort state driven by the explore controls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Criteria {
    /// Case-insensitive substring query over name, era, style and status.
    pub query: String,
    pub era: CategoryFilter,
    pub style: CategoryFilter,
    pub status: CategoryFilter,
    pub sort: SortKey,
    /// Inclusive upper bound on the construction year. Buildings without a
    /// parseable year pass unconditionally.
    pub year_ceiling: Option<i32>,
}

impl Criteria {
    /// Criteria that pass every building: empty query, all categoricals
    /// unconstrained, ceiling at the dataset maximum.
    #[must_use]
    pub fn unconstrained(dataset: &Dataset) -> Self {
        Self {
            year_ceiling: dataset.year_max(),
            ..Self::default()
        }
    }

    /// Whether one building passes all predicates.
    #[must_use]
    pub fn matches(&self, building: &Building) -> bool {
        let q = normalize_lower(self.query.trim());
        let pass_query = q.is_empty()
            || normalize_lower(&building.name).contains(&q)
            || normalize_lower(&building.era).contains(&q)
            || normalize_lower(&building.style).contains(&q)
            || normalize_lower(&building.status).contains(&q);

        let pass_year = match (self.year_ceiling, building.year) {
            (Some(ceiling), Some(year)) => year <= ceiling,
            _ => true,
        };

        pass_query
            && self.era.matches(&building.era)
            && self.style.matches(&building.style)
            && self.status.matches(&building.status)
            && pass_year
    }
}

/// Order two strings for the dataset's language.
///
/// There is no locale-aware collator in std; NFC normalization followed by a
/// code-point comparison orders Arabic letters correctly for the fields this
/// dataset carries.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    let a: String = a.nfc().collect();
    let b: String = b.nfc().collect();
    a.cmp(&b)
}

fn normalize_lower(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

/// Run the engine: filter conjunctively, then sort by the selected key.
/// Pure and deterministic; no side effects.
#[must_use]
pub fn apply<'a>(criteria: &Criteria, dataset: &'a Dataset) -> Vec<&'a Building> {
    let mut result: Vec<&Building> = dataset
        .buildings()
        .iter()
        .filter(|b| criteria.matches(b))
        .collect();

    match criteria.sort {
        // Missing years sort after every defined year.
        SortKey::Year => result.sort_by_key(|b| b.year.unwrap_or(i32::MAX)),
        SortKey::Name => result.sort_by(|a, b| collate(&a.name, &b.name)),
    }

    result
}

fn distinct_sorted<F>(dataset: &Dataset, field: F) -> Vec<String>
where
    F: Fn(&Building) -> &str,
{
    let mut values: Vec<String> = dataset
        .buildings()
        .iter()
        .map(|b| field(b).to_owned())
        .collect();
    values.sort_by(|a, b| collate(a, b));
    values.dedup();
    values
}

/// Distinct era values present in the data, sorted for the selector.
#[must_use]
pub fn distinct_eras(dataset: &Dataset) -> Vec<String> {
    distinct_sorted(dataset, |b| &b.era)
}

/// Distinct style values present in the data, sorted for the selector.
#[must_use]
pub fn distinct_styles(dataset: &Dataset) -> Vec<String> {
    distinct_sorted(dataset, |b| &b.style)
}

/// Distinct status values present in the data, sorted for the selector.
#[must_use]
pub fn distinct_statuses(dataset: &Dataset) -> Vec<String> {
    distinct_sorted(dataset, |b| &b.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::UNSPECIFIED;

    fn dataset() -> Dataset {
        Dataset::from_geojson(
            r#"{"features":[
                {"geometry":{"type":"Point","coordinates":[35.20,31.90]},
                 "properties":{"id":"qalaa","name":"قلعة البرج","year":1900,
                               "era":"عثماني","style":"حجري","status":"مرمم"}},
                {"geometry":{"type":"Point","coordinates":[35.21,31.91]},
                 "properties":{"id":"hosh","name":"حوش الدار",
                               "era":"انتدابي","status":"مهدد"}},
                {"geometry":{"type":"Point","coordinates":[35.22,31.92]},
                 "properties":{"id":"saraya","name":"السرايا","year":1950,
                               "era":"عثماني"}}
            ]}"#,
        )
        .expect("test dataset parses")
    }

    #[test]
    fn test_unconstrained_returns_everything() {
        let ds = dataset();
        let all = apply(&Criteria::unconstrained(&ds), &ds);
        assert_eq!(all.len(), ds.len());
    }

    #[test]
    fn test_missing_year_passes_any_ceiling() {
        let ds = dataset();
        let criteria = Criteria {
            year_ceiling: Some(1800),
            ..Criteria::default()
        };
        let keys: Vec<&str> = apply(&criteria, &ds).iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["hosh"]);
    }

    #[test]
    fn test_ceiling_keeps_older_and_yearless() {
        // Years [1900, none, 1950] with ceiling 1920 -> exactly two results.
        let ds = dataset();
        let criteria = Criteria {
            year_ceiling: Some(1920),
            ..Criteria::default()
        };
        let result = apply(&criteria, &ds);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|b| b.key == "qalaa" || b.key == "hosh"));
    }

    #[test]
    fn test_year_sort_puts_missing_years_last() {
        let ds = dataset();
        let criteria = Criteria {
            sort: SortKey::Year,
            ..Criteria::unconstrained(&ds)
        };
        let keys: Vec<&str> = apply(&criteria, &ds).iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["qalaa", "saraya", "hosh"]);
    }

    #[test]
    fn test_arabic_query_matches_one_name() {
        let ds = dataset();
        let criteria = Criteria {
            query: "قلعة".to_owned(),
            ..Criteria::unconstrained(&ds)
        };
        let result = apply(&criteria, &ds);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].key, "qalaa");
    }

    #[test]
    fn test_query_searches_all_exposed_fields() {
        let ds = dataset();
        let criteria = Criteria {
            query: "مهدد".to_owned(),
            ..Criteria::unconstrained(&ds)
        };
        assert_eq!(apply(&criteria, &ds)[0].key, "hosh");

        let criteria = Criteria {
            query: "حجري".to_owned(),
            ..Criteria::unconstrained(&ds)
        };
        assert_eq!(apply(&criteria, &ds)[0].key, "qalaa");
    }

    #[test]
    fn test_categorical_filters_are_conjunctive() {
        let ds = dataset();
        let criteria = Criteria {
            era: CategoryFilter::Only("عثماني".to_owned()),
            status: CategoryFilter::Only("مرمم".to_owned()),
            ..Criteria::unconstrained(&ds)
        };
        let keys: Vec<&str> = apply(&criteria, &ds).iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["qalaa"]);
    }

    #[test]
    fn test_sentinel_is_a_selectable_category() {
        let ds = dataset();
        let criteria = Criteria {
            status: CategoryFilter::Only(UNSPECIFIED.to_owned()),
            ..Criteria::unconstrained(&ds)
        };
        let keys: Vec<&str> = apply(&criteria, &ds).iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["saraya"]);
    }

    #[test]
    fn test_distinct_values_are_derived_from_data() {
        let ds = dataset();
        let eras = distinct_eras(&ds);
        assert_eq!(eras.len(), 2);
        assert!(eras.contains(&"عثماني".to_owned()));
        assert!(eras.contains(&"انتدابي".to_owned()));

        let statuses = distinct_statuses(&ds);
        assert!(statuses.contains(&UNSPECIFIED.to_owned()));
    }

    #[test]
    fn test_empty_dataset_yields_empty_result() {
        let ds = Dataset::from_geojson(r#"{"features":[]}"#).unwrap();
        assert!(apply(&Criteria::unconstrained(&ds), &ds).is_empty());
    }
}
