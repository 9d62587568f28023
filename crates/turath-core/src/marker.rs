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

//! Marker state: the key → visual-state table behind the map pane.
//!
//! The index is built once per data load; entries are never added or removed
//! afterwards — only their visibility and highlight flags mutate. The
//! rendering layer reads this table every frame and owns no marker state of
//! its own.

use std::collections::HashMap;

use crate::dataset::Dataset;

/// Marker color family, derived from the building's status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerPalette {
    #[default]
    Default,
    /// Status mentions a threat keyword (مهدد / خطر).
    Threatened,
    /// Status mentions restoration (مرمم / تم ترميم).
    Restored,
}

impl MarkerPalette {
    /// Map a status value onto a palette. Unrecognized statuses (including
    /// the unspecified sentinel) use the default palette.
    #[must_use]
    pub fn for_status(status: &str) -> Self {
        if status.contains("مهدد") || status.contains("خطر") {
            Self::Threatened
        } else if status.contains("مرمم") || status.contains("تم ترميم") {
            Self::Restored
        } else {
            Self::Default
        }
    }

    /// Fill color as RGB. The rendering layer converts to its own color type.
    #[must_use]
    pub fn fill_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Default => (0xc8, 0xa8, 0x6a),
            Self::Threatened => (0xe0, 0x7a, 0x5f),
            Self::Restored => (0x81, 0xb2, 0x9a),
        }
    }
}

/// Visual state of one marker.
#[derive(Debug, Clone, Copy)]
pub struct MarkerState {
    pub visible: bool,
    pub highlighted: bool,
    pub palette: MarkerPalette,
}

/// Key → marker-state lookup with the single-highlight invariant.
#[derive(Debug, Default)]
pub struct MarkerIndex {
    markers: HashMap<String, MarkerState>,
    highlighted: Option<String>,
}

impl MarkerIndex {
    /// Build the index for a freshly loaded dataset: every marker visible,
    /// nothing highlighted.
    #[must_use]
    pub fn build(dataset: &Dataset) -> Self {
        let markers = dataset
            .buildings()
            .iter()
            .map(|b| {
                (
                    b.key.clone(),
                    MarkerState {
                        visible: true,
                        highlighted: false,
                        palette: MarkerPalette::for_status(&b.status),
                    },
                )
            })
            .collect();
        Self {
            markers,
            highlighted: None,
        }
    }

    /// Highlight the marker for `key`, restoring the previous highlight (if
    /// different) to its base style. Returns false for unknown keys, which
    /// leave the index untouched.
    pub fn select(&mut self, key: &str) -> bool {
        if !self.markers.contains_key(key) {
            return false;
        }
        if let Some(previous) = self.highlighted.take() {
            if let Some(state) = self.markers.get_mut(&previous) {
                state.highlighted = false;
            }
        }
        if let Some(state) = self.markers.get_mut(key) {
            state.highlighted = true;
        }
        self.highlighted = Some(key.to_owned());
        true
    }

    /// Show exactly the markers whose key is in `keys`, hide the rest.
    ///
    /// Hidden markers stay in the index, just visually suppressed. If the
    /// highlighted marker becomes hidden the highlight reference is cleared;
    /// no new selection is made automatically. Idempotent.
    pub fn sync_visibility<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let allowed: std::collections::HashSet<&str> = keys.into_iter().collect();
        for (key, state) in &mut self.markers {
            state.visible = allowed.contains(key.as_str());
        }
        if let Some(ref current) = self.highlighted {
            if !allowed.contains(current.as_str()) {
                if let Some(state) = self.markers.get_mut(current) {
                    state.highlighted = false;
                }
                self.highlighted = None;
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MarkerState> {
        self.markers.get(key)
    }

    /// Key of the currently highlighted marker, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
