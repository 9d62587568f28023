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

//! Shareable selection links.
//!
//! The selected building is addressed by an `id` query parameter on the
//! gazetteer's page URL (with a legacy `#fragment` form still accepted when
//! reading). The desktop viewer copies these links to the clipboard and
//! accepts them on the command line to restore a selection at startup.
//! Malformed links simply yield no selection — never an error.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters that cannot appear raw inside a query value.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'%')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'=')
    .add(b'?');

/// Build a share link for `key` on top of `base`, replacing any existing
/// `id` parameter and dropping any fragment. Other query parameters are
/// preserved.
#[must_use]
pub fn share_url(base: &str, key: &str) -> String {
    let without_fragment = base.split('#').next().unwrap_or(base);
    let mut parts = without_fragment.splitn(2, '?');
    let page = parts.next().unwrap_or(without_fragment);
    let query = parts.next().unwrap_or("");

    let encoded_key = utf8_percent_encode(key, QUERY_VALUE).to_string();
    let mut pairs: Vec<String> = query
        .split('&')
        .filter(|p| !p.is_empty() && !p.starts_with("id="))
        .map(str::to_owned)
        .collect();
    pairs.push(format!("id={encoded_key}"));

    format!("{page}?{}", pairs.join("&"))
}

/// Extract the selected key from a share link: the `id` query parameter
/// first, then the legacy fragment form. Returns `None` for anything
/// malformed or absent.
#[must_use]
pub fn parse_selection(url: &str) -> Option<String> {
    let (before_fragment, fragment) = match url.split_once('#') {
        Some((head, frag)) => (head, Some(frag)),
        None => (url, None),
    };

    if let Some((_, query)) = before_fragment.split_once('?') {
        for pair in query.split('&') {
            if let Some(value) = pair.strip_prefix("id=") {
                return decode_non_empty(value);
            }
        }
    }

    fragment.and_then(decode_non_empty)
}

fn decode_non_empty(value: &str) -> Option<String> {
    let decoded = percent_decode_str(value).decode_utf8().ok()?;
    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://turath.example.org/map";

    #[test]
    fn test_round_trip() {
        let url = share_url(BASE, "qasr-1890");
        assert_eq!(parse_selection(&url).as_deref(), Some("qasr-1890"));
    }

    #[test]
    fn test_round_trip_arabic_key() {
        let url = share_url(BASE, "قلعة البرج");
        assert_eq!(parse_selection(&url).as_deref(), Some("قلعة البرج"));
    }

    #[test]
    fn test_existing_id_is_replaced_and_params_kept() {
        let url = share_url("https://turath.example.org/map?lang=ar&id=old", "new");
        assert_eq!(url, "https://turath.example.org/map?lang=ar&id=new");
    }

    #[test]
    fn test_fragment_is_dropped_when_writing() {
        let url = share_url("https://turath.example.org/map#saraya", "hosh");
        assert!(!url.contains('#'));
        assert_eq!(parse_selection(&url).as_deref(), Some("hosh"));
    }

    #[test]
    fn test_legacy_fragment_is_read() {
        assert_eq!(
            parse_selection("https://turath.example.org/map#saraya").as_deref(),
            Some("saraya")
        );
        // Query parameter wins over the fragment.
        assert_eq!(
            parse_selection("https://turath.example.org/map?id=hosh#saraya").as_deref(),
            Some("hosh")
        );
    }

    #[test]
    fn test_malformed_links_yield_no_selection() {
        assert_eq!(parse_selection("https://turath.example.org/map"), None);
        assert_eq!(parse_selection("https://turath.example.org/map?id="), None);
        assert_eq!(parse_selection("https://turath.example.org/map#"), None);
        assert_eq!(parse_selection("?id=%FF"), None);
        assert_eq!(parse_selection(""), None);
    }
}
