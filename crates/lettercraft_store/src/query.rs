//! URL query-string sync for form values.
//!
//! Values travel as plain `key=value` pairs keyed by variable id, plus a
//! `template` pair naming the active template. Each value is
//! percent-encoded once.

use std::collections::BTreeMap;

use tracing::debug;
use url::{form_urlencoded, Url};

use lettercraft_templates::ValueMap;

use crate::error::StoreResult;

/// Query parameter carrying the active template id.
pub const TEMPLATE_PARAM: &str = "template";

/// Decode the query pairs of a full URL or a bare query string.
///
/// Repeated keys keep the last value.
pub fn parse_query(input: &str) -> ValueMap {
    let input = input.trim();
    if let Ok(url) = Url::parse(input) {
        return url.query_pairs().into_owned().collect();
    }

    let query = input.split_once('?').map_or(input, |(_, q)| q);
    let query = query.split_once('#').map_or(query, |(q, _)| q);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Set `params` on `base`.
///
/// Params with a non-empty trimmed value are set to the trimmed value; the
/// rest are removed. With `replace`, any query already on `base` is
/// dropped first. Keys are written in sorted order.
pub fn build_url<'a, I>(base: &str, params: I, replace: bool) -> StoreResult<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut url = Url::parse(base)?;

    let mut pairs: Vec<(String, String)> = if replace {
        Vec::new()
    } else {
        url.query_pairs().into_owned().collect()
    };

    let params: BTreeMap<&str, &str> = params.into_iter().collect();
    for (key, value) in params {
        pairs.retain(|(k, _)| k != key);
        let value = value.trim();
        if !value.is_empty() {
            pairs.push((key.to_string(), value.to_string()));
        }
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    debug!("Built URL {}", url);
    Ok(url.to_string())
}

/// URL that reopens the form with `values` and the given template.
///
/// Any query or fragment already on `base` is dropped.
pub fn shareable_url(
    base: &str,
    values: &ValueMap,
    template_id: Option<&str>,
) -> StoreResult<String> {
    let params = values
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .chain(template_id.map(|id| (TEMPLATE_PARAM, id)));
    let mut page = Url::parse(base)?;
    page.set_fragment(None);
    build_url(page.as_str(), params, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_url() {
        let values = parse_query(
            "https://example.com/letter?fullName=A.%20Lee&techStack=Go%2C+PostgreSQL&template=upwork",
        );
        assert_eq!(values["fullName"], "A. Lee");
        assert_eq!(values["techStack"], "Go, PostgreSQL");
        assert_eq!(values[TEMPLATE_PARAM], "upwork");
    }

    #[test]
    fn test_parse_bare_query() {
        assert_eq!(parse_query("?position=QA")["position"], "QA");
        assert_eq!(parse_query("position=QA&position=Dev")["position"], "Dev");
        assert_eq!(parse_query("/letter?a=1#top")["a"], "1");
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_build_url_skips_empty_and_trims() {
        let url = build_url(
            "https://example.com/letter",
            [("position", "  Engineer "), ("companyName", "   "), ("email", "")],
            true,
        )
        .unwrap();
        assert_eq!(url, "https://example.com/letter?position=Engineer");
    }

    #[test]
    fn test_build_url_merge_and_replace() {
        let base = "https://example.com/letter?keep=1&position=Old";
        let merged = build_url(base, [("position", "New")], false).unwrap();
        assert_eq!(merged, "https://example.com/letter?keep=1&position=New");

        let cleared = build_url(base, [("position", "")], false).unwrap();
        assert_eq!(cleared, "https://example.com/letter?keep=1");

        let replaced = build_url(base, [("position", "New")], true).unwrap();
        assert_eq!(replaced, "https://example.com/letter?position=New");

        let empty = build_url(base, std::iter::empty(), true).unwrap();
        assert_eq!(empty, "https://example.com/letter");
    }

    #[test]
    fn test_build_url_rejects_relative_base() {
        assert!(build_url("/letter", [("a", "b")], true).is_err());
    }

    #[test]
    fn test_shareable_url_round_trips_through_parse() {
        let mut values = ValueMap::new();
        values.insert("companyName".to_string(), "Acme & Sons".to_string());
        values.insert("techStack".to_string(), "C#, .NET Core".to_string());
        values.insert("phone".to_string(), String::new());

        let url = shareable_url("https://example.com/", &values, Some("regular")).unwrap();
        let parsed = parse_query(&url);
        assert_eq!(parsed["companyName"], "Acme & Sons");
        assert_eq!(parsed["techStack"], "C#, .NET Core");
        assert_eq!(parsed[TEMPLATE_PARAM], "regular");
        assert!(!parsed.contains_key("phone"));
    }

    #[test]
    fn test_shareable_url_drops_base_query() {
        let mut values = ValueMap::new();
        values.insert("position".to_string(), "QA".to_string());

        let url = shareable_url(
            "https://example.com/letter?companyName=Stale&utm=mail#form",
            &values,
            None,
        )
        .unwrap();
        assert_eq!(url, "https://example.com/letter?position=QA");
    }
}
