//! Filter engine and category extraction.
//!
//! Both are pure functions over a station slice; callers own the state and
//! re-run them whenever an input changes.

use std::collections::HashSet;

use crate::station::Station;

/// Maximum number of categories offered in the picker.
pub const CATEGORY_LIMIT: usize = 15;

/// Case-insensitive substring test.  An empty needle always matches.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Does `station` satisfy both criteria?
///
/// `search_text` is matched against the name, `category` against the raw tag
/// string (substring, so `"pop"` also matches `"k-pop"`).
pub fn station_matches(station: &Station, search_text: &str, category: &str) -> bool {
    contains_ci(&station.name, search_text) && contains_ci(&station.tags, category)
}

/// Stations matching both criteria, in their original order.
pub fn filter_stations<'a, I>(stations: I, search_text: &str, category: &str) -> Vec<Station>
where
    I: IntoIterator<Item = &'a Station>,
{
    stations
        .into_iter()
        .filter(|s| station_matches(s, search_text, category))
        .cloned()
        .collect()
}

/// First `limit` distinct, non-empty, trimmed tags in first-seen order.
pub fn extract_categories(stations: &[Station], limit: usize) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for tag in stations.iter().flat_map(|s| s.tag_list()) {
        if out.len() >= limit {
            break;
        }
        if seen.insert(tag) {
            out.push(tag.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(name: &str, tags: &str) -> Station {
        Station {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            tags: tags.to_string(),
            url: format!("http://{}", name.replace(' ', "")),
            ..Station::default()
        }
    }

    fn names(v: &[Station]) -> Vec<&str> {
        v.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let all = vec![st("B", "x"), st("A", ""), st("C", "y")];
        assert_eq!(filter_stations(&all, "", ""), all);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let all = vec![st("Radio Mirchi", ""), st("Big FM", ""), st("mirchi love", "")];
        assert_eq!(
            names(&filter_stations(&all, "MIRCHI", "")),
            vec!["Radio Mirchi", "mirchi love"]
        );
    }

    #[test]
    fn test_category_matches_tag_substring() {
        let all = vec![
            st("One", "Bollywood,Hindi"),
            st("Two", "classical"),
            st("Three", "k-pop"),
            st("Four", "Pop"),
        ];
        assert_eq!(names(&filter_stations(&all, "", "pop")), vec!["Three", "Four"]);
        assert_eq!(names(&filter_stations(&all, "", "HINDI")), vec!["One"]);
    }

    #[test]
    fn test_criteria_compose_with_and() {
        let all = vec![
            st("Radio One", "pop"),
            st("Radio Two", "jazz"),
            st("Other", "pop"),
        ];
        assert_eq!(names(&filter_stations(&all, "radio", "pop")), vec!["Radio One"]);
    }

    #[test]
    fn test_filter_preserves_order_and_is_subset() {
        let all: Vec<Station> = (0..20)
            .map(|i| st(&format!("Station {}", i), if i % 3 == 0 { "news" } else { "music" }))
            .collect();
        let out = filter_stations(&all, "1", "music");
        let mut last = None;
        for s in &out {
            let pos = all.iter().position(|a| a == s).unwrap();
            assert!(last.map_or(true, |l| pos > l));
            last = Some(pos);
            assert!(station_matches(s, "1", "music"));
        }
        let expected = all.iter().filter(|s| station_matches(s, "1", "music")).count();
        assert_eq!(out.len(), expected);
    }

    #[test]
    fn test_whitespace_search_is_not_trimmed() {
        let all = vec![st("Radio City", ""), st("Ishq", "")];
        assert_eq!(names(&filter_stations(&all, " ", "")), vec!["Radio City"]);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let all = vec![st("Radio X", "Pop")];
        assert!(filter_stations(&all, "zzz", "").is_empty());
    }

    #[test]
    fn test_extract_categories_first_seen_order() {
        let all = vec![st("a", "Pop, Hindi"), st("b", "Hindi, Classical")];
        assert_eq!(extract_categories(&all, CATEGORY_LIMIT), vec!["Pop", "Hindi", "Classical"]);
    }

    #[test]
    fn test_extract_categories_skips_empty_and_caps() {
        let tags: String = (0..30).map(|i| format!("t{}, ,", i)).collect();
        let all = vec![st("a", ""), st("b", &tags), st("c", "t0,t1")];
        let cats = extract_categories(&all, CATEGORY_LIMIT);
        assert_eq!(cats.len(), CATEGORY_LIMIT);
        assert_eq!(cats[0], "t0");
        assert_eq!(cats[14], "t14");
        assert!(cats.iter().all(|c| !c.is_empty()));
        let distinct: HashSet<&String> = cats.iter().collect();
        assert_eq!(distinct.len(), cats.len());
    }

    #[test]
    fn test_extract_categories_is_case_sensitive() {
        let all = vec![st("a", "pop,Pop")];
        assert_eq!(extract_categories(&all, CATEGORY_LIMIT), vec!["pop", "Pop"]);
    }
}
