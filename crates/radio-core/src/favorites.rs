//! Session-scoped favorites, keyed by station identifier.

use std::collections::HashSet;

use crate::station::Station;

/// Insertion-ordered set of favorite stations.
///
/// Equality ignores order: two collections are equal when they hold the same
/// identifiers.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    entries: Vec<Station>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `station` if present, append it otherwise.
    /// Returns `true` when the station is a favorite afterwards.
    pub fn toggle(&mut self, station: &Station) -> bool {
        if let Some(pos) = self.entries.iter().position(|s| s.id == station.id) {
            self.entries.remove(pos);
            false
        } else {
            self.entries.push(station.clone());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Station> {
        self.entries.iter()
    }

    fn ids(&self) -> HashSet<&str> {
        self.entries.iter().map(|s| s.id.as_str()).collect()
    }
}

impl PartialEq for Favorites {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.ids() == other.ids()
    }
}

impl Eq for Favorites {}

impl<'a> IntoIterator for &'a Favorites {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(id: &str) -> Station {
        Station {
            id: id.to_string(),
            name: id.to_uppercase(),
            url: format!("http://{}", id),
            ..Station::default()
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut fav = Favorites::new();
        assert!(fav.toggle(&st("a")));
        assert!(fav.contains("a"));
        assert!(!fav.toggle(&st("a")));
        assert!(!fav.contains("a"));
        assert!(fav.is_empty());
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut fav = Favorites::new();
        fav.toggle(&st("a"));
        fav.toggle(&st("b"));
        fav.toggle(&st("c"));
        let before = fav.clone();

        // absent station: add then remove
        fav.toggle(&st("d"));
        fav.toggle(&st("d"));
        assert_eq!(fav, before);

        // present station: remove then re-add (moves to the end, same set)
        fav.toggle(&st("a"));
        fav.toggle(&st("a"));
        assert_eq!(fav, before);
    }

    #[test]
    fn test_keyed_by_id_not_name() {
        let mut fav = Favorites::new();
        let mut renamed = st("a");
        renamed.name = "Something Else".into();
        fav.toggle(&st("a"));
        assert!(!fav.toggle(&renamed));
        assert!(fav.is_empty());
    }

    #[test]
    fn test_iteration_is_insertion_order() {
        let mut fav = Favorites::new();
        for id in ["c", "a", "b"] {
            fav.toggle(&st(id));
        }
        let ids: Vec<&str> = fav.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
