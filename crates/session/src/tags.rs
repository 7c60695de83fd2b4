//! Satellite tag filter.
//!
//! An ordered set of unique satellite names chosen by the user, mapped
//! through the static table to platform ids at query time. An empty set
//! means no filter.

use aetheris_common::tables::{platform_id_for_tag, SATELLITE_SUGGESTIONS};

#[derive(Debug, Default)]
pub struct TagFilter {
    selected: Vec<String>,
}

impl TagFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suggestions matching the typed filter, excluding already-selected
    /// tags. An empty filter lists everything still selectable.
    pub fn suggestions(&self, filter: &str) -> Vec<&'static str> {
        let filter = filter.to_lowercase();
        SATELLITE_SUGGESTIONS
            .iter()
            .copied()
            .filter(|s| s.to_lowercase().contains(&filter))
            .filter(|s| !self.selected.iter().any(|t| t == s))
            .collect()
    }

    /// Select a tag. Duplicates are ignored; insertion order is kept.
    pub fn select(&mut self, tag: &str) {
        if !self.selected.iter().any(|t| t == tag) {
            self.selected.push(tag.to_string());
        }
    }

    /// Enter-key submission: selects only on a case-insensitive exact
    /// match against the suggestion list.
    pub fn submit(&mut self, input: &str) -> bool {
        let input = input.trim();
        let matched = SATELLITE_SUGGESTIONS
            .iter()
            .find(|s| s.eq_ignore_ascii_case(input));

        match matched {
            Some(tag) if !self.selected.iter().any(|t| t == tag) => {
                self.selected.push(tag.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, tag: &str) {
        self.selected.retain(|t| t != tag);
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Platform ids for the current tags, in selection order. Tags with no
    /// mapping contribute nothing.
    pub fn platform_ids(&self) -> Vec<String> {
        self.selected
            .iter()
            .filter_map(|tag| platform_id_for_tag(tag))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_is_ordered_and_unique() {
        let mut tags = TagFilter::new();
        tags.select("Sentinel-2");
        tags.select("CBERS4A");
        tags.select("Sentinel-2");
        assert_eq!(tags.selected(), &["Sentinel-2", "CBERS4A"]);
    }

    #[test]
    fn test_suggestions_exclude_selected() {
        let mut tags = TagFilter::new();
        tags.select("Sentinel-2");
        let suggestions = tags.suggestions("sentinel");
        assert!(suggestions.contains(&"Sentinel-1"));
        assert!(!suggestions.contains(&"Sentinel-2"));
    }

    #[test]
    fn test_submit_requires_exact_match() {
        let mut tags = TagFilter::new();
        assert!(!tags.submit("Sentinel"));
        assert!(tags.submit("sentinel-2"));
        assert_eq!(tags.selected(), &["Sentinel-2"]);
        // resubmitting the same tag is a no-op
        assert!(!tags.submit("Sentinel-2"));
    }

    #[test]
    fn test_remove() {
        let mut tags = TagFilter::new();
        tags.select("Sentinel-2");
        tags.select("CBERS4A");
        tags.remove("Sentinel-2");
        assert_eq!(tags.selected(), &["CBERS4A"]);
    }

    #[test]
    fn test_platform_ids_mapping() {
        let mut tags = TagFilter::new();
        tags.select("Sentinel-2");
        tags.select("MODIS Terra/Aqua");
        assert_eq!(tags.platform_ids(), vec!["sentinel2", "modis"]);
    }

    #[test]
    fn test_empty_set_means_no_filter() {
        let tags = TagFilter::new();
        assert!(tags.is_empty());
        assert!(tags.platform_ids().is_empty());
    }
}
