use crate::models::PropertyRecord;
use std::collections::BTreeMap;

/// Cities recognised when no catalog has been loaded
const DEFAULT_CITIES: &[&str] = &["pune", "mumbai"];

/// Placeholder the loader uses for slugs it cannot split
const UNKNOWN_CITY: &str = "unknown";

/// Recognised city names, keyed by lower-case form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityVocabulary {
    cities: BTreeMap<String, String>,
}

impl CityVocabulary {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cities = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|key| !key.is_empty() && key != UNKNOWN_CITY)
            .map(|key| {
                let canonical = capitalize(&key);
                (key, canonical)
            })
            .collect();

        Self { cities }
    }

    /// Distinct cities present in the catalog
    pub fn from_records(records: &[PropertyRecord]) -> Self {
        Self::from_names(records.iter().filter_map(|r| r.city.as_deref()))
    }

    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.cities
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.canonical(name).is_some()
    }

    /// Lower-case keys, longest first so multi-word names win alternations
    pub fn keys_longest_first(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.cities.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        keys
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl Default for CityVocabulary {
    fn default() -> Self {
        Self::from_names(DEFAULT_CITIES)
    }
}

/// Upper-case the first character, lower-case the rest
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_in(city: Option<&str>) -> PropertyRecord {
        PropertyRecord {
            project_name: "Test".to_string(),
            city: city.map(str::to_string),
            locality: None,
            bhk: None,
            price: Some(1),
            status: None,
            carpet_area: None,
            bathrooms: None,
            furnished_type: None,
            parking_type: None,
            possession_date: None,
            slug: "test".to_string(),
        }
    }

    #[test]
    fn test_default_vocabulary() {
        let vocabulary = CityVocabulary::default();
        assert_eq!(vocabulary.len(), 2);
        assert_eq!(vocabulary.canonical("PUNE"), Some("Pune"));
        assert_eq!(vocabulary.canonical("mumbai"), Some("Mumbai"));
        assert!(!vocabulary.contains("delhi"));
    }

    #[test]
    fn test_vocabulary_from_records() {
        let records = vec![
            record_in(Some("Pune")),
            record_in(Some("Bangalore")),
            record_in(Some("pune")),
            record_in(Some("Unknown")),
            record_in(None),
        ];

        let vocabulary = CityVocabulary::from_records(&records);
        assert_eq!(vocabulary.len(), 2);
        assert_eq!(vocabulary.canonical("bangalore"), Some("Bangalore"));
        assert!(!vocabulary.contains("unknown"));
    }

    #[test]
    fn test_keys_longest_first() {
        let vocabulary = CityVocabulary::from_names(["mumbai", "navi mumbai", "pune"]);
        assert_eq!(
            vocabulary.keys_longest_first(),
            vec!["navi mumbai", "mumbai", "pune"]
        );
        assert_eq!(vocabulary.canonical("Navi Mumbai"), Some("Navi mumbai"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("pUNE"), "Pune");
        assert_eq!(capitalize(""), "");
    }
}
